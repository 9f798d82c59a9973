use std::sync::atomic::{AtomicU64, Ordering};
use std::thread::JoinHandle;

use crossbeam_channel::{unbounded, Sender};
use once_cell::sync::OnceCell;

use mx_abi::{ComponentId, OmxError, OmxResult, PortIndex, Role};
use mx_component::{ComponentCallbacks, ComponentHandle, ComponentOps};

use crate::command::CoreCmd;
use crate::config::CoreConfig;
use crate::discover::discover_plugins;
use crate::loader::PluginLoader;
use crate::registry::RegistryEntry;
use crate::state::CoreState;

static CORE: OnceCell<Core> = OnceCell::new();

/// The process-wide core singleton (§6 "Process globals"): lazily
/// initialised on first `Init`, behind an explicit `OnceCell` rather than a
/// raw global pointer. Every operation is a message posted to the
/// serialisation thread, answered through a oneshot reply channel.
pub struct Core {
    cmd_tx: Sender<CoreCmd>,
    _thread: JoinHandle<()>,
}

impl Core {
    /// Returns the process singleton, spawning the serialisation thread and
    /// running plugin discovery on first access. Subsequent calls return
    /// the same instance; `Init` in an already-`Started` core is a no-op
    /// success (§4.1), handled inside the serialisation thread itself.
    pub fn get_or_init(loader: Box<dyn PluginLoader>) -> &'static Core {
        CORE.get_or_init(|| Core::spawn(CoreConfig::load(), loader))
    }

    pub fn get_or_init_with_config(config: CoreConfig, loader: Box<dyn PluginLoader>) -> &'static Core {
        CORE.get_or_init(|| Core::spawn(config, loader))
    }

    fn spawn(config: CoreConfig, loader: Box<dyn PluginLoader>) -> Core {
        let (cmd_tx, cmd_rx) = unbounded::<CoreCmd>();
        let thread = std::thread::Builder::new()
            .name("mx-core".to_string())
            .spawn(move || {
                let mut inner = CoreInner::new(config, loader);
                for cmd in cmd_rx {
                    inner.handle(cmd);
                }
            })
            .expect("failed to spawn core serialisation thread");
        Core {
            cmd_tx,
            _thread: thread,
        }
    }

    fn call<T>(&self, build: impl FnOnce(Sender<OmxResult<T>>) -> CoreCmd) -> OmxResult<T> {
        let (reply_tx, reply_rx) = crossbeam_channel::bounded(1);
        let cmd = build(reply_tx);
        self.cmd_tx
            .send(cmd)
            .map_err(|_| OmxError::Undefined)?;
        reply_rx.recv().map_err(|_| OmxError::Undefined)?
    }

    pub fn init(&self) -> OmxResult<()> {
        self.call(|reply| CoreCmd::Init { reply })
    }

    pub fn deinit(&self) -> OmxResult<()> {
        self.call(|reply| CoreCmd::Deinit { reply })
    }

    pub fn component_name_enum(&self, index: u32) -> OmxResult<String> {
        self.call(|reply| CoreCmd::ComponentNameEnum { index, reply })
    }

    /// Looks up `name` in the registry, instantiates it through the
    /// configured `PluginLoader`, installs `callbacks` and records the live
    /// handle (§4.1: "installs the caller's callbacks, and records the live
    /// mapping handle → registry-entry").
    pub fn get_handle(&self, name: &str, callbacks: Box<dyn ComponentCallbacks>) -> OmxResult<ComponentHandle> {
        self.call(|reply| CoreCmd::GetHandle {
            name: name.to_string(),
            callbacks,
            reply,
        })
    }

    pub fn free_handle(&self, component: ComponentId) -> OmxResult<()> {
        self.call(|reply| CoreCmd::FreeHandle { component, reply })
    }

    pub fn setup_tunnel(
        &self,
        out_component: ComponentId,
        out_port: PortIndex,
        in_component: ComponentId,
        in_port: PortIndex,
    ) -> OmxResult<()> {
        self.call(|reply| CoreCmd::SetupTunnel {
            out_component,
            out_port,
            in_component,
            in_port,
            reply,
        })
    }

    pub fn teardown_tunnel(
        &self,
        out_component: ComponentId,
        out_port: PortIndex,
        in_component: ComponentId,
        in_port: PortIndex,
    ) -> OmxResult<()> {
        self.call(|reply| CoreCmd::TeardownTunnel {
            out_component,
            out_port,
            in_component,
            in_port,
            reply,
        })
    }

    pub fn component_of_role_enum(&self, role: Role, index: u32) -> OmxResult<String> {
        self.call(|reply| CoreCmd::ComponentOfRoleEnum { role, index, reply })
    }

    pub fn role_of_component_enum(&self, name: &str, index: u32) -> OmxResult<Role> {
        self.call(|reply| CoreCmd::RoleOfComponentEnum {
            name: name.to_string(),
            index,
            reply,
        })
    }
}

/// State owned exclusively by the serialisation thread.
struct CoreInner {
    state: CoreState,
    config: CoreConfig,
    loader: Box<dyn PluginLoader>,
    registry: Vec<RegistryEntry>,
    live_handles: std::collections::HashMap<ComponentId, ComponentHandle>,
    next_component_id: AtomicU64,
}

impl CoreInner {
    fn new(config: CoreConfig, loader: Box<dyn PluginLoader>) -> Self {
        Self {
            state: CoreState::Stopped,
            config,
            loader,
            registry: Vec::new(),
            live_handles: std::collections::HashMap::new(),
            next_component_id: AtomicU64::new(1),
        }
    }

    fn handle(&mut self, cmd: CoreCmd) {
        match cmd {
            CoreCmd::Init { reply } => {
                self.do_init();
                let _ = reply.send(Ok(()));
            }
            CoreCmd::Deinit { reply } => {
                self.do_deinit();
                let _ = reply.send(Ok(()));
            }
            CoreCmd::ComponentNameEnum { index, reply } => {
                let result = self
                    .registry
                    .get(index as usize)
                    .map(|e| e.component_name.clone())
                    .ok_or(OmxError::NoMore);
                let _ = reply.send(result);
            }
            CoreCmd::GetHandle { name, callbacks, reply } => {
                let result = self.do_get_handle(&name, callbacks);
                let _ = reply.send(result);
            }
            CoreCmd::FreeHandle { component, reply } => {
                self.live_handles.remove(&component);
                let _ = reply.send(Ok(()));
            }
            CoreCmd::SetupTunnel {
                out_component,
                out_port,
                in_component,
                in_port,
                reply,
            } => {
                let result = self.do_setup_tunnel(out_component, out_port, in_component, in_port);
                let _ = reply.send(result);
            }
            CoreCmd::TeardownTunnel {
                out_component,
                out_port,
                in_component,
                in_port,
                reply,
            } => {
                let result = self.do_teardown_tunnel(out_component, out_port, in_component, in_port);
                let _ = reply.send(result);
            }
            CoreCmd::ComponentOfRoleEnum { role, index, reply } => {
                let result = self
                    .registry
                    .iter()
                    .filter(|e| e.supports_role(&role))
                    .nth(index as usize)
                    .map(|e| e.component_name.clone())
                    .ok_or(OmxError::NoMore);
                let _ = reply.send(result);
            }
            CoreCmd::RoleOfComponentEnum { name, index, reply } => {
                let result = self
                    .registry
                    .iter()
                    .find(|e| e.component_name == name)
                    .ok_or(OmxError::ComponentNotFound)
                    .and_then(|e| e.role_list.get(index as usize).cloned().ok_or(OmxError::NoMore));
                let _ = reply.send(result);
            }
        }
    }

    fn do_init(&mut self) {
        if self.state == CoreState::Started {
            return;
        }
        self.state = CoreState::Starting;
        self.registry = discover_plugins(&self.config.core, self.loader.as_ref());
        self.state = CoreState::Started;
    }

    fn do_deinit(&mut self) {
        self.live_handles.clear();
        self.registry.clear();
        self.state = CoreState::Stopped;
    }

    fn do_get_handle(&mut self, name: &str, callbacks: Box<dyn ComponentCallbacks>) -> OmxResult<ComponentHandle> {
        let entry = self
            .registry
            .iter()
            .find(|e| e.component_name == name)
            .ok_or(OmxError::ComponentNotFound)?;
        let role = entry.role_list.first().cloned().ok_or(OmxError::ComponentNotFound)?;
        let id = ComponentId(self.next_component_id.fetch_add(1, Ordering::Relaxed));
        let handle = self
            .loader
            .instantiate(&entry.dl_path, &entry.entry_point_symbol, &role, id)?;
        handle.set_callbacks(callbacks);
        self.live_handles.insert(id, handle.clone());
        Ok(handle)
    }

    fn do_setup_tunnel(
        &mut self,
        out_component: ComponentId,
        out_port: PortIndex,
        in_component: ComponentId,
        in_port: PortIndex,
    ) -> OmxResult<()> {
        let out_handle = self.live_handles.get(&out_component).ok_or(OmxError::ComponentNotFound)?;
        let in_handle = self.live_handles.get(&in_component).ok_or(OmxError::ComponentNotFound)?;
        out_handle.setup_tunnel_with(out_port, in_handle, in_port)
    }

    fn do_teardown_tunnel(
        &mut self,
        out_component: ComponentId,
        out_port: PortIndex,
        in_component: ComponentId,
        in_port: PortIndex,
    ) -> OmxResult<()> {
        let out_handle = self.live_handles.get(&out_component).ok_or(OmxError::ComponentNotFound)?;
        let in_handle = self.live_handles.get(&in_component).ok_or(OmxError::ComponentNotFound)?;
        out_handle.teardown_tunnel_with(out_port, in_handle, in_port)
    }
}
