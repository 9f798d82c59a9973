use std::sync::Arc;

use mx_abi::{Command, ComponentId, IndexType, OmxError, OmxResult, PortIndex, Role, State};
use mx_buffer::BufferHeader;
use mx_fsm::Fsm;
use mx_kernel::{Kernel, KernelCmd};
use mx_port::Direction;
use mx_processor::Processor;
use mx_servant::ServantLoop;
use mx_tunnel::{setup_tunnel, teardown_tunnel};
use parking_lot::Mutex;

use crate::ops::{ComponentCallbacks, ComponentOps};

/// The callback set every component starts with, before the application
/// calls `SetCallbacks`. Drops events on the floor rather than requiring
/// every constructor to thread an initial callback set through.
struct NullCallbacks;

impl ComponentCallbacks for NullCallbacks {
    fn event_handler(&mut self, _event: mx_abi::EventType, _data1: u32, _data2: u32) {}
    fn empty_buffer_done(&mut self, _header: BufferHeader) {}
    fn fill_buffer_done(&mut self, _header: BufferHeader) {}
}

/// Ties FSM, kernel and processor(s) into one component (§4.2, §5). Owns
/// the live port array (through `Kernel`), the registered application
/// callbacks, and the component's static identity (name, version, roles).
///
/// Every method here takes `&mut self`; the public vtable surface
/// (`ComponentOps`, which takes `&self` per §6's handle-keyed contract) is
/// implemented on `ComponentHandle`, whose mutex lock supplies the `&mut`
/// this struct's own methods need.
pub struct ComponentRuntime {
    name: String,
    version: (String, u32),
    roles: Vec<Role>,
    fsm: Fsm,
    kernel: Kernel,
    processors: Vec<Processor>,
    component_id: ComponentId,
    callbacks: Arc<Mutex<Box<dyn ComponentCallbacks>>>,
}

impl ComponentRuntime {
    /// `callbacks` must be the same `Arc` the caller built `fsm`'s
    /// `CallbackBridge` sink from, so that a later `set_callbacks` call
    /// (which mutates the `Arc`'s contents in place) is visible to both
    /// the FSM's event emission and this runtime's own buffer-done
    /// dispatch without re-wiring either.
    pub fn new(
        component_id: ComponentId,
        name: String,
        version: (String, u32),
        roles: Vec<Role>,
        fsm: Fsm,
        kernel: Kernel,
        processors: Vec<Processor>,
        callbacks: Arc<Mutex<Box<dyn ComponentCallbacks>>>,
    ) -> Self {
        Self {
            name,
            version,
            roles,
            fsm,
            kernel,
            processors,
            component_id,
            callbacks,
        }
    }

    /// Builds a runtime with a private, freshly-allocated no-op callback
    /// slot, wiring the FSM's event sink to the same `Arc` automatically.
    /// Convenient for constructors that don't need to observe the slot
    /// before `SetCallbacks` is called.
    pub fn new_with_default_callbacks(
        component_id: ComponentId,
        name: String,
        version: (String, u32),
        roles: Vec<Role>,
        ports: Vec<PortIndex>,
        kernel: Kernel,
        processors: Vec<Processor>,
        hook: Option<Box<dyn mx_fsm::ResourceManagerHook>>,
    ) -> Self {
        let callbacks: Arc<Mutex<Box<dyn ComponentCallbacks>>> = Arc::new(Mutex::new(Box::new(NullCallbacks)));
        let kernel_sender = kernel.sender();
        let bridge = crate::bridge::CallbackBridge::new(callbacks.clone());
        let fsm = Fsm::new(ports, kernel_sender, Box::new(bridge), hook);
        Self::new(component_id, name, version, roles, fsm, kernel, processors, callbacks)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn component_id(&self) -> ComponentId {
        self.component_id
    }

    pub fn kernel(&self) -> &Kernel {
        &self.kernel
    }

    pub fn kernel_mut(&mut self) -> &mut Kernel {
        &mut self.kernel
    }

    /// Runs every processor once against the shared kernel, then lets the
    /// kernel and FSM drain whatever their mailboxes picked up. Used by the
    /// component's own event-loop thread between `EventLoopHost` ticks.
    pub fn pump(&mut self) -> usize {
        let mut total = self.fsm.tick();
        total += self.kernel.tick();
        for processor in &mut self.processors {
            total += processor.drive(&mut self.kernel);
        }
        total += self.dispatch_buffer_done();
        total
    }

    fn set_callbacks(&self, callbacks: Box<dyn ComponentCallbacks>) {
        *self.callbacks.lock() = callbacks;
    }

    /// Headers that have finished their trip through a port are either
    /// delivered across a tunnel (if the output port has a registered relay
    /// target, §4.6 steady state) or handed back to the application (§5's
    /// "buffer-done callbacks ... arrive later via the event callback").
    /// A relay target is only ever registered on the output side of a
    /// tunnel, so a tunnelled input port with none falls through to the
    /// ordinary application dispatch below.
    fn dispatch_buffer_done(&mut self) -> usize {
        let mut count = 0;
        for index in 0..self.kernel.ports().len() {
            let port_index = PortIndex(index as u32);
            let direction = self.kernel.ports()[index].definition().direction;
            if let Some((sender, peer_index)) = self.kernel.relay_target(port_index) {
                for mut header in self.kernel.drain_in_flight_for_app(port_index) {
                    count += 1;
                    header.set_input_port(peer_index);
                    let _ = sender.post(KernelCmd::EmptyThisBuffer(header));
                }
                continue;
            }
            for mut header in self.kernel.drain_in_flight_for_app(port_index) {
                count += 1;
                let is_eos = header.is_eos();
                let mark = header.take_mark();
                let mut callbacks = self.callbacks.lock();
                match direction {
                    Direction::Input => callbacks.empty_buffer_done(header),
                    Direction::Output => callbacks.fill_buffer_done(header),
                }
                // An end-of-stream buffer also surfaces as its own event
                // (§6's `BufferFlag` event), distinct from the routine
                // empty/fill-done callback every buffer gets.
                if is_eos {
                    callbacks.event_handler(mx_abi::EventType::BufferFlag, port_index.0, mx_buffer::BufferFlags::EOS.bits());
                }
                // The mark reaches its target component here, where the
                // buffer is actually processed (handed to the application).
                if mark.is_some() {
                    callbacks.event_handler(mx_abi::EventType::Mark, port_index.0, 0);
                }
            }
        }
        count
    }

    fn get_component_version(&self) -> (String, u32) {
        self.version.clone()
    }

    fn send_command(&mut self, cmd: Command) -> OmxResult<()> {
        self.fsm.send_command(cmd, &self.kernel)
    }

    fn get_parameter(&self, port: PortIndex, index: IndexType) -> OmxResult<Vec<u8>> {
        if port.is_config() {
            self.kernel.config_port().get_parameter(index)
        } else {
            self.kernel
                .ports()
                .get(port.0 as usize)
                .ok_or(OmxError::BadPortIndex)?
                .get_parameter(index)
        }
    }

    fn set_parameter(&mut self, port: PortIndex, index: IndexType, bytes: &[u8]) -> OmxResult<()> {
        if port.is_config() {
            self.kernel.set_config_port_parameter(index, bytes)
        } else {
            let p = self
                .ports_mut()
                .get_mut(port.0 as usize)
                .ok_or(OmxError::BadPortIndex)?;
            p.set_parameter(index, bytes)
        }
    }

    fn ports_mut(&mut self) -> &mut Vec<mx_port::Port> {
        self.kernel.ports_mut()
    }

    fn get_config(&self, port: PortIndex, index: IndexType) -> OmxResult<Vec<u8>> {
        self.get_parameter(port, index)
    }

    fn set_config(&mut self, port: PortIndex, index: IndexType, bytes: &[u8]) -> OmxResult<()> {
        self.set_parameter(port, index, bytes)
    }

    fn get_state(&self) -> State {
        self.fsm.state()
    }

    /// Records this side's half of a tunnel request. A full two-sided
    /// tunnel negotiation requires both ports mutably at once, which only
    /// a caller holding both `ComponentHandle`s can provide — see
    /// `ComponentHandle::setup_tunnel_with`.
    fn component_tunnel_request(
        &mut self,
        port: PortIndex,
        peer: Option<(ComponentId, PortIndex)>,
    ) -> OmxResult<()> {
        let own_port = self
            .ports_mut()
            .get_mut(port.0 as usize)
            .ok_or(OmxError::BadPortIndex)?;
        match peer {
            None => {
                own_port.set_tunnel_peer(None);
                Ok(())
            }
            Some(_) => {
                own_port.set_tunnel_status(mx_port::TunnelStatus::ACCEPT_USE_BUFFER, true);
                Ok(())
            }
        }
    }

    fn use_buffer(&mut self, port: PortIndex, external: Vec<u8>) -> OmxResult<()> {
        self.kernel.populate(port, BufferHeader::new_using(external))
    }

    fn use_egl_image(&mut self, port: PortIndex, egl_image: Vec<u8>) -> OmxResult<()> {
        let p = self
            .ports_mut()
            .get_mut(port.0 as usize)
            .ok_or(OmxError::BadPortIndex)?;
        p.use_egl_image(&egl_image)
    }

    fn allocate_buffer(&mut self, port: PortIndex, size_bytes: usize) -> OmxResult<()> {
        self.kernel
            .populate(port, BufferHeader::new_allocated(size_bytes))
    }

    fn free_buffer(&mut self, port: PortIndex) -> OmxResult<()> {
        self.kernel.depopulate(port).map(|_| ())
    }

    fn empty_this_buffer(&mut self, header: BufferHeader) -> OmxResult<()> {
        let port = header.input_port().ok_or(OmxError::BadPortIndex)?;
        self.kernel.route_empty_this_buffer(port, header)
    }

    fn fill_this_buffer(&mut self, header: BufferHeader) -> OmxResult<()> {
        let port = header.output_port().ok_or(OmxError::BadPortIndex)?;
        self.kernel.route_fill_this_buffer(port, header)
    }

    fn component_role_enum(&self, index: u32) -> OmxResult<Role> {
        self.roles.get(index as usize).cloned().ok_or(OmxError::NoMore)
    }

    fn component_deinit(&self) -> OmxResult<()> {
        if self.get_state() != State::Loaded {
            return Err(OmxError::IncorrectStateOperation);
        }
        Ok(())
    }
}

/// The application-facing, cloneable handle to a live component instance
/// (§3's "component handle"). Internally an `Arc<Mutex<ComponentRuntime>>`:
/// every `ComponentOps` call locks, dispatches, and releases.
#[derive(Clone)]
pub struct ComponentHandle {
    inner: Arc<Mutex<ComponentRuntime>>,
}

impl ComponentHandle {
    pub fn new(runtime: ComponentRuntime) -> Self {
        Self {
            inner: Arc::new(Mutex::new(runtime)),
        }
    }

    pub fn component_id(&self) -> ComponentId {
        self.inner.lock().component_id()
    }

    pub fn name(&self) -> String {
        self.inner.lock().name().to_string()
    }

    /// Drives both sides of a tunnel setup by locking this handle and the
    /// peer handle together, then delegating to `mx_tunnel::setup_tunnel`.
    /// Once the ports themselves agree to tunnel, also registers this
    /// side's relay target with the peer's kernel mailbox sender, so
    /// `dispatch_buffer_done` can hand buffers released on `out_index`
    /// straight to the peer's `in_index` instead of to the application
    /// (§4.6 steady state).
    pub fn setup_tunnel_with(
        &self,
        out_index: PortIndex,
        peer: &ComponentHandle,
        in_index: PortIndex,
    ) -> OmxResult<()> {
        let out_id = self.component_id();
        let in_id = peer.component_id();
        let mut out_runtime = self.inner.lock();
        let mut in_runtime = peer.inner.lock();
        let peer_sender = in_runtime.kernel().sender();
        let out_port = out_runtime
            .ports_mut()
            .get_mut(out_index.0 as usize)
            .ok_or(OmxError::BadPortIndex)?;
        let in_port = in_runtime
            .ports_mut()
            .get_mut(in_index.0 as usize)
            .ok_or(OmxError::BadPortIndex)?;
        setup_tunnel(out_id, out_index, out_port, in_id, in_index, in_port)?;
        out_runtime
            .kernel_mut()
            .set_relay_target(out_index, Some((peer_sender, in_index)))
    }

    pub fn teardown_tunnel_with(
        &self,
        out_index: PortIndex,
        peer: &ComponentHandle,
        in_index: PortIndex,
    ) -> OmxResult<()> {
        let mut out_runtime = self.inner.lock();
        let mut in_runtime = peer.inner.lock();
        let out_port = out_runtime
            .ports_mut()
            .get_mut(out_index.0 as usize)
            .ok_or(OmxError::BadPortIndex)?;
        let in_port = in_runtime
            .ports_mut()
            .get_mut(in_index.0 as usize)
            .ok_or(OmxError::BadPortIndex)?;
        teardown_tunnel(out_port, in_port);
        out_runtime.kernel_mut().set_relay_target(out_index, None)
    }

    pub fn pump(&self) -> usize {
        self.inner.lock().pump()
    }

    /// Read-only introspection of a port's current tunnel peer, used by
    /// callers negotiating tunnels and by tests.
    pub fn port_tunnel_peer(&self, index: PortIndex) -> Option<mx_port::TunnelPeer> {
        self.inner
            .lock()
            .kernel()
            .ports()
            .get(index.0 as usize)
            .and_then(|p| p.tunnel_peer())
    }

    /// Read-only introspection of a port's negotiated supplier preference,
    /// used by callers and tests inspecting the outcome of `negotiate_supplier`
    /// after a tunnel has been set up.
    /// Read-only introspection of how many headers a port's pool currently
    /// holds (populated, free and in-use together), used by tests to
    /// observe flush recalling in-flight headers back to their pool.
    pub fn pool_held_count(&self, index: PortIndex) -> usize {
        self.inner
            .lock()
            .kernel()
            .ports()
            .get(index.0 as usize)
            .map(|p| p.pool().held_count())
            .unwrap_or(0)
    }

    pub fn supplier_preference(&self, index: PortIndex) -> mx_abi::BufferSupplier {
        self.inner
            .lock()
            .kernel()
            .ports()
            .get(index.0 as usize)
            .map(|p| p.definition().supplier_preference)
            .unwrap_or(mx_abi::BufferSupplier::Unspecified)
    }
}

impl ComponentOps for ComponentHandle {
    fn get_component_version(&self) -> (String, u32) {
        self.inner.lock().get_component_version()
    }

    fn send_command(&self, cmd: Command) -> OmxResult<()> {
        self.inner.lock().send_command(cmd)
    }

    fn get_parameter(&self, port: PortIndex, index: IndexType) -> OmxResult<Vec<u8>> {
        self.inner.lock().get_parameter(port, index)
    }

    fn set_parameter(&self, port: PortIndex, index: IndexType, bytes: &[u8]) -> OmxResult<()> {
        self.inner.lock().set_parameter(port, index, bytes)
    }

    fn get_config(&self, port: PortIndex, index: IndexType) -> OmxResult<Vec<u8>> {
        self.inner.lock().get_config(port, index)
    }

    fn set_config(&self, port: PortIndex, index: IndexType, bytes: &[u8]) -> OmxResult<()> {
        self.inner.lock().set_config(port, index, bytes)
    }

    fn get_state(&self) -> State {
        self.inner.lock().get_state()
    }

    fn set_callbacks(&self, callbacks: Box<dyn ComponentCallbacks>) {
        self.inner.lock().set_callbacks(callbacks)
    }

    fn component_tunnel_request(
        &self,
        port: PortIndex,
        peer: Option<(ComponentId, PortIndex)>,
    ) -> OmxResult<()> {
        self.inner.lock().component_tunnel_request(port, peer)
    }

    fn use_buffer(&self, port: PortIndex, external: Vec<u8>) -> OmxResult<()> {
        self.inner.lock().use_buffer(port, external)
    }

    fn use_egl_image(&self, port: PortIndex, egl_image: Vec<u8>) -> OmxResult<()> {
        self.inner.lock().use_egl_image(port, egl_image)
    }

    fn allocate_buffer(&self, port: PortIndex, size_bytes: usize) -> OmxResult<()> {
        self.inner.lock().allocate_buffer(port, size_bytes)
    }

    fn free_buffer(&self, port: PortIndex) -> OmxResult<()> {
        self.inner.lock().free_buffer(port)
    }

    fn empty_this_buffer(&self, header: BufferHeader) -> OmxResult<()> {
        self.inner.lock().empty_this_buffer(header)
    }

    fn fill_this_buffer(&self, header: BufferHeader) -> OmxResult<()> {
        self.inner.lock().fill_this_buffer(header)
    }

    fn component_role_enum(&self, index: u32) -> OmxResult<Role> {
        self.inner.lock().component_role_enum(index)
    }

    fn component_deinit(&self) -> OmxResult<()> {
        self.inner.lock().component_deinit()
    }
}

/// Bundles the callbacks a component was configured with (`SetCallbacks`),
/// shared between the `CallbackBridge` the FSM posts through and the
/// kernel's buffer-done path.
pub struct RegisteredCallbacks {
    pub callbacks: Arc<Mutex<Box<dyn ComponentCallbacks>>>,
}

impl RegisteredCallbacks {
    pub fn new(callbacks: Box<dyn ComponentCallbacks>) -> Self {
        Self {
            callbacks: Arc::new(Mutex::new(callbacks)),
        }
    }
}
