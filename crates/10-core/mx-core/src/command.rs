use crossbeam_channel::Sender;

use mx_abi::{ComponentId, OmxError, OmxResult, PortIndex, Role};
use mx_component::{ComponentCallbacks, ComponentHandle};

pub type Reply<T> = Sender<OmxResult<T>>;

/// The serialisation-thread message queue's request set (§4.1, §5): every
/// loader/registry operation is posted here and answered through a oneshot
/// reply channel, rather than the original's semaphore-plus-result-field
/// rendezvous.
pub enum CoreCmd {
    Init {
        reply: Reply<()>,
    },
    Deinit {
        reply: Reply<()>,
    },
    ComponentNameEnum {
        index: u32,
        reply: Reply<String>,
    },
    GetHandle {
        name: String,
        callbacks: Box<dyn ComponentCallbacks>,
        reply: Reply<ComponentHandle>,
    },
    FreeHandle {
        component: ComponentId,
        reply: Reply<()>,
    },
    SetupTunnel {
        out_component: ComponentId,
        out_port: PortIndex,
        in_component: ComponentId,
        in_port: PortIndex,
        reply: Reply<()>,
    },
    TeardownTunnel {
        out_component: ComponentId,
        out_port: PortIndex,
        in_component: ComponentId,
        in_port: PortIndex,
        reply: Reply<()>,
    },
    ComponentOfRoleEnum {
        role: Role,
        index: u32,
        reply: Reply<String>,
    },
    RoleOfComponentEnum {
        name: String,
        index: u32,
        reply: Reply<Role>,
    },
}

impl CoreCmd {
    pub fn fail_with(self, error: OmxError) {
        match self {
            CoreCmd::Init { reply } | CoreCmd::Deinit { reply } => {
                let _ = reply.send(Err(error));
            }
            CoreCmd::ComponentNameEnum { reply, .. } => {
                let _ = reply.send(Err(error));
            }
            CoreCmd::GetHandle { reply, .. } => {
                let _ = reply.send(Err(error));
            }
            CoreCmd::FreeHandle { reply, .. } => {
                let _ = reply.send(Err(error));
            }
            CoreCmd::SetupTunnel { reply, .. } => {
                let _ = reply.send(Err(error));
            }
            CoreCmd::TeardownTunnel { reply, .. } => {
                let _ = reply.send(Err(error));
            }
            CoreCmd::ComponentOfRoleEnum { reply, .. } => {
                let _ = reply.send(Err(error));
            }
            CoreCmd::RoleOfComponentEnum { reply, .. } => {
                let _ = reply.send(Err(error));
            }
        }
    }
}
