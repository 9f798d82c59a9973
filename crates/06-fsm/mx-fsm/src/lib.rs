//! The FSM servant (§4.2, §7, §8 property 1): validates every state
//! transition against the fixed table, drives the kernel's port lifecycle
//! operations, and emits exactly one terminal event per command.

mod command;
mod fsm;
mod hook;
mod sink;

pub use command::FsmCmd;
pub use fsm::{spawn_kernel_for_fsm, Fsm};
pub use hook::ResourceManagerHook;
pub use sink::{EventSink, RecordingSink};
