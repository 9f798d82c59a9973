//! Shared vocabulary for the component runtime: the error taxonomy, the
//! event set, the parameter/config index namespace, lifecycle states,
//! commands and the handful of small value types (`PortIndex`, `ComponentId`,
//! `Role`, `Mark`) that every other crate in the workspace builds on.
//!
//! This crate has no dependency on any other crate in the workspace; it sits
//! at the bottom of the dependency chain described in the runtime's design
//! notes (ports → kernel → FSM → processor → scheduler → core → application).

mod command;
mod error;
mod event;
mod ids;
mod index;
mod mark;
mod role;
mod state;
mod supplier;

pub use command::Command;
pub use error::{OmxError, OmxResult};
pub use event::{ErrorEvent, EventType};
pub use ids::{ComponentId, PortIndex, CONFIG_PORT_INDEX};
pub use index::{IndexType, VENDOR_START};
pub use mark::Mark;
pub use role::Role;
pub use state::State;
pub use supplier::{negotiate_supplier, BufferSupplier};
