//! Servant base (§4.2, §5): the FIFO mailbox every servant (FSM, kernel,
//! processor) drains from its own thread, the fd/timer reactor that thread
//! polls between drains, and the `EventLoopHost` that ties the two
//! together the way the teacher's `WorkerRuntime` ties `ServiceEngine`s to
//! a single poll loop.

mod mailbox;
mod reactor;
mod runtime;

pub use mailbox::{Mailbox, MailboxSender};
pub use reactor::{IoToken, ReadyEvent, Reactor, TimerId};
pub use runtime::{EventLoopHost, ServantLoop};
