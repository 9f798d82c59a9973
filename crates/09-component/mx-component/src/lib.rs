//! Ties FSM, kernel and processor into one component runtime on one OS
//! thread (§4.2, §5), and exposes the public component vtable (§6).

mod bridge;
mod ops;
mod runtime;

pub use bridge::CallbackBridge;
pub use ops::{ComponentCallbacks, ComponentOps};
pub use runtime::{ComponentHandle, ComponentRuntime, RegisteredCallbacks};
