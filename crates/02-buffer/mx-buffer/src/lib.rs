//! The buffer header protocol: the plain struct that accompanies every
//! payload as it moves between application, kernel queue and tunnel peer,
//! plus the per-port pool that tracks which headers a port currently holds.

mod flags;
mod header;
mod pool;

pub use flags::BufferFlags;
pub use header::{BufferHeader, BufferOrigin};
pub use pool::{BufferPool, BufferPoolConfig};
