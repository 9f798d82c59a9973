//! In-process fake components and a matching `PluginLoader`, used by
//! integration tests to exercise the core registry and tunnel protocol
//! without dlopen'ing a real shared object.
//!
//! Every builder here constructs a real `ComponentHandle` directly through
//! Rust constructors; the loader's `probe`/`instantiate` dispatch on the
//! candidate file's name instead of reading an ELF entry point.

mod callbacks;
mod components;
mod loader;

pub use callbacks::NullCallbacks;
pub use components::{mock_passthrough_component, mock_sink_component, mock_source_component};
pub use loader::MockLoader;
