//! End-to-end scenarios exercising the registry, tunnel protocol and
//! buffer-exchange pipeline together, one module per scenario family.
//!
//! The process-wide `mx_core::Core` singleton only actually initialises on
//! its first call in a process, so only one test in this whole crate
//! (`core_singleton::full_lifecycle_through_the_live_core`) drives it;
//! every other scenario builds components directly through
//! `mx-mock-components` or calls `mx_core::discover_plugins` as a bare
//! function, neither of which touches the singleton.

#[cfg(test)]
mod registry_discovery;

#[cfg(test)]
mod graph_run;

#[cfg(test)]
mod supplier_election;

#[cfg(test)]
mod flush_during_execution;

#[cfg(test)]
mod autodetect_failure;

#[cfg(test)]
mod core_singleton;
