use std::fmt;

/// Sentinel port index for the configuration pseudo-port, which carries
/// whole-component parameters that lack a real port index.
pub const CONFIG_PORT_INDEX: u32 = u32::MAX;

/// Index of a port within a component's port array, or the configuration
/// pseudo-port sentinel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PortIndex(pub u32);

impl PortIndex {
    pub const CONFIG: PortIndex = PortIndex(CONFIG_PORT_INDEX);

    pub fn is_config(self) -> bool {
        self.0 == CONFIG_PORT_INDEX
    }
}

impl fmt::Display for PortIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_config() {
            write!(f, "config")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// Opaque, process-local identity for a live component instance. Assigned by
/// the core on `GetHandle`; never reused while the handle is alive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ComponentId(pub u64);

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "component#{}", self.0)
    }
}
