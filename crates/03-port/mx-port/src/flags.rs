use bitflags::bitflags;

bitflags! {
    /// Per-port status flags (§4.3).
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct PortFlags: u32 {
        const ENABLED = 1 << 0;
        const BEING_ENABLED = 1 << 1;
        const BEING_DISABLED = 1 << 2;
        const POPULATED = 1 << 3;
        const TUNNELED = 1 << 4;
        const BUFFER_SUPPLIER = 1 << 5;
        const BUFFER_ALLOCATOR = 1 << 6;
        const FLUSH_IN_PROGRESS = 1 << 7;
    }
}

bitflags! {
    /// Tunneled-port status bits tracked per side of a tunnel (§4.6). Buffer
    /// exchange must not start until both sides' accept bits are set.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct TunnelStatus: u32 {
        const ACCEPT_USE_BUFFER = 1 << 0;
        const ACCEPT_BUFFER_EXCHANGE = 1 << 1;
    }
}
