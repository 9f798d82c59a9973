use mx_abi::{BufferSupplier, PortIndex};

use crate::domain::{Direction, PortDomain};

/// The static shape of a port, negotiated at tunnel setup time and used to
/// drive buffer pool sizing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PortDefinition {
    pub domain: PortDomain,
    pub direction: Direction,
    pub min_buffer_count: u32,
    pub buffer_count_actual: u32,
    pub min_buffer_size: u32,
    pub alignment: u32,
    pub contiguous: bool,
    pub supplier_preference: BufferSupplier,
    pub master_or_slave: Option<PortIndex>,
}

impl PortDefinition {
    pub fn new(domain: PortDomain, direction: Direction, min_buffer_count: u32, min_buffer_size: u32) -> Self {
        Self {
            domain,
            direction,
            min_buffer_count,
            buffer_count_actual: min_buffer_count,
            min_buffer_size,
            alignment: 1,
            contiguous: false,
            supplier_preference: BufferSupplier::Unspecified,
            master_or_slave: None,
        }
    }
}
