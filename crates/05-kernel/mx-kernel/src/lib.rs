//! The kernel servant (§4.2, §4.3, §4.6): owns every port's buffer pool,
//! routes buffer headers between the application, the processor and tunnel
//! peers, and tracks per-tunnel accept-bit state.

mod command;
mod kernel;

pub use command::{KernelCmd, ParamReply};
pub use kernel::Kernel;

#[cfg(test)]
mod tests {
    use mx_abi::{IndexType, PortIndex};
    use mx_buffer::BufferHeader;
    use mx_port::{ConfigPort, Direction, Port, PortDefinition, PortDomain};

    use super::*;

    fn single_port_kernel(buffer_count: u32) -> Kernel {
        let def = PortDefinition::new(PortDomain::Other, Direction::Input, 1, 4096);
        let mut def = def;
        def.buffer_count_actual = buffer_count;
        let port = Port::new(
            PortIndex(0),
            def,
            Box::new(mx_port::other::Binary::new()),
        );
        let config_port = ConfigPort::new(Box::new(mx_port::other::Binary::new()));
        Kernel::new(vec![port], config_port)
    }

    #[test]
    fn populate_sets_populated_once_actual_count_reached() {
        let mut kernel = single_port_kernel(2);
        kernel
            .populate(PortIndex(0), BufferHeader::new_allocated(16))
            .unwrap();
        assert!(!kernel.ports()[0].pool().populated());
        kernel
            .populate(PortIndex(0), BufferHeader::new_allocated(16))
            .unwrap();
        assert!(kernel.ports()[0].pool().populated());
    }

    #[test]
    fn loaded_port_holds_zero_buffers() {
        let kernel = single_port_kernel(2);
        assert_eq!(kernel.ports()[0].pool().held_count(), 0);
    }

    #[test]
    fn flush_recalls_every_in_flight_header() {
        let mut kernel = single_port_kernel(1);
        kernel
            .populate(PortIndex(0), BufferHeader::new_allocated(16))
            .unwrap();
        let hdr = kernel.claim_buffer(PortIndex(0)).unwrap().unwrap();
        kernel
            .route_empty_this_buffer(PortIndex(0), hdr)
            .unwrap();
        assert_eq!(kernel.ports()[0].pool().held_count(), 0);
        kernel.flush(PortIndex(0)).unwrap();
        assert_eq!(kernel.ports()[0].pool().held_count(), 1);
    }

    #[test]
    fn bad_port_index_is_rejected() {
        let mut kernel = single_port_kernel(1);
        assert_eq!(
            kernel.enable_port(PortIndex(7)),
            Err(mx_abi::OmxError::BadPortIndex)
        );
    }

    #[test]
    fn unsupported_index_surfaces_through_get_parameter() {
        let kernel = single_port_kernel(1);
        assert_eq!(
            kernel.ports()[0].get_parameter(IndexType::Audio(0)),
            Err(mx_abi::OmxError::UnsupportedIndex)
        );
    }
}
