//! The processor servant (§4.2): role-specific data transfer over buffers
//! claimed from and released back to the kernel it shares a thread with.

pub mod metadata;
mod processor;
pub mod transfer;

pub use processor::{PassthroughLogic, Processor, ProcessorLogic, StandaloneProcessor};

#[cfg(test)]
mod tests {
    use mx_abi::PortIndex;
    use mx_buffer::BufferHeader;
    use mx_kernel::Kernel;
    use mx_port::{ConfigPort, Direction, Port, PortDefinition, PortDomain};

    use super::*;

    fn two_port_kernel() -> Kernel {
        let in_def = PortDefinition::new(PortDomain::Other, Direction::Input, 1, 16);
        let out_def = PortDefinition::new(PortDomain::Other, Direction::Output, 1, 16);
        let input = Port::new(PortIndex(0), in_def, Box::new(mx_port::other::Binary::new()));
        let output = Port::new(PortIndex(1), out_def, Box::new(mx_port::other::Binary::new()));
        let config_port = ConfigPort::new(Box::new(mx_port::other::Binary::new()));
        Kernel::new(vec![input, output], config_port)
    }

    #[test]
    fn passthrough_moves_in_flight_header_from_input_to_output() {
        let mut kernel = two_port_kernel();
        let mut processor = Processor::new(Box::new(PassthroughLogic), PortIndex(0), PortIndex(1));
        kernel
            .route_empty_this_buffer(PortIndex(0), BufferHeader::new_allocated(16))
            .unwrap();
        let moved = processor.drive(&mut kernel);
        assert_eq!(moved, 1);
        assert!(kernel.next_in_flight(PortIndex(1)).is_some());
    }

    #[test]
    fn passthrough_is_idle_with_nothing_queued() {
        let mut kernel = two_port_kernel();
        let mut processor = Processor::new(Box::new(PassthroughLogic), PortIndex(0), PortIndex(1));
        assert_eq!(processor.drive(&mut kernel), 0);
    }
}
