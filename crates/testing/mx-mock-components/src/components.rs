use mx_abi::{ComponentId, PortIndex, Role};
use mx_component::{ComponentHandle, ComponentRuntime};
use mx_kernel::Kernel;
use mx_port::{other, ConfigPort, Direction, Port, PortDefinition, PortDomain};
use mx_processor::{PassthroughLogic, Processor};

const DEFAULT_BUFFER_COUNT: u32 = 2;
const DEFAULT_BUFFER_SIZE: u32 = 4096;

fn binary_port(index: PortIndex, direction: Direction) -> Port {
    let def = PortDefinition::new(PortDomain::Other, direction, DEFAULT_BUFFER_COUNT, DEFAULT_BUFFER_SIZE);
    Port::new(index, def, Box::new(other::Binary::new()))
}

/// A one-port output-only component standing in for a network/file source:
/// its config port carries the content URI, and its single output port is
/// where downstream tunnels or `FillThisBuffer` calls attach.
pub fn mock_source_component(id: ComponentId) -> ComponentHandle {
    let output = binary_port(PortIndex(0), Direction::Output);
    let config_port = ConfigPort::new(Box::new(other::UriConfig::new()));
    let kernel = Kernel::new(vec![output], config_port);

    let runtime = ComponentRuntime::new_with_default_callbacks(
        id,
        "mx.mock.source".to_string(),
        ("1.0".to_string(), 1),
        vec![Role::new("mock.source").unwrap()],
        vec![PortIndex(0)],
        kernel,
        Vec::new(),
        None,
    );
    ComponentHandle::new(runtime)
}

/// A two-port component that moves every header it receives on its input
/// straight to its output, standing in for a demuxer/decoder stage whose
/// transform logic this test double does not need to model.
pub fn mock_passthrough_component(id: ComponentId) -> ComponentHandle {
    let input = binary_port(PortIndex(0), Direction::Input);
    let output = binary_port(PortIndex(1), Direction::Output);
    let config_port = ConfigPort::new(Box::new(other::Binary::new()));
    let kernel = Kernel::new(vec![input, output], config_port);
    let processor = Processor::new(Box::new(PassthroughLogic), PortIndex(0), PortIndex(1));

    let runtime = ComponentRuntime::new_with_default_callbacks(
        id,
        "mx.mock.passthrough".to_string(),
        ("1.0".to_string(), 1),
        vec![Role::new("mock.passthrough").unwrap()],
        vec![PortIndex(0), PortIndex(1)],
        kernel,
        vec![processor],
        None,
    );
    ComponentHandle::new(runtime)
}

/// A one-port input-only component standing in for a renderer/file sink.
pub fn mock_sink_component(id: ComponentId) -> ComponentHandle {
    let input = binary_port(PortIndex(0), Direction::Input);
    let config_port = ConfigPort::new(Box::new(other::Binary::new()));
    let kernel = Kernel::new(vec![input], config_port);

    let runtime = ComponentRuntime::new_with_default_callbacks(
        id,
        "mx.mock.sink".to_string(),
        ("1.0".to_string(), 1),
        vec![Role::new("mock.sink").unwrap()],
        vec![PortIndex(0)],
        kernel,
        Vec::new(),
        None,
    );
    ComponentHandle::new(runtime)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    use mx_abi::{Command, EventType, State};
    use mx_component::{ComponentCallbacks, ComponentOps};

    use super::*;

    #[test]
    fn source_starts_loaded_with_its_role_advertised() {
        let handle = mock_source_component(ComponentId(1));
        assert_eq!(handle.get_state(), State::Loaded);
        assert_eq!(handle.component_role_enum(0).unwrap().as_str(), "mock.source");
    }

    struct CountingCallbacks {
        buffers_done: Arc<AtomicU32>,
    }

    impl ComponentCallbacks for CountingCallbacks {
        fn event_handler(&mut self, _event: EventType, _data1: u32, _data2: u32) {}
        fn empty_buffer_done(&mut self, _header: mx_buffer::BufferHeader) {}
        fn fill_buffer_done(&mut self, _header: mx_buffer::BufferHeader) {
            self.buffers_done.fetch_add(1, Ordering::Relaxed);
        }
    }

    #[test]
    fn passthrough_moves_a_buffer_from_input_to_output_once_pumped() {
        let handle = mock_passthrough_component(ComponentId(1));
        handle.send_command(Command::StateSet(State::Idle)).ok();

        let buffers_done = Arc::new(AtomicU32::new(0));
        handle.set_callbacks(Box::new(CountingCallbacks {
            buffers_done: buffers_done.clone(),
        }));

        let mut header = mx_buffer::BufferHeader::new_allocated(16);
        header.set_input_port(PortIndex(0));
        handle.empty_this_buffer(header).unwrap();
        handle.pump();

        assert_eq!(buffers_done.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn sink_exposes_a_single_input_only_port() {
        let handle = mock_sink_component(ComponentId(1));
        assert_eq!(
            handle.get_parameter(PortIndex(1), mx_abi::IndexType::Common(0)),
            Err(mx_abi::OmxError::BadPortIndex)
        );
    }
}
