//! S3 (linear graph run): a source, a passthrough stage and a sink wired
//! source -> passthrough -> sink, then buffers driven from the source's
//! output port all the way to the sink's input port with no application
//! code touching them in between, the application only watching the
//! callback vtable at the sink. Grounded on `mx_mock_components`'s three
//! component builders plus `ComponentHandle::setup_tunnel_with` and the
//! kernel's tunnel relay.

use std::sync::{Arc, Mutex};

use mx_abi::{ComponentId, EventType, PortIndex};
use mx_buffer::BufferHeader;
use mx_component::{ComponentCallbacks, ComponentOps};
use mx_mock_components::{mock_passthrough_component, mock_sink_component, mock_source_component};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Observed {
    EmptyDone,
    FillDone,
    Event(EventType, u32, u32),
}

#[derive(Default)]
struct RecordingCallbacks {
    log: Arc<Mutex<Vec<Observed>>>,
}

impl ComponentCallbacks for RecordingCallbacks {
    fn event_handler(&mut self, event: EventType, data1: u32, data2: u32) {
        self.log.lock().unwrap().push(Observed::Event(event, data1, data2));
    }

    fn empty_buffer_done(&mut self, _header: BufferHeader) {
        self.log.lock().unwrap().push(Observed::EmptyDone);
    }

    fn fill_buffer_done(&mut self, _header: BufferHeader) {
        self.log.lock().unwrap().push(Observed::FillDone);
    }
}

#[test]
fn source_passthrough_sink_tunnel_into_a_single_linear_graph() {
    let source = mock_source_component(ComponentId(1));
    let passthrough = mock_passthrough_component(ComponentId(2));
    let sink = mock_sink_component(ComponentId(3));

    source.setup_tunnel_with(PortIndex(0), &passthrough, PortIndex(0)).unwrap();
    passthrough.setup_tunnel_with(PortIndex(1), &sink, PortIndex(0)).unwrap();

    assert!(source.port_tunnel_peer(PortIndex(0)).is_some());
    assert!(passthrough.port_tunnel_peer(PortIndex(0)).is_some());
    assert!(passthrough.port_tunnel_peer(PortIndex(1)).is_some());
    assert!(sink.port_tunnel_peer(PortIndex(0)).is_some());
}

/// S3: a buffer the source hands out on its output port crosses both
/// tunnels untouched by any application code in between, surfacing at the
/// sink exactly the way a single-component buffer would at its own ports.
#[test]
fn a_buffer_crosses_both_tunnels_from_source_to_sink() {
    let source = mock_source_component(ComponentId(1));
    let passthrough = mock_passthrough_component(ComponentId(2));
    let sink = mock_sink_component(ComponentId(3));

    source.setup_tunnel_with(PortIndex(0), &passthrough, PortIndex(0)).unwrap();
    passthrough.setup_tunnel_with(PortIndex(1), &sink, PortIndex(0)).unwrap();

    let log = Arc::new(Mutex::new(Vec::new()));
    sink.set_callbacks(Box::new(RecordingCallbacks { log: log.clone() }));

    let mut header = BufferHeader::new_allocated(16);
    header.set_output_port(PortIndex(0));
    header.fill(0, b"payload").unwrap();
    source.fill_this_buffer(header).unwrap();

    source.pump();
    passthrough.pump();
    sink.pump();

    let observed = log.lock().unwrap().clone();
    assert_eq!(observed, vec![Observed::EmptyDone]);
}

/// S3's closing assertion: the renderer sees `BufferFlag(EOS)` exactly
/// once, having traveled from the source across the tunnelled passthrough
/// without any application code touching the header in between.
#[test]
fn an_end_of_stream_buffer_surfaces_exactly_once_across_the_tunnelled_graph() {
    let source = mock_source_component(ComponentId(1));
    let passthrough = mock_passthrough_component(ComponentId(2));
    let sink = mock_sink_component(ComponentId(3));

    source.setup_tunnel_with(PortIndex(0), &passthrough, PortIndex(0)).unwrap();
    passthrough.setup_tunnel_with(PortIndex(1), &sink, PortIndex(0)).unwrap();

    let log = Arc::new(Mutex::new(Vec::new()));
    sink.set_callbacks(Box::new(RecordingCallbacks { log: log.clone() }));

    let mut header = BufferHeader::new_allocated(16);
    header.set_output_port(PortIndex(0));
    header.set_eos(true);
    source.fill_this_buffer(header).unwrap();

    source.pump();
    passthrough.pump();
    sink.pump();

    let observed = log.lock().unwrap().clone();
    assert_eq!(
        observed,
        vec![
            Observed::EmptyDone,
            Observed::Event(EventType::BufferFlag, 0, mx_buffer::BufferFlags::EOS.bits()),
        ]
    );
}
