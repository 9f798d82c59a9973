//! S5 (flush during execution): a buffer submitted through
//! `EmptyThisBuffer` sits in the kernel's in-flight queue until `Flush` is
//! sent; pumping the component afterwards must recall it to the port's
//! local pool within that one pump, never losing it.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use mx_abi::{Command, ComponentId, EventType, PortIndex};
use mx_buffer::BufferHeader;
use mx_component::{ComponentCallbacks, ComponentOps};
use mx_mock_components::mock_passthrough_component;

struct CountingCallbacks {
    fill_done: Arc<AtomicU32>,
}

impl ComponentCallbacks for CountingCallbacks {
    fn event_handler(&mut self, _event: EventType, _data1: u32, _data2: u32) {}
    fn empty_buffer_done(&mut self, _header: BufferHeader) {}
    fn fill_buffer_done(&mut self, _header: BufferHeader) {
        self.fill_done.fetch_add(1, Ordering::Relaxed);
    }
}

#[test]
fn flushing_a_port_recalls_its_in_flight_header_to_the_pool() {
    let passthrough = mock_passthrough_component(ComponentId(1));

    let mut header = BufferHeader::new_allocated(16);
    header.set_input_port(PortIndex(0));
    passthrough.empty_this_buffer(header).unwrap();

    assert_eq!(passthrough.pool_held_count(PortIndex(0)), 0, "header is in-flight, not yet pooled");

    passthrough.send_command(Command::Flush(PortIndex(0))).unwrap();
    passthrough.pump();

    assert_eq!(
        passthrough.pool_held_count(PortIndex(0)),
        1,
        "flush must recall the in-flight header back to its pool"
    );
}

#[test]
fn a_flushed_header_never_reaches_the_processor() {
    let passthrough = mock_passthrough_component(ComponentId(1));
    let fill_done = Arc::new(AtomicU32::new(0));
    passthrough.set_callbacks(Box::new(CountingCallbacks { fill_done: fill_done.clone() }));

    let mut header = BufferHeader::new_allocated(16);
    header.set_input_port(PortIndex(0));
    passthrough.empty_this_buffer(header).unwrap();
    passthrough.send_command(Command::Flush(PortIndex(0))).unwrap();

    let work = passthrough.pump();

    // The flush itself and the idle FSM/kernel ticks account for the work
    // done; the processor must never have moved the flushed header to the
    // output port, so no `FillBufferDone` should fire for it.
    assert!(work > 0, "flush handling should register as work done");
    assert_eq!(fill_done.load(Ordering::Relaxed), 0);
}
