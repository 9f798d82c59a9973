use mx_abi::EventType;
use mx_buffer::BufferHeader;
use mx_component::ComponentCallbacks;

/// A callback set that drops every event, for handles built before a real
/// application has called `SetCallbacks`.
#[derive(Default)]
pub struct NullCallbacks;

impl ComponentCallbacks for NullCallbacks {
    fn event_handler(&mut self, _event: EventType, _data1: u32, _data2: u32) {}
    fn empty_buffer_done(&mut self, _header: BufferHeader) {}
    fn fill_buffer_done(&mut self, _header: BufferHeader) {}
}
