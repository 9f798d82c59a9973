use mx_abi::{EventType, OmxError};

/// The event-delivery seam between the FSM and the component that owns it.
/// `mx-component` implements this to bridge into `ComponentCallbacks::
/// event_handler`, kept as its own trait here (rather than depending on
/// `mx-component` directly) to avoid a dependency cycle — the component
/// crate is the one that wires FSM, kernel and processor together.
pub trait EventSink: Send {
    fn emit(&mut self, event: EventType);
    fn emit_error(&mut self, error: OmxError);
}

/// An `EventSink` that records every event, used in unit tests.
#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<EventType>,
    pub errors: Vec<OmxError>,
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: EventType) {
        self.events.push(event);
    }

    fn emit_error(&mut self, error: OmxError) {
        self.errors.push(error);
    }
}
