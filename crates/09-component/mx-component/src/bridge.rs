use std::sync::Arc;

use mx_abi::{EventType, OmxError};
use mx_fsm::EventSink;
use parking_lot::Mutex;

use crate::ops::ComponentCallbacks;

/// Bridges the FSM's `EventSink` seam into the component's registered
/// `ComponentCallbacks::event_handler`, translating an `OmxError` into the
/// `(Error, data1, data2)` shape the callback vtable expects.
pub struct CallbackBridge {
    callbacks: Arc<Mutex<Box<dyn ComponentCallbacks>>>,
}

impl CallbackBridge {
    pub fn new(callbacks: Arc<Mutex<Box<dyn ComponentCallbacks>>>) -> Self {
        Self { callbacks }
    }
}

impl EventSink for CallbackBridge {
    fn emit(&mut self, event: EventType) {
        self.callbacks.lock().event_handler(event, 0, 0);
    }

    fn emit_error(&mut self, error: OmxError) {
        self.callbacks
            .lock()
            .event_handler(EventType::Error, error as u32, 0);
    }
}
