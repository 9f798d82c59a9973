use crate::ids::ComponentId;

/// An application cookie attached to a buffer that triggers `EventType::Mark`
/// once the target component has processed it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Mark {
    pub target: ComponentId,
    pub cookie: u64,
}
