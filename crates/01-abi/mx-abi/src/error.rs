use thiserror::Error;

/// Result alias used throughout the runtime's internal (non-ABI) surfaces.
pub type OmxResult<T> = Result<T, OmxError>;

/// The fixed error taxonomy every fallible operation returns from, per the
/// component ABI's error code convention.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum OmxError {
    /// Out of memory, or an external resource the component needs is
    /// unavailable. Always propagated, never swallowed.
    #[error("insufficient resources")]
    InsufficientResources,
    /// Generic catch-all; callers should prefer a narrower variant when one
    /// applies.
    #[error("undefined error")]
    Undefined,
    /// Null or out-of-range caller input. Not logged as an error event.
    #[error("bad parameter")]
    BadParameter,
    /// `GetHandle` was asked for a name the registry does not know.
    #[error("component not found")]
    ComponentNotFound,
    /// End of an enumeration; callers must treat this as normal completion.
    #[error("no more entries")]
    NoMore,
    /// Port index outside the component's declared range.
    #[error("bad port index")]
    BadPortIndex,
    /// The requested state-set is not reachable from the current state.
    #[error("incorrect state transition")]
    IncorrectStateTransition,
    /// The requested command conflicts with an in-progress transition.
    #[error("incorrect state operation")]
    IncorrectStateOperation,
    /// A state-set request targeting the current state.
    #[error("same state")]
    SameState,
    /// The parameter/config index is not recognised by the target port.
    #[error("unsupported index")]
    UnsupportedIndex,
    /// The index is recognised but the requested value is not supported.
    #[error("unsupported setting")]
    UnsupportedSetting,
    /// A state transition was attempted before every enabled port reached
    /// its buffer invariant.
    #[error("port unpopulated")]
    PortUnpopulated,
    /// A source/sink component's URI is missing or invalid.
    #[error("content URI error")]
    ContentUriError,
    /// An auto-detect source failed to recognise the stream.
    #[error("format not detected")]
    FormatNotDetected,
    /// A tunnel request targeted incompatible peer ports.
    #[error("ports not compatible")]
    PortsNotCompatible,
    /// A pending command was superseded (e.g. by a port disable).
    #[error("command canceled")]
    CommandCanceled,
}

impl OmxError {
    /// `NoMore` at an enumeration boundary is not an error from the public
    /// API's point of view; translate it to success there.
    pub fn is_enumeration_boundary(&self) -> bool {
        matches!(self, OmxError::NoMore)
    }

    /// Whether this error should be surfaced as a `tracing::error!` (as
    /// opposed to a quieter level, e.g. `BadParameter` from caller misuse).
    pub fn log_as_error(&self) -> bool {
        !matches!(self, OmxError::BadParameter | OmxError::NoMore)
    }
}
