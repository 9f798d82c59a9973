use crate::error::OmxError;

/// The event set a component's callback vtable delivers to the application.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventType {
    /// A pending command completed.
    CmdComplete,
    /// A pending command failed, or an asynchronous fault was detected.
    Error,
    /// A mark attached to an earlier buffer reached this component.
    Mark,
    /// A port's settings changed in a way the application should re-query.
    PortSettingsChanged,
    /// A buffer-flag boundary (e.g. end of stream) was reached.
    BufferFlag,
    /// Resources requested while `WaitForResources` became available.
    ResourcesAcquired,
    /// The component resumed after a pause.
    ComponentResumed,
    /// Resources became available outside of an explicit wait.
    DynamicResourcesAvailable,
    /// An auto-detect port determined the stream's format.
    PortFormatDetected,
    /// A registered index's value changed as a side effect of another
    /// operation (e.g. master/slave propagation).
    IndexSettingChanged,
    /// A port needs to be disabled before further progress is possible.
    PortNeedsDisable,
    /// A port needs to be flushed before further progress is possible.
    PortNeedsFlush,
}

/// Payload accompanying an `Event(Error, ...)` callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ErrorEvent {
    pub error: OmxError,
}
