use mx_abi::State;

/// Gate on entry/exit from `WaitForResources` (supplemented feature: the
/// original's optional resource-manager plugin). Without a hook installed,
/// the FSM passes straight through to whatever state was requested next.
pub trait ResourceManagerHook: Send {
    /// Called when the FSM is about to enter `WaitForResources`. Returning
    /// `false` keeps the component waiting.
    fn resources_available(&mut self) -> bool;

    /// Called once resources become available, to let the hook know which
    /// state the FSM is about to resume into.
    fn on_resume(&mut self, resuming_to: State) {
        let _ = resuming_to;
    }
}
