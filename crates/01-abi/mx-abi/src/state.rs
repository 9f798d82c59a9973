/// Lifecycle states a component reports through `GetState`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum State {
    Loaded,
    Idle,
    Executing,
    Pause,
    WaitForResources,
}

impl State {
    /// Whether `to` is a legal `StateSet` target from `self`, per the
    /// transition table.
    pub fn can_transition_to(self, to: State) -> bool {
        use State::*;
        if self == to {
            return false;
        }
        matches!(
            (self, to),
            (Loaded, Idle)
                | (Loaded, WaitForResources)
                | (Idle, Loaded)
                | (Idle, Executing)
                | (Idle, Pause)
                | (Executing, Idle)
                | (Executing, Pause)
                | (Pause, Idle)
                | (Pause, Executing)
                | (WaitForResources, Loaded)
        )
    }
}
