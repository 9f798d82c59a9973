use crate::ids::PortIndex;
use crate::mark::Mark;
use crate::state::State;

/// A command accepted by `SendCommand`, dispatched by the FSM servant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    StateSet(State),
    Flush(PortIndex),
    PortEnable(PortIndex),
    PortDisable(PortIndex),
    MarkBuffer(PortIndex, Mark),
}
