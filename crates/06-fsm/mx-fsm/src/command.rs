use mx_abi::Command;

/// A command posted to the FSM's mailbox. `cmd_data` carries the
/// OMX-style secondary parameter (e.g. the port index for a `Flush`
/// issued against `OMX_ALL`, represented here as `u32::MAX`).
pub struct FsmCmd {
    pub command: Command,
    pub cmd_data: u32,
}

impl FsmCmd {
    pub fn new(command: Command) -> Self {
        Self {
            command,
            cmd_data: 0,
        }
    }
}
