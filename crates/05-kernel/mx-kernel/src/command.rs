use crossbeam_channel::Sender;
use mx_abi::{IndexType, Mark, OmxResult, PortIndex};
use mx_buffer::BufferHeader;

/// A reply channel for a get/set parameter round trip issued across the
/// kernel's mailbox boundary.
pub type ParamReply = Sender<OmxResult<Vec<u8>>>;

/// Messages the kernel servant drains from its mailbox (§4.2, §4.3).
pub enum KernelCmd {
    Depopulate(PortIndex),
    Flush(PortIndex),
    EnablePort(PortIndex),
    DisablePort(PortIndex),
    EmptyThisBuffer(BufferHeader),
    FillThisBuffer(BufferHeader),
    /// Attaches `Mark` to the next header routed through `PortIndex`,
    /// rather than firing `EventType::Mark` immediately (§3, §4.4): the
    /// event only fires once that buffer is actually processed.
    MarkBuffer(PortIndex, Mark),
    GetParameter(PortIndex, IndexType, ParamReply),
    SetParameter(PortIndex, IndexType, Vec<u8>, ParamReply),
    GetConfig(PortIndex, IndexType, ParamReply),
    SetConfig(PortIndex, IndexType, Vec<u8>, ParamReply),
}
