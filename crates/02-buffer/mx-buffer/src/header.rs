use std::time::Duration;

use mx_abi::{Mark, OmxError, OmxResult, PortIndex};

use crate::flags::BufferFlags;

/// Where a header's payload storage came from, which determines who is
/// responsible for it on `FreeBuffer`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BufferOrigin {
    /// Allocated by this side's supplier (`AllocateBuffer`).
    Allocated,
    /// Supplied by the application (`UseBuffer`); freed by the application.
    External,
}

/// The buffer header: the unit of ownership transfer between application,
/// kernel queue and tunnel peer. Never implements `Clone` — a header has
/// exactly one live owner at a time, enforced by move semantics.
#[derive(Debug)]
pub struct BufferHeader {
    origin: BufferOrigin,
    payload: Vec<u8>,
    filled_len: usize,
    offset: usize,
    timestamp: Option<Duration>,
    flags: BufferFlags,
    mark: Option<Mark>,
    input_port: Option<PortIndex>,
    output_port: Option<PortIndex>,
    app_private: [u64; 2],
}

impl BufferHeader {
    /// Creates a header over payload storage allocated by this side's
    /// supplier role.
    pub fn new_allocated(alloc_len: usize) -> Self {
        Self {
            origin: BufferOrigin::Allocated,
            payload: vec![0u8; alloc_len],
            filled_len: 0,
            offset: 0,
            timestamp: None,
            flags: BufferFlags::empty(),
            mark: None,
            input_port: None,
            output_port: None,
            app_private: [0, 0],
        }
    }

    /// Creates a header wrapping application-supplied payload storage
    /// (`UseBuffer`).
    pub fn new_using(external: Vec<u8>) -> Self {
        Self {
            origin: BufferOrigin::External,
            payload: external,
            filled_len: 0,
            offset: 0,
            timestamp: None,
            flags: BufferFlags::empty(),
            mark: None,
            input_port: None,
            output_port: None,
            app_private: [0, 0],
        }
    }

    pub fn origin(&self) -> BufferOrigin {
        self.origin
    }

    pub fn alloc_len(&self) -> usize {
        self.payload.len()
    }

    pub fn filled_len(&self) -> usize {
        self.filled_len
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn set_offset(&mut self, offset: usize) {
        self.offset = offset;
    }

    pub fn timestamp(&self) -> Option<Duration> {
        self.timestamp
    }

    pub fn set_timestamp(&mut self, ts: Duration) {
        self.timestamp = Some(ts);
        self.flags.remove(BufferFlags::TIMESTAMP_INVALID);
    }

    pub fn flags(&self) -> BufferFlags {
        self.flags
    }

    pub fn is_eos(&self) -> bool {
        self.flags.contains(BufferFlags::EOS)
    }

    pub fn set_eos(&mut self, eos: bool) {
        self.flags.set(BufferFlags::EOS, eos);
    }

    pub fn is_codec_config(&self) -> bool {
        self.flags.contains(BufferFlags::CODEC_CONFIG)
    }

    pub fn is_read_only(&self) -> bool {
        self.flags.contains(BufferFlags::READ_ONLY)
    }

    pub fn set_flags(&mut self, flags: BufferFlags) {
        self.flags = flags;
    }

    pub fn input_port(&self) -> Option<PortIndex> {
        self.input_port
    }

    pub fn set_input_port(&mut self, port: PortIndex) {
        self.input_port = Some(port);
    }

    pub fn output_port(&self) -> Option<PortIndex> {
        self.output_port
    }

    pub fn set_output_port(&mut self, port: PortIndex) {
        self.output_port = Some(port);
    }

    pub fn app_private(&self) -> [u64; 2] {
        self.app_private
    }

    pub fn set_app_private(&mut self, slot: usize, value: u64) {
        self.app_private[slot] = value;
    }

    /// Attaches a mark to this header; it is cleared once the target
    /// component processes the buffer and fires `EventType::Mark`.
    pub fn attach_mark(&mut self, mark: Mark) {
        self.mark = Some(mark);
    }

    pub fn take_mark(&mut self) -> Option<Mark> {
        self.mark.take()
    }

    pub fn mark(&self) -> Option<Mark> {
        self.mark
    }

    /// Read-only view of the filled region of the payload.
    pub fn data(&self) -> &[u8] {
        &self.payload[self.offset..self.offset + self.filled_len]
    }

    /// Mutable view of the filled region. Fails on read-only buffers;
    /// consumers that need to mutate a read-only payload must copy it.
    pub fn data_mut(&mut self) -> OmxResult<&mut [u8]> {
        if self.is_read_only() {
            return Err(OmxError::BadParameter);
        }
        let end = self.offset + self.filled_len;
        Ok(&mut self.payload[self.offset..end])
    }

    /// Copies `bytes` into the payload starting at `offset`, updating
    /// `filled_len`. Fails on read-only buffers or if `bytes` does not fit.
    pub fn fill(&mut self, offset: usize, bytes: &[u8]) -> OmxResult<()> {
        if self.is_read_only() {
            return Err(OmxError::BadParameter);
        }
        let end = offset
            .checked_add(bytes.len())
            .ok_or(OmxError::BadParameter)?;
        if end > self.payload.len() {
            return Err(OmxError::BadParameter);
        }
        self.payload[offset..end].copy_from_slice(bytes);
        self.offset = offset;
        self.filled_len = bytes.len();
        Ok(())
    }

    pub fn reset_filled(&mut self) {
        self.filled_len = 0;
        self.offset = 0;
        self.flags = BufferFlags::empty();
        self.timestamp = None;
    }

    /// Releases the owned payload storage, consuming the header. Used by
    /// `FreeBuffer`.
    pub fn into_payload(self) -> Vec<u8> {
        self.payload
    }
}
