use bitflags::bitflags;

bitflags! {
    /// Flags carried in a buffer header's flags bitfield.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct BufferFlags: u32 {
        /// Final buffer of the stream on this port.
        const EOS = 1 << 0;
        /// Timestamp marks the start of the stream.
        const START_TIME = 1 << 1;
        /// Decode only; do not render.
        const DECODE_ONLY = 1 << 2;
        /// Payload is known to be corrupt.
        const DATA_CORRUPT = 1 << 3;
        /// Last buffer of a complete frame.
        const END_OF_FRAME = 1 << 4;
        /// Buffer starts a decodable unit (e.g. a keyframe).
        const SYNC_FRAME = 1 << 5;
        /// Payload is out-of-band extra data, not stream data.
        const EXTRA_DATA = 1 << 6;
        /// Payload is codec setup data; precedes regular data and is not
        /// subject to the EOS ordering boundary.
        const CODEC_CONFIG = 1 << 7;
        /// The timestamp field does not carry a meaningful value.
        const TIMESTAMP_INVALID = 1 << 8;
        /// Consumers must copy the payload before mutating it.
        const READ_ONLY = 1 << 9;
        /// Last buffer of a sub-frame unit.
        const END_OF_SUBFRAME = 1 << 10;
        /// Consumers should skip this frame (e.g. during fast playback).
        const SKIP_FRAME = 1 << 11;
    }
}
