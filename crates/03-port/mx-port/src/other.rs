//! "Other" domain port kinds: opaque binary streams, URI configuration,
//! demuxer configuration and the MP4-specific refinement of it.

use mx_abi::{IndexType, OmxError, OmxResult};

use crate::behaviour::DomainBehaviour;
use crate::definition::PortDefinition;
use crate::domain::PortDomain;
use crate::store::IndexStore;

/// `OMX_IndexParamOtherPortFormat`-equivalent index for opaque data.
pub const INDEX_OTHER_BINARY: IndexType = IndexType::Common(0x0001);
/// Content URI index, carried on source/sink components' config port.
pub const INDEX_CONTENT_URI: IndexType = IndexType::Common(0x0002);
/// Demuxer container-format selection index.
pub const INDEX_DEMUXER_CONTAINER: IndexType = IndexType::Common(0x0003);
/// MP4-specific demuxer refinement: track selection within the container.
pub const INDEX_MP4_TRACK_SELECT: IndexType = IndexType::Common(0x0004);
/// Auto-detected container format index (0 until a format is recognised).
pub const INDEX_AUTODETECT_FORMAT: IndexType = IndexType::Common(0x0005);

fn base_other_compat(peer: &PortDefinition) -> OmxResult<()> {
    debug_assert_eq!(peer.domain, PortDomain::Other);
    Ok(())
}

/// An opaque binary stream port (bytes in, bytes out; no media semantics).
pub struct Binary {
    store: IndexStore,
}

impl Binary {
    pub fn new() -> Self {
        let mut store = IndexStore::new();
        store.seed(INDEX_OTHER_BINARY, Vec::new());
        Self { store }
    }
}

impl Default for Binary {
    fn default() -> Self {
        Self::new()
    }
}

impl DomainBehaviour for Binary {
    fn registered_indices(&self) -> &[IndexType] {
        std::slice::from_ref(&INDEX_OTHER_BINARY)
    }

    fn get_parameter(&self, index: IndexType) -> OmxResult<Vec<u8>> {
        self.store.get(index)
    }

    fn set_parameter(&mut self, index: IndexType, bytes: &[u8]) -> OmxResult<()> {
        self.store.set(index, bytes)
    }

    fn check_tunnel_compat(&self, peer: &PortDefinition) -> OmxResult<()> {
        base_other_compat(peer)
    }
}

/// The URI-carrying config applied to network/file source and sink
/// components. `set_parameter` rejects an empty URI with
/// `OmxError::ContentUriError` rather than the generic `BadParameter`,
/// matching the dedicated error kind spec.md reserves for this case.
pub struct UriConfig {
    store: IndexStore,
}

impl UriConfig {
    pub fn new() -> Self {
        Self {
            store: IndexStore::new(),
        }
    }

    pub fn uri(&self) -> OmxResult<String> {
        let bytes = self.store.get(INDEX_CONTENT_URI)?;
        String::from_utf8(bytes).map_err(|_| OmxError::ContentUriError)
    }
}

impl Default for UriConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl DomainBehaviour for UriConfig {
    fn registered_indices(&self) -> &[IndexType] {
        std::slice::from_ref(&INDEX_CONTENT_URI)
    }

    fn get_parameter(&self, index: IndexType) -> OmxResult<Vec<u8>> {
        self.store.get(index)
    }

    fn set_parameter(&mut self, index: IndexType, bytes: &[u8]) -> OmxResult<()> {
        if index == INDEX_CONTENT_URI && bytes.is_empty() {
            return Err(OmxError::ContentUriError);
        }
        self.store.set(index, bytes)
    }

    fn check_tunnel_compat(&self, peer: &PortDefinition) -> OmxResult<()> {
        base_other_compat(peer)
    }
}

/// Demuxer container-selection port.
pub struct DemuxerConfig {
    store: IndexStore,
}

impl DemuxerConfig {
    pub fn new(container_fourcc: u32) -> Self {
        let mut store = IndexStore::new();
        store.seed(
            INDEX_DEMUXER_CONTAINER,
            container_fourcc.to_le_bytes().to_vec(),
        );
        Self { store }
    }
}

impl DomainBehaviour for DemuxerConfig {
    fn registered_indices(&self) -> &[IndexType] {
        std::slice::from_ref(&INDEX_DEMUXER_CONTAINER)
    }

    fn get_parameter(&self, index: IndexType) -> OmxResult<Vec<u8>> {
        self.store.get(index)
    }

    fn set_parameter(&mut self, index: IndexType, bytes: &[u8]) -> OmxResult<()> {
        self.store.set(index, bytes)
    }

    fn check_tunnel_compat(&self, peer: &PortDefinition) -> OmxResult<()> {
        base_other_compat(peer)
    }
}

/// MP4-specific refinement of the demuxer config port: adds track
/// selection within the container, matching the original's
/// `tizmp4port` specialisation of `tizdemuxercfgport`.
pub struct Mp4 {
    demuxer: DemuxerConfig,
    track_store: IndexStore,
    indices: Vec<IndexType>,
}

impl Mp4 {
    pub fn new(container_fourcc: u32) -> Self {
        let demuxer = DemuxerConfig::new(container_fourcc);
        let mut track_store = IndexStore::new();
        track_store.seed(INDEX_MP4_TRACK_SELECT, 0u32.to_le_bytes().to_vec());
        let indices = vec![INDEX_DEMUXER_CONTAINER, INDEX_MP4_TRACK_SELECT];
        Self {
            demuxer,
            track_store,
            indices,
        }
    }
}

impl DomainBehaviour for Mp4 {
    fn registered_indices(&self) -> &[IndexType] {
        &self.indices
    }

    fn get_parameter(&self, index: IndexType) -> OmxResult<Vec<u8>> {
        if index == INDEX_MP4_TRACK_SELECT {
            self.track_store.get(index)
        } else {
            self.demuxer.get_parameter(index)
        }
    }

    fn set_parameter(&mut self, index: IndexType, bytes: &[u8]) -> OmxResult<()> {
        if index == INDEX_MP4_TRACK_SELECT {
            self.track_store.set(index, bytes)
        } else {
            self.demuxer.set_parameter(index, bytes)
        }
    }

    fn check_tunnel_compat(&self, peer: &PortDefinition) -> OmxResult<()> {
        base_other_compat(peer)
    }
}

/// A source port whose container format is unknown until bytes arrive
/// (`OMX_*_CodingAutoDetect`). Holds no fixed codec parameters; `detect`
/// matches a buffer's leading bytes against a small table of known
/// container magic numbers.
pub struct AutoDetect {
    detected: Option<u32>,
}

impl AutoDetect {
    pub fn new() -> Self {
        Self { detected: None }
    }

    pub fn detected_format(&self) -> Option<u32> {
        self.detected
    }

    /// Matches `bytes` against known container signatures. On a match,
    /// records the format and returns it. On no match, leaves the port
    /// undetected and returns `FormatNotDetected` — the caller is expected
    /// to keep feeding subsequent buffers rather than treat this as fatal
    /// (spec's "resets itself to await further input").
    pub fn detect(&mut self, bytes: &[u8]) -> OmxResult<u32> {
        match container_fourcc(bytes) {
            Some(fourcc) => {
                self.detected = Some(fourcc);
                Ok(fourcc)
            }
            None => {
                self.detected = None;
                Err(OmxError::FormatNotDetected)
            }
        }
    }
}

impl Default for AutoDetect {
    fn default() -> Self {
        Self::new()
    }
}

impl DomainBehaviour for AutoDetect {
    fn registered_indices(&self) -> &[IndexType] {
        std::slice::from_ref(&INDEX_AUTODETECT_FORMAT)
    }

    fn get_parameter(&self, index: IndexType) -> OmxResult<Vec<u8>> {
        if index != INDEX_AUTODETECT_FORMAT {
            return Err(OmxError::UnsupportedIndex);
        }
        Ok(self.detected.unwrap_or(0).to_le_bytes().to_vec())
    }

    fn set_parameter(&mut self, _index: IndexType, _bytes: &[u8]) -> OmxResult<()> {
        Err(OmxError::UnsupportedSetting)
    }

    fn check_tunnel_compat(&self, peer: &PortDefinition) -> OmxResult<()> {
        base_other_compat(peer)
    }
}

fn container_fourcc(bytes: &[u8]) -> Option<u32> {
    const RIFF: &[u8] = b"RIFF";
    const EBML: &[u8] = &[0x1A, 0x45, 0xDF, 0xA3];
    const ID3: &[u8] = b"ID3";

    if bytes.starts_with(RIFF) {
        Some(u32::from_be_bytes(*b"WAVE"))
    } else if bytes.starts_with(EBML) {
        Some(u32::from_be_bytes(*b"WEBM"))
    } else if bytes.starts_with(ID3) {
        Some(u32::from_be_bytes(*b"MP3 "))
    } else {
        None
    }
}

#[cfg(test)]
mod autodetect_tests {
    use super::*;

    #[test]
    fn recognises_a_riff_container() {
        let mut probe = AutoDetect::new();
        assert!(probe.detect(b"RIFF....WAVEfmt ").is_ok());
        assert_eq!(probe.detected_format(), Some(u32::from_be_bytes(*b"WAVE")));
    }

    #[test]
    fn unrecognised_bytes_fail_and_leave_the_port_undetected() {
        let mut probe = AutoDetect::new();
        assert_eq!(probe.detect(b"garbage-stream"), Err(OmxError::FormatNotDetected));
        assert_eq!(probe.detected_format(), None);
    }

    #[test]
    fn a_later_buffer_can_still_succeed_after_an_earlier_failure() {
        let mut probe = AutoDetect::new();
        assert!(probe.detect(b"nonsense").is_err());
        assert!(probe.detect(b"ID3\x03\x00").is_ok());
        assert_eq!(probe.detected_format(), Some(u32::from_be_bytes(*b"MP3 ")));
    }
}
