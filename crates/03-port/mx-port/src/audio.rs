//! Audio domain port kinds: PCM, MP3, Opus.

use mx_abi::{IndexType, OmxResult};

use crate::behaviour::DomainBehaviour;
use crate::definition::PortDefinition;
use crate::domain::PortDomain;
use crate::store::IndexStore;

/// `OMX_IndexParamAudioPcm`-equivalent index: sample rate, channels, bit
/// depth and endianness for an uncompressed PCM port.
pub const INDEX_AUDIO_PCM_MODE: IndexType = IndexType::Audio(0x0001);
/// `OMX_IndexParamAudioMp3`-equivalent index.
pub const INDEX_AUDIO_MP3: IndexType = IndexType::Audio(0x0002);
/// `OMX_IndexParamAudioOpus`-equivalent index.
pub const INDEX_AUDIO_OPUS: IndexType = IndexType::Audio(0x0003);

fn base_audio_compat(peer: &PortDefinition) -> OmxResult<()> {
    debug_assert_eq!(peer.domain, PortDomain::Audio);
    Ok(())
}

/// An uncompressed PCM audio port.
pub struct Pcm {
    store: IndexStore,
}

impl Pcm {
    pub fn new(sample_rate_hz: u32, channels: u8, bits_per_sample: u8) -> Self {
        let mut store = IndexStore::new();
        let mut bytes = Vec::with_capacity(6);
        bytes.extend_from_slice(&sample_rate_hz.to_le_bytes());
        bytes.push(channels);
        bytes.push(bits_per_sample);
        store.seed(INDEX_AUDIO_PCM_MODE, bytes);
        Self { store }
    }
}

impl DomainBehaviour for Pcm {
    fn registered_indices(&self) -> &[IndexType] {
        std::slice::from_ref(&INDEX_AUDIO_PCM_MODE)
    }

    fn get_parameter(&self, index: IndexType) -> OmxResult<Vec<u8>> {
        self.store.get(index)
    }

    fn set_parameter(&mut self, index: IndexType, bytes: &[u8]) -> OmxResult<()> {
        self.store.set(index, bytes)
    }

    fn check_tunnel_compat(&self, peer: &PortDefinition) -> OmxResult<()> {
        base_audio_compat(peer)
    }
}

/// An MP3-compressed audio port.
pub struct Mp3 {
    store: IndexStore,
}

impl Mp3 {
    pub fn new(bitrate_bps: u32) -> Self {
        let mut store = IndexStore::new();
        store.seed(INDEX_AUDIO_MP3, bitrate_bps.to_le_bytes().to_vec());
        Self { store }
    }
}

impl DomainBehaviour for Mp3 {
    fn registered_indices(&self) -> &[IndexType] {
        std::slice::from_ref(&INDEX_AUDIO_MP3)
    }

    fn get_parameter(&self, index: IndexType) -> OmxResult<Vec<u8>> {
        self.store.get(index)
    }

    fn set_parameter(&mut self, index: IndexType, bytes: &[u8]) -> OmxResult<()> {
        self.store.set(index, bytes)
    }

    fn check_tunnel_compat(&self, peer: &PortDefinition) -> OmxResult<()> {
        base_audio_compat(peer)
    }
}

/// An Opus-compressed audio port.
pub struct Opus {
    store: IndexStore,
}

impl Opus {
    pub fn new(bitrate_bps: u32) -> Self {
        let mut store = IndexStore::new();
        store.seed(INDEX_AUDIO_OPUS, bitrate_bps.to_le_bytes().to_vec());
        Self { store }
    }
}

impl DomainBehaviour for Opus {
    fn registered_indices(&self) -> &[IndexType] {
        std::slice::from_ref(&INDEX_AUDIO_OPUS)
    }

    fn get_parameter(&self, index: IndexType) -> OmxResult<Vec<u8>> {
        self.store.get(index)
    }

    fn set_parameter(&mut self, index: IndexType, bytes: &[u8]) -> OmxResult<()> {
        self.store.set(index, bytes)
    }

    fn check_tunnel_compat(&self, peer: &PortDefinition) -> OmxResult<()> {
        base_audio_compat(peer)
    }
}
