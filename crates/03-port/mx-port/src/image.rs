//! Image domain port kind.

use mx_abi::{IndexType, OmxResult};

use crate::behaviour::DomainBehaviour;
use crate::definition::PortDefinition;
use crate::domain::PortDomain;
use crate::store::IndexStore;

/// `OMX_IndexParamImagePortFormat`-equivalent index.
pub const INDEX_IMAGE_FORMAT: IndexType = IndexType::Image(0x0001);

/// A still-image port (e.g. WebP encode/decode).
pub struct Image {
    store: IndexStore,
}

impl Image {
    pub fn new(width: u32, height: u32) -> Self {
        let mut store = IndexStore::new();
        let mut bytes = Vec::with_capacity(8);
        bytes.extend_from_slice(&width.to_le_bytes());
        bytes.extend_from_slice(&height.to_le_bytes());
        store.seed(INDEX_IMAGE_FORMAT, bytes);
        Self { store }
    }
}

impl DomainBehaviour for Image {
    fn registered_indices(&self) -> &[IndexType] {
        std::slice::from_ref(&INDEX_IMAGE_FORMAT)
    }

    fn get_parameter(&self, index: IndexType) -> OmxResult<Vec<u8>> {
        self.store.get(index)
    }

    fn set_parameter(&mut self, index: IndexType, bytes: &[u8]) -> OmxResult<()> {
        self.store.set(index, bytes)
    }

    fn check_tunnel_compat(&self, peer: &PortDefinition) -> OmxResult<()> {
        debug_assert_eq!(peer.domain, PortDomain::Image);
        Ok(())
    }
}
