use std::collections::HashMap;

use mx_abi::{IndexType, OmxError, OmxResult};

/// A simple per-index byte-value store backing most `DomainBehaviour`
/// implementations: `set_parameter` followed by `get_parameter` on the same
/// index round-trips exactly, satisfying the parameter round-trip
/// invariant every registered index must honour.
#[derive(Default)]
pub struct IndexStore {
    values: HashMap<IndexType, Vec<u8>>,
}

impl IndexStore {
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    pub fn seed(&mut self, index: IndexType, value: Vec<u8>) {
        self.values.insert(index, value);
    }

    pub fn get(&self, index: IndexType) -> OmxResult<Vec<u8>> {
        self.values
            .get(&index)
            .cloned()
            .ok_or(OmxError::UnsupportedIndex)
    }

    pub fn set(&mut self, index: IndexType, bytes: &[u8]) -> OmxResult<()> {
        self.values.insert(index, bytes.to_vec());
        Ok(())
    }
}
