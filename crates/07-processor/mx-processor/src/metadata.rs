use std::collections::HashMap;

/// Stream metadata (title, artist, codec tags, ...) a processor populates
/// from the data it decodes. The probing logic that extracts tags from a
/// given codec's bitstream is external to this crate; this is just the
/// store those probes write into, mirroring what the original kept inside
/// each codec-specific processor rather than centralising.
#[derive(Debug, Default, Clone)]
pub struct MetadataStore {
    entries: HashMap<String, String>,
}

impl MetadataStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
