use serde::Deserialize;

/// The `[core]` table read from the resource-configuration file at startup
/// (§6 "Persisted/configuration inputs"), keyed `il-core / component-paths`
/// in the original.
#[derive(Clone, Debug, Deserialize)]
pub struct CoreConfig {
    #[serde(default)]
    pub core: CoreSection,
}

#[derive(Clone, Debug, Deserialize)]
pub struct CoreSection {
    #[serde(default)]
    pub component_paths: Vec<String>,
    #[serde(default = "default_soname_suffix")]
    pub soname_suffix: String,
    #[serde(default = "default_entry_point_symbol")]
    pub entry_point_symbol: String,
}

fn default_soname_suffix() -> String {
    ".so.0.0.0".to_string()
}

fn default_entry_point_symbol() -> String {
    "mx_component_init".to_string()
}

impl Default for CoreSection {
    fn default() -> Self {
        Self {
            component_paths: Vec::new(),
            soname_suffix: default_soname_suffix(),
            entry_point_symbol: default_entry_point_symbol(),
        }
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            core: CoreSection::default(),
        }
    }
}

impl CoreConfig {
    /// Reads config from `$MXCORE_CONFIG` if set, else the default system
    /// path; returns the default (no search paths) if neither is readable.
    pub fn load() -> Self {
        let path = std::env::var("MXCORE_CONFIG").unwrap_or_else(|_| "/etc/mxcore/mxcore.toml".to_string());
        Self::from_path(&path).unwrap_or_default()
    }

    pub fn from_path(path: &str) -> Option<Self> {
        let contents = std::fs::read_to_string(path).ok()?;
        toml::from_str(&contents).ok()
    }

    pub fn from_str(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_path_yields_default() {
        let config = CoreConfig::from_path("/does/not/exist.toml");
        assert!(config.is_none());
    }

    #[test]
    fn parses_component_paths_and_keeps_defaults() {
        let config = CoreConfig::from_str(
            r#"
            [core]
            component_paths = ["/usr/lib/mx-components"]
            "#,
        )
        .unwrap();
        assert_eq!(config.core.component_paths, vec!["/usr/lib/mx-components"]);
        assert_eq!(config.core.soname_suffix, ".so.0.0.0");
        assert_eq!(config.core.entry_point_symbol, "mx_component_init");
    }
}
