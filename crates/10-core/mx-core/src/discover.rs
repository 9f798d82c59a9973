use std::path::Path;

use crate::config::CoreSection;
use crate::loader::PluginLoader;
use crate::registry::RegistryEntry;

/// Scans `config.component_paths` for files matching `soname_suffix`,
/// probing each with `loader` and building one `RegistryEntry` per plugin
/// that loads and reports at least one role (§4.1, §8 S1). A plugin
/// failing to load or reporting zero roles is skipped with a warning, not
/// fatal to the scan. Duplicate component names keep the first-seen entry.
pub fn discover_plugins(config: &CoreSection, loader: &dyn PluginLoader) -> Vec<RegistryEntry> {
    let mut entries: Vec<RegistryEntry> = Vec::new();

    for dir in &config.component_paths {
        let read_dir = match std::fs::read_dir(dir) {
            Ok(rd) => rd,
            Err(err) => {
                tracing::warn!(%dir, %err, "component path not readable, skipping");
                continue;
            }
        };

        for entry in read_dir.flatten() {
            let path = entry.path();
            let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if !file_name.ends_with(&config.soname_suffix) {
                continue;
            }
            let component_name = component_name_from_file(file_name, &config.soname_suffix);
            if entries.iter().any(|e| e.component_name == component_name) {
                tracing::warn!(%component_name, "duplicate component name, keeping first-seen entry");
                continue;
            }

            let Some(path_str) = path.to_str() else {
                continue;
            };
            match loader.probe(path_str, &config.entry_point_symbol) {
                Some(probe) if !probe.roles.is_empty() => {
                    entries.push(RegistryEntry {
                        component_name,
                        dl_path: path_str.to_string(),
                        role_list: probe.roles,
                        entry_point_symbol: config.entry_point_symbol.clone(),
                    });
                }
                Some(_) => {
                    tracing::warn!(%component_name, "plugin reported zero roles, skipping");
                }
                None => {
                    tracing::warn!(%component_name, "plugin failed probe, skipping");
                }
            }
        }
    }

    entries
}

fn component_name_from_file(file_name: &str, soname_suffix: &str) -> String {
    file_name
        .strip_suffix(soname_suffix)
        .unwrap_or(file_name)
        .trim_start_matches("lib")
        .replace('_', ".")
}

#[cfg(test)]
mod tests {
    use mx_abi::Role;

    use super::*;
    use crate::loader::ProbeResult;

    struct FakeLoader {
        roles: Vec<Role>,
    }

    impl PluginLoader for FakeLoader {
        fn probe(&self, _path: &str, _entry_point_symbol: &str) -> Option<ProbeResult> {
            Some(ProbeResult {
                roles: self.roles.clone().into(),
            })
        }

        fn instantiate(
            &self,
            _path: &str,
            _entry_point_symbol: &str,
            _role: &Role,
            _id: mx_abi::ComponentId,
        ) -> mx_abi::OmxResult<mx_component::ComponentHandle> {
            unimplemented!("not exercised by discovery tests")
        }
    }

    fn section_for(dir: &Path) -> CoreSection {
        CoreSection {
            component_paths: vec![dir.to_str().unwrap().to_string()],
            soname_suffix: ".so.0.0.0".to_string(),
            entry_point_symbol: "mx_component_init".to_string(),
        }
    }

    #[test]
    fn t_suffixed_file_is_filtered_out() {
        let dir = std::env::temp_dir().join(format!("mx-core-discover-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("libmx_source.so.0.0.0T"), b"").unwrap();
        std::fs::write(dir.join("libmx_source.so.0.0.0"), b"").unwrap();

        let config = section_for(&dir);
        let loader = FakeLoader {
            roles: vec![Role::new("audio_source.http").unwrap()],
        };
        let entries = discover_plugins(&config, &loader);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].dl_path, dir.join("libmx_source.so.0.0.0").to_str().unwrap());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn zero_role_plugin_is_skipped() {
        let dir = std::env::temp_dir().join(format!("mx-core-discover-test-zero-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("libmx_empty.so.0.0.0"), b"").unwrap();

        let config = section_for(&dir);
        let loader = FakeLoader { roles: vec![] };
        let entries = discover_plugins(&config, &loader);
        assert!(entries.is_empty());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn duplicate_names_keep_first_seen() {
        assert_eq!(
            component_name_from_file("libmx_source.so.0.0.0", ".so.0.0.0"),
            "mx.source"
        );
    }
}
