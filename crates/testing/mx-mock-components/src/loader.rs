use mx_abi::{ComponentId, OmxError, OmxResult, Role};
use mx_component::ComponentHandle;
use mx_core::{PluginLoader, ProbeResult};

use crate::components::{mock_passthrough_component, mock_sink_component, mock_source_component};

const ROLE_SOURCE: &str = "mock.source";
const ROLE_PASSTHROUGH: &str = "mock.passthrough";
const ROLE_SINK: &str = "mock.sink";

/// A `PluginLoader` that recognises three fixed file-name substrings
/// ("source", "passthrough", "sink") instead of calling `dlopen`, so
/// `discover_plugins`/`Core::get_handle` can be exercised against
/// `mock_source_component`/`mock_passthrough_component`/`mock_sink_component`
/// without a real shared object on disk.
#[derive(Default)]
pub struct MockLoader;

impl PluginLoader for MockLoader {
    fn probe(&self, path: &str, _entry_point_symbol: &str) -> Option<ProbeResult> {
        let role = role_for_path(path)?;
        Some(ProbeResult {
            roles: smallvec::smallvec![Role::new(role).unwrap()],
        })
    }

    fn instantiate(&self, path: &str, _entry_point_symbol: &str, role: &Role, id: ComponentId) -> OmxResult<ComponentHandle> {
        match role.as_str() {
            ROLE_SOURCE => Ok(mock_source_component(id)),
            ROLE_PASSTHROUGH => Ok(mock_passthrough_component(id)),
            ROLE_SINK => Ok(mock_sink_component(id)),
            _ => {
                tracing::error!(%path, %role, "mock loader has no component for this role");
                Err(OmxError::ComponentNotFound)
            }
        }
    }
}

fn role_for_path(path: &str) -> Option<&'static str> {
    if path.contains("source") {
        Some(ROLE_SOURCE)
    } else if path.contains("passthrough") {
        Some(ROLE_PASSTHROUGH)
    } else if path.contains("sink") {
        Some(ROLE_SINK)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probe_recognizes_known_roles_and_rejects_unknown() {
        let loader = MockLoader;
        assert!(loader.probe("/plugins/libmx_mock_source.so.0.0.0", "mx_component_init").is_some());
        assert!(loader
            .probe("/plugins/libmx_mock_passthrough.so.0.0.0", "mx_component_init")
            .is_some());
        assert!(loader.probe("/plugins/libmx_mock_sink.so.0.0.0", "mx_component_init").is_some());
        assert!(loader.probe("/plugins/libmx_unknown.so.0.0.0", "mx_component_init").is_none());
    }

    #[test]
    fn instantiate_builds_the_matching_component_kind() {
        let loader = MockLoader;
        let role = Role::new(ROLE_PASSTHROUGH).unwrap();
        let handle = loader
            .instantiate("/plugins/libmx_mock_passthrough.so.0.0.0", "mx_component_init", &role, ComponentId(1))
            .unwrap();
        assert_eq!(handle.name(), "mx.mock.passthrough");
        assert_eq!(handle.component_id(), ComponentId(1));
    }

    #[test]
    fn instantiate_rejects_an_unregistered_role() {
        let loader = MockLoader;
        let role = Role::new("mock.transcoder").unwrap();
        assert_eq!(
            loader.instantiate("/plugins/libmx_mock_transcoder.so.0.0.0", "mx_component_init", &role, ComponentId(1)),
            Err(OmxError::ComponentNotFound)
        );
    }
}
