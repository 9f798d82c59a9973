//! S1 (registry bring-up) and S2 (role query): both exercised through the
//! bare `discover_plugins` function against a temp directory of fake
//! plugin files and `mx_mock_components::MockLoader`, bypassing the live
//! `Core` singleton entirely.

use mx_core::{discover_plugins, CoreSection};
use mx_mock_components::MockLoader;

fn section_for(dir: &std::path::Path) -> CoreSection {
    CoreSection {
        component_paths: vec![dir.to_str().unwrap().to_string()],
        soname_suffix: ".so.0.0.0".to_string(),
        entry_point_symbol: "mx_component_init".to_string(),
    }
}

fn scratch_dir(name: &str) -> std::path::PathBuf {
    let dir = std::env::temp_dir().join(format!("mx-tests-{name}-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn registry_discovers_every_recognised_plugin_on_the_path() {
    let dir = scratch_dir("registry-bringup");
    std::fs::write(dir.join("libmx_mock_source.so.0.0.0"), b"").unwrap();
    std::fs::write(dir.join("libmx_mock_passthrough.so.0.0.0"), b"").unwrap();
    std::fs::write(dir.join("libmx_mock_sink.so.0.0.0"), b"").unwrap();
    std::fs::write(dir.join("libmx_mock_unknown.so.0.0.0"), b"").unwrap();

    let config = section_for(&dir);
    let loader = MockLoader;
    let entries = discover_plugins(&config, &loader);

    assert_eq!(entries.len(), 3, "the unrecognised-role plugin is skipped, not fatal");
    let names: Vec<&str> = entries.iter().map(|e| e.component_name.as_str()).collect();
    assert!(names.contains(&"mx.mock.source"));
    assert!(names.contains(&"mx.mock.passthrough"));
    assert!(names.contains(&"mx.mock.sink"));

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn role_of_component_enum_lists_every_role_then_no_more() {
    let dir = scratch_dir("role-query");
    std::fs::write(dir.join("libmx_mock_passthrough.so.0.0.0"), b"").unwrap();

    let config = section_for(&dir);
    let loader = MockLoader;
    let entries = discover_plugins(&config, &loader);
    assert_eq!(entries.len(), 1);

    let entry = &entries[0];
    assert_eq!(entry.role_list.len(), 1);
    assert_eq!(entry.role_list[0].as_str(), "mock.passthrough");

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn an_empty_component_path_yields_an_empty_registry() {
    let dir = scratch_dir("empty-path");
    let config = section_for(&dir);
    let loader = MockLoader;
    assert!(discover_plugins(&config, &loader).is_empty());
    std::fs::remove_dir_all(&dir).ok();
}
