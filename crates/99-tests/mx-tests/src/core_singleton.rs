//! The one test in this crate that drives the process-wide `mx_core::Core`
//! singleton end to end (Init -> GetHandle x2 -> SetupTunnel -> pump ->
//! TeardownTunnel -> FreeHandle -> Deinit). `Core::get_or_init_with_config`
//! only takes effect on its very first call in a process, so every other
//! scenario in this crate deliberately avoids touching it and exercises
//! `discover_plugins`/`mx-mock-components` directly instead.

use mx_abi::PortIndex;
use mx_core::{Core, CoreConfig, CoreSection};
use mx_mock_components::{MockLoader, NullCallbacks};

fn scratch_dir() -> std::path::PathBuf {
    let dir = std::env::temp_dir().join(format!("mx-tests-core-singleton-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn full_lifecycle_through_the_live_core() {
    let dir = scratch_dir();
    std::fs::write(dir.join("libmx_mock_source.so.0.0.0"), b"").unwrap();
    std::fs::write(dir.join("libmx_mock_sink.so.0.0.0"), b"").unwrap();

    let config = CoreConfig {
        core: CoreSection {
            component_paths: vec![dir.to_str().unwrap().to_string()],
            soname_suffix: ".so.0.0.0".to_string(),
            entry_point_symbol: "mx_component_init".to_string(),
        },
    };

    let core: &'static Core = Core::get_or_init_with_config(config, Box::new(MockLoader));
    core.init().unwrap();

    let source = core.get_handle("mx.mock.source", Box::new(NullCallbacks::default())).unwrap();
    let sink = core.get_handle("mx.mock.sink", Box::new(NullCallbacks::default())).unwrap();

    core.setup_tunnel(source.component_id(), PortIndex(0), sink.component_id(), PortIndex(0))
        .unwrap();
    assert!(source.port_tunnel_peer(PortIndex(0)).is_some());
    assert!(sink.port_tunnel_peer(PortIndex(0)).is_some());

    source.pump();
    sink.pump();

    core.teardown_tunnel(source.component_id(), PortIndex(0), sink.component_id(), PortIndex(0))
        .unwrap();
    assert!(source.port_tunnel_peer(PortIndex(0)).is_none());
    assert!(sink.port_tunnel_peer(PortIndex(0)).is_none());

    core.free_handle(source.component_id()).unwrap();
    core.free_handle(sink.component_id()).unwrap();
    core.deinit().unwrap();

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn component_name_enum_not_started_yet_by_this_test_reuses_the_same_singleton() {
    // Any second call into `Core::get_or_init*` returns the same instance
    // this process already created in the test above; this test exists to
    // document that fact rather than to build its own core.
    let dir = scratch_dir();
    let config = CoreConfig {
        core: CoreSection {
            component_paths: vec![dir.to_str().unwrap().to_string()],
            soname_suffix: ".so.0.0.0".to_string(),
            entry_point_symbol: "mx_component_init".to_string(),
        },
    };
    let core = Core::get_or_init_with_config(config, Box::new(MockLoader));
    // Re-running Init on an already-started (or already-stopped, depending
    // on test execution order) core must not panic or deadlock either way.
    let _ = core.init();
    std::fs::remove_dir_all(&dir).ok();
}
