//! S6 (port auto-detect failure): an auto-detect source port is wired
//! into a real component and driven through the public vtable, not just
//! the bare `mx_port::other::AutoDetect` behaviour — confirming the
//! undetected-format state (reported as 0) survives the full
//! `GetParameter`/`SetParameter` round trip and that the index is
//! read-only end to end.

use mx_abi::{ComponentId, IndexType, OmxError, PortIndex, Role};
use mx_component::{ComponentHandle, ComponentOps, ComponentRuntime};
use mx_kernel::Kernel;
use mx_port::{other, ConfigPort, Direction, Port, PortDefinition, PortDomain};

const INDEX_AUTODETECT_FORMAT: IndexType = IndexType::Common(0x0005);

fn autodetect_source_component(id: ComponentId) -> ComponentHandle {
    let def = PortDefinition::new(PortDomain::Other, Direction::Output, 2, 4096);
    let port = Port::new(PortIndex(0), def, Box::new(other::AutoDetect::new()));
    let config_port = ConfigPort::new(Box::new(other::UriConfig::new()));
    let kernel = Kernel::new(vec![port], config_port);

    let runtime = ComponentRuntime::new_with_default_callbacks(
        id,
        "mx.test.autodetect".to_string(),
        ("1.0".to_string(), 1),
        vec![Role::new("test.autodetect").unwrap()],
        vec![PortIndex(0)],
        kernel,
        Vec::new(),
        None,
    );
    ComponentHandle::new(runtime)
}

#[test]
fn an_undetected_port_reports_zero_through_get_parameter() {
    let source = autodetect_source_component(ComponentId(1));
    let bytes = source.get_parameter(PortIndex(0), INDEX_AUTODETECT_FORMAT).unwrap();
    assert_eq!(bytes, 0u32.to_le_bytes().to_vec());
}

#[test]
fn the_autodetect_index_is_read_only_through_the_full_vtable() {
    let source = autodetect_source_component(ComponentId(1));
    let result = source.set_parameter(PortIndex(0), INDEX_AUTODETECT_FORMAT, &0u32.to_le_bytes());
    assert_eq!(result, Err(OmxError::UnsupportedSetting));
}
