//! S4 (supplier election): two single-port audio components tunnel
//! together with differing `supplier_preference` settings, and the winning
//! side is read back off the negotiated port definitions after
//! `setup_tunnel_with` runs.

use mx_abi::{BufferSupplier, ComponentId, PortIndex, Role};
use mx_component::{ComponentHandle, ComponentRuntime};
use mx_kernel::Kernel;
use mx_port::{audio::Pcm, ConfigPort, Direction, Port, PortDefinition, PortDomain};

fn pcm_component(id: ComponentId, direction: Direction, supplier: BufferSupplier) -> ComponentHandle {
    let mut def = PortDefinition::new(PortDomain::Audio, direction, 2, 4096);
    def.supplier_preference = supplier;
    let port = Port::new(PortIndex(0), def, Box::new(Pcm::new(48_000, 2, 16)));
    let config_port = ConfigPort::new(Box::new(mx_port::other::Binary::new()));
    let kernel = Kernel::new(vec![port], config_port);

    let runtime = ComponentRuntime::new_with_default_callbacks(
        id,
        format!("mx.test.pcm.{}", id.0),
        ("1.0".to_string(), 1),
        vec![Role::new("test.pcm").unwrap()],
        vec![PortIndex(0)],
        kernel,
        Vec::new(),
        None,
    );
    ComponentHandle::new(runtime)
}

fn supplier_of(handle: &ComponentHandle, index: PortIndex) -> BufferSupplier {
    handle.port_tunnel_peer(index).expect("tunnel peer recorded");
    // supplier preference lives on the port definition, which `port_tunnel_peer`
    // doesn't expose; read it back through the same lock the handle itself uses.
    handle.supplier_preference(index)
}

#[test]
fn both_sides_unspecified_falls_back_to_output_supplying() {
    let output = pcm_component(ComponentId(1), Direction::Output, BufferSupplier::Unspecified);
    let input = pcm_component(ComponentId(2), Direction::Input, BufferSupplier::Unspecified);
    output.setup_tunnel_with(PortIndex(0), &input, PortIndex(0)).unwrap();

    assert_eq!(supplier_of(&output, PortIndex(0)), BufferSupplier::Output);
    assert_eq!(supplier_of(&input, PortIndex(0)), BufferSupplier::Output);
}

#[test]
fn input_sides_preference_wins_on_disagreement() {
    let output = pcm_component(ComponentId(1), Direction::Output, BufferSupplier::Output);
    let input = pcm_component(ComponentId(2), Direction::Input, BufferSupplier::Input);
    output.setup_tunnel_with(PortIndex(0), &input, PortIndex(0)).unwrap();

    assert_eq!(supplier_of(&output, PortIndex(0)), BufferSupplier::Input);
    assert_eq!(supplier_of(&input, PortIndex(0)), BufferSupplier::Input);
}

#[test]
fn an_unspecified_side_defers_to_its_peers_preference() {
    let output = pcm_component(ComponentId(1), Direction::Output, BufferSupplier::Unspecified);
    let input = pcm_component(ComponentId(2), Direction::Input, BufferSupplier::Input);
    output.setup_tunnel_with(PortIndex(0), &input, PortIndex(0)).unwrap();

    assert_eq!(supplier_of(&output, PortIndex(0)), BufferSupplier::Input);
    assert_eq!(supplier_of(&input, PortIndex(0)), BufferSupplier::Input);
}
