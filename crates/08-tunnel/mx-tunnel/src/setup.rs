use mx_abi::{ComponentId, OmxError, OmxResult, PortIndex};
use mx_port::{Port, TunnelPeer};

/// A request to establish (`Some`) or tear down (`None`) a tunnel between
/// this port and a peer, the payload of a `ComponentTunnelRequest` call
/// (§4.5 step 1/2).
#[derive(Clone, Copy, Debug)]
pub struct TunnelRequest {
    pub peer_component: Option<ComponentId>,
    pub peer_port: Option<PortIndex>,
}

impl TunnelRequest {
    pub fn teardown() -> Self {
        Self {
            peer_component: None,
            peer_port: None,
        }
    }

    pub fn to(component: ComponentId, port: PortIndex) -> Self {
        Self {
            peer_component: Some(component),
            peer_port: Some(port),
        }
    }

    pub fn is_teardown(&self) -> bool {
        self.peer_component.is_none()
    }
}

/// Establishes a tunnel between an output port and an input port (§4.5):
/// checks domain/format compatibility before mutating either side, elects
/// the buffer supplier via `negotiate_supplier`, and records the peer on
/// both ports. On any error neither port's peer/flag state is touched.
pub fn setup_tunnel(
    out_component: ComponentId,
    out_index: PortIndex,
    out_port: &mut Port,
    in_component: ComponentId,
    in_index: PortIndex,
    in_port: &mut Port,
) -> OmxResult<()> {
    out_port.check_tunnel_compat(in_port.definition())?;
    in_port.check_tunnel_compat(out_port.definition())?;

    let supplier = mx_abi::negotiate_supplier(
        out_port.definition().supplier_preference,
        in_port.definition().supplier_preference,
    );

    out_port.set_tunnel_peer(Some(TunnelPeer {
        component: in_component,
        port: in_index,
    }));
    in_port.set_tunnel_peer(Some(TunnelPeer {
        component: out_component,
        port: out_index,
    }));

    let mut out_def = out_port.definition().clone();
    out_def.supplier_preference = supplier;
    out_port
        .set_portdef_format(out_def)
        .map_err(|_| OmxError::PortsNotCompatible)?;

    let _ = out_index;
    Ok(())
}

/// Tears down a tunnel: clears the peer reference on both ports. Does not
/// fail — teardown is always possible once a tunnel exists.
pub fn teardown_tunnel(out_port: &mut Port, in_port: &mut Port) {
    out_port.set_tunnel_peer(None);
    in_port.set_tunnel_peer(None);
}
