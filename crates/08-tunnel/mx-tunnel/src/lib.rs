//! The tunnel setup protocol (§4.5) and tunneled-port status sync (§4.6),
//! standalone so both `mx-kernel` and `mx-core` can depend on it without a
//! cycle between them.

mod setup;

pub use mx_abi::negotiate_supplier;
pub use setup::{setup_tunnel, teardown_tunnel, TunnelRequest};

#[cfg(test)]
mod tests {
    use mx_abi::{BufferSupplier, ComponentId, OmxError, PortIndex};
    use mx_port::{Direction, Port, PortDefinition, PortDomain};

    use super::*;

    fn audio_port(direction: Direction, supplier: BufferSupplier) -> Port {
        let mut def = PortDefinition::new(PortDomain::Audio, direction, 2, 4096);
        def.supplier_preference = supplier;
        Port::new(PortIndex(0), def, Box::new(mx_port::audio::Pcm::new(48_000, 2, 16)))
    }

    #[test]
    fn compatible_domains_negotiate_and_record_peers() {
        let mut out_port = audio_port(Direction::Output, BufferSupplier::Unspecified);
        let mut in_port = audio_port(Direction::Input, BufferSupplier::Unspecified);
        setup_tunnel(
            ComponentId(1),
            PortIndex(0),
            &mut out_port,
            ComponentId(2),
            PortIndex(0),
            &mut in_port,
        )
        .unwrap();
        assert_eq!(out_port.definition().supplier_preference, BufferSupplier::Output);
        assert!(out_port.tunnel_peer().is_some());
        assert!(in_port.tunnel_peer().is_some());
    }

    #[test]
    fn cross_domain_rejection_leaves_no_side_effects() {
        let mut out_port = audio_port(Direction::Output, BufferSupplier::Unspecified);
        let mut video_def = PortDefinition::new(PortDomain::Video, Direction::Input, 2, 4096);
        video_def.supplier_preference = BufferSupplier::Unspecified;
        let mut in_port = Port::new(PortIndex(0), video_def, Box::new(mx_port::video::Video::new(640, 480, 30)));

        let result = setup_tunnel(
            ComponentId(1),
            PortIndex(0),
            &mut out_port,
            ComponentId(2),
            PortIndex(0),
            &mut in_port,
        );
        assert_eq!(result, Err(OmxError::PortsNotCompatible));
        assert!(out_port.tunnel_peer().is_none());
        assert!(in_port.tunnel_peer().is_none());
    }

    #[test]
    fn teardown_clears_both_peers() {
        let mut out_port = audio_port(Direction::Output, BufferSupplier::Output);
        let mut in_port = audio_port(Direction::Input, BufferSupplier::Unspecified);
        setup_tunnel(
            ComponentId(1),
            PortIndex(0),
            &mut out_port,
            ComponentId(2),
            PortIndex(0),
            &mut in_port,
        )
        .unwrap();
        teardown_tunnel(&mut out_port, &mut in_port);
        assert!(out_port.tunnel_peer().is_none());
        assert!(in_port.tunnel_peer().is_none());
    }
}
