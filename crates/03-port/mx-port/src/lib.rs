//! The port abstraction (§4.3): a fixed port index mapped to a populated set
//! of buffer headers, plus the specialised audio/video/image/other port
//! kinds built by composing a `DomainBehaviour` onto the shared `Port` base
//! rather than through inheritance.

pub mod audio;
mod behaviour;
mod definition;
mod domain;
mod flags;
pub mod image;
pub mod other;
mod port;
mod store;
pub mod video;

pub use behaviour::DomainBehaviour;
pub use definition::PortDefinition;
pub use domain::{Direction, PortDomain};
pub use flags::{PortFlags, TunnelStatus};
pub use port::{ConfigPort, Port, TunnelPeer};
pub use store::IndexStore;

#[cfg(test)]
mod tests {
    use super::*;
    use mx_abi::BufferSupplier;

    fn audio_port(index: mx_abi::PortIndex) -> Port {
        let def = PortDefinition::new(PortDomain::Audio, Direction::Input, 2, 4096);
        Port::new(index, def, Box::new(audio::Pcm::new(48_000, 2, 16)))
    }

    #[test]
    fn cross_domain_tunnel_is_always_rejected() {
        let port = audio_port(mx_abi::PortIndex(0));
        let video_def = PortDefinition::new(PortDomain::Video, Direction::Output, 2, 4096);
        assert_eq!(
            port.check_tunnel_compat(&video_def),
            Err(mx_abi::OmxError::PortsNotCompatible)
        );
    }

    #[test]
    fn same_domain_tunnel_is_accepted() {
        let port = audio_port(mx_abi::PortIndex(0));
        let peer_def = PortDefinition::new(PortDomain::Audio, Direction::Output, 2, 4096);
        assert_eq!(port.check_tunnel_compat(&peer_def), Ok(()));
    }

    #[test]
    fn unregistered_index_is_unsupported() {
        let port = audio_port(mx_abi::PortIndex(0));
        assert_eq!(
            port.get_parameter(mx_abi::IndexType::Video(0)),
            Err(mx_abi::OmxError::UnsupportedIndex)
        );
    }

    #[test]
    fn supplier_preference_defaults_to_unspecified() {
        let port = audio_port(mx_abi::PortIndex(0));
        assert_eq!(
            port.definition().supplier_preference,
            BufferSupplier::Unspecified
        );
    }
}
