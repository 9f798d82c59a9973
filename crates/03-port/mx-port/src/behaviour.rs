use mx_abi::{IndexType, OmxError, OmxResult};
use smallvec::SmallVec;

use crate::definition::PortDefinition;

/// The capability set a specialised port kind implements, composed onto the
/// base `Port` rather than reached through inheritance (the source's
/// deep port class hierarchy collapses to this single trait object).
pub trait DomainBehaviour: Send {
    /// Indices this domain behaviour answers, beyond whatever the base port
    /// already registers.
    fn registered_indices(&self) -> &[IndexType];

    /// Reads the current value for `index`. Returns `UnsupportedIndex` if
    /// `index` is not in `registered_indices()`.
    fn get_parameter(&self, index: IndexType) -> OmxResult<Vec<u8>>;

    /// Applies a new value for `index`. Returns `UnsupportedIndex` if not
    /// registered, `UnsupportedSetting` if the value is out of range.
    fn set_parameter(&mut self, index: IndexType, bytes: &[u8]) -> OmxResult<()>;

    /// Validates a proposed tunnel peer beyond the mandatory domain check
    /// the base `Port` already performs.
    fn check_tunnel_compat(&self, peer: &PortDefinition) -> OmxResult<()>;

    /// Applies a master-port parameter change to this (slave) port,
    /// returning which indices actually propagated.
    fn apply_slaving(&mut self, index: IndexType, value: &[u8]) -> SmallVec<[IndexType; 4]> {
        let _ = (index, value);
        SmallVec::new()
    }

    /// Binds an EGL image as this port's buffer storage. No port kind in
    /// this codebase backs onto an EGL surface, so the default simply
    /// refuses; a port kind that gains GPU-backed buffers would override
    /// this the same way it overrides `apply_slaving`.
    fn use_egl_image(&mut self, egl_image: &[u8]) -> OmxResult<()> {
        let _ = egl_image;
        Err(OmxError::UnsupportedSetting)
    }
}
