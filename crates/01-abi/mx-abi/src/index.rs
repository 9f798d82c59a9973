/// The 32-bit parameter/config index namespace, partitioned into ranges.
/// Unknown indices are rejected with `OmxError::UnsupportedIndex` by the
/// port or component that receives them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IndexType {
    ComponentLevel(u32),
    PortLevel(u32),
    Audio(u32),
    Image(u32),
    Video(u32),
    Common(u32),
    ReservedTime(u32),
    Vendor(u32),
}

/// First value in the vendor-extension range.
pub const VENDOR_START: u32 = 0x7F00_0000;

impl IndexType {
    /// Constructs a vendor-extension index, rejecting values below the
    /// reserved range.
    pub fn vendor(raw: u32) -> Result<IndexType, crate::error::OmxError> {
        if raw < VENDOR_START {
            return Err(crate::error::OmxError::BadParameter);
        }
        Ok(IndexType::Vendor(raw))
    }

    /// The raw 32-bit value, discarding which range it came from.
    pub fn raw(&self) -> u32 {
        match *self {
            IndexType::ComponentLevel(v)
            | IndexType::PortLevel(v)
            | IndexType::Audio(v)
            | IndexType::Image(v)
            | IndexType::Video(v)
            | IndexType::Common(v)
            | IndexType::ReservedTime(v)
            | IndexType::Vendor(v) => v,
        }
    }
}
