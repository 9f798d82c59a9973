/// A port's media domain. Tunnel compatibility always requires matching
/// domains; codec-level compatibility within a domain is checked separately.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PortDomain {
    Audio,
    Video,
    Image,
    Other,
}

/// Direction of data flow through a port.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Input,
    Output,
}
