use std::fmt;

use crate::error::OmxError;

/// A named behavioural contract a component may advertise, e.g.
/// `audio_decoder.mp3`. A component may implement more than one.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Role(String);

impl Role {
    pub fn new(name: impl Into<String>) -> Result<Role, OmxError> {
        let name = name.into();
        if name.is_empty() {
            return Err(OmxError::BadParameter);
        }
        Ok(Role(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
