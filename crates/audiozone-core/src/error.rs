use thiserror::Error;

use crate::types::CapabilityKind;

#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors
    #[error("Zone entry #{index} is missing an id")]
    MissingZoneId { index: usize },

    #[error("Duplicate zone id: {0}")]
    DuplicateZoneId(String),

    #[error("Invalid zone id: {0:?}")]
    InvalidZoneId(String),

    #[error("Configuration error: {0}")]
    Config(String),

    // Capability errors
    #[error("Unsupported capability: {0}")]
    UnsupportedCapability(String),

    #[error("Invalid value for {kind}: {message}")]
    InvalidValue {
        kind: CapabilityKind,
        message: String,
    },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a new invalid value error.
    pub fn invalid_value(kind: CapabilityKind, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            kind,
            message: message.into(),
        }
    }

    /// Create a new unsupported capability error.
    pub fn unsupported(name: impl Into<String>) -> Self {
        Self::UnsupportedCapability(name.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_zone_id_message() {
        let error = Error::MissingZoneId { index: 2 };
        assert_eq!(error.to_string(), "Zone entry #2 is missing an id");
    }

    #[test]
    fn test_invalid_value_message() {
        let error = Error::invalid_value(CapabilityKind::Volume, "150 is out of range 0-100");
        assert!(matches!(error, Error::InvalidValue { .. }));
        assert_eq!(
            error.to_string(),
            "Invalid value for volume: 150 is out of range 0-100"
        );
    }

    #[test]
    fn test_unsupported_message() {
        let error = Error::unsupported("brightness");
        assert_eq!(error.to_string(), "Unsupported capability: brightness");
    }
}
