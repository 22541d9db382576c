//! Error types for the host adapter.

use audiozone_backend::CapabilityError;

pub type Result<T> = std::result::Result<T, BridgeError>;

#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error("Accessories have already been published")]
    AlreadyPublished,

    #[error("Unknown characteristic: {0}")]
    UnknownCharacteristic(String),

    #[error("Configuration error: {0}")]
    Config(#[from] audiozone_core::Error),

    #[error(transparent)]
    Capability(#[from] CapabilityError),
}

impl BridgeError {
    pub fn unknown_characteristic(name: impl Into<String>) -> Self {
        Self::UnknownCharacteristic(name.into())
    }

    /// Whether the error was caused by the host sending a bad value or name,
    /// as opposed to a backend failure.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownCharacteristic(_)
                | Self::Capability(CapabilityError::InvalidValue { .. })
                | Self::Capability(CapabilityError::UnsupportedCapability { .. })
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use audiozone_core::CapabilityKind;

    #[test]
    fn test_already_published_message() {
        assert_eq!(
            BridgeError::AlreadyPublished.to_string(),
            "Accessories have already been published"
        );
    }

    #[test]
    fn test_capability_error_is_transparent() {
        let error = BridgeError::from(CapabilityError::InvalidValue {
            kind: CapabilityKind::Volume,
            message: "150 is out of range 0-100".to_string(),
        });
        assert_eq!(
            error.to_string(),
            "Invalid value for volume: 150 is out of range 0-100"
        );
        assert!(error.is_client_error());
    }

    #[test]
    fn test_config_error_wraps_core_error() {
        let error = BridgeError::from(audiozone_core::Error::MissingZoneId { index: 0 });
        assert!(matches!(error, BridgeError::Config(_)));
        assert!(!error.is_client_error());
    }
}
