//! Error types for backend and capability operations.
//!
//! [`BackendError`] covers failures of the component that talks to the
//! device (disconnection, timeouts, unsupported operations, bad data).
//! [`CapabilityError`] is what a zone handle returns to its caller: it wraps
//! backend failures with the zone and capability they belong to, and adds
//! the validation failures that are detected before the backend is reached.

use audiozone_core::{CapabilityKind, ZoneId};

/// Result type alias for backend operations.
pub type Result<T> = std::result::Result<T, BackendError>;

/// Errors that can occur inside a capability backend.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    /// Device is not reachable or has been disconnected.
    #[error("Device disconnected: {device}")]
    Disconnected { device: String },

    /// Operation timed out after specified duration.
    #[error("Operation timeout after {duration_ms}ms")]
    Timeout { duration_ms: u64 },

    /// Operation is not supported by this backend.
    #[error("Unsupported operation: {operation}")]
    Unsupported { operation: String },

    /// Device communication error.
    #[error("Communication error: {message}")]
    CommunicationError { message: String },

    /// Invalid data received from device.
    #[error("Invalid data: {message}")]
    InvalidData { message: String },

    /// Unknown zone for this backend.
    #[error("Unknown zone: {zone}")]
    UnknownZone { zone: String },

    /// Generic error with custom message.
    #[error("{0}")]
    Other(String),
}

impl BackendError {
    /// Create a new disconnected error.
    pub fn disconnected(device: impl Into<String>) -> Self {
        Self::Disconnected {
            device: device.into(),
        }
    }

    /// Create a new timeout error.
    pub fn timeout(duration_ms: u64) -> Self {
        Self::Timeout { duration_ms }
    }

    /// Create a new unsupported operation error.
    pub fn unsupported(operation: impl Into<String>) -> Self {
        Self::Unsupported {
            operation: operation.into(),
        }
    }

    /// Create a new communication error.
    pub fn communication(message: impl Into<String>) -> Self {
        Self::CommunicationError {
            message: message.into(),
        }
    }

    /// Create a new invalid data error.
    pub fn invalid_data(message: impl Into<String>) -> Self {
        Self::InvalidData {
            message: message.into(),
        }
    }

    /// Create a new unknown zone error.
    pub fn unknown_zone(zone: &ZoneId) -> Self {
        Self::UnknownZone {
            zone: zone.to_string(),
        }
    }

    /// Create a generic error with custom message.
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other(message.into())
    }

    /// Whether retrying the same call may succeed.
    ///
    /// Timeouts, communication errors and disconnections are transient.
    /// Everything else will fail the same way again.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::Timeout { .. } | Self::CommunicationError { .. } | Self::Disconnected { .. }
        )
    }
}

/// Errors returned by a zone handle to its caller.
///
/// These are local to one call on one zone. They never affect other zones
/// or the registry.
#[derive(Debug, thiserror::Error)]
pub enum CapabilityError {
    /// The capability is not known, or the backend does not support it.
    #[error("Unsupported capability: {name}")]
    UnsupportedCapability { name: String },

    /// The value does not fit the capability schema.
    #[error("Invalid value for {kind}: {message}")]
    InvalidValue {
        kind: CapabilityKind,
        message: String,
    },

    /// The backend did not answer within the operation timeout.
    #[error("Zone {zone}: {kind} operation timed out after {duration_ms}ms")]
    Timeout {
        zone: ZoneId,
        kind: CapabilityKind,
        duration_ms: u64,
    },

    /// The operation was cancelled before it completed.
    #[error("Zone {zone}: {kind} operation cancelled")]
    Cancelled { zone: ZoneId, kind: CapabilityKind },

    /// The backend failed.
    #[error("Zone {zone}: {kind} backend failure: {source}")]
    Backend {
        zone: ZoneId,
        kind: CapabilityKind,
        #[source]
        source: BackendError,
    },

    /// Any other core error, such as an unreadable configuration.
    #[error(transparent)]
    Core(audiozone_core::Error),
}

impl CapabilityError {
    /// Create a new backend failure.
    pub fn backend(zone: &ZoneId, kind: CapabilityKind, source: BackendError) -> Self {
        Self::Backend {
            zone: zone.clone(),
            kind,
            source,
        }
    }
}

impl From<audiozone_core::Error> for CapabilityError {
    fn from(error: audiozone_core::Error) -> Self {
        match error {
            audiozone_core::Error::InvalidValue { kind, message } => {
                Self::InvalidValue { kind, message }
            }
            audiozone_core::Error::UnsupportedCapability(name) => {
                Self::UnsupportedCapability { name }
            }
            other => Self::Core(other),
        }
    }
}
