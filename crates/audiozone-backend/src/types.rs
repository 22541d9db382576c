//! Common types shared by backends, zone handles and the registry.

use audiozone_core::constants::{DEFAULT_MAX_RETRIES, DEFAULT_OPERATION_TIMEOUT_MS, MAX_RETRIES_LIMIT};
use audiozone_core::{CapabilityKind, CapabilityValue, ZoneId};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Acknowledgement of a capability write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ack {
    /// Zone the write was addressed to.
    pub zone_id: ZoneId,

    /// Capability that was written.
    pub kind: CapabilityKind,

    /// Value the backend accepted.
    pub value: CapabilityValue,

    /// Time the backend acknowledged the write.
    pub acknowledged_at: chrono::DateTime<chrono::Utc>,
}

impl Ack {
    /// Create an acknowledgement stamped with the current time.
    pub fn new(zone_id: ZoneId, kind: CapabilityKind, value: CapabilityValue) -> Self {
        Self {
            zone_id,
            kind,
            value,
            acknowledged_at: chrono::Utc::now(),
        }
    }
}

/// Result of a capability write on a zone handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetOutcome {
    /// The backend accepted the write.
    Applied(Ack),

    /// Events are suppressed on the zone; the backend was not called.
    Suppressed,
}

impl SetOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }

    pub fn ack(&self) -> Option<&Ack> {
        match self {
            Self::Applied(ack) => Some(ack),
            Self::Suppressed => None,
        }
    }
}

/// Metadata describing a backend implementation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendInfo {
    /// Backend name (e.g., "Stub Backend").
    pub name: String,

    /// Whether writes change what later reads return.
    pub stateful: bool,
}

impl BackendInfo {
    pub fn new(name: impl Into<String>, stateful: bool) -> Self {
        Self {
            name: name.into(),
            stateful,
        }
    }
}

/// Timeout and retry policy applied to every backend call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationPolicy {
    /// Upper bound for a single backend call.
    pub timeout: Duration,

    /// Extra attempts after a transient failure.
    pub max_retries: u8,
}

impl OperationPolicy {
    pub fn new(timeout: Duration, max_retries: u8) -> Self {
        Self {
            timeout,
            max_retries: max_retries.min(MAX_RETRIES_LIMIT),
        }
    }

    /// Policy without retries.
    pub fn no_retry(timeout: Duration) -> Self {
        Self::new(timeout, 0)
    }

    pub fn timeout_ms(&self) -> u64 {
        u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX)
    }
}

impl Default for OperationPolicy {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(DEFAULT_OPERATION_TIMEOUT_MS),
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}
