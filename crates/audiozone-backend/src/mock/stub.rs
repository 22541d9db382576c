//! Stub backend.
//!
//! Reads return fixed values and writes are acknowledged without changing
//! anything, so a read after a write still returns the fixed value. This is
//! the fire-and-forget behaviour of a device that cannot report its state;
//! it is kept as-is until a real transport replaces it.

use crate::{
    BackendError, Result,
    traits::CapabilityBackend,
    types::{Ack, BackendInfo},
};
use audiozone_core::constants::{STUB_POWER, STUB_VOLUME};
use audiozone_core::{CapabilityKind, CapabilityValue, ZoneId};
use tracing::debug;

/// Backend answering every zone with fixed values.
///
/// # Examples
///
/// ```
/// use audiozone_backend::mock::StubBackend;
/// use audiozone_backend::traits::CapabilityBackend;
/// use audiozone_core::{CapabilityKind, CapabilityValue, ZoneId};
///
/// #[tokio::main]
/// async fn main() -> audiozone_backend::Result<()> {
///     let backend = StubBackend::new();
///     let zone = ZoneId::new("1").unwrap();
///
///     backend.set(&zone, CapabilityKind::Volume, CapabilityValue::Int(75)).await?;
///
///     // Writes are not stored.
///     let volume = backend.get(&zone, CapabilityKind::Volume).await?;
///     assert_eq!(volume, CapabilityValue::Int(50));
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct StubBackend {
    name: String,
}

impl StubBackend {
    pub fn new() -> Self {
        Self::with_name("Stub Backend".to_string())
    }

    pub fn with_name(name: String) -> Self {
        Self { name }
    }
}

impl Default for StubBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixed value the stub reports for a capability.
pub(crate) fn stub_value(kind: CapabilityKind) -> Result<CapabilityValue> {
    match kind {
        CapabilityKind::Power => Ok(CapabilityValue::Bool(STUB_POWER)),
        CapabilityKind::Volume => Ok(CapabilityValue::Int(i64::from(STUB_VOLUME))),
        other => Err(BackendError::unsupported(format!("read {other}"))),
    }
}

impl CapabilityBackend for StubBackend {
    async fn get(&self, zone: &ZoneId, kind: CapabilityKind) -> Result<CapabilityValue> {
        let value = stub_value(kind)?;
        debug!(zone = %zone, %kind, %value, "Stub read");
        Ok(value)
    }

    async fn set(&self, zone: &ZoneId, kind: CapabilityKind, value: CapabilityValue) -> Result<Ack> {
        debug!(zone = %zone, %kind, %value, "Stub write acknowledged (not stored)");
        Ok(Ack::new(zone.clone(), kind, value))
    }

    fn info(&self) -> BackendInfo {
        BackendInfo::new(self.name.clone(), false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zone() -> ZoneId {
        ZoneId::new("zone-1").unwrap()
    }

    #[tokio::test]
    async fn test_stub_power_is_off() {
        let backend = StubBackend::new();
        let value = backend.get(&zone(), CapabilityKind::Power).await.unwrap();
        assert_eq!(value, CapabilityValue::Bool(false));
    }

    #[tokio::test]
    async fn test_stub_volume_is_fifty() {
        let backend = StubBackend::new();
        let value = backend.get(&zone(), CapabilityKind::Volume).await.unwrap();
        assert_eq!(value, CapabilityValue::Int(50));
    }

    #[tokio::test]
    async fn test_stub_set_acknowledges_without_state() {
        let backend = StubBackend::new();
        let ack = backend
            .set(&zone(), CapabilityKind::Power, CapabilityValue::Bool(true))
            .await
            .unwrap();
        assert_eq!(ack.zone_id, zone());
        assert_eq!(ack.kind, CapabilityKind::Power);
        assert_eq!(ack.value, CapabilityValue::Bool(true));

        let value = backend.get(&zone(), CapabilityKind::Power).await.unwrap();
        assert_eq!(value, CapabilityValue::Bool(false));
    }

    #[test]
    fn test_stub_info() {
        let info = StubBackend::with_name("Bench".to_string()).info();
        assert_eq!(info.name, "Bench");
        assert!(!info.stateful);
    }
}
