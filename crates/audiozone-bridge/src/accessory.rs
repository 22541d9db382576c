//! Zone accessory.
//!
//! A [`ZoneAccessory`] is what the host sees for one zone. It answers the
//! host's characteristic reads and writes, which arrive as a characteristic
//! name and a JSON value, by translating them into capability calls on the
//! zone's [`ZoneHandle`].

use crate::config::AccessoryConfig;
use crate::description::AccessoryDescription;
use crate::error::{BridgeError, Result};
use audiozone_backend::{AnyBackend, CapabilityBackend, SetOutcome, ZoneHandle};
use audiozone_core::{CapabilityKind, CapabilitySchema, CapabilityValue};
use std::sync::Arc;
use tracing::{debug, error};

/// Host-facing accessory for one zone.
#[derive(Debug)]
pub struct ZoneAccessory<B = AnyBackend> {
    handle: Arc<ZoneHandle<B>>,
}

impl<B> Clone for ZoneAccessory<B> {
    fn clone(&self) -> Self {
        Self {
            handle: Arc::clone(&self.handle),
        }
    }
}

impl<B: CapabilityBackend> ZoneAccessory<B> {
    pub fn new(handle: Arc<ZoneHandle<B>>) -> Self {
        Self { handle }
    }

    /// Build a standalone accessory from the single-accessory configuration.
    ///
    /// # Errors
    ///
    /// Returns `BridgeError::Config` if the entry has no id.
    pub fn from_accessory_config(config: &AccessoryConfig, backend: Arc<B>) -> Result<Self> {
        let zone = config.descriptor().into_config(0)?;
        debug!(zone = %zone.id, name = %zone.name, "Creating standalone accessory");
        Ok(Self::new(Arc::new(ZoneHandle::new(zone, backend))))
    }

    pub fn handle(&self) -> &Arc<ZoneHandle<B>> {
        &self.handle
    }

    pub fn name(&self) -> &str {
        self.handle.name()
    }

    /// Services and metadata to publish.
    pub fn describe(&self) -> AccessoryDescription {
        AccessoryDescription::for_zone(self.handle.config())
    }

    /// Answer a host read of `characteristic`.
    ///
    /// Power is rendered as a JSON boolean and volume as an integer.
    ///
    /// # Errors
    ///
    /// - `BridgeError::UnknownCharacteristic` for names other than power and volume
    /// - `BridgeError::Capability` if the zone read fails
    pub async fn read(&self, characteristic: &str) -> Result<serde_json::Value> {
        let kind = self.characteristic_kind(characteristic)?;

        let value = self.handle.get_capability(kind).await.inspect_err(|e| {
            error!(zone = %self.handle.id(), characteristic, error = %e, "Characteristic read failed");
        })?;

        Ok(value.to_json())
    }

    /// Apply a host write of `value` to `characteristic`.
    ///
    /// # Errors
    ///
    /// - `BridgeError::UnknownCharacteristic` for names other than power and volume
    /// - `BridgeError::Capability` if the value is invalid or the zone write fails
    pub async fn write(
        &self,
        characteristic: &str,
        value: &serde_json::Value,
    ) -> Result<SetOutcome> {
        let kind = self.characteristic_kind(characteristic)?;
        let value = CapabilityValue::from_json(kind, value)
            .map_err(|e| BridgeError::Capability(e.into()))?;

        self.handle.set_capability(kind, value).await.map_err(|e| {
            error!(zone = %self.handle.id(), characteristic, error = %e, "Characteristic write failed");
            BridgeError::Capability(e)
        })
    }

    fn characteristic_kind(&self, characteristic: &str) -> Result<CapabilityKind> {
        CapabilitySchema::by_name(characteristic)
            .map(|schema| schema.kind)
            .map_err(|_| {
                error!(zone = %self.handle.id(), characteristic, "Unknown characteristic");
                BridgeError::unknown_characteristic(characteristic)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use audiozone_backend::{CapabilityError, RecordingBackend, StubBackend};
    use audiozone_core::{ZoneConfig, ZoneId};
    use rstest::rstest;
    use serde_json::json;

    fn stub_accessory() -> ZoneAccessory<StubBackend> {
        let config = ZoneConfig::new(ZoneId::new("1").unwrap(), "Kitchen", "AZ-1");
        ZoneAccessory::new(Arc::new(ZoneHandle::new(config, Arc::new(StubBackend::new()))))
    }

    #[rstest]
    #[case("On", json!(false))]
    #[case("power", json!(false))]
    #[case("Volume", json!(50))]
    #[tokio::test]
    async fn test_read(#[case] characteristic: &str, #[case] expected: serde_json::Value) {
        let value = stub_accessory().read(characteristic).await.unwrap();
        assert_eq!(value, expected);
    }

    #[tokio::test]
    async fn test_read_unknown_characteristic() {
        let error = stub_accessory().read("Brightness").await.unwrap_err();
        assert!(matches!(error, BridgeError::UnknownCharacteristic(ref name) if name == "Brightness"));
    }

    #[tokio::test]
    async fn test_write_reaches_backend() {
        let (backend, recorder) = RecordingBackend::new();
        let config = ZoneConfig::new(ZoneId::new("1").unwrap(), "Kitchen", "AZ-1");
        let accessory = ZoneAccessory::new(Arc::new(ZoneHandle::new(config, Arc::new(backend))));

        accessory.write("Volume", &json!(30)).await.unwrap();
        accessory.write("On", &json!(1)).await.unwrap();

        let writes = recorder.writes();
        assert_eq!(writes[0].value, CapabilityValue::Int(30));
        assert_eq!(writes[1].value, CapabilityValue::Bool(true));
    }

    #[rstest]
    #[case("Volume", json!(150))]
    #[case("Volume", json!("loud"))]
    #[case("Volume", json!(12.5))]
    #[case("On", json!(2))]
    #[tokio::test]
    async fn test_write_rejects_bad_values(#[case] characteristic: &str, #[case] value: serde_json::Value) {
        let error = stub_accessory().write(characteristic, &value).await.unwrap_err();
        assert!(matches!(
            error,
            BridgeError::Capability(CapabilityError::InvalidValue { .. })
        ));
        assert!(error.is_client_error());
    }

    #[tokio::test]
    async fn test_suppressed_write() {
        let accessory = stub_accessory();
        accessory.handle().set_event_suppressed(true);

        let outcome = accessory.write("On", &json!(true)).await.unwrap();
        assert_eq!(outcome, SetOutcome::Suppressed);
    }

    #[test]
    fn test_from_accessory_config() {
        let config = AccessoryConfig {
            accessory: "AudioZoneItem".to_string(),
            name: Some("Den".to_string()),
            id: Some("4".to_string()),
            serial: None,
        };

        let accessory =
            ZoneAccessory::from_accessory_config(&config, Arc::new(StubBackend::new())).unwrap();
        assert_eq!(accessory.name(), "Den");
        assert_eq!(accessory.describe().information.serial_number, "4");
    }

    #[test]
    fn test_from_accessory_config_without_id() {
        let config = AccessoryConfig {
            accessory: "AudioZoneItem".to_string(),
            name: Some("Den".to_string()),
            id: None,
            serial: None,
        };

        let result = ZoneAccessory::from_accessory_config(&config, Arc::new(StubBackend::new()));
        assert!(matches!(result, Err(BridgeError::Config(_))));
    }
}
