//! Host configuration.
//!
//! The host hands the plugin a JSON object per configured platform or
//! accessory. [`PlatformConfig`] is the platform form, carrying the zone
//! list under `lights`. [`AccessoryConfig`] is the single-zone form.
//!
//! Both can be loaded either from the bare object or from a complete host
//! configuration document, in which case the matching entry is picked from
//! its `platforms` or `accessories` array:
//!
//! ```json
//! {
//!   "platforms": [
//!     {
//!       "platform": "AudioZone",
//!       "name": "Audio Zones",
//!       "lights": [
//!         { "id": "1", "name": "Kitchen", "serial": "AZ-1" },
//!         { "id": "2", "name": "Patio" }
//!       ]
//!     }
//!   ]
//! }
//! ```

use audiozone_backend::OperationPolicy;
use audiozone_core::constants::{
    ACCESSORY_NAME, DEFAULT_MAX_RETRIES, DEFAULT_OPERATION_TIMEOUT_MS, PLATFORM_NAME,
};
use audiozone_core::{Error, Result, ZoneDescriptor};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

fn default_platform() -> String {
    PLATFORM_NAME.to_string()
}

fn default_accessory() -> String {
    ACCESSORY_NAME.to_string()
}

fn default_name() -> String {
    PLATFORM_NAME.to_string()
}

/// Configuration of the `AudioZone` platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformConfig {
    #[serde(default = "default_platform")]
    pub platform: String,

    #[serde(default = "default_name")]
    pub name: String,

    /// Configured zones, in publication order.
    #[serde(default, alias = "zones")]
    pub lights: Vec<ZoneDescriptor>,

    /// Upper bound for a single backend call.
    #[serde(default, alias = "timeoutMs", skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,

    /// Extra attempts after a transient backend failure.
    #[serde(default, alias = "maxRetries", skip_serializing_if = "Option::is_none")]
    pub max_retries: Option<u8>,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            platform: default_platform(),
            name: default_name(),
            lights: Vec::new(),
            timeout_ms: None,
            max_retries: None,
        }
    }
}

impl PlatformConfig {
    /// Parse a platform object or a host document containing one.
    ///
    /// # Errors
    ///
    /// - `Error::Json` if the text is not valid JSON or has the wrong shape
    /// - `Error::Config` if no `AudioZone` platform is present, or a
    ///   setting is out of range
    pub fn from_json_str(json: &str) -> Result<Self> {
        let document: serde_json::Value = serde_json::from_str(json)?;
        let config: Self = select_entry(document, "platforms", "platform", PLATFORM_NAME)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a configuration file.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if the file cannot be read, otherwise the same
    /// errors as [`from_json_str`](Self::from_json_str).
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Timeout and retry policy for the zones of this platform.
    pub fn operation_policy(&self) -> OperationPolicy {
        OperationPolicy::new(
            Duration::from_millis(self.timeout_ms.unwrap_or(DEFAULT_OPERATION_TIMEOUT_MS)),
            self.max_retries.unwrap_or(DEFAULT_MAX_RETRIES),
        )
    }

    fn validate(&self) -> Result<()> {
        if self.platform != PLATFORM_NAME {
            return Err(Error::Config(format!(
                "expected platform {PLATFORM_NAME:?}, found {:?}",
                self.platform
            )));
        }
        if self.timeout_ms == Some(0) {
            return Err(Error::Config("timeout_ms must be greater than zero".to_string()));
        }
        Ok(())
    }
}

/// Configuration of a single `AudioZoneItem` accessory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessoryConfig {
    #[serde(default = "default_accessory")]
    pub accessory: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serial: Option<String>,
}

impl AccessoryConfig {
    /// Parse an accessory object or a host document containing one.
    ///
    /// # Errors
    ///
    /// - `Error::Json` if the text is not valid JSON or has the wrong shape
    /// - `Error::Config` if no `AudioZoneItem` accessory is present
    pub fn from_json_str(json: &str) -> Result<Self> {
        let document: serde_json::Value = serde_json::from_str(json)?;
        let config: Self = select_entry(document, "accessories", "accessory", ACCESSORY_NAME)?;
        if config.accessory != ACCESSORY_NAME {
            return Err(Error::Config(format!(
                "expected accessory {ACCESSORY_NAME:?}, found {:?}",
                config.accessory
            )));
        }
        Ok(config)
    }

    /// Zone entry described by this accessory.
    pub fn descriptor(&self) -> ZoneDescriptor {
        ZoneDescriptor {
            id: self.id.clone(),
            name: self.name.clone(),
            serial: self.serial.clone(),
        }
    }
}

/// Pick the entry of type `wanted` out of a host document, or parse the
/// document itself when it is a bare entry.
fn select_entry<T: DeserializeOwned>(
    document: serde_json::Value,
    list_key: &str,
    type_key: &str,
    wanted: &str,
) -> Result<T> {
    let entry = match document.get(list_key).and_then(serde_json::Value::as_array) {
        Some(entries) => entries
            .iter()
            .find(|entry| entry.get(type_key).and_then(serde_json::Value::as_str) == Some(wanted))
            .cloned()
            .ok_or_else(|| Error::Config(format!("no {wanted:?} entry in {list_key:?}")))?,
        None => document,
    };

    Ok(serde_json::from_value(entry)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Write;

    #[test]
    fn test_platform_object() {
        let config = PlatformConfig::from_json_str(
            r#"{
                "platform": "AudioZone",
                "name": "Audio Zones",
                "lights": [
                    { "id": "1", "name": "Kitchen", "serial": "AZ-1" },
                    { "id": "2" }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(config.name, "Audio Zones");
        assert_eq!(config.lights.len(), 2);
        assert_eq!(config.lights[0], ZoneDescriptor::new("1", "Kitchen", "AZ-1"));
        assert_eq!(config.lights[1].name, None);
        assert_eq!(config.operation_policy(), OperationPolicy::default());
    }

    #[test]
    fn test_zones_alias() {
        let config =
            PlatformConfig::from_json_str(r#"{ "platform": "AudioZone", "zones": [{ "id": "a" }] }"#)
                .unwrap();
        assert_eq!(config.lights.len(), 1);
    }

    #[test]
    fn test_missing_zone_list_is_empty() {
        let config = PlatformConfig::from_json_str(r#"{ "platform": "AudioZone" }"#).unwrap();
        assert!(config.lights.is_empty());
        assert_eq!(config.name, "AudioZone");
    }

    #[test]
    fn test_host_document() {
        let config = PlatformConfig::from_json_str(
            r#"{
                "bridge": { "name": "Homebridge", "pin": "031-45-154" },
                "platforms": [
                    { "platform": "Other", "name": "Something else" },
                    { "platform": "AudioZone", "name": "Zones", "lights": [{ "id": "1" }] }
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(config.name, "Zones");
        assert_eq!(config.lights.len(), 1);
    }

    #[test]
    fn test_host_document_without_platform() {
        let error = PlatformConfig::from_json_str(r#"{ "platforms": [] }"#).unwrap_err();
        assert!(matches!(error, Error::Config(_)));
    }

    #[rstest]
    #[case(r#"{ "platform": "Lights" }"#)]
    #[case(r#"{ "platform": "AudioZone", "timeout_ms": 0 }"#)]
    fn test_rejected_platform_settings(#[case] json: &str) {
        let error = PlatformConfig::from_json_str(json).unwrap_err();
        assert!(matches!(error, Error::Config(_)));
    }

    #[test]
    fn test_malformed_json() {
        let error = PlatformConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(error, Error::Json(_)));
    }

    #[test]
    fn test_operation_policy_from_settings() {
        let config = PlatformConfig::from_json_str(
            r#"{ "platform": "AudioZone", "timeoutMs": 500, "max_retries": 9 }"#,
        )
        .unwrap();

        let policy = config.operation_policy();
        assert_eq!(policy.timeout, Duration::from_millis(500));
        // Clamped to the retry limit.
        assert_eq!(policy.max_retries, 5);
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "platform": "AudioZone", "lights": [{{ "id": "1" }}] }}"#).unwrap();

        let config = PlatformConfig::from_path(file.path()).unwrap();
        assert_eq!(config.lights.len(), 1);
    }

    #[test]
    fn test_from_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        let error = PlatformConfig::from_path(dir.path().join("config.json")).unwrap_err();
        assert!(matches!(error, Error::Io(_)));
    }

    #[test]
    fn test_accessory_config() {
        let config = AccessoryConfig::from_json_str(
            r#"{ "accessories": [{ "accessory": "AudioZoneItem", "name": "Den", "id": "4" }] }"#,
        )
        .unwrap();

        let descriptor = config.descriptor();
        assert_eq!(descriptor.id.as_deref(), Some("4"));
        assert_eq!(descriptor.name.as_deref(), Some("Den"));
        assert_eq!(descriptor.serial, None);
    }

    #[test]
    fn test_accessory_config_wrong_type() {
        let error =
            AccessoryConfig::from_json_str(r#"{ "accessory": "Lightbulb", "id": "4" }"#).unwrap_err();
        assert!(matches!(error, Error::Config(_)));
    }
}
