//! End-to-end tests of the host adapter: register, load a configuration
//! file, publish accessories and drive their characteristics.

use std::io::Write;
use std::sync::Arc;

use audiozone_backend::{AnyBackend, RecordingBackend, SetOutcome};
use audiozone_bridge::{
    AudioZonePlatform, BridgeError, PlatformConfig, Registration, ServiceKind, register,
};
use audiozone_core::{CapabilityKind, CapabilityValue};
use serde_json::json;

const HOST_CONFIG: &str = r#"{
    "bridge": { "name": "Homebridge", "username": "CC:22:3D:E3:CE:30", "port": 51826 },
    "platforms": [
        {
            "platform": "AudioZone",
            "name": "Audio Zones",
            "timeout_ms": 1000,
            "lights": [
                { "id": "1", "name": "Kitchen", "serial": "AZ-1" },
                { "id": "2", "name": "Patio" },
                { "id": "3" }
            ]
        }
    ]
}"#;

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_plugin_registration() {
    let mut registrations: Vec<Registration> = Vec::new();
    register(&mut registrations);

    assert_eq!(registrations.len(), 2);
    assert!(registrations.contains(&Registration::Platform {
        plugin: "homebridge-audio-zone".to_string(),
        name: "AudioZone".to_string(),
    }));
}

#[tokio::test]
async fn test_published_accessories_answer_with_stub_values() {
    let file = write_config(HOST_CONFIG);
    let config = PlatformConfig::from_path(file.path()).unwrap();
    let platform = AudioZonePlatform::new(config, Arc::new(AnyBackend::default()));

    let accessories = platform.accessories().unwrap();
    assert_eq!(accessories.len(), 3);

    for accessory in &accessories {
        assert_eq!(accessory.read("On").await.unwrap(), json!(false));
        assert_eq!(accessory.read("Volume").await.unwrap(), json!(50));
    }

    // Writes are acknowledged but not reflected by the stub.
    let outcome = accessories[0].write("Volume", &json!(75)).await.unwrap();
    assert!(outcome.is_applied());
    assert_eq!(accessories[0].read("Volume").await.unwrap(), json!(50));
}

#[test]
fn test_descriptions_fall_back_to_zone_id() {
    let config = PlatformConfig::from_json_str(HOST_CONFIG).unwrap();
    let platform = AudioZonePlatform::new(config, Arc::new(AnyBackend::default()));
    let accessories = platform.accessories().unwrap();

    let patio = accessories[1].describe();
    assert_eq!(patio.information.name, "Patio");
    assert_eq!(patio.information.serial_number, "2");

    let third = accessories[2].describe();
    assert_eq!(third.information.name, "3");
    assert!(third.service(ServiceKind::Switch).is_some());
    assert!(third.service(ServiceKind::AccessoryInformation).is_some());
}

#[tokio::test]
async fn test_writes_are_routed_to_the_right_zone() {
    let (backend, recorder) = RecordingBackend::new();
    let config = PlatformConfig::from_json_str(HOST_CONFIG).unwrap();
    let platform = AudioZonePlatform::new(config, Arc::new(AnyBackend::from(backend)));
    let accessories = platform.accessories().unwrap();

    accessories[2].write("On", &json!(true)).await.unwrap();
    accessories[0].write("Volume", &json!(10)).await.unwrap();

    let writes = recorder.writes();
    assert_eq!(writes.len(), 2);
    assert_eq!(writes[0].zone_id.as_str(), "3");
    assert_eq!(writes[0].kind, CapabilityKind::Power);
    assert_eq!(writes[1].zone_id.as_str(), "1");
    assert_eq!(writes[1].value, CapabilityValue::Int(10));
}

#[tokio::test]
async fn test_device_originated_change_is_not_echoed() {
    let (backend, recorder) = RecordingBackend::new();
    let config = PlatformConfig::from_json_str(HOST_CONFIG).unwrap();
    let platform = AudioZonePlatform::new(config, Arc::new(AnyBackend::from(backend)));
    let accessories = platform.accessories().unwrap();

    let outcome = {
        let _guard = accessories[0].handle().suppress_events();
        accessories[0].write("On", &json!(true)).await.unwrap()
    };

    assert_eq!(outcome, SetOutcome::Suppressed);
    assert_eq!(recorder.set_calls(), 0);
}

#[test]
fn test_second_publication_is_rejected() {
    let config = PlatformConfig::from_json_str(HOST_CONFIG).unwrap();
    let platform = AudioZonePlatform::new(config, Arc::new(AnyBackend::default()));

    platform.accessories().unwrap();
    assert!(matches!(
        platform.accessories(),
        Err(BridgeError::AlreadyPublished)
    ));
}

#[test]
fn test_duplicate_zone_ids_publish_nothing() {
    let config = PlatformConfig::from_json_str(
        r#"{ "platform": "AudioZone", "lights": [{ "id": "1" }, { "id": "1" }] }"#,
    )
    .unwrap();
    let platform = AudioZonePlatform::new(config, Arc::new(AnyBackend::default()));

    assert!(matches!(
        platform.accessories(),
        Err(BridgeError::Config(audiozone_core::Error::DuplicateZoneId(_)))
    ));
}
