//! Accessory descriptions published to the host.
//!
//! Each zone is published as one accessory with two services: a `Switch`
//! carrying the `On` and `Volume` characteristics, and the standard
//! `AccessoryInformation` service. The capability characteristics are
//! rendered straight from their [`CapabilitySchema`].

use audiozone_core::constants::{
    ACCESSORY_INFORMATION_SERVICE_UUID, MANUFACTURER, MODEL, SWITCH_SERVICE_UUID,
};
use audiozone_core::{CapabilityKind, CapabilitySchema, ZoneConfig};
use serde::Serialize;
use uuid::Uuid;

/// Host service types used by this plugin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ServiceKind {
    Switch,
    AccessoryInformation,
}

impl ServiceKind {
    pub fn uuid(&self) -> Uuid {
        match self {
            Self::Switch => SWITCH_SERVICE_UUID,
            Self::AccessoryInformation => ACCESSORY_INFORMATION_SERVICE_UUID,
        }
    }
}

/// Static accessory metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessoryInformation {
    pub name: String,
    pub manufacturer: String,
    pub model: String,
    pub serial_number: String,
}

impl AccessoryInformation {
    pub fn for_zone(config: &ZoneConfig) -> Self {
        Self {
            name: config.name.clone(),
            manufacturer: MANUFACTURER.to_string(),
            model: MODEL.to_string(),
            serial_number: config.serial.clone(),
        }
    }
}

/// One characteristic of a service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CharacteristicDescription {
    /// Read/write capability described by its schema.
    Capability(&'static CapabilitySchema),

    /// Fixed informational value.
    Information { name: &'static str, value: String },
}

impl CharacteristicDescription {
    pub fn name(&self) -> &str {
        match self {
            Self::Capability(schema) => schema.name,
            Self::Information { name, .. } => name,
        }
    }
}

/// One service of an accessory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceDescription {
    #[serde(rename = "type")]
    pub kind: ServiceKind,
    pub uuid: Uuid,
    pub name: String,
    pub characteristics: Vec<CharacteristicDescription>,
}

impl ServiceDescription {
    /// Look up a characteristic by name.
    pub fn characteristic(&self, name: &str) -> Option<&CharacteristicDescription> {
        self.characteristics.iter().find(|c| c.name() == name)
    }
}

/// Everything the host needs to publish one zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessoryDescription {
    pub zone_id: String,
    pub information: AccessoryInformation,
    pub services: Vec<ServiceDescription>,
}

impl AccessoryDescription {
    /// Describe the accessory of a zone.
    pub fn for_zone(config: &ZoneConfig) -> Self {
        let information = AccessoryInformation::for_zone(config);

        let switch = ServiceDescription {
            kind: ServiceKind::Switch,
            uuid: ServiceKind::Switch.uuid(),
            name: config.name.clone(),
            characteristics: CapabilityKind::ALL
                .iter()
                .map(|kind| CharacteristicDescription::Capability(CapabilitySchema::for_kind(*kind)))
                .collect(),
        };

        let info_service = ServiceDescription {
            kind: ServiceKind::AccessoryInformation,
            uuid: ServiceKind::AccessoryInformation.uuid(),
            name: config.name.clone(),
            characteristics: vec![
                CharacteristicDescription::Information {
                    name: "Manufacturer",
                    value: information.manufacturer.clone(),
                },
                CharacteristicDescription::Information {
                    name: "Model",
                    value: information.model.clone(),
                },
                CharacteristicDescription::Information {
                    name: "SerialNumber",
                    value: information.serial_number.clone(),
                },
            ],
        };

        Self {
            zone_id: config.id.to_string(),
            information,
            services: vec![switch, info_service],
        }
    }

    pub fn service(&self, kind: ServiceKind) -> Option<&ServiceDescription> {
        self.services.iter().find(|service| service.kind == kind)
    }
}
