//! Data-described capability schema.
//!
//! Each [`CapabilityKind`] has a static [`CapabilitySchema`] describing how
//! the host sees it: characteristic name and UUID, value format, unit,
//! bounds and permissions. The host adapter renders these descriptions and
//! the zone handle uses them to validate writes, so adding a capability is
//! a matter of adding a schema entry rather than subclassing host types.
//!
//! # Examples
//!
//! ```
//! use audiozone_core::{CapabilityKind, CapabilitySchema, CapabilityValue};
//!
//! let schema = CapabilitySchema::for_kind(CapabilityKind::Volume);
//! assert_eq!(schema.validate(CapabilityValue::Int(75)).unwrap(), CapabilityValue::Int(75));
//! assert!(schema.validate(CapabilityValue::Int(150)).is_err());
//! ```

use crate::{
    Result,
    constants::{ON_CHARACTERISTIC_UUID, VOLUME_CHARACTERISTIC_UUID, VOLUME_MAX, VOLUME_MIN, VOLUME_STEP},
    error::Error,
    types::{CapabilityKind, CapabilityValue, Volume},
};
use serde::Serialize;
use uuid::Uuid;

/// Value format of a capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueFormat {
    Bool,
    Int,
}

/// Unit of a numeric capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueUnit {
    Percentage,
}

/// Host permission on a capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Permission {
    Read,
    Write,
    Notify,
}

const READ_WRITE_NOTIFY: &[Permission] = &[Permission::Read, Permission::Write, Permission::Notify];

/// Description of one capability as published to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CapabilitySchema {
    pub kind: CapabilityKind,

    /// Characteristic name as shown by the host.
    pub name: &'static str,

    pub uuid: Uuid,

    pub format: ValueFormat,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<ValueUnit>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_value: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_value: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_step: Option<i64>,

    pub perms: &'static [Permission],
}

static POWER_SCHEMA: CapabilitySchema = CapabilitySchema {
    kind: CapabilityKind::Power,
    name: "On",
    uuid: ON_CHARACTERISTIC_UUID,
    format: ValueFormat::Bool,
    unit: None,
    min_value: None,
    max_value: None,
    min_step: None,
    perms: READ_WRITE_NOTIFY,
};

static VOLUME_SCHEMA: CapabilitySchema = CapabilitySchema {
    kind: CapabilityKind::Volume,
    name: "Volume",
    uuid: VOLUME_CHARACTERISTIC_UUID,
    format: ValueFormat::Int,
    unit: Some(ValueUnit::Percentage),
    min_value: Some(VOLUME_MIN as i64),
    max_value: Some(VOLUME_MAX as i64),
    min_step: Some(VOLUME_STEP as i64),
    perms: READ_WRITE_NOTIFY,
};

impl CapabilitySchema {
    /// Schema for a capability kind.
    #[must_use]
    pub fn for_kind(kind: CapabilityKind) -> &'static CapabilitySchema {
        match kind {
            CapabilityKind::Power => &POWER_SCHEMA,
            CapabilityKind::Volume => &VOLUME_SCHEMA,
        }
    }

    /// Look up a schema by characteristic name (`"On"`, `"Volume"`) or by
    /// capability name (`"power"`, `"volume"`).
    ///
    /// # Errors
    /// Returns `Error::UnsupportedCapability` for unknown names.
    pub fn by_name(name: &str) -> Result<&'static CapabilitySchema> {
        name.parse::<CapabilityKind>().map(Self::for_kind)
    }

    /// Whether the host may write this capability.
    #[must_use]
    pub fn is_writable(&self) -> bool {
        self.perms.contains(&Permission::Write)
    }

    /// Validate and normalise a value for this capability.
    ///
    /// Booleans are accepted as `true`/`false` or as the integers `1`/`0`,
    /// which is how some host clients encode them. Integers must lie within
    /// the schema bounds.
    ///
    /// # Errors
    /// Returns `Error::InvalidValue` if the value has the wrong format or is
    /// out of range.
    pub fn validate(&self, value: CapabilityValue) -> Result<CapabilityValue> {
        match (self.format, value) {
            (ValueFormat::Bool, CapabilityValue::Bool(_)) => Ok(value),
            (ValueFormat::Bool, CapabilityValue::Int(0)) => Ok(CapabilityValue::Bool(false)),
            (ValueFormat::Bool, CapabilityValue::Int(1)) => Ok(CapabilityValue::Bool(true)),
            (ValueFormat::Bool, CapabilityValue::Int(other)) => Err(Error::invalid_value(
                self.kind,
                format!("expected a boolean, got {other}"),
            )),
            (ValueFormat::Int, CapabilityValue::Bool(b)) => Err(Error::invalid_value(
                self.kind,
                format!("expected an integer, got {b}"),
            )),
            (ValueFormat::Int, CapabilityValue::Int(level)) => match self.kind {
                CapabilityKind::Volume => Volume::new(level).map(CapabilityValue::from),
                _ => self.check_bounds(level).map(|()| value),
            },
        }
    }

    fn check_bounds(&self, level: i64) -> Result<()> {
        let below = self.min_value.is_some_and(|min| level < min);
        let above = self.max_value.is_some_and(|max| level > max);
        if below || above {
            return Err(Error::invalid_value(
                self.kind,
                format!("{level} is out of range"),
            ));
        }
        Ok(())
    }
}
