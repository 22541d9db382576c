use crate::{
    Result,
    constants::{VOLUME_MAX, VOLUME_MIN},
    error::Error,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Zone identifier (non-empty, surrounding whitespace removed)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ZoneId(String);

impl ZoneId {
    /// Create a new zone ID with validation.
    ///
    /// # Errors
    /// Returns `Error::InvalidZoneId` if the ID is empty after trimming.
    pub fn new(id: &str) -> Result<Self> {
        let id = id.trim();
        if id.is_empty() {
            return Err(Error::InvalidZoneId(id.to_string()));
        }
        Ok(ZoneId(id.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ZoneId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for ZoneId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        ZoneId::new(s)
    }
}

impl TryFrom<String> for ZoneId {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        ZoneId::new(&value)
    }
}

impl From<ZoneId> for String {
    fn from(id: ZoneId) -> Self {
        id.0
    }
}

/// Raw zone entry as found in the host configuration.
///
/// Every field is optional at this level so that a malformed entry can be
/// reported with its position instead of failing the whole document parse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneDescriptor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serial: Option<String>,
}

impl ZoneDescriptor {
    /// Descriptor with all three fields set.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        serial: impl Into<String>,
    ) -> Self {
        Self {
            id: Some(id.into()),
            name: Some(name.into()),
            serial: Some(serial.into()),
        }
    }

    /// Validate this entry into a [`ZoneConfig`].
    ///
    /// `index` is the entry's position in the configuration list and is only
    /// used for error reporting. A missing name or serial falls back to the id.
    ///
    /// # Errors
    /// Returns `Error::MissingZoneId` if the id is absent or blank.
    pub fn into_config(self, index: usize) -> Result<ZoneConfig> {
        let id = match self.id.as_deref().map(str::trim) {
            Some(id) if !id.is_empty() => ZoneId::new(id)?,
            _ => return Err(Error::MissingZoneId { index }),
        };

        let name = self
            .name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| id.to_string());
        let serial = self
            .serial
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| id.to_string());

        Ok(ZoneConfig { id, name, serial })
    }
}

/// Validated, immutable configuration of one zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneConfig {
    pub id: ZoneId,
    pub name: String,
    pub serial: String,
}

impl ZoneConfig {
    pub fn new(id: ZoneId, name: impl Into<String>, serial: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            serial: serial.into(),
        }
    }
}

impl From<ZoneConfig> for ZoneDescriptor {
    fn from(config: ZoneConfig) -> Self {
        Self {
            id: Some(config.id.into()),
            name: Some(config.name),
            serial: Some(config.serial),
        }
    }
}

/// Capability exposed by every zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum CapabilityKind {
    /// Zone on/off.
    Power,
    /// Zone volume in percent.
    Volume,
}

impl CapabilityKind {
    /// All capabilities, in the order they are published to the host.
    pub const ALL: [CapabilityKind; 2] = [CapabilityKind::Power, CapabilityKind::Volume];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            CapabilityKind::Power => "power",
            CapabilityKind::Volume => "volume",
        }
    }
}

impl fmt::Display for CapabilityKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CapabilityKind {
    type Err = Error;

    /// Accepts the host's lower-case names as well as characteristic names.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "power" | "on" => Ok(CapabilityKind::Power),
            "volume" => Ok(CapabilityKind::Volume),
            _ => Err(Error::unsupported(s)),
        }
    }
}

/// Value of a capability as exchanged with the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CapabilityValue {
    Bool(bool),
    Int(i64),
}

impl CapabilityValue {
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            CapabilityValue::Bool(b) => Some(*b),
            CapabilityValue::Int(_) => None,
        }
    }

    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            CapabilityValue::Int(i) => Some(*i),
            CapabilityValue::Bool(_) => None,
        }
    }

    /// Convert a JSON value sent by the host.
    ///
    /// # Errors
    /// Returns `Error::InvalidValue` for anything that is not a boolean or an
    /// integral number.
    pub fn from_json(kind: CapabilityKind, value: &serde_json::Value) -> Result<Self> {
        match value {
            serde_json::Value::Bool(b) => Ok(CapabilityValue::Bool(*b)),
            serde_json::Value::Number(n) => n
                .as_i64()
                .map(CapabilityValue::Int)
                .ok_or_else(|| Error::invalid_value(kind, format!("{n} is not an integer"))),
            other => Err(Error::invalid_value(
                kind,
                format!("unsupported JSON value {other}"),
            )),
        }
    }

    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            CapabilityValue::Bool(b) => serde_json::Value::Bool(*b),
            CapabilityValue::Int(i) => serde_json::Value::from(*i),
        }
    }
}

impl fmt::Display for CapabilityValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CapabilityValue::Bool(b) => write!(f, "{b}"),
            CapabilityValue::Int(i) => write!(f, "{i}"),
        }
    }
}

impl From<bool> for CapabilityValue {
    fn from(value: bool) -> Self {
        CapabilityValue::Bool(value)
    }
}

impl From<Volume> for CapabilityValue {
    fn from(value: Volume) -> Self {
        CapabilityValue::Int(i64::from(value.as_u8()))
    }
}

/// Volume level in percent (0-100)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Volume(u8);

impl Volume {
    /// Create a new volume level with validation.
    ///
    /// # Errors
    /// Returns `Error::InvalidValue` if the level is outside 0-100.
    pub fn new(level: i64) -> Result<Self> {
        if !(i64::from(VOLUME_MIN)..=i64::from(VOLUME_MAX)).contains(&level) {
            return Err(Error::invalid_value(
                CapabilityKind::Volume,
                format!("{level} is out of range {VOLUME_MIN}-{VOLUME_MAX}"),
            ));
        }
        // Range checked above.
        Ok(Volume(level as u8))
    }

    #[must_use]
    pub fn as_u8(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for Volume {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl TryFrom<i64> for Volume {
    type Error = Error;

    fn try_from(value: i64) -> Result<Self> {
        Volume::new(value)
    }
}

impl From<Volume> for i64 {
    fn from(value: Volume) -> Self {
        i64::from(value.0)
    }
}
