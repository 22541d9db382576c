//! Host adapter for audio zones.
//!
//! This crate is the surface a Homebridge-style host talks to. It knows
//! nothing about device I/O: everything it does goes through the zone
//! handles of `audiozone-backend`.
//!
//! # Lifecycle
//!
//! 1. At load, [`register`] announces the `AudioZoneItem` accessory and the
//!    `AudioZone` platform to a [`HostRegistrar`].
//! 2. The host creates an [`AudioZonePlatform`] from its [`PlatformConfig`].
//! 3. The host calls [`AudioZonePlatform::accessories`] once and publishes
//!    the [`AccessoryDescription`] of every returned [`ZoneAccessory`].
//! 4. Characteristic reads and writes arrive as
//!    [`ZoneAccessory::read`] and [`ZoneAccessory::write`].
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use audiozone_backend::AnyBackend;
//! use audiozone_bridge::{AudioZonePlatform, PlatformConfig, Registration, register};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut registrations: Vec<Registration> = Vec::new();
//!     register(&mut registrations);
//!
//!     let config = PlatformConfig::from_json_str(
//!         r#"{ "platform": "AudioZone", "lights": [{ "id": "1", "name": "Kitchen" }] }"#,
//!     )?;
//!     let platform = AudioZonePlatform::new(config, Arc::new(AnyBackend::default()));
//!
//!     for accessory in platform.accessories()? {
//!         let volume = accessory.read("Volume").await?;
//!         assert_eq!(volume, serde_json::json!(50));
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod accessory;
pub mod config;
pub mod description;
pub mod error;
pub mod host;
pub mod platform;

pub use accessory::ZoneAccessory;
pub use config::{AccessoryConfig, PlatformConfig};
pub use description::{
    AccessoryDescription, AccessoryInformation, CharacteristicDescription, ServiceDescription,
    ServiceKind,
};
pub use error::{BridgeError, Result};
pub use host::{HostRegistrar, Registration, register};
pub use platform::AudioZonePlatform;
