//! Core constants for the audio zone platform.
//!
//! This module collects the fixed values shared by the backend, the host
//! adapter and the CLI: accessory metadata reported to the host, the
//! registration names the host knows the plugin by, the volume bounds and
//! the default operation policy.
//!
//! # Usage
//!
//! ```
//! use audiozone_core::constants::*;
//!
//! assert_eq!(MANUFACTURER, "GENERIC");
//! assert_eq!(MODEL, "AudioZone");
//!
//! fn volume_in_range(level: i64) -> bool {
//!     (VOLUME_MIN as i64..=VOLUME_MAX as i64).contains(&level)
//! }
//! assert!(volume_in_range(50));
//! ```

use uuid::Uuid;

// ============================================================================
// Accessory metadata
// ============================================================================

/// Manufacturer reported in the accessory information service.
pub const MANUFACTURER: &str = "GENERIC";

/// Model reported in the accessory information service.
pub const MODEL: &str = "AudioZone";

// ============================================================================
// Host registration
// ============================================================================

/// Plugin identifier for the single-accessory registration.
pub const ACCESSORY_PLUGIN: &str = "homebridge-audio-zone-item";

/// Accessory type name for the single-accessory registration.
pub const ACCESSORY_NAME: &str = "AudioZoneItem";

/// Plugin identifier for the platform registration.
pub const PLATFORM_PLUGIN: &str = "homebridge-audio-zone";

/// Platform type name for the platform registration.
pub const PLATFORM_NAME: &str = "AudioZone";

// ============================================================================
// Capability schema
// ============================================================================

/// Lowest accepted volume level (percent).
pub const VOLUME_MIN: u8 = 0;

/// Highest accepted volume level (percent).
pub const VOLUME_MAX: u8 = 100;

/// Volume step reported to the host.
pub const VOLUME_STEP: u8 = 1;

/// UUID of the custom volume characteristic.
///
/// The host schema has no volume characteristic for switches, so the
/// platform publishes its own: `91288267-5678-49B2-8D22-F57BE995AA93`.
pub const VOLUME_CHARACTERISTIC_UUID: Uuid =
    Uuid::from_u128(0x9128_8267_5678_49B2_8D22_F57B_E995_AA93);

/// UUID of the standard `On` characteristic.
pub const ON_CHARACTERISTIC_UUID: Uuid = Uuid::from_u128(0x0000_0025_0000_1000_8000_0026_BB76_5291);

/// UUID of the standard `Switch` service.
pub const SWITCH_SERVICE_UUID: Uuid = Uuid::from_u128(0x0000_0049_0000_1000_8000_0026_BB76_5291);

/// UUID of the standard `AccessoryInformation` service.
pub const ACCESSORY_INFORMATION_SERVICE_UUID: Uuid =
    Uuid::from_u128(0x0000_003E_0000_1000_8000_0026_BB76_5291);

// ============================================================================
// Stub backend values
// ============================================================================

/// Power state reported by the stub backend.
pub const STUB_POWER: bool = false;

/// Volume level reported by the stub backend.
pub const STUB_VOLUME: u8 = 50;

// ============================================================================
// Operation policy
// ============================================================================

/// Default timeout for a single backend call in milliseconds.
pub const DEFAULT_OPERATION_TIMEOUT_MS: u64 = 3000;

/// Default number of retries for transient backend failures.
pub const DEFAULT_MAX_RETRIES: u8 = 1;

/// Upper bound accepted for configured retries.
pub const MAX_RETRIES_LIMIT: u8 = 5;
