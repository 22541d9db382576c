//! Registration with the host runtime.
//!
//! At load time the plugin announces the two types it provides: a single
//! zone accessory and a platform publishing one accessory per configured
//! zone. The host is abstracted as a [`HostRegistrar`].

use audiozone_core::constants::{ACCESSORY_NAME, ACCESSORY_PLUGIN, PLATFORM_NAME, PLATFORM_PLUGIN};
use tracing::info;

/// Host-side registration surface.
pub trait HostRegistrar {
    /// Register an accessory type under `plugin`.
    fn register_accessory(&mut self, plugin: &str, name: &str);

    /// Register a platform type under `plugin`.
    fn register_platform(&mut self, plugin: &str, name: &str);
}

/// A registration made through [`register`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Registration {
    Accessory { plugin: String, name: String },
    Platform { plugin: String, name: String },
}

impl HostRegistrar for Vec<Registration> {
    fn register_accessory(&mut self, plugin: &str, name: &str) {
        self.push(Registration::Accessory {
            plugin: plugin.to_string(),
            name: name.to_string(),
        });
    }

    fn register_platform(&mut self, plugin: &str, name: &str) {
        self.push(Registration::Platform {
            plugin: plugin.to_string(),
            name: name.to_string(),
        });
    }
}

/// Register the accessory and the platform with the host.
pub fn register<R: HostRegistrar + ?Sized>(registrar: &mut R) {
    registrar.register_accessory(ACCESSORY_PLUGIN, ACCESSORY_NAME);
    registrar.register_platform(PLATFORM_PLUGIN, PLATFORM_NAME);
    info!(
        accessory = ACCESSORY_NAME,
        platform = PLATFORM_NAME,
        "Registered with host"
    );
}
