//! Audio zone platform.
//!
//! The platform owns the configuration and the backend. When the host asks
//! for its accessories it builds the [`ZoneRegistry`] and wraps every handle
//! in a [`ZoneAccessory`]. The host asks once per start; later requests are
//! rejected with [`BridgeError::AlreadyPublished`] so the same zones are
//! never published twice.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use audiozone_backend::AnyBackend;
//! use audiozone_bridge::{AudioZonePlatform, PlatformConfig};
//!
//! let config = PlatformConfig::from_json_str(
//!     r#"{ "platform": "AudioZone", "lights": [{ "id": "1", "name": "Kitchen" }] }"#,
//! )
//! .unwrap();
//!
//! let platform = AudioZonePlatform::new(config, Arc::new(AnyBackend::default()));
//! let accessories = platform.accessories().unwrap();
//! assert_eq!(accessories[0].name(), "Kitchen");
//! assert!(platform.accessories().is_err());
//! ```

use crate::accessory::ZoneAccessory;
use crate::config::PlatformConfig;
use crate::error::{BridgeError, Result};
use audiozone_backend::{AnyBackend, CapabilityBackend, ZoneRegistry};
use std::sync::Arc;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// Platform publishing one accessory per configured zone.
#[derive(Debug)]
pub struct AudioZonePlatform<B = AnyBackend> {
    config: PlatformConfig,
    backend: Arc<B>,
    published: AtomicBool,
    registry: OnceLock<ZoneRegistry<B>>,
    cancel: CancellationToken,
}

impl<B: CapabilityBackend> AudioZonePlatform<B> {
    pub fn new(config: PlatformConfig, backend: Arc<B>) -> Self {
        info!(
            name = %config.name,
            zones = config.lights.len(),
            backend = %backend.info().name,
            "AudioZone platform created"
        );

        Self {
            config,
            backend,
            published: AtomicBool::new(false),
            registry: OnceLock::new(),
            cancel: CancellationToken::new(),
        }
    }

    pub fn config(&self) -> &PlatformConfig {
        &self.config
    }

    /// Build the zone registry and return one accessory per zone, in
    /// configuration order.
    ///
    /// # Errors
    ///
    /// - `BridgeError::AlreadyPublished` on every call after the first
    /// - `BridgeError::Config` if a zone entry is missing its id or two
    ///   entries share an id; no accessory is published in that case
    pub fn accessories(&self) -> Result<Vec<ZoneAccessory<B>>> {
        if self.published.swap(true, Ordering::SeqCst) {
            error!("Accessories requested more than once");
            return Err(BridgeError::AlreadyPublished);
        }

        info!(zones = self.config.lights.len(), "Fetching audio zones");

        let registry = ZoneRegistry::builder(Arc::clone(&self.backend))
            .policy(self.config.operation_policy())
            .cancellation_token(&self.cancel)
            .build(self.config.lights.iter().cloned())
            .inspect_err(|e| error!(error = %e, "Invalid zone configuration"))?;

        let registry = self.store_registry(registry)?;
        let accessories = registry
            .iter()
            .map(|handle| ZoneAccessory::new(Arc::clone(handle)))
            .collect::<Vec<_>>();

        info!(accessories = accessories.len(), "Audio zones published");
        Ok(accessories)
    }

    fn store_registry(&self, registry: ZoneRegistry<B>) -> Result<&ZoneRegistry<B>> {
        if self.registry.set(registry).is_err() {
            error!("Zone registry was already stored");
            return Err(BridgeError::AlreadyPublished);
        }
        self.registry.get().ok_or(BridgeError::AlreadyPublished)
    }

    /// Registry built by [`accessories`](Self::accessories), if any.
    pub fn registry(&self) -> Option<&ZoneRegistry<B>> {
        self.registry.get()
    }

    /// Cancel every pending capability call of every published zone.
    pub fn shutdown(&self) {
        info!("Shutting down AudioZone platform");
        self.cancel.cancel();
    }
}
