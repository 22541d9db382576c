//! Zone registry.
//!
//! The [`ZoneRegistry`] is built once from the configured zone list and owns
//! one [`ZoneHandle`] per entry, in configuration order. It never changes
//! after construction: zones are neither added nor removed at runtime.
//!
//! Construction is all-or-nothing. Every entry is validated before any
//! handle exists, so a missing or duplicate id yields an error and no
//! registry at all.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use audiozone_backend::{AnyBackend, ZoneRegistry};
//! use audiozone_core::ZoneDescriptor;
//!
//! let zones = vec![
//!     ZoneDescriptor::new("1", "Kitchen", "AZ-1"),
//!     ZoneDescriptor::new("2", "Patio", "AZ-2"),
//! ];
//!
//! let registry = ZoneRegistry::build(zones, Arc::new(AnyBackend::default())).unwrap();
//! let names: Vec<_> = registry.iter().map(|zone| zone.name().to_string()).collect();
//! assert_eq!(names, ["Kitchen", "Patio"]);
//! ```

use crate::backends::AnyBackend;
use crate::handle::ZoneHandle;
use crate::traits::CapabilityBackend;
use crate::types::OperationPolicy;
use audiozone_core::{Error, ZoneConfig, ZoneDescriptor, ZoneId};
use std::collections::HashSet;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Ordered, immutable set of zone handles sharing one backend.
#[derive(Debug)]
pub struct ZoneRegistry<B = AnyBackend> {
    handles: Vec<Arc<ZoneHandle<B>>>,
    backend: Arc<B>,
    policy: OperationPolicy,
    cancel: CancellationToken,
}

impl<B: CapabilityBackend> ZoneRegistry<B> {
    /// Build a registry with the default [`OperationPolicy`].
    ///
    /// An empty list is valid and yields an empty registry.
    ///
    /// # Errors
    ///
    /// - `Error::MissingZoneId` if an entry has no id
    /// - `Error::DuplicateZoneId` if two entries share an id
    pub fn build<I, D>(configs: I, backend: Arc<B>) -> audiozone_core::Result<Self>
    where
        I: IntoIterator<Item = D>,
        D: Into<ZoneDescriptor>,
    {
        Self::builder(backend).build(configs)
    }

    /// Start building a registry with a custom policy.
    pub fn builder(backend: Arc<B>) -> ZoneRegistryBuilder<B> {
        ZoneRegistryBuilder {
            backend,
            policy: OperationPolicy::default(),
            cancel: CancellationToken::new(),
        }
    }

    /// All handles, in configuration order.
    pub fn enumerate(&self) -> &[Arc<ZoneHandle<B>>] {
        &self.handles
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<ZoneHandle<B>>> {
        self.handles.iter()
    }

    /// Look up a handle by zone id.
    pub fn get(&self, id: &ZoneId) -> Option<&Arc<ZoneHandle<B>>> {
        self.handles.iter().find(|handle| handle.id() == id)
    }

    pub fn zone_ids(&self) -> Vec<ZoneId> {
        self.handles.iter().map(|handle| handle.id().clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    pub fn backend(&self) -> &Arc<B> {
        &self.backend
    }

    pub fn policy(&self) -> OperationPolicy {
        self.policy
    }

    /// Cancel every pending and future backend call of every handle.
    pub fn shutdown(&self) {
        if !self.cancel.is_cancelled() {
            info!(zones = self.handles.len(), "Shutting down zone registry");
            self.cancel.cancel();
        }
    }

    pub fn is_shut_down(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

/// Builder for [`ZoneRegistry`].
#[derive(Debug)]
pub struct ZoneRegistryBuilder<B = AnyBackend> {
    backend: Arc<B>,
    policy: OperationPolicy,
    cancel: CancellationToken,
}

impl<B: CapabilityBackend> ZoneRegistryBuilder<B> {
    /// Timeout and retry policy for every handle.
    pub fn policy(mut self, policy: OperationPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Tie the registry to an outer cancellation token.
    ///
    /// Handles observe a child of this token, so cancelling it shuts the
    /// registry down as well.
    pub fn cancellation_token(mut self, token: &CancellationToken) -> Self {
        self.cancel = token.child_token();
        self
    }

    /// Validate `configs` and create one handle per entry.
    ///
    /// # Errors
    ///
    /// See [`ZoneRegistry::build`].
    pub fn build<I, D>(self, configs: I) -> audiozone_core::Result<ZoneRegistry<B>>
    where
        I: IntoIterator<Item = D>,
        D: Into<ZoneDescriptor>,
    {
        let configs = validate(configs).inspect_err(|error| {
            warn!(error = %error, "Rejecting zone configuration");
        })?;

        let handles = configs
            .into_iter()
            .map(|config| {
                debug!(zone = %config.id, name = %config.name, "Creating zone handle");
                Arc::new(ZoneHandle::with_policy(
                    config,
                    Arc::clone(&self.backend),
                    self.policy,
                    self.cancel.clone(),
                ))
            })
            .collect::<Vec<_>>();

        info!(
            zones = handles.len(),
            backend = %self.backend.info().name,
            timeout_ms = self.policy.timeout_ms(),
            max_retries = self.policy.max_retries,
            "Zone registry built"
        );

        Ok(ZoneRegistry {
            handles,
            backend: self.backend,
            policy: self.policy,
            cancel: self.cancel,
        })
    }
}

/// Turn raw entries into configs, rejecting missing and duplicate ids.
fn validate<I, D>(configs: I) -> audiozone_core::Result<Vec<ZoneConfig>>
where
    I: IntoIterator<Item = D>,
    D: Into<ZoneDescriptor>,
{
    let mut seen = HashSet::new();

    configs
        .into_iter()
        .enumerate()
        .map(|(index, descriptor)| {
            let config = descriptor.into().into_config(index)?;
            if !seen.insert(config.id.clone()) {
                return Err(Error::DuplicateZoneId(config.id.to_string()));
            }
            Ok(config)
        })
        .collect()
}
