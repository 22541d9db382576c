//! Per-zone capability handle.
//!
//! A [`ZoneHandle`] is the only way to read or write a zone. It owns the
//! zone's immutable configuration and its event-suppression flag, and
//! forwards reads and writes to the shared backend with the registry's
//! [`OperationPolicy`] applied:
//!
//! - every backend call is bounded by the policy timeout
//! - transient backend failures are retried up to `max_retries` times
//! - writes of the same capability are serialised, writes of different
//!   capabilities may run concurrently
//! - cancelling the registry aborts pending calls with
//!   [`CapabilityError::Cancelled`]
//!
//! Writes are validated against the capability schema before anything
//! else happens, so an out-of-range value never reaches the backend.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use audiozone_backend::{AnyBackend, SetOutcome, ZoneHandle};
//! use audiozone_core::{CapabilityKind, CapabilityValue, ZoneConfig, ZoneId};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), audiozone_backend::CapabilityError> {
//!     let config = ZoneConfig::new(ZoneId::new("1").unwrap(), "Kitchen", "AZ-1");
//!     let zone = ZoneHandle::new(config, Arc::new(AnyBackend::default()));
//!
//!     let volume = zone.get_capability(CapabilityKind::Volume).await?;
//!     assert_eq!(volume, CapabilityValue::Int(50));
//!
//!     let outcome = zone
//!         .set_capability(CapabilityKind::Power, CapabilityValue::Bool(true))
//!         .await?;
//!     assert!(matches!(outcome, SetOutcome::Applied(_)));
//!     Ok(())
//! }
//! ```

use crate::backends::AnyBackend;
use crate::error::{BackendError, CapabilityError};
use crate::traits::CapabilityBackend;
use crate::types::{OperationPolicy, SetOutcome};
use audiozone_core::{CapabilityKind, CapabilitySchema, CapabilityValue, ZoneConfig, ZoneId};
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace, warn};

/// Handle to one configured zone.
#[derive(Debug)]
pub struct ZoneHandle<B = AnyBackend> {
    config: ZoneConfig,
    backend: Arc<B>,
    policy: OperationPolicy,
    event_suppressed: AtomicBool,
    write_locks: HashMap<CapabilityKind, Mutex<()>>,
    cancel: CancellationToken,
}

impl<B: CapabilityBackend> ZoneHandle<B> {
    /// Create a standalone handle with the default policy.
    ///
    /// Handles created by a [`ZoneRegistry`](crate::ZoneRegistry) share the
    /// registry's policy and cancellation token instead.
    pub fn new(config: ZoneConfig, backend: Arc<B>) -> Self {
        Self::with_policy(
            config,
            backend,
            OperationPolicy::default(),
            CancellationToken::new(),
        )
    }

    /// Create a handle with an explicit policy and cancellation token.
    pub fn with_policy(
        config: ZoneConfig,
        backend: Arc<B>,
        policy: OperationPolicy,
        cancel: CancellationToken,
    ) -> Self {
        let write_locks = CapabilityKind::ALL
            .iter()
            .map(|kind| (*kind, Mutex::new(())))
            .collect();

        Self {
            config,
            backend,
            policy,
            event_suppressed: AtomicBool::new(false),
            write_locks,
            cancel,
        }
    }

    pub fn id(&self) -> &ZoneId {
        &self.config.id
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn serial(&self) -> &str {
        &self.config.serial
    }

    pub fn config(&self) -> &ZoneConfig {
        &self.config
    }

    pub fn backend(&self) -> &Arc<B> {
        &self.backend
    }

    pub fn policy(&self) -> OperationPolicy {
        self.policy
    }

    /// Token cancelled when the owning registry shuts down.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Toggle event suppression.
    ///
    /// While set, writes are validated and then reported as
    /// [`SetOutcome::Suppressed`] without reaching the backend. This is used
    /// when a value change originates from the device itself and must not
    /// be echoed back to it.
    pub fn set_event_suppressed(&self, suppressed: bool) {
        let previous = self.event_suppressed.swap(suppressed, Ordering::SeqCst);
        if previous != suppressed {
            debug!(zone = %self.config.id, suppressed, "Event suppression changed");
        }
    }

    pub fn is_event_suppressed(&self) -> bool {
        self.event_suppressed.load(Ordering::SeqCst)
    }

    /// Suppress events until the returned guard is dropped.
    ///
    /// The previous suppression state is restored on drop, so guards nest.
    #[must_use = "suppression ends when the guard is dropped"]
    pub fn suppress_events(&self) -> SuppressionGuard<'_> {
        let previous = self.event_suppressed.swap(true, Ordering::SeqCst);
        SuppressionGuard {
            flag: &self.event_suppressed,
            previous,
        }
    }

    /// Read a capability from the backend.
    ///
    /// # Errors
    ///
    /// - [`CapabilityError::Timeout`] if the backend does not answer in time
    /// - [`CapabilityError::Cancelled`] if the registry shuts down meanwhile
    /// - [`CapabilityError::Backend`] for any other backend failure,
    ///   including a value that does not fit the capability schema
    pub async fn get_capability(
        &self,
        kind: CapabilityKind,
    ) -> Result<CapabilityValue, CapabilityError> {
        let schema = CapabilitySchema::for_kind(kind);
        trace!(zone = %self.config.id, %kind, "Reading capability");

        let value = self
            .call(kind, || self.backend.get(&self.config.id, kind))
            .await?;

        let value = schema.validate(value).map_err(|e| {
            CapabilityError::backend(
                &self.config.id,
                kind,
                BackendError::invalid_data(e.to_string()),
            )
        })?;

        debug!(zone = %self.config.id, %kind, %value, "Capability read");
        Ok(value)
    }

    /// Read a capability by host-facing name (`"power"`, `"On"`, `"volume"`).
    ///
    /// # Errors
    ///
    /// Returns [`CapabilityError::UnsupportedCapability`] for unknown names,
    /// otherwise the same errors as [`get_capability`](Self::get_capability).
    pub async fn get_capability_named(
        &self,
        name: &str,
    ) -> Result<CapabilityValue, CapabilityError> {
        let kind = self.parse_kind(name)?;
        self.get_capability(kind).await
    }

    /// Write a capability.
    ///
    /// The value is checked against the capability schema first. Writes of the
    /// same kind are then serialised, and a zone that is suppressed once this
    /// write holds the lock returns [`SetOutcome::Suppressed`] without a
    /// backend call.
    ///
    /// # Errors
    ///
    /// - [`CapabilityError::InvalidValue`] if the value fails validation
    /// - [`CapabilityError::Timeout`] if the backend does not answer in time
    /// - [`CapabilityError::Cancelled`] if the registry shuts down meanwhile
    /// - [`CapabilityError::Backend`] for any other backend failure
    pub async fn set_capability(
        &self,
        kind: CapabilityKind,
        value: CapabilityValue,
    ) -> Result<SetOutcome, CapabilityError> {
        let value = CapabilitySchema::for_kind(kind).validate(value)?;

        let lock = self
            .write_locks
            .get(&kind)
            .ok_or_else(|| CapabilityError::UnsupportedCapability {
                name: kind.to_string(),
            })?;

        let _serialised = tokio::select! {
            biased;
            () = self.cancel.cancelled() => {
                return Err(CapabilityError::Cancelled {
                    zone: self.config.id.clone(),
                    kind,
                });
            }
            guard = lock.lock() => guard,
        };

        // Read under the lock so a write queued behind another one sees a
        // flag raised while it waited.
        if self.is_event_suppressed() {
            debug!(zone = %self.config.id, %kind, %value, "Write suppressed");
            return Ok(SetOutcome::Suppressed);
        }

        let ack = self
            .call(kind, || self.backend.set(&self.config.id, kind, value))
            .await?;

        info!(zone = %self.config.id, %kind, %value, "Capability set");
        Ok(SetOutcome::Applied(ack))
    }

    /// Write a capability by host-facing name.
    ///
    /// # Errors
    ///
    /// Returns [`CapabilityError::UnsupportedCapability`] for unknown names,
    /// otherwise the same errors as [`set_capability`](Self::set_capability).
    pub async fn set_capability_named(
        &self,
        name: &str,
        value: CapabilityValue,
    ) -> Result<SetOutcome, CapabilityError> {
        let kind = self.parse_kind(name)?;
        self.set_capability(kind, value).await
    }

    fn parse_kind(&self, name: &str) -> Result<CapabilityKind, CapabilityError> {
        name.parse::<CapabilityKind>().map_err(|_| {
            warn!(zone = %self.config.id, capability = name, "Unknown capability requested");
            CapabilityError::UnsupportedCapability {
                name: name.to_string(),
            }
        })
    }

    /// Run one backend operation under the timeout, retry and cancellation
    /// rules of the policy.
    async fn call<T, F, Fut>(&self, kind: CapabilityKind, mut op: F) -> Result<T, CapabilityError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = crate::Result<T>>,
    {
        let zone = &self.config.id;
        let mut attempt: u8 = 0;

        loop {
            let outcome = tokio::select! {
                biased;
                () = self.cancel.cancelled() => {
                    debug!(zone = %zone, %kind, "Operation cancelled");
                    return Err(CapabilityError::Cancelled {
                        zone: zone.clone(),
                        kind,
                    });
                }
                result = tokio::time::timeout(self.policy.timeout, op()) => result,
            };

            let error = match outcome {
                Ok(Ok(value)) => return Ok(value),
                Ok(Err(error)) => error,
                Err(_) => BackendError::timeout(self.policy.timeout_ms()),
            };

            if error.is_transient() && attempt < self.policy.max_retries {
                attempt += 1;
                warn!(zone = %zone, %kind, attempt, error = %error, "Transient backend failure, retrying");
                continue;
            }

            warn!(zone = %zone, %kind, error = %error, "Backend operation failed");
            return Err(match error {
                BackendError::Timeout { duration_ms } => CapabilityError::Timeout {
                    zone: zone.clone(),
                    kind,
                    duration_ms,
                },
                BackendError::Unsupported { .. } => CapabilityError::UnsupportedCapability {
                    name: kind.to_string(),
                },
                other => CapabilityError::backend(zone, kind, other),
            });
        }
    }
}

/// Guard returned by [`ZoneHandle::suppress_events`].
#[derive(Debug)]
pub struct SuppressionGuard<'a> {
    flag: &'a AtomicBool,
    previous: bool,
}

impl Drop for SuppressionGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(self.previous, Ordering::SeqCst);
    }
}
