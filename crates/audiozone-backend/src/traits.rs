//! Capability backend trait definition.
//!
//! A backend performs (or stubs) the device I/O behind every zone. One
//! backend instance is shared by all zone handles of a registry and is told
//! which zone each call is for, so it owns any per-zone state itself.
//!
//! The trait uses native `async fn` methods (Rust 1.90 + Edition 2024 RPITIT),
//! eliminating the need for the `async_trait` macro.

#![allow(async_fn_in_trait)]

use crate::error::Result;
use crate::types::{Ack, BackendInfo};
use audiozone_core::{CapabilityKind, CapabilityValue, ZoneId};

/// Backend performing capability reads and writes for zones.
///
/// # Object Safety and Dynamic Dispatch
///
/// **NOTE**: This trait is NOT object-safe because `async fn` methods return
/// `impl Future`. You cannot use `Box<dyn CapabilityBackend>`. Use a generic
/// type parameter, or the [`AnyBackend`](crate::backends::AnyBackend) enum
/// when the concrete backend is picked at runtime.
///
/// # Contract
///
/// - `get` returns a [`CapabilityValue::Bool`] for power and a
///   [`CapabilityValue::Int`] in `0..=100` for volume.
/// - `set` receives values already validated against the capability schema.
/// - Both complete exactly once. Timeouts and cancellation are applied by
///   the caller, so a backend may simply await its I/O.
///
/// # Examples
///
/// ```
/// use audiozone_backend::traits::CapabilityBackend;
/// use audiozone_backend::mock::StubBackend;
/// use audiozone_core::{CapabilityKind, CapabilityValue, ZoneId};
///
/// #[tokio::main]
/// async fn main() -> audiozone_backend::Result<()> {
///     let backend = StubBackend::new();
///     let zone = ZoneId::new("1").unwrap();
///
///     let volume = backend.get(&zone, CapabilityKind::Volume).await?;
///     assert_eq!(volume, CapabilityValue::Int(50));
///     Ok(())
/// }
/// ```
pub trait CapabilityBackend: Send + Sync {
    /// Read the current value of a capability.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The backend does not support the capability
    /// - The zone is unknown to the backend
    /// - A communication error occurs
    async fn get(&self, zone: &ZoneId, kind: CapabilityKind) -> Result<CapabilityValue>;

    /// Write a capability value.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The backend does not support the capability
    /// - The zone is unknown to the backend
    /// - A communication error occurs
    async fn set(&self, zone: &ZoneId, kind: CapabilityKind, value: CapabilityValue) -> Result<Ack>;

    /// Describe this backend.
    fn info(&self) -> BackendInfo;
}
