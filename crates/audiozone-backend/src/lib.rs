//! Capability backend layer for audio zones.
//!
//! This crate turns a list of configured zones into a [`ZoneRegistry`] of
//! [`ZoneHandle`]s, and routes every capability read and write of those
//! handles to a [`CapabilityBackend`].
//!
//! # Design Philosophy
//!
//! - **Async-first**: backend calls are native `async fn` in traits
//!   (Rust 1.90 + Edition 2024 RPITIT).
//! - **Bounded**: every backend call runs under a timeout and can be
//!   cancelled through the registry.
//! - **Validated**: writes are checked against the capability schema
//!   before they reach the backend.
//! - **Thread-safe**: handles are `Send + Sync` and shared through `Arc`.
//!
//! # Backends
//!
//! Two backends ship with the crate, both in [`mock`]:
//!
//! - [`StubBackend`] answers power `false` and volume `50` for every zone
//!   and acknowledges writes without storing them.
//! - [`RecordingBackend`] records calls and can be scripted to fail or to
//!   be slow, for tests.
//!
//! [`AnyBackend`] wraps them for runtime selection.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use audiozone_backend::{AnyBackend, SetOutcome, ZoneRegistry};
//! use audiozone_core::{CapabilityKind, CapabilityValue, ZoneDescriptor};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let registry = ZoneRegistry::build(
//!         [ZoneDescriptor::new("1", "Kitchen", "AZ-1")],
//!         Arc::new(AnyBackend::default()),
//!     )?;
//!
//!     for zone in registry.iter() {
//!         let power = zone.get_capability(CapabilityKind::Power).await?;
//!         assert_eq!(power, CapabilityValue::Bool(false));
//!
//!         zone.set_event_suppressed(true);
//!         let outcome = zone
//!             .set_capability(CapabilityKind::Power, CapabilityValue::Bool(true))
//!             .await?;
//!         assert_eq!(outcome, SetOutcome::Suppressed);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Error Handling
//!
//! Backends return [`BackendError`]. Zone handles return
//! [`CapabilityError`], which adds the zone and capability to backend
//! failures. Rejected values and expired timeouts have their own variants.

pub mod backends;
pub mod error;
pub mod handle;
pub mod mock;
pub mod registry;
pub mod traits;
pub mod types;

// Re-export commonly used types for convenience
pub use backends::AnyBackend;
pub use error::{BackendError, CapabilityError, Result};
pub use handle::{SuppressionGuard, ZoneHandle};
pub use mock::{RecordedWrite, RecordingBackend, RecordingBackendHandle, StubBackend};
pub use registry::{ZoneRegistry, ZoneRegistryBuilder};
pub use traits::CapabilityBackend;
pub use types::{Ack, BackendInfo, OperationPolicy, SetOutcome};
