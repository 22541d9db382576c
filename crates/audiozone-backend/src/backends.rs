//! Enum wrapper for backend dispatch.
//!
//! Native `async fn` in traits are not object-safe, so `Box<dyn
//! CapabilityBackend>` is not available. [`AnyBackend`] provides concrete
//! type dispatch instead, for code that chooses its backend at runtime
//! (the CLI, the host adapter). Code that knows its backend statically can
//! use it directly as a type parameter.
//!
//! # Examples
//!
//! ```
//! use audiozone_backend::backends::AnyBackend;
//! use audiozone_backend::mock::StubBackend;
//!
//! let backend = AnyBackend::Stub(StubBackend::new());
//! assert_eq!(backend.kind(), "stub");
//! ```

use crate::mock::{RecordingBackend, StubBackend};
use crate::traits::CapabilityBackend;
use crate::types::{Ack, BackendInfo};
use crate::Result;
use audiozone_core::{CapabilityKind, CapabilityValue, ZoneId};

/// Enum wrapper for capability backend dispatch.
#[derive(Debug)]
#[non_exhaustive]
pub enum AnyBackend {
    /// Fixed-value backend shipped with the platform.
    Stub(StubBackend),

    /// Call-recording backend for tests and diagnostics.
    Recording(RecordingBackend),
}

impl AnyBackend {
    /// Short lower-case name of the wrapped backend.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Stub(_) => "stub",
            Self::Recording(_) => "recording",
        }
    }
}

impl Default for AnyBackend {
    fn default() -> Self {
        Self::Stub(StubBackend::new())
    }
}

impl From<StubBackend> for AnyBackend {
    fn from(backend: StubBackend) -> Self {
        Self::Stub(backend)
    }
}

impl From<RecordingBackend> for AnyBackend {
    fn from(backend: RecordingBackend) -> Self {
        Self::Recording(backend)
    }
}

impl CapabilityBackend for AnyBackend {
    async fn get(&self, zone: &ZoneId, kind: CapabilityKind) -> Result<CapabilityValue> {
        match self {
            Self::Stub(backend) => backend.get(zone, kind).await,
            Self::Recording(backend) => backend.get(zone, kind).await,
        }
    }

    async fn set(&self, zone: &ZoneId, kind: CapabilityKind, value: CapabilityValue) -> Result<Ack> {
        match self {
            Self::Stub(backend) => backend.set(zone, kind, value).await,
            Self::Recording(backend) => backend.set(zone, kind, value).await,
        }
    }

    fn info(&self) -> BackendInfo {
        match self {
            Self::Stub(backend) => backend.info(),
            Self::Recording(backend) => backend.info(),
        }
    }
}
