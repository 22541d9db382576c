//! Recording backend for tests.
//!
//! This module provides a backend that records every call made to it and
//! can be scripted through a [`RecordingBackendHandle`]: fail the next calls,
//! slow every call down, or change the values it reports.

use crate::{
    BackendError, Result,
    mock::stub::stub_value,
    traits::CapabilityBackend,
    types::{Ack, BackendInfo},
};
use audiozone_core::{CapabilityKind, CapabilityValue, ZoneId};
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tracing::trace;

/// A write seen by the recording backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedWrite {
    pub zone_id: ZoneId,
    pub kind: CapabilityKind,
    pub value: CapabilityValue,
}

#[derive(Debug, Default)]
struct Shared {
    get_calls: AtomicUsize,
    set_calls: AtomicUsize,
    sets_in_flight: AtomicUsize,
    max_sets_in_flight: AtomicUsize,
    stateful: AtomicBool,
    latency: Mutex<Duration>,
    failures: Mutex<VecDeque<BackendError>>,
    values: Mutex<HashMap<(ZoneId, CapabilityKind), CapabilityValue>>,
    writes: Mutex<Vec<RecordedWrite>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Shared {
    fn next_failure(&self) -> Option<BackendError> {
        lock(&self.failures).pop_front()
    }

    fn latency(&self) -> Duration {
        *lock(&self.latency)
    }
}

/// Decrements the in-flight counter when a write finishes or is dropped.
struct InFlight<'a>(&'a AtomicUsize);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Backend that records calls and can be scripted from a handle.
///
/// By default it behaves like the stub backend: power reads `false`, volume
/// reads `50`, writes are acknowledged and not stored.
///
/// # Examples
///
/// ```
/// use audiozone_backend::mock::RecordingBackend;
/// use audiozone_backend::traits::CapabilityBackend;
/// use audiozone_core::{CapabilityKind, CapabilityValue, ZoneId};
///
/// #[tokio::main]
/// async fn main() -> audiozone_backend::Result<()> {
///     let (backend, handle) = RecordingBackend::new();
///     let zone = ZoneId::new("1").unwrap();
///
///     backend.set(&zone, CapabilityKind::Power, CapabilityValue::Bool(true)).await?;
///
///     assert_eq!(handle.set_calls(), 1);
///     assert_eq!(handle.writes()[0].value, CapabilityValue::Bool(true));
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct RecordingBackend {
    name: String,
    shared: Arc<Shared>,
}

impl RecordingBackend {
    /// Create a new recording backend with the default name.
    ///
    /// Returns a tuple of (RecordingBackend, RecordingBackendHandle) where the
    /// handle inspects and scripts the backend.
    pub fn new() -> (Self, RecordingBackendHandle) {
        Self::with_name("Recording Backend".to_string())
    }

    /// Create a new recording backend with a custom name.
    pub fn with_name(name: String) -> (Self, RecordingBackendHandle) {
        let shared = Arc::new(Shared::default());

        let backend = Self {
            name,
            shared: Arc::clone(&shared),
        };

        (backend, RecordingBackendHandle { shared })
    }

    async fn delay(&self) {
        let latency = self.shared.latency();
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }
    }
}

impl Default for RecordingBackend {
    fn default() -> Self {
        Self::new().0
    }
}

impl CapabilityBackend for RecordingBackend {
    async fn get(&self, zone: &ZoneId, kind: CapabilityKind) -> Result<CapabilityValue> {
        self.shared.get_calls.fetch_add(1, Ordering::SeqCst);
        trace!(zone = %zone, %kind, "Recording read");

        self.delay().await;

        if let Some(error) = self.shared.next_failure() {
            return Err(error);
        }

        match lock(&self.shared.values).get(&(zone.clone(), kind)) {
            Some(value) => Ok(*value),
            None => stub_value(kind),
        }
    }

    async fn set(&self, zone: &ZoneId, kind: CapabilityKind, value: CapabilityValue) -> Result<Ack> {
        self.shared.set_calls.fetch_add(1, Ordering::SeqCst);
        trace!(zone = %zone, %kind, %value, "Recording write");

        let in_flight = self.shared.sets_in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        let _guard = InFlight(&self.shared.sets_in_flight);
        self.shared
            .max_sets_in_flight
            .fetch_max(in_flight, Ordering::SeqCst);

        self.delay().await;

        if let Some(error) = self.shared.next_failure() {
            return Err(error);
        }

        lock(&self.shared.writes).push(RecordedWrite {
            zone_id: zone.clone(),
            kind,
            value,
        });

        if self.shared.stateful.load(Ordering::SeqCst) {
            lock(&self.shared.values).insert((zone.clone(), kind), value);
        }

        Ok(Ack::new(zone.clone(), kind, value))
    }

    fn info(&self) -> BackendInfo {
        BackendInfo::new(
            self.name.clone(),
            self.shared.stateful.load(Ordering::SeqCst),
        )
    }
}

/// Handle for inspecting and scripting a [`RecordingBackend`].
///
/// The handle shares state with its backend and can be cloned freely.
#[derive(Debug, Clone)]
pub struct RecordingBackendHandle {
    shared: Arc<Shared>,
}

impl RecordingBackendHandle {
    /// Number of `get` calls received.
    pub fn get_calls(&self) -> usize {
        self.shared.get_calls.load(Ordering::SeqCst)
    }

    /// Number of `set` calls received, including failed ones.
    pub fn set_calls(&self) -> usize {
        self.shared.set_calls.load(Ordering::SeqCst)
    }

    /// Highest number of `set` calls that were running at the same time.
    pub fn max_concurrent_sets(&self) -> usize {
        self.shared.max_sets_in_flight.load(Ordering::SeqCst)
    }

    /// Successful writes, in the order they completed.
    pub fn writes(&self) -> Vec<RecordedWrite> {
        lock(&self.shared.writes).clone()
    }

    /// Make the next call (get or set) fail with `error`.
    pub fn fail_next(&self, error: BackendError) {
        self.fail_next_n(1, error);
    }

    /// Make the next `count` calls fail with `error`.
    pub fn fail_next_n(&self, count: usize, error: BackendError) {
        let mut failures = lock(&self.shared.failures);
        failures.extend(std::iter::repeat_n(error, count));
    }

    /// Delay every subsequent call by `latency`.
    pub fn set_latency(&self, latency: Duration) {
        *lock(&self.shared.latency) = latency;
    }

    /// Override the value reported for one zone and capability.
    pub fn set_value(&self, zone: &ZoneId, kind: CapabilityKind, value: CapabilityValue) {
        lock(&self.shared.values).insert((zone.clone(), kind), value);
    }

    /// Store writes so later reads return them.
    pub fn set_stateful(&self, stateful: bool) {
        self.shared.stateful.store(stateful, Ordering::SeqCst);
    }
}
