//! Property-based tests for registry construction and value validation.

use std::sync::Arc;

use audiozone_backend::{CapabilityError, RecordingBackend, StubBackend, ZoneHandle, ZoneRegistry};
use audiozone_core::{CapabilityKind, CapabilityValue, Error, ZoneConfig, ZoneDescriptor, ZoneId};
use proptest::prelude::*;

/// Strategy for generating lists of distinct zone ids (0-16 entries).
fn unique_ids() -> impl Strategy<Value = Vec<String>> {
    prop::collection::hash_set("[a-z0-9]{1,8}", 0..16).prop_map(|ids| ids.into_iter().collect())
}

fn descriptors(ids: &[String]) -> Vec<ZoneDescriptor> {
    ids.iter()
        .map(|id| ZoneDescriptor::new(id.clone(), format!("Zone {id}"), format!("SN-{id}")))
        .collect()
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

proptest! {
    /// Property: a registry has one handle per entry, in entry order.
    #[test]
    fn prop_registry_preserves_order_and_size(ids in unique_ids()) {
        let registry = ZoneRegistry::build(descriptors(&ids), Arc::new(StubBackend::new())).unwrap();

        prop_assert_eq!(registry.len(), ids.len());
        let built: Vec<String> = registry.zone_ids().into_iter().map(String::from).collect();
        prop_assert_eq!(built, ids);
    }

    /// Property: removing the id of any one entry fails the whole build.
    #[test]
    fn prop_missing_id_anywhere_fails(ids in unique_ids().prop_filter("non-empty", |ids| !ids.is_empty()), pick in any::<prop::sample::Index>()) {
        let mut entries = descriptors(&ids);
        let index = pick.index(entries.len());
        entries[index].id = None;

        let result = ZoneRegistry::build(entries, Arc::new(StubBackend::new()));
        let rejected = matches!(result, Err(Error::MissingZoneId { index: i }) if i == index);
        prop_assert!(rejected);
    }

    /// Property: repeating any id fails the whole build.
    #[test]
    fn prop_duplicate_id_fails(ids in unique_ids().prop_filter("non-empty", |ids| !ids.is_empty()), pick in any::<prop::sample::Index>()) {
        let mut entries = descriptors(&ids);
        let duplicate = entries[pick.index(entries.len())].clone();
        entries.push(duplicate);

        let result = ZoneRegistry::build(entries, Arc::new(StubBackend::new()));
        let rejected = matches!(result, Err(Error::DuplicateZoneId(_)));
        prop_assert!(rejected);
    }

    /// Property: a volume write reaches the backend if and only if it is in 0..=100.
    #[test]
    fn prop_volume_validation_gates_backend(level in -500i64..500) {
        let (backend, handle) = RecordingBackend::new();
        let config = ZoneConfig::new(ZoneId::new("1").unwrap(), "Kitchen", "AZ-1");
        let zone = ZoneHandle::new(config, Arc::new(backend));

        let result = runtime().block_on(
            zone.set_capability(CapabilityKind::Volume, CapabilityValue::Int(level)),
        );

        if (0..=100).contains(&level) {
            prop_assert!(result.is_ok());
            prop_assert_eq!(handle.set_calls(), 1);
        } else {
            let is_invalid = matches!(result, Err(CapabilityError::InvalidValue { .. }));
            prop_assert!(is_invalid);
            prop_assert_eq!(handle.set_calls(), 0);
        }
    }
}
