//! Performance benchmarks for zone registry construction and capability
//! calls.
//!
//! # Run Benchmarks
//!
//! ```sh
//! # Run all registry benchmarks
//! cargo bench --bench registry_bench
//!
//! # Run a single group
//! cargo bench --bench registry_bench -- schema_validation
//! ```
//!
//! # Key Metrics
//!
//! - **registry_build**: cost of validating N entries and creating handles
//! - **schema_validation**: per-write validation overhead
//! - **stub_roundtrip**: a set followed by a get through a handle, including
//!   the timeout and cancellation wrapper

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use std::sync::Arc;

use audiozone_backend::{AnyBackend, ZoneRegistry};
use audiozone_core::{CapabilityKind, CapabilitySchema, CapabilityValue, ZoneDescriptor};

fn descriptors(count: usize) -> Vec<ZoneDescriptor> {
    (0..count)
        .map(|i| ZoneDescriptor::new(format!("zone-{i}"), format!("Zone {i}"), format!("SN-{i}")))
        .collect()
}

fn bench_registry_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("registry_build");
    let backend = Arc::new(AnyBackend::default());

    for count in [1usize, 8, 64, 256] {
        group.throughput(Throughput::Elements(count as u64));
        let entries = descriptors(count);

        group.bench_with_input(BenchmarkId::new("zones", count), &entries, |b, entries| {
            b.iter(|| {
                let registry = ZoneRegistry::build(black_box(entries.clone()), Arc::clone(&backend));
                black_box(registry)
            });
        });
    }

    group.finish();
}

fn bench_schema_validation(c: &mut Criterion) {
    let mut group = c.benchmark_group("schema_validation");
    group.throughput(Throughput::Elements(1));

    let cases = [
        ("volume_valid", CapabilityKind::Volume, CapabilityValue::Int(75)),
        ("volume_out_of_range", CapabilityKind::Volume, CapabilityValue::Int(150)),
        ("power_bool", CapabilityKind::Power, CapabilityValue::Bool(true)),
        ("power_numeric", CapabilityKind::Power, CapabilityValue::Int(1)),
    ];

    for (name, kind, value) in cases {
        let schema = CapabilitySchema::for_kind(kind);
        group.bench_function(name, |b| {
            b.iter(|| black_box(schema.validate(black_box(value))));
        });
    }

    group.finish();
}

fn bench_stub_roundtrip(c: &mut Criterion) {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();
    let registry = ZoneRegistry::build(descriptors(1), Arc::new(AnyBackend::default())).unwrap();
    let zone = Arc::clone(&registry.enumerate()[0]);

    c.bench_function("stub_roundtrip", |b| {
        b.iter(|| {
            runtime.block_on(async {
                let outcome = zone
                    .set_capability(CapabilityKind::Volume, black_box(CapabilityValue::Int(40)))
                    .await;
                let value = zone.get_capability(CapabilityKind::Volume).await;
                black_box((outcome, value))
            })
        });
    });
}

criterion_group!(
    benches,
    bench_registry_build,
    bench_schema_validation,
    bench_stub_roundtrip
);
criterion_main!(benches);
