use hostsnap::core::telemetry::{FieldKey, FieldValue, ProbeOutcome, ProbeRegistry};
use hostsnap::Config;

fn host_snapshot() -> hostsnap::Snapshot {
    hostsnap::collect(ProbeRegistry::standard(&Config::default())).unwrap()
}

#[test]
fn test_every_standard_field_has_an_outcome() {
    let snapshot = host_snapshot();

    assert_eq!(snapshot.len(), FieldKey::ALL.len());
    for key in FieldKey::ALL {
        assert!(snapshot.contains(key), "missing outcome for {}", key);
    }
    assert_eq!(
        snapshot.ok_count() + snapshot.unavailable_count() + snapshot.failed_count(),
        FieldKey::ALL.len()
    );
}

#[test]
fn test_architecture_is_always_known() {
    let snapshot = host_snapshot();

    let label = snapshot
        .value(FieldKey::Architecture)
        .and_then(FieldValue::as_text)
        .unwrap();
    assert!(["x86_64", "arm64", "unknown"].contains(&label));
}

#[test]
fn test_reported_values_are_consistent() {
    let snapshot = host_snapshot();

    if let Some(FieldValue::Memory(memory)) = snapshot.value(FieldKey::Memory) {
        assert!(memory.total_bytes > 0);
        assert!(memory.used_bytes <= memory.total_bytes);
    }

    if let Some(FieldValue::Storage(storage)) = snapshot.value(FieldKey::Storage) {
        assert_eq!(
            storage.used_bytes + storage.available_bytes,
            storage.total_bytes
        );
    }

    if let Some(FieldValue::Cpu(cpu)) = snapshot.value(FieldKey::Cpu) {
        assert!(!cpu.name.trim().is_empty());
        assert!(cpu.logical_cores >= 1);
        if let Some(ghz) = cpu.frequency_ghz.get() {
            assert!(*ghz > 0.0);
        }
    }

    if let Some(FieldValue::Power(power)) = snapshot.value(FieldKey::Power) {
        if let Some(fraction) = power.battery_fraction.get() {
            assert!((0.0..=1.0).contains(fraction));
        }
    }

    if let Some(FieldValue::Quantity { value, .. }) = snapshot.value(FieldKey::UptimeSeconds) {
        assert!(*value > 0.0);
    }
}

#[test]
fn test_repeated_collection_is_stable_for_identity_fields() {
    let first = host_snapshot();
    let second = host_snapshot();

    for key in [FieldKey::OsName, FieldKey::KernelName, FieldKey::Architecture] {
        if let (Some(ProbeOutcome::Ok { value: a }), Some(ProbeOutcome::Ok { value: b })) =
            (first.get(key), second.get(key))
        {
            assert_eq!(a, b);
        }
    }
}
