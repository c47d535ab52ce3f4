use hostsnap::core::telemetry::{
    Aggregator, AggregatorConfig, CpuInfo, ExecutionMode, FieldKey, FieldValue, FnProbe,
    ProbeOutcome, ProbeRegistry, Reading,
};
use hostsnap::{HostsnapError, ProbeError};
use std::collections::BTreeSet;
use std::time::Duration;

fn test_cpu() -> FieldValue {
    FieldValue::Cpu(CpuInfo {
        name: "Test CPU".to_string(),
        logical_cores: 8,
        frequency_ghz: Reading::value(3.2),
    })
}

fn scripted_registry() -> ProbeRegistry {
    ProbeRegistry::new()
        .with(FieldKey::Cpu, FnProbe::new("cpu", || ProbeOutcome::ok(test_cpu())))
        .unwrap()
        .with(
            FieldKey::Power,
            FnProbe::new("power", || ProbeOutcome::unavailable("no power source")),
        )
        .unwrap()
        .with(
            FieldKey::UptimeSeconds,
            FnProbe::new("uptime", || ProbeOutcome::ok(FieldValue::seconds(12345.0))),
        )
        .unwrap()
}

#[test]
fn test_snapshot_contains_exactly_registered_keys() {
    let snapshot = hostsnap::collect(scripted_registry()).unwrap();

    let keys: BTreeSet<FieldKey> = snapshot.keys().collect();
    let expected: BTreeSet<FieldKey> = [FieldKey::Cpu, FieldKey::Power, FieldKey::UptimeSeconds]
        .into_iter()
        .collect();
    assert_eq!(keys, expected);
    assert_eq!(snapshot.len(), 3);
}

#[test]
fn test_end_to_end_scripted_snapshot() {
    let snapshot = hostsnap::collect(scripted_registry()).unwrap();

    assert_eq!(snapshot.value(FieldKey::Cpu), Some(&test_cpu()));
    assert_eq!(
        snapshot.get(FieldKey::Power),
        Some(&ProbeOutcome::unavailable("no power source"))
    );
    assert_eq!(
        snapshot.value(FieldKey::UptimeSeconds),
        Some(&FieldValue::seconds(12345.0))
    );
    assert_eq!(snapshot.ok_count(), 2);
    assert_eq!(snapshot.unavailable_count(), 1);
    assert_eq!(snapshot.failed_count(), 0);
}

#[test]
fn test_failures_are_isolated_per_field() {
    let registry = ProbeRegistry::new()
        .with(
            FieldKey::OsName,
            FnProbe::new("os", || ProbeOutcome::ok(FieldValue::text("TestOS"))),
        )
        .unwrap()
        .with(
            FieldKey::Gpus,
            FnProbe::new("gpu", || panic!("driver went away")),
        )
        .unwrap()
        .with(
            FieldKey::Memory,
            FnProbe::new("memory", || {
                ProbeOutcome::failed(ProbeError::permission_denied("sysctl refused"))
            }),
        )
        .unwrap()
        .with(
            FieldKey::HostName,
            FnProbe::new("host", || ProbeOutcome::ok(FieldValue::text("box"))),
        )
        .unwrap();

    let snapshot = hostsnap::collect(registry).unwrap();

    assert_eq!(snapshot.len(), 4);
    assert_eq!(
        snapshot.value(FieldKey::OsName).and_then(FieldValue::as_text),
        Some("TestOS")
    );
    assert_eq!(
        snapshot.value(FieldKey::HostName).and_then(FieldValue::as_text),
        Some("box")
    );
    assert!(matches!(
        snapshot.get(FieldKey::Gpus),
        Some(ProbeOutcome::Failed {
            error: ProbeError::Panicked(msg)
        }) if msg.contains("driver went away")
    ));
    assert!(matches!(
        snapshot.get(FieldKey::Memory),
        Some(ProbeOutcome::Failed {
            error: ProbeError::PermissionDenied(_)
        })
    ));
}

#[test]
fn test_sequential_and_concurrent_agree() {
    let run = |execution| {
        let config = AggregatorConfig {
            execution,
            ..Default::default()
        };
        Aggregator::new(scripted_registry(), config)
            .unwrap()
            .collect_blocking()
            .unwrap()
    };

    let concurrent = run(ExecutionMode::Concurrent);
    let sequential = run(ExecutionMode::Sequential);

    for key in concurrent.keys() {
        assert_eq!(concurrent.get(key), sequential.get(key));
    }
    assert_eq!(concurrent.len(), sequential.len());
}

#[test]
fn test_duplicate_key_rejected() {
    let mut registry = scripted_registry();
    let err = registry
        .register(
            FieldKey::Cpu,
            FnProbe::new("second cpu", || ProbeOutcome::unavailable("n/a")),
        )
        .unwrap_err();

    assert!(matches!(err, HostsnapError::DuplicateField(FieldKey::Cpu)));
    assert_eq!(registry.len(), 3);
}

#[test]
fn test_empty_registry_fails_before_collection() {
    let err = hostsnap::collect(ProbeRegistry::new()).unwrap_err();
    assert!(matches!(err, HostsnapError::EmptyRegistry));
}

#[test]
fn test_json_layout() {
    let snapshot = hostsnap::collect(scripted_registry()).unwrap();
    let json = serde_json::to_value(&snapshot).unwrap();

    assert!(json["collected_at"].is_string());

    let cpu = &json["fields"]["cpu"];
    assert_eq!(cpu["status"], "ok");
    assert_eq!(cpu["value"]["type"], "cpu");
    assert_eq!(cpu["value"]["data"]["name"], "Test CPU");
    assert_eq!(cpu["value"]["data"]["logical_cores"], 8);
    assert!(cpu["elapsed_ms"].is_u64());

    let power = &json["fields"]["power"];
    assert_eq!(power["status"], "unavailable");
    assert_eq!(power["reason"], "no power source");

    assert_eq!(
        json["fields"]["uptime_seconds"]["value"]["data"]["value"],
        12345.0
    );
}

#[test]
fn test_probe_timeout_is_configurable() {
    let config = AggregatorConfig {
        probe_timeout: Duration::from_millis(250),
        ..Default::default()
    };
    let aggregator = Aggregator::new(scripted_registry(), config).unwrap();
    assert_eq!(aggregator.config().probe_timeout, Duration::from_millis(250));
    assert_eq!(aggregator.registry().len(), 3);
}
