use hostsnap::core::telemetry::{
    Aggregator, AggregatorConfig, ExecutionMode, FieldKey, FieldValue, FnProbe, ProbeOutcome,
    ProbeRegistry,
};
use hostsnap::{HostsnapError, ProbeError};
use std::thread;
use std::time::{Duration, Instant};
use tokio::sync::broadcast;

fn stuck_probe(for_how_long: Duration) -> FnProbe<impl Fn() -> ProbeOutcome + Send + Sync> {
    FnProbe::new("stuck", move || {
        thread::sleep(for_how_long);
        ProbeOutcome::ok(FieldValue::text("too late"))
    })
}

fn registry_with_stuck_display(stall: Duration) -> ProbeRegistry {
    ProbeRegistry::new()
        .with(FieldKey::Displays, stuck_probe(stall))
        .unwrap()
        .with(
            FieldKey::KernelName,
            FnProbe::new("kernel", || ProbeOutcome::ok(FieldValue::text("Linux"))),
        )
        .unwrap()
}

#[test]
fn test_stuck_probe_times_out_without_blocking_snapshot() {
    let config = AggregatorConfig {
        probe_timeout: Duration::from_millis(100),
        execution: ExecutionMode::Concurrent,
    };
    let aggregator =
        Aggregator::new(registry_with_stuck_display(Duration::from_secs(3)), config).unwrap();

    let started = Instant::now();
    let snapshot = aggregator.collect_blocking().unwrap();

    assert!(started.elapsed() < Duration::from_secs(2));
    assert_eq!(
        snapshot.get(FieldKey::Displays),
        Some(&ProbeOutcome::failed(ProbeError::Timeout(
            Duration::from_millis(100)
        )))
    );
    assert_eq!(
        snapshot.value(FieldKey::KernelName).and_then(FieldValue::as_text),
        Some("Linux")
    );
}

#[test]
fn test_sequential_mode_also_bounds_each_probe() {
    let config = AggregatorConfig {
        probe_timeout: Duration::from_millis(100),
        execution: ExecutionMode::Sequential,
    };
    let aggregator =
        Aggregator::new(registry_with_stuck_display(Duration::from_secs(2)), config).unwrap();

    let started = Instant::now();
    let snapshot = aggregator.collect_blocking().unwrap();

    assert!(started.elapsed() < Duration::from_millis(1500));
    assert!(snapshot
        .get(FieldKey::Displays)
        .and_then(ProbeOutcome::error)
        .is_some_and(ProbeError::is_timeout));
    assert!(snapshot.get(FieldKey::KernelName).is_some_and(ProbeOutcome::is_ok));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_collect_until_returns_cancelled() {
    let config = AggregatorConfig {
        probe_timeout: Duration::from_secs(10),
        ..Default::default()
    };
    let aggregator =
        Aggregator::new(registry_with_stuck_display(Duration::from_secs(1)), config).unwrap();

    let (shutdown_tx, shutdown_rx) = broadcast::channel(1);
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        let _ = shutdown_tx.send(());
    });

    let started = Instant::now();
    let result = aggregator.collect_until(shutdown_rx).await;

    assert!(matches!(result, Err(HostsnapError::Cancelled)));
    assert!(started.elapsed() < Duration::from_millis(800));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_collect_until_completes_without_signal() {
    let aggregator =
        Aggregator::with_defaults(registry_with_stuck_display(Duration::from_millis(10))).unwrap();
    let (_shutdown_tx, shutdown_rx) = broadcast::channel(1);

    let snapshot = aggregator.collect_until(shutdown_rx).await.unwrap();

    assert_eq!(snapshot.len(), 2);
    assert_eq!(snapshot.ok_count(), 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_collect_until_survives_dropped_sender() {
    let aggregator =
        Aggregator::with_defaults(registry_with_stuck_display(Duration::from_millis(50))).unwrap();

    let (shutdown_tx, shutdown_rx) = broadcast::channel::<()>(1);
    drop(shutdown_tx);

    let snapshot = aggregator.collect_until(shutdown_rx).await.unwrap();
    assert_eq!(snapshot.len(), 2);
    assert!(snapshot.get(FieldKey::Displays).is_some_and(ProbeOutcome::is_ok));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_blocking_collect_inside_runtime_returns_error() {
    let result = hostsnap::collect(registry_with_stuck_display(Duration::from_millis(10)));
    assert!(matches!(result, Err(HostsnapError::Runtime(_))));

    // the async entry point is the one to use here
    let snapshot =
        Aggregator::with_defaults(registry_with_stuck_display(Duration::from_millis(10)))
            .unwrap()
            .collect()
            .await;
    assert_eq!(snapshot.ok_count(), 2);
}

#[cfg(unix)]
#[test]
fn test_timed_out_child_process_is_killed() {
    let dir = tempfile::TempDir::new().unwrap();
    let marker = dir.path().join("child-finished");
    let script = format!("sleep 1; touch '{}'", marker.display());

    let registry = ProbeRegistry::new()
        .with(
            FieldKey::Displays,
            FnProbe::new("slow child", move || {
                match hostsnap::platform::process::output("sh", &["-c", &script]) {
                    Ok(_) => ProbeOutcome::ok(FieldValue::text("finished")),
                    Err(error) => ProbeOutcome::failed(error),
                }
            }),
        )
        .unwrap();
    let config = AggregatorConfig {
        probe_timeout: Duration::from_millis(150),
        execution: ExecutionMode::Concurrent,
    };

    let snapshot = Aggregator::new(registry, config)
        .unwrap()
        .collect_blocking()
        .unwrap();
    assert!(snapshot
        .get(FieldKey::Displays)
        .and_then(ProbeOutcome::error)
        .is_some_and(ProbeError::is_timeout));

    thread::sleep(Duration::from_millis(1500));
    assert!(!marker.exists());
}
