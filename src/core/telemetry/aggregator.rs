//! Runs every registered probe and assembles the snapshot.
//!
//! Each probe runs on the blocking thread pool under its own timeout. A
//! probe that panics, fails or times out only affects its own field; the
//! snapshot is emitted once every probe has produced an outcome.

use chrono::Utc;
use futures_util::future::join_all;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::task::JoinError;

use super::field::FieldKey;
use super::probe::{DeadlineGuard, Probe};
use super::registry::ProbeRegistry;
use super::snapshot::{FieldReport, Snapshot};
use super::types::ProbeOutcome;
use crate::error::{HostsnapError, ProbeError, Result};

pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Whether probes run at the same time or one after another.
///
/// Both modes produce the same snapshot; this is only a latency choice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionMode {
    #[default]
    Concurrent,
    Sequential,
}

#[derive(Debug, Clone)]
pub struct AggregatorConfig {
    /// Upper bound for a single probe invocation.
    pub probe_timeout: Duration,
    pub execution: ExecutionMode,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
            execution: ExecutionMode::default(),
        }
    }
}

pub struct Aggregator {
    registry: ProbeRegistry,
    config: AggregatorConfig,
}

impl Aggregator {
    /// Fails only on configuration errors: an empty registry.
    pub fn new(registry: ProbeRegistry, config: AggregatorConfig) -> Result<Self> {
        if registry.is_empty() {
            return Err(HostsnapError::EmptyRegistry);
        }
        if config.probe_timeout.is_zero() {
            return Err(HostsnapError::config("probe timeout must be greater than zero"));
        }
        Ok(Self { registry, config })
    }

    pub fn with_defaults(registry: ProbeRegistry) -> Result<Self> {
        Self::new(registry, AggregatorConfig::default())
    }

    pub fn registry(&self) -> &ProbeRegistry {
        &self.registry
    }

    pub fn config(&self) -> &AggregatorConfig {
        &self.config
    }

    /// Run every probe and build the snapshot.
    ///
    /// Must be called from within a multi-threaded Tokio runtime. Dropping
    /// the returned future abandons in-flight probes.
    pub async fn collect(&self) -> Snapshot {
        let started = Instant::now();
        let timeout = self.config.probe_timeout;

        let reports: Vec<(FieldKey, FieldReport)> = match self.config.execution {
            ExecutionMode::Concurrent => {
                let pending = self
                    .registry
                    .iter()
                    .map(|(key, probe)| run_isolated(key, Arc::clone(probe), timeout));
                join_all(pending).await
            }
            ExecutionMode::Sequential => {
                let mut reports = Vec::with_capacity(self.registry.len());
                for (key, probe) in self.registry.iter() {
                    reports.push(run_isolated(key, Arc::clone(probe), timeout).await);
                }
                reports
            }
        };

        let fields: BTreeMap<FieldKey, FieldReport> = reports.into_iter().collect();
        let snapshot = Snapshot::new(Utc::now(), fields);

        info!(
            "Snapshot collected in {:?}: {} ok, {} unavailable, {} failed",
            started.elapsed(),
            snapshot.ok_count(),
            snapshot.unavailable_count(),
            snapshot.failed_count()
        );

        snapshot
    }

    /// Like [`collect`](Self::collect), but gives up as soon as `shutdown`
    /// fires. No partial snapshot is returned on cancellation.
    ///
    /// Only a sent signal cancels. If every sender is dropped without
    /// sending, collection simply runs to completion.
    pub async fn collect_until(&self, mut shutdown: broadcast::Receiver<()>) -> Result<Snapshot> {
        let collect = self.collect();
        tokio::pin!(collect);
        let mut listening = true;

        loop {
            tokio::select! {
                snapshot = &mut collect => return Ok(snapshot),
                signal = shutdown.recv(), if listening => match signal {
                    // Lagged still means a signal was sent
                    Ok(()) | Err(RecvError::Lagged(_)) => {
                        info!("Snapshot collection cancelled");
                        return Err(HostsnapError::Cancelled);
                    }
                    Err(RecvError::Closed) => {
                        debug!("Shutdown channel closed without a signal");
                        listening = false;
                    }
                },
            }
        }
    }

    /// Blocking entry point for callers without a runtime.
    ///
    /// The private runtime is shut down in the background, so a probe that
    /// is still stuck after its timeout does not hold up the caller. Inside
    /// a Tokio runtime this returns [`HostsnapError::Runtime`]; await
    /// [`collect`](Self::collect) there instead.
    pub fn collect_blocking(&self) -> Result<Snapshot> {
        if tokio::runtime::Handle::try_current().is_ok() {
            return Err(HostsnapError::runtime(
                "collect_blocking was called inside a Tokio runtime; await Aggregator::collect instead",
            ));
        }

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_time()
            .thread_name("hostsnap-probe")
            .build()?;

        let snapshot = runtime.block_on(self.collect());
        runtime.shutdown_background();

        Ok(snapshot)
    }
}

/// Collect a snapshot from `registry` with the default configuration.
///
/// Blocking; see [`Aggregator::collect_blocking`].
pub fn collect(registry: ProbeRegistry) -> Result<Snapshot> {
    Aggregator::with_defaults(registry)?.collect_blocking()
}

async fn run_isolated(
    key: FieldKey,
    probe: Arc<dyn Probe>,
    timeout: Duration,
) -> (FieldKey, FieldReport) {
    let name = probe.describe();
    debug!("Running {} probe for '{}'", name, key);

    let started = Instant::now();
    let deadline = started + timeout;
    let handle = tokio::task::spawn_blocking(move || {
        let _deadline = DeadlineGuard::enter(deadline);
        probe.run()
    });

    // On timeout the join handle is dropped, which detaches the blocking
    // thread instead of waiting for it.
    let outcome = match tokio::time::timeout(timeout, handle).await {
        Ok(Ok(outcome)) => outcome,
        Ok(Err(join_err)) => ProbeOutcome::failed(join_error(join_err)),
        Err(_) => ProbeOutcome::failed(ProbeError::Timeout(timeout)),
    };
    let elapsed = started.elapsed();

    match &outcome {
        ProbeOutcome::Failed { error } => {
            warn!("Failed to collect '{}' ({}): {}", key, name, error);
        }
        ProbeOutcome::Unavailable { reason } => {
            debug!("'{}' unavailable: {}", key, reason);
        }
        ProbeOutcome::Ok { .. } => {
            debug!("'{}' collected in {:?}", key, elapsed);
        }
    }

    (key, FieldReport { outcome, elapsed })
}

fn join_error(err: JoinError) -> ProbeError {
    if err.is_panic() {
        ProbeError::Panicked(panic_message(err.into_panic()))
    } else {
        ProbeError::query("probe task was cancelled")
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
