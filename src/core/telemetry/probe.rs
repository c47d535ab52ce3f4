use std::cell::Cell;
use std::time::{Duration, Instant};

use super::types::ProbeOutcome;

thread_local! {
    static DEADLINE: Cell<Option<Instant>> = const { Cell::new(None) };
}

/// A single-purpose, read-only query against one metric domain.
///
/// Implementations acquire whatever handle they need inside `run()` and
/// release it before returning. Every failure path ends in a returned
/// `Unavailable` or `Failed` outcome.
pub trait Probe: Send + Sync {
    /// Query the system once.
    fn run(&self) -> ProbeOutcome;

    /// Human readable name used in logs.
    fn describe(&self) -> &'static str;
}

/// Adapts a closure into a [`Probe`].
///
/// Handy for embedding callers and for tests that need a scripted probe.
pub struct FnProbe<F> {
    name: &'static str,
    f: F,
}

impl<F> FnProbe<F>
where
    F: Fn() -> ProbeOutcome + Send + Sync,
{
    pub fn new(name: &'static str, f: F) -> Self {
        Self { name, f }
    }
}

impl<F> Probe for FnProbe<F>
where
    F: Fn() -> ProbeOutcome + Send + Sync,
{
    fn run(&self) -> ProbeOutcome {
        (self.f)()
    }

    fn describe(&self) -> &'static str {
        self.name
    }
}

/// Time left before the aggregator gives up on the probe running on this
/// thread, or `None` outside an aggregator run.
///
/// Probes that launch child processes bound them with this so the child
/// is killed instead of outliving a timed-out probe.
pub fn remaining_budget() -> Option<Duration> {
    DEADLINE
        .with(Cell::get)
        .map(|deadline| deadline.saturating_duration_since(Instant::now()))
}

/// Installs a probe deadline on the current thread until dropped.
pub(crate) struct DeadlineGuard {
    previous: Option<Instant>,
}

impl DeadlineGuard {
    pub(crate) fn enter(deadline: Instant) -> Self {
        let previous = DEADLINE.with(|cell| cell.replace(Some(deadline)));
        Self { previous }
    }
}

impl Drop for DeadlineGuard {
    fn drop(&mut self) {
        DEADLINE.with(|cell| cell.set(self.previous));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_budget_outside_a_run() {
        assert_eq!(remaining_budget(), None);
    }

    #[test]
    fn test_guard_sets_and_restores_deadline() {
        {
            let _guard = DeadlineGuard::enter(Instant::now() + Duration::from_secs(60));
            let left = remaining_budget().unwrap();
            assert!(left > Duration::from_secs(59));
        }
        assert_eq!(remaining_budget(), None);
    }

    #[test]
    fn test_expired_deadline_leaves_zero() {
        let _guard = DeadlineGuard::enter(Instant::now());
        assert_eq!(remaining_budget(), Some(Duration::ZERO));
    }
}
