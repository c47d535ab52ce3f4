//! Telemetry aggregation core.
//!
//! Probes query one metric domain each, the registry lists them, and the
//! aggregator runs them under isolation into an immutable [`Snapshot`].

pub mod aggregator;
pub mod field;
pub mod probe;
pub mod probes;
pub mod registry;
pub mod snapshot;
pub mod types;
pub mod units;

pub use aggregator::{collect, Aggregator, AggregatorConfig, ExecutionMode, DEFAULT_PROBE_TIMEOUT};
pub use field::FieldKey;
pub use probe::{FnProbe, Probe};
pub use registry::ProbeRegistry;
pub use snapshot::{FieldReport, Snapshot};
pub use types::*;
