// hostsnap library - public API

// Re-export error types
pub mod error;
pub use error::{HostsnapError, ProbeError, Result};

// Module declarations
pub mod commands;
pub mod core;
pub mod platform;
pub mod ui;

// Re-export commonly used types
pub use crate::core::config::Config;
pub use crate::core::telemetry::{
    collect, Aggregator, AggregatorConfig, ExecutionMode, FieldKey, FieldValue, Probe,
    ProbeOutcome, ProbeRegistry, Snapshot,
};

// Initialize logging
pub fn init_logging() {
    init_logging_with(log::LevelFilter::Warn);
}

/// Initialize logging with an explicit default level; `RUST_LOG` still wins.
pub fn init_logging_with(level: log::LevelFilter) {
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .try_init();
}
