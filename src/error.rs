use serde::{Deserialize, Serialize};
use std::io;
use std::time::Duration;
use thiserror::Error;

use crate::core::telemetry::FieldKey;

/// Custom error type for hostsnap
///
/// These are configuration and runtime errors of the aggregator itself.
/// Failures of individual probes never surface here; they are recorded
/// in the snapshot as [`ProbeError`].
#[derive(Error, Debug)]
pub enum HostsnapError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Probe registry is empty")]
    EmptyRegistry,

    #[error("Field '{0}' is registered more than once")]
    DuplicateField(FieldKey),

    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Runtime error: {0}")]
    Runtime(String),

    #[error("Collection cancelled")]
    Cancelled,
}

/// Result type alias for hostsnap
pub type Result<T> = std::result::Result<T, HostsnapError>;

impl HostsnapError {
    /// Create a config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        HostsnapError::Config(msg.into())
    }

    /// Create an unknown field error
    pub fn unknown_field<S: Into<String>>(name: S) -> Self {
        HostsnapError::UnknownField(name.into())
    }

    /// Create a runtime error
    pub fn runtime<S: Into<String>>(msg: S) -> Self {
        HostsnapError::Runtime(msg.into())
    }
}

/// Why an attempted probe query broke.
///
/// Stored inside snapshots, so it owns only strings and durations.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum ProbeError {
    #[error("timed out after {0:?}")]
    Timeout(Duration),

    #[error("permission denied: {0}")]
    PermissionDenied(String),

    #[error("malformed system response: {0}")]
    Malformed(String),

    #[error("IO error: {0}")]
    Io(String),

    #[error("query failed: {0}")]
    Query(String),

    #[error("probe panicked: {0}")]
    Panicked(String),
}

impl ProbeError {
    pub fn malformed<S: Into<String>>(msg: S) -> Self {
        ProbeError::Malformed(msg.into())
    }

    pub fn query<S: Into<String>>(msg: S) -> Self {
        ProbeError::Query(msg.into())
    }

    pub fn permission_denied<S: Into<String>>(msg: S) -> Self {
        ProbeError::PermissionDenied(msg.into())
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, ProbeError::Timeout(_))
    }
}

impl From<io::Error> for ProbeError {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::PermissionDenied => ProbeError::PermissionDenied(err.to_string()),
            io::ErrorKind::InvalidData => ProbeError::Malformed(err.to_string()),
            _ => ProbeError::Io(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for ProbeError {
    fn from(err: serde_json::Error) -> Self {
        ProbeError::Malformed(err.to_string())
    }
}
