//! Execution-audit collaborator contract.
//!
//! The core supplies the record content; the transport (file, remote log
//! store) belongs to the collaborator implementing [`AuditSink`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Application name reported in audit records.
pub const APPLICATION_NAME: &str = "fatex";

/// Outcome of a pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditStatus {
    Success,
    Failure,
}

/// One execution-audit record, emitted after a successful or failed run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditRecord {
    /// Application name.
    pub application: String,

    /// Source reference, typically the input filename.
    pub source: String,

    /// Input parameter summary (e.g. grouping on/off).
    pub parameter: String,

    /// Run outcome.
    pub status: AuditStatus,

    /// Human-readable result or error message.
    pub message: String,

    /// Record creation time.
    pub timestamp: DateTime<Utc>,
}

impl AuditRecord {
    fn new(source: &str, parameter: &str, status: AuditStatus, message: String) -> Self {
        Self {
            application: APPLICATION_NAME.to_string(),
            source: source.to_string(),
            parameter: parameter.to_string(),
            status,
            message,
            timestamp: Utc::now(),
        }
    }

    /// Record for a completed run.
    pub fn success(source: &str, parameter: &str, message: String) -> Self {
        Self::new(source, parameter, AuditStatus::Success, message)
    }

    /// Record for a failed run.
    pub fn failure(source: &str, parameter: &str, message: String) -> Self {
        Self::new(source, parameter, AuditStatus::Failure, message)
    }
}

/// Receives audit records. Implementations own the transport and must be
/// serialized by the caller when shared between workers.
pub trait AuditSink {
    fn record(&mut self, record: &AuditRecord) -> std::io::Result<()>;
}
