//! Error types for the scheduler crate.
//!
//! Both enums are surfaced synchronously to the immediate caller:
//! - `ScheduleError`: Validation failures from scheduling operations
//! - `StoreError`: Errors from storage contract implementations
//!
//! A trigger for which no next occurrence exists is not an error; the
//! calculator reports that as a `None` result.

use mainspring_core::{ProgramId, TriggerId};
use std::fmt;

/// Validation failures from scheduling operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    /// Cron expression could not be parsed.
    InvalidCronExpression { expression: String, reason: String },
    /// A raw timestamp value could not be parsed.
    InvalidTimestamp { field: &'static str, value: String },
    /// Time zone name is not a known IANA zone.
    InvalidTimezone { timezone: String },
}

impl fmt::Display for ScheduleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCronExpression { expression, reason } => {
                write!(f, "invalid cron expression '{expression}': {reason}")
            }
            Self::InvalidTimestamp { field, value } => {
                write!(f, "invalid timestamp for {field}: '{value}'")
            }
            Self::InvalidTimezone { timezone } => {
                write!(f, "invalid timezone: {timezone}")
            }
        }
    }
}

impl std::error::Error for ScheduleError {}

/// Errors from storage contract implementations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Program not found.
    ProgramNotFound { id: ProgramId },
    /// Trigger not found.
    TriggerNotFound { id: TriggerId },
    /// Storage operation failed.
    StorageFailed { reason: String },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ProgramNotFound { id } => write!(f, "program not found: {id}"),
            Self::TriggerNotFound { id } => write!(f, "trigger not found: {id}"),
            Self::StorageFailed { reason } => write!(f, "storage operation failed: {reason}"),
        }
    }
}

impl std::error::Error for StoreError {}
