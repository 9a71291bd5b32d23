//! The recent trigger-run audit trail.

use chrono::{DateTime, Utc};
use mainspring_core::{TriggerId, TriggerRunId, WorkOrderId};
use mainspring_program::{RunWithProgram, TriggerRunStatus};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Maximum number of history entries returned.
pub const RUN_HISTORY_LIMIT: usize = 20;

/// One firing attempt, display-ready.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunHistoryEntry {
    /// Run ID.
    pub id: TriggerRunId,
    /// The trigger that was attempted.
    pub trigger_id: TriggerId,
    /// Name of the program whose trigger fired.
    pub program_name: String,
    /// Terminal outcome.
    pub status: TriggerRunStatus,
    /// When the attempt happened.
    pub run_at: DateTime<Utc>,
    /// The occurrence that was being attempted.
    pub scheduled_for: Option<DateTime<Utc>>,
    /// The work order created, when the attempt succeeded.
    pub work_order_id: Option<WorkOrderId>,
    /// Error message, when the attempt failed.
    pub error: Option<String>,
    /// Outcome-specific extra data.
    pub details: JsonValue,
}

impl From<&RunWithProgram> for RunHistoryEntry {
    fn from(joined: &RunWithProgram) -> Self {
        Self {
            id: joined.run.id,
            trigger_id: joined.run.trigger_id,
            program_name: joined.program_name.clone(),
            status: joined.run.status,
            run_at: joined.run.run_at,
            scheduled_for: joined.run.scheduled_for,
            work_order_id: joined.run.work_order_id,
            error: joined.run.error.clone(),
            details: joined.run.details.clone(),
        }
    }
}

/// Folds recent runs into a display-ready audit trail, newest first,
/// capped at [`RUN_HISTORY_LIMIT`] entries.
#[must_use]
pub fn run_history(runs: &[RunWithProgram]) -> Vec<RunHistoryEntry> {
    let mut entries: Vec<RunHistoryEntry> = runs.iter().map(RunHistoryEntry::from).collect();
    entries.sort_by(|a, b| b.run_at.cmp(&a.run_at));
    entries.truncate(RUN_HISTORY_LIMIT);
    entries
}
