//! Recording trigger firing outcomes.
//!
//! One firing attempt moves from an implicit pending state to exactly
//! one terminal outcome. Success and skip advance the schedule from the
//! attempt time; failure leaves `next_run_at` untouched so the same
//! occurrence stays due and is retried on the next scheduler pass.
//! The recorder never runs maintenance work itself and persists nothing;
//! callers write the returned pair through the storage contracts as one
//! logical unit.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use mainspring_core::WorkOrderId;
use mainspring_program::{Trigger, TriggerRun, TriggerRunStatus};

use crate::recurrence::{compute_next_run, RecurrenceInput};

/// The terminal outcome of one firing attempt, as reported by the
/// external executor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RunOutcome {
    /// The attempt produced a work order.
    Success {
        /// The `next_run_at` value that made this attempt due.
        scheduled_for: Option<DateTime<Utc>>,
        /// The work order that was created.
        work_order_id: WorkOrderId,
    },
    /// The attempt was deliberately skipped.
    Skipped {
        /// The `next_run_at` value that made this attempt due.
        scheduled_for: Option<DateTime<Utc>>,
        /// The reason for the skip and any extra context.
        details: JsonValue,
    },
    /// The attempt failed.
    Failed {
        /// The `next_run_at` value that made this attempt due.
        scheduled_for: Option<DateTime<Utc>>,
        /// What went wrong.
        error: String,
    },
}

impl RunOutcome {
    /// The run status this outcome maps to.
    #[must_use]
    pub fn status(&self) -> TriggerRunStatus {
        match self {
            Self::Success { .. } => TriggerRunStatus::Success,
            Self::Skipped { .. } => TriggerRunStatus::Skipped,
            Self::Failed { .. } => TriggerRunStatus::Failed,
        }
    }
}

/// The result of recording one firing attempt: the run record to insert
/// and the trigger with its scheduling fields brought forward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedRun {
    /// The trigger after the outcome was applied.
    pub trigger: Trigger,
    /// The immutable record of the attempt.
    pub run: TriggerRun,
}

/// Records the outcome of one firing attempt of `trigger`.
///
/// On success or skip the returned trigger has `last_run_at` set to
/// `attempted_at` and `next_run_at` recomputed with `attempted_at` as
/// the reference instant, advancing to the following occurrence. On
/// failure the returned trigger is unchanged, so the missed occurrence
/// is not silently dropped.
#[must_use]
pub fn record_trigger_run(
    trigger: &Trigger,
    outcome: RunOutcome,
    program_timezone: &str,
    attempted_at: DateTime<Utc>,
) -> RecordedRun {
    let run = match outcome {
        RunOutcome::Success {
            scheduled_for,
            work_order_id,
        } => TriggerRun::success(trigger.id, attempted_at, scheduled_for, work_order_id),
        RunOutcome::Skipped {
            scheduled_for,
            details,
        } => TriggerRun::skipped(trigger.id, attempted_at, scheduled_for, details),
        RunOutcome::Failed {
            scheduled_for,
            error,
        } => TriggerRun::failed(trigger.id, attempted_at, scheduled_for, error),
    };

    let mut updated = trigger.clone();
    if run.status.advances_schedule() {
        updated.last_run_at = Some(attempted_at);
        updated.next_run_at = compute_next_run(
            &RecurrenceInput::for_trigger(&updated, program_timezone),
            attempted_at,
        );
        updated.updated_at = attempted_at;
    }

    RecordedRun {
        trigger: updated,
        run,
    }
}
