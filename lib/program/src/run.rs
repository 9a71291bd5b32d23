//! Immutable records of trigger firing attempts.

use chrono::{DateTime, Utc};
use mainspring_core::{TriggerId, TriggerRunId, WorkOrderId};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Terminal outcome of one firing attempt.
///
/// An attempt is implicitly pending while the executor works; only the
/// terminal outcome is ever persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerRunStatus {
    /// The attempt produced a work order.
    Success,
    /// The attempt was deliberately skipped.
    Skipped,
    /// The attempt failed; the occurrence remains due.
    Failed,
}

impl TriggerRunStatus {
    /// Whether this outcome advances the trigger's schedule.
    ///
    /// A skip is a deliberate no-op, not a failure to reschedule, so it
    /// advances exactly like a success.
    #[must_use]
    pub fn advances_schedule(&self) -> bool {
        matches!(self, Self::Success | Self::Skipped)
    }
}

/// An immutable record of one firing attempt of a trigger.
///
/// Created once by the execution job and never mutated afterward; used
/// only for display and audit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggerRun {
    /// Unique identifier for this run.
    pub id: TriggerRunId,
    /// The trigger that was attempted.
    pub trigger_id: TriggerId,
    /// Terminal outcome of the attempt.
    pub status: TriggerRunStatus,
    /// When the attempt happened.
    pub run_at: DateTime<Utc>,
    /// The `next_run_at` value that made this attempt due.
    pub scheduled_for: Option<DateTime<Utc>>,
    /// The work order created by a successful attempt.
    pub work_order_id: Option<WorkOrderId>,
    /// Error message from a failed attempt.
    pub error: Option<String>,
    /// Outcome-specific extra data, opaque to the engine.
    pub details: JsonValue,
    /// When this record was created.
    pub created_at: DateTime<Utc>,
    /// When this record was last updated.
    pub updated_at: DateTime<Utc>,
}

impl TriggerRun {
    fn new(
        trigger_id: TriggerId,
        status: TriggerRunStatus,
        run_at: DateTime<Utc>,
        scheduled_for: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id: TriggerRunId::new(),
            trigger_id,
            status,
            run_at,
            scheduled_for,
            work_order_id: None,
            error: None,
            details: JsonValue::Null,
            created_at: run_at,
            updated_at: run_at,
        }
    }

    /// Records a successful attempt that produced a work order.
    #[must_use]
    pub fn success(
        trigger_id: TriggerId,
        run_at: DateTime<Utc>,
        scheduled_for: Option<DateTime<Utc>>,
        work_order_id: WorkOrderId,
    ) -> Self {
        let mut run = Self::new(trigger_id, TriggerRunStatus::Success, run_at, scheduled_for);
        run.work_order_id = Some(work_order_id);
        run
    }

    /// Records a deliberately skipped attempt, with the reason in `details`.
    #[must_use]
    pub fn skipped(
        trigger_id: TriggerId,
        run_at: DateTime<Utc>,
        scheduled_for: Option<DateTime<Utc>>,
        details: JsonValue,
    ) -> Self {
        let mut run = Self::new(trigger_id, TriggerRunStatus::Skipped, run_at, scheduled_for);
        run.details = details;
        run
    }

    /// Records a failed attempt.
    #[must_use]
    pub fn failed(
        trigger_id: TriggerId,
        run_at: DateTime<Utc>,
        scheduled_for: Option<DateTime<Utc>>,
        error: impl Into<String>,
    ) -> Self {
        let mut run = Self::new(trigger_id, TriggerRunStatus::Failed, run_at, scheduled_for);
        run.error = Some(error.into());
        run
    }
}
