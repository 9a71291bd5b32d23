//! Display-ready program serializations.
//!
//! Two trigger orderings are in use: the per-program detail endpoint
//! lists triggers newest first, while the overview embeds them soonest
//! first. Both are reproduced here; pick the constructor matching the
//! context.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use mainspring_core::{AssetId, ProgramId, TaskId, TriggerId, UserId};
use mainspring_program::{ProgramDetail, Task, Trigger, TriggerType};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Summary of a program's owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerView {
    /// The owning user's ID.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Contact email, when known.
    pub email: Option<String>,
}

/// One checklist task, display-ready.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskView {
    /// Task ID.
    pub id: TaskId,
    /// Short title.
    pub title: String,
    /// Longer instructions, when present.
    pub instructions: Option<String>,
    /// Execution order.
    pub position: u32,
    /// Estimated completion time in minutes.
    pub estimated_minutes: Option<u32>,
    /// Whether completion requires a sign-off.
    pub requires_sign_off: bool,
}

impl From<&Task> for TaskView {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id,
            title: task.title.clone(),
            instructions: task.instructions.clone(),
            position: task.position,
            estimated_minutes: task.estimated_minutes,
            requires_sign_off: task.requires_sign_off,
        }
    }
}

/// One trigger, display-ready.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggerView {
    /// Trigger ID.
    pub id: TriggerId,
    /// The kind of recurrence.
    pub trigger_type: TriggerType,
    /// Cron expression, when set.
    pub cron_expression: Option<String>,
    /// Fixed interval in days, when set.
    pub interval_days: Option<u32>,
    /// Meter threshold, when set.
    pub meter_threshold: Option<f64>,
    /// Type-specific extra parameters, passed through opaquely.
    pub settings: JsonValue,
    /// Window opening instant.
    pub start_date: Option<DateTime<Utc>>,
    /// Window closing instant.
    pub end_date: Option<DateTime<Utc>>,
    /// When the trigger last fired.
    pub last_run_at: Option<DateTime<Utc>>,
    /// Computed next occurrence.
    pub next_run_at: Option<DateTime<Utc>>,
    /// Whether the trigger is active.
    pub is_active: bool,
    /// When the trigger was created.
    pub created_at: DateTime<Utc>,
}

impl From<&Trigger> for TriggerView {
    fn from(trigger: &Trigger) -> Self {
        Self {
            id: trigger.id,
            trigger_type: trigger.trigger_type,
            cron_expression: trigger.cron_expression.clone(),
            interval_days: trigger.interval_days,
            meter_threshold: trigger.meter_threshold,
            settings: trigger.settings.clone(),
            start_date: trigger.start_date,
            end_date: trigger.end_date,
            last_run_at: trigger.last_run_at,
            next_run_at: trigger.next_run_at,
            is_active: trigger.is_active,
            created_at: trigger.created_at,
        }
    }
}

/// One program with its owner, ordered tasks, and ordered triggers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramView {
    /// Program ID.
    pub id: ProgramId,
    /// Display name.
    pub name: String,
    /// Longer description, when present.
    pub description: Option<String>,
    /// IANA time zone triggers are evaluated in.
    pub timezone: String,
    /// Whether the program is active.
    pub is_active: bool,
    /// The asset this program maintains, when targeted.
    pub asset_id: Option<AssetId>,
    /// Summary of the owning user.
    pub owner: OwnerView,
    /// When work orders were last generated.
    pub last_generated_at: Option<DateTime<Utc>>,
    /// Checklist tasks, by position ascending.
    pub tasks: Vec<TaskView>,
    /// Triggers, ordered per the constructor used.
    pub triggers: Vec<TriggerView>,
    /// When the program was created.
    pub created_at: DateTime<Utc>,
    /// When the program was last updated.
    pub updated_at: DateTime<Utc>,
}

impl ProgramView {
    /// Serializes a program for the per-program detail endpoint:
    /// triggers newest first.
    #[must_use]
    pub fn detail(detail: &ProgramDetail) -> Self {
        let mut view = Self::base(detail);
        view.triggers
            .sort_by(|a, b| b.created_at.cmp(&a.created_at));
        view
    }

    /// Serializes a program for embedding in the overview: triggers
    /// soonest first, with never-firing triggers last.
    #[must_use]
    pub fn overview(detail: &ProgramDetail) -> Self {
        let mut view = Self::base(detail);
        view.triggers
            .sort_by(|a, b| compare_next_run(a.next_run_at, b.next_run_at));
        view
    }

    fn base(detail: &ProgramDetail) -> Self {
        let mut tasks: Vec<TaskView> = detail.tasks.iter().map(TaskView::from).collect();
        tasks.sort_by_key(|task| task.position);

        Self {
            id: detail.program.id,
            name: detail.program.name.clone(),
            description: detail.program.description.clone(),
            timezone: detail.program.timezone.clone(),
            is_active: detail.program.is_active,
            asset_id: detail.program.asset_id,
            owner: OwnerView {
                id: detail.owner.id,
                name: detail.owner.name.clone(),
                email: detail.owner.email.clone(),
            },
            last_generated_at: detail.program.last_generated_at,
            tasks,
            triggers: detail.triggers.iter().map(TriggerView::from).collect(),
            created_at: detail.program.created_at,
            updated_at: detail.program.updated_at,
        }
    }
}

fn compare_next_run(a: Option<DateTime<Utc>>, b: Option<DateTime<Utc>>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
