//! Trigger types for maintenance recurrence.
//!
//! A trigger decides when its program's work should next be generated.
//! Calendar triggers are driven by a cron expression evaluated in the
//! owning program's time zone; meter triggers are driven by external
//! usage data and carry no clock-based schedule.

use chrono::{DateTime, Duration, Utc};
use mainspring_core::{ProgramId, TriggerId};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// The kind of recurrence a trigger represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerType {
    /// Clock-driven trigger with a cron expression.
    #[default]
    Calendar,
    /// Usage-driven trigger advanced by external meter readings.
    Meter,
}

/// The recurrence definition belonging to a program.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trigger {
    /// Unique identifier for this trigger.
    pub id: TriggerId,
    /// The program this trigger belongs to.
    pub program_id: ProgramId,
    /// The kind of recurrence.
    pub trigger_type: TriggerType,
    /// Cron expression (calendar triggers only).
    pub cron_expression: Option<String>,
    /// Fixed interval in days, carried as configuration.
    pub interval_days: Option<u32>,
    /// Meter reading at which the trigger should fire.
    pub meter_threshold: Option<f64>,
    /// Type-specific extra parameters, opaque to the engine.
    pub settings: JsonValue,
    /// Earliest instant the trigger may fire.
    pub start_date: Option<DateTime<Utc>>,
    /// Latest instant the trigger may fire.
    pub end_date: Option<DateTime<Utc>>,
    /// When this trigger last fired.
    pub last_run_at: Option<DateTime<Utc>>,
    /// Computed next occurrence, or `None` when the trigger never fires
    /// on the clock (meter triggers, closed windows, no cron rule).
    pub next_run_at: Option<DateTime<Utc>>,
    /// Whether this trigger is currently active.
    pub is_active: bool,
    /// When this trigger was created.
    pub created_at: DateTime<Utc>,
    /// When this trigger was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Trigger {
    /// Creates a new active trigger with no schedule computed yet.
    #[must_use]
    pub fn new(program_id: ProgramId, trigger_type: TriggerType) -> Self {
        let now = Utc::now();
        Self {
            id: TriggerId::new(),
            program_id,
            trigger_type,
            cron_expression: None,
            interval_days: None,
            meter_threshold: None,
            settings: JsonValue::Null,
            start_date: None,
            end_date: None,
            last_run_at: None,
            next_run_at: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Sets the cron expression.
    #[must_use]
    pub fn with_cron(mut self, expression: impl Into<String>) -> Self {
        self.cron_expression = Some(expression.into());
        self
    }

    /// Whether this trigger's next occurrence lies strictly in the past.
    #[must_use]
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.next_run_at.is_some_and(|next| next < now)
    }

    /// Whether this trigger's next occurrence falls within `window` of
    /// `now`, inclusive on both ends.
    #[must_use]
    pub fn is_due_within(&self, now: DateTime<Utc>, window: Duration) -> bool {
        self.next_run_at.is_some_and(|next| {
            let diff = next - now;
            diff >= Duration::zero() && diff <= window
        })
    }

    /// Activates this trigger.
    pub fn activate(&mut self) {
        self.is_active = true;
        self.updated_at = Utc::now();
    }

    /// Deactivates this trigger without removing it.
    pub fn deactivate(&mut self) {
        self.is_active = false;
        self.updated_at = Utc::now();
    }
}
