//! Trigger lifecycle management.
//!
//! Every create or edit of a trigger's scheduling-relevant fields goes
//! through [`upsert_trigger`], which merges the patch over the existing
//! record and recomputes `next_run_at` from the merged configuration in
//! the same call. No caller ever observes a trigger whose `next_run_at`
//! was computed under a previous configuration.
//!
//! A change to the owning program's time zone is the same operation with
//! an empty patch and the new zone.

use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;

use mainspring_core::ProgramId;
use mainspring_program::{Trigger, TriggerType};

use crate::error::ScheduleError;
use crate::recurrence::{compute_next_run, RecurrenceInput};

/// A partial update to a trigger's configuration.
///
/// Outer `None` keeps the existing value; for nullable fields,
/// `Some(None)` clears it. Fields absent on both the patch and the
/// existing record take creation defaults: active, calendar type, null
/// settings.
#[derive(Debug, Clone, Default)]
pub struct TriggerPatch {
    /// New recurrence kind.
    pub trigger_type: Option<TriggerType>,
    /// New cron expression, or `Some(None)` to clear it.
    pub cron_expression: Option<Option<String>>,
    /// New fixed interval in days, or `Some(None)` to clear it.
    pub interval_days: Option<Option<u32>>,
    /// New meter threshold, or `Some(None)` to clear it.
    pub meter_threshold: Option<Option<f64>>,
    /// Replacement settings blob.
    pub settings: Option<JsonValue>,
    /// New window opening instant, or `Some(None)` to clear it.
    pub start_date: Option<Option<DateTime<Utc>>>,
    /// New window closing instant, or `Some(None)` to clear it.
    pub end_date: Option<Option<DateTime<Utc>>>,
    /// New active flag.
    pub is_active: Option<bool>,
}

impl TriggerPatch {
    /// Sets the recurrence kind.
    #[must_use]
    pub fn trigger_type(mut self, trigger_type: TriggerType) -> Self {
        self.trigger_type = Some(trigger_type);
        self
    }

    /// Sets the cron expression.
    #[must_use]
    pub fn cron_expression(mut self, expression: impl Into<String>) -> Self {
        self.cron_expression = Some(Some(expression.into()));
        self
    }

    /// Clears the cron expression.
    #[must_use]
    pub fn clear_cron_expression(mut self) -> Self {
        self.cron_expression = Some(None);
        self
    }

    /// Sets the fixed interval in days.
    #[must_use]
    pub fn interval_days(mut self, days: u32) -> Self {
        self.interval_days = Some(Some(days));
        self
    }

    /// Sets the meter threshold.
    #[must_use]
    pub fn meter_threshold(mut self, threshold: f64) -> Self {
        self.meter_threshold = Some(Some(threshold));
        self
    }

    /// Replaces the settings blob.
    #[must_use]
    pub fn settings(mut self, settings: JsonValue) -> Self {
        self.settings = Some(settings);
        self
    }

    /// Sets the window opening instant.
    #[must_use]
    pub fn start_date(mut self, start: DateTime<Utc>) -> Self {
        self.start_date = Some(Some(start));
        self
    }

    /// Sets the window closing instant.
    #[must_use]
    pub fn end_date(mut self, end: DateTime<Utc>) -> Self {
        self.end_date = Some(Some(end));
        self
    }

    /// Clears the window opening instant.
    #[must_use]
    pub fn clear_start_date(mut self) -> Self {
        self.start_date = Some(None);
        self
    }

    /// Clears the window closing instant.
    #[must_use]
    pub fn clear_end_date(mut self) -> Self {
        self.end_date = Some(None);
        self
    }

    /// Sets the active flag.
    #[must_use]
    pub fn is_active(mut self, active: bool) -> Self {
        self.is_active = Some(active);
        self
    }

    /// Sets the window opening instant from a raw RFC 3339 string.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::InvalidTimestamp`] if the value does not
    /// parse.
    pub fn start_date_str(self, raw: &str) -> Result<Self, ScheduleError> {
        Ok(self.start_date(parse_timestamp("start_date", raw)?))
    }

    /// Sets the window closing instant from a raw RFC 3339 string.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::InvalidTimestamp`] if the value does not
    /// parse.
    pub fn end_date_str(self, raw: &str) -> Result<Self, ScheduleError> {
        Ok(self.end_date(parse_timestamp("end_date", raw)?))
    }
}

fn parse_timestamp(field: &'static str, raw: &str) -> Result<DateTime<Utc>, ScheduleError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| ScheduleError::InvalidTimestamp {
            field,
            value: raw.to_string(),
        })
}

/// Applies a patch to a trigger (or creates one) and recomputes
/// `next_run_at` from the merged configuration.
///
/// `program_id` is used only on creation; `program_timezone` is the
/// owning program's IANA zone. `now` is the reference instant for the
/// recomputation and for the touched timestamps. Referential integrity
/// (program and asset existence) is the caller's responsibility.
#[must_use]
pub fn upsert_trigger(
    existing: Option<&Trigger>,
    patch: TriggerPatch,
    program_id: ProgramId,
    program_timezone: &str,
    now: DateTime<Utc>,
) -> Trigger {
    let mut trigger = match existing {
        Some(current) => current.clone(),
        None => {
            let mut created =
                Trigger::new(program_id, patch.trigger_type.unwrap_or_default());
            created.created_at = now;
            created
        }
    };

    if let Some(trigger_type) = patch.trigger_type {
        trigger.trigger_type = trigger_type;
    }
    if let Some(cron_expression) = patch.cron_expression {
        trigger.cron_expression = cron_expression;
    }
    if let Some(interval_days) = patch.interval_days {
        trigger.interval_days = interval_days;
    }
    if let Some(meter_threshold) = patch.meter_threshold {
        trigger.meter_threshold = meter_threshold;
    }
    if let Some(settings) = patch.settings {
        trigger.settings = settings;
    }
    if let Some(start_date) = patch.start_date {
        trigger.start_date = start_date;
    }
    if let Some(end_date) = patch.end_date {
        trigger.end_date = end_date;
    }
    if let Some(is_active) = patch.is_active {
        trigger.is_active = is_active;
    }

    trigger.next_run_at =
        compute_next_run(&RecurrenceInput::for_trigger(&trigger, program_timezone), now);
    trigger.updated_at = now;

    trigger
}
