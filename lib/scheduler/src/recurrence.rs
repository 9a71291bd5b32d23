//! Next-occurrence computation for triggers.
//!
//! [`compute_next_run`] is a pure function of its arguments: the caller
//! passes the reference instant ("now") explicitly, so identical inputs
//! always produce identical results and the function is safe to call
//! from any number of concurrent callers.

use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use chrono_tz::Tz;
use cron::Schedule;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use mainspring_program::{Trigger, TriggerType};

use crate::cron::normalize_cron;

/// Evaluates cron expressions against a time zone.
///
/// The default implementation uses the `cron` crate; any correct
/// implementation is substitutable through
/// [`compute_next_run_with`].
pub trait CronEvaluator: Send + Sync {
    /// Returns the earliest instant strictly after `after` matching
    /// `expression` interpreted in `timezone`, or `None` when the
    /// expression is unparseable or has no future match.
    fn next_match(
        &self,
        expression: &str,
        timezone: Tz,
        after: DateTime<Utc>,
    ) -> Option<DateTime<Utc>>;
}

/// Cron evaluation backed by the `cron` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardCronEvaluator;

impl CronEvaluator for StandardCronEvaluator {
    fn next_match(
        &self,
        expression: &str,
        timezone: Tz,
        after: DateTime<Utc>,
    ) -> Option<DateTime<Utc>> {
        let schedule = match Schedule::from_str(&normalize_cron(expression)) {
            Ok(schedule) => schedule,
            Err(e) => {
                warn!(cron = expression, error = %e, "invalid cron expression");
                return None;
            }
        };

        schedule
            .after(&after.with_timezone(&timezone))
            .next()
            .map(|next| next.with_timezone(&Utc))
    }
}

/// The scheduling-relevant slice of a trigger's configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecurrenceInput {
    /// The kind of recurrence.
    pub trigger_type: TriggerType,
    /// Cron expression (calendar triggers only).
    pub cron_expression: Option<String>,
    /// IANA time zone the expression is evaluated in; empty or unknown
    /// names fall back to UTC.
    pub timezone: String,
    /// Earliest instant the trigger may fire.
    pub start_date: Option<DateTime<Utc>>,
    /// Latest instant the trigger may fire.
    pub end_date: Option<DateTime<Utc>>,
}

impl RecurrenceInput {
    /// Builds the calculator input for a trigger evaluated in its owning
    /// program's time zone.
    #[must_use]
    pub fn for_trigger(trigger: &Trigger, program_timezone: &str) -> Self {
        Self {
            trigger_type: trigger.trigger_type,
            cron_expression: trigger.cron_expression.clone(),
            timezone: program_timezone.to_string(),
            start_date: trigger.start_date,
            end_date: trigger.end_date,
        }
    }
}

/// Computes a trigger's next occurrence using the standard evaluator.
///
/// Returns `None` when no future occurrence exists: meter triggers,
/// calendar triggers without a rule, unparseable expressions, or a
/// window that closes before the next match. A non-`None` result is
/// always strictly after `now` and within `[start_date, end_date]`.
#[must_use]
pub fn compute_next_run(input: &RecurrenceInput, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    compute_next_run_with(&StandardCronEvaluator, input, now)
}

/// Computes a trigger's next occurrence using the given evaluator.
#[must_use]
pub fn compute_next_run_with(
    evaluator: &dyn CronEvaluator,
    input: &RecurrenceInput,
    now: DateTime<Utc>,
) -> Option<DateTime<Utc>> {
    if input.trigger_type == TriggerType::Meter {
        // Meter occurrences are advanced by external usage ingestion,
        // not clock time.
        debug!("meter trigger has no clock-based schedule");
        return None;
    }

    let expression = input
        .cron_expression
        .as_deref()
        .map(str::trim)
        .filter(|expr| !expr.is_empty())?;

    if let (Some(start), Some(end)) = (input.start_date, input.end_date) {
        if start > end {
            return None;
        }
    }

    let timezone = resolve_timezone(&input.timezone);

    // The cron iterator is exclusive of its floor. When the window opens
    // in the future, back the floor off by a second so an occurrence
    // exactly at start_date still counts.
    let after = match input.start_date {
        Some(start) if start > now => start - Duration::seconds(1),
        _ => now,
    };

    let next = evaluator.next_match(expression, timezone, after)?;

    if input.end_date.is_some_and(|end| next > end) {
        return None;
    }

    Some(next)
}

/// Resolves an IANA zone name, falling back to UTC for empty or unknown
/// names.
fn resolve_timezone(timezone: &str) -> Tz {
    let trimmed = timezone.trim();
    if trimmed.is_empty() {
        return Tz::UTC;
    }
    match trimmed.parse::<Tz>() {
        Ok(tz) => tz,
        Err(_) => {
            warn!(timezone = trimmed, "unknown timezone, falling back to UTC");
            Tz::UTC
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    fn calendar_input(cron: &str, timezone: &str) -> RecurrenceInput {
        RecurrenceInput {
            trigger_type: TriggerType::Calendar,
            cron_expression: Some(cron.to_string()),
            timezone: timezone.to_string(),
            start_date: None,
            end_date: None,
        }
    }

    #[test]
    fn monday_morning_in_new_york() {
        // Wednesday Jan 10 2024, 12:00 UTC; next Monday 9am Eastern is
        // Jan 15 at 14:00 UTC (EST is UTC-5).
        let input = calendar_input("0 9 * * 1", "America/New_York");
        let now = utc(2024, 1, 10, 12, 0, 0);

        let next = compute_next_run(&input, now);
        assert_eq!(next, Some(utc(2024, 1, 15, 14, 0, 0)));
    }

    #[test]
    fn window_closing_before_next_match_yields_none() {
        let mut input = calendar_input("0 9 * * 1", "America/New_York");
        input.end_date = Some(utc(2024, 1, 12, 0, 0, 0));
        let now = utc(2024, 1, 10, 12, 0, 0);

        assert_eq!(compute_next_run(&input, now), None);
    }

    #[test]
    fn meter_triggers_never_schedule() {
        let input = RecurrenceInput {
            trigger_type: TriggerType::Meter,
            cron_expression: Some("0 9 * * 1".to_string()),
            timezone: "America/New_York".to_string(),
            start_date: None,
            end_date: Some(utc(2030, 1, 1, 0, 0, 0)),
        };

        assert_eq!(compute_next_run(&input, utc(2024, 1, 10, 12, 0, 0)), None);
    }

    #[test]
    fn calendar_without_rule_never_schedules() {
        let mut input = calendar_input("", "UTC");
        assert_eq!(compute_next_run(&input, Utc::now()), None);

        input.cron_expression = None;
        assert_eq!(compute_next_run(&input, Utc::now()), None);
    }

    #[test]
    fn unparseable_expression_yields_none() {
        let input = calendar_input("whenever feels right", "UTC");
        assert_eq!(compute_next_run(&input, Utc::now()), None);
    }

    #[test]
    fn result_is_strictly_after_now() {
        // 9:00 exactly; the 9:00 occurrence must not be returned for
        // itself.
        let input = calendar_input("0 9 * * *", "UTC");
        let now = utc(2024, 1, 10, 9, 0, 0);

        assert_eq!(compute_next_run(&input, now), Some(utc(2024, 1, 11, 9, 0, 0)));
    }

    #[test]
    fn future_start_date_floors_the_search() {
        let mut input = calendar_input("0 9 * * *", "UTC");
        input.start_date = Some(utc(2024, 2, 1, 0, 0, 0));
        let now = utc(2024, 1, 10, 12, 0, 0);

        assert_eq!(compute_next_run(&input, now), Some(utc(2024, 2, 1, 9, 0, 0)));
    }

    #[test]
    fn occurrence_exactly_at_future_start_counts() {
        let mut input = calendar_input("0 9 * * *", "UTC");
        input.start_date = Some(utc(2024, 2, 1, 9, 0, 0));
        let now = utc(2024, 1, 10, 12, 0, 0);

        assert_eq!(compute_next_run(&input, now), Some(utc(2024, 2, 1, 9, 0, 0)));
    }

    #[test]
    fn start_after_end_is_degenerate() {
        let mut input = calendar_input("0 9 * * *", "UTC");
        input.start_date = Some(utc(2024, 3, 1, 0, 0, 0));
        input.end_date = Some(utc(2024, 2, 1, 0, 0, 0));

        assert_eq!(compute_next_run(&input, utc(2024, 1, 1, 0, 0, 0)), None);
    }

    #[test]
    fn invalid_timezone_falls_back_to_utc() {
        let input = calendar_input("0 9 * * *", "Mars/Olympus_Mons");
        let now = utc(2024, 1, 10, 12, 0, 0);

        // 9:00 UTC the next day, not 9:00 in some other zone.
        assert_eq!(compute_next_run(&input, now), Some(utc(2024, 1, 11, 9, 0, 0)));
    }

    #[test]
    fn empty_timezone_falls_back_to_utc() {
        let input = calendar_input("30 6 * * *", "");
        let now = utc(2024, 5, 1, 12, 0, 0);

        assert_eq!(compute_next_run(&input, now), Some(utc(2024, 5, 2, 6, 30, 0)));
    }

    #[test]
    fn dst_spring_forward_shifts_utc_offset() {
        // New York springs forward on 2024-03-10. The 9am local
        // schedule is 14:00 UTC before the change and 13:00 UTC after.
        let input = calendar_input("0 9 * * *", "America/New_York");

        let before = compute_next_run(&input, utc(2024, 3, 8, 15, 0, 0));
        assert_eq!(before, Some(utc(2024, 3, 9, 14, 0, 0)));

        let after = compute_next_run(&input, utc(2024, 3, 9, 15, 0, 0));
        assert_eq!(after, Some(utc(2024, 3, 10, 13, 0, 0)));
    }

    #[test]
    fn identical_inputs_produce_identical_results() {
        let input = calendar_input("*/15 * * * *", "Europe/Berlin");
        let now = utc(2024, 7, 4, 3, 7, 11);

        assert_eq!(compute_next_run(&input, now), compute_next_run(&input, now));
    }

    #[test]
    fn substitute_evaluator_is_honored() {
        struct FixedEvaluator(DateTime<Utc>);

        impl CronEvaluator for FixedEvaluator {
            fn next_match(
                &self,
                _expression: &str,
                _timezone: Tz,
                _after: DateTime<Utc>,
            ) -> Option<DateTime<Utc>> {
                Some(self.0)
            }
        }

        let fixed = utc(2024, 6, 1, 0, 0, 0);
        let input = calendar_input("0 9 * * *", "UTC");

        let next =
            compute_next_run_with(&FixedEvaluator(fixed), &input, utc(2024, 1, 1, 0, 0, 0));
        assert_eq!(next, Some(fixed));
    }

    #[test]
    fn input_built_from_trigger_uses_program_timezone() {
        use mainspring_core::ProgramId;

        let trigger = Trigger::new(ProgramId::new(), TriggerType::Calendar).with_cron("0 7 * * *");
        let input = RecurrenceInput::for_trigger(&trigger, "Australia/Sydney");

        assert_eq!(input.timezone, "Australia/Sydney");
        assert_eq!(input.cron_expression.as_deref(), Some("0 7 * * *"));
        assert_eq!(input.trigger_type, TriggerType::Calendar);
    }
}
