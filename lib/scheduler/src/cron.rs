//! Cron expression normalization and validation helpers.
//!
//! User-facing triggers use standard 5-field cron:
//! `minute hour day-of-month month day-of-week`, with Unix day-of-week
//! numbering (0 or 7 = Sunday). The `cron` crate wants a 6-field form
//! with a leading seconds field and 1-indexed days of week (1 = Sunday),
//! so both the field count and the day-of-week numbering are rewritten
//! before parsing. Expressions already in 6- or 7-field form pass
//! through untouched.

use std::str::FromStr;

use chrono_tz::Tz;
use cron::Schedule;

use crate::error::ScheduleError;

/// Normalize a 5-field cron expression into the 6-field form the `cron`
/// crate parses, remapping the day-of-week field from Unix numbering.
pub(crate) fn normalize_cron(expression: &str) -> String {
    let trimmed = expression.trim();
    let fields: Vec<&str> = trimmed.split_whitespace().collect();
    if fields.len() == 5 {
        format!(
            "0 {} {} {} {} {}",
            fields[0],
            fields[1],
            fields[2],
            fields[3],
            remap_day_of_week(fields[4]),
        )
    } else {
        trimmed.to_string()
    }
}

/// Rewrite a Unix day-of-week field (0-7, 0 and 7 both Sunday) into the
/// `cron` crate's 1-indexed numbering (1 = Sunday .. 7 = Saturday).
///
/// Handles lists, ranges, and step suffixes. Named days and wildcards
/// pass through unchanged.
fn remap_day_of_week(field: &str) -> String {
    field
        .split(',')
        .map(remap_dow_part)
        .collect::<Vec<_>>()
        .join(",")
}

fn remap_dow_part(part: &str) -> String {
    let (base, step) = match part.split_once('/') {
        Some((base, step)) => (base, Some(step)),
        None => (part, None),
    };

    let mapped_base = base
        .split('-')
        .map(remap_dow_token)
        .collect::<Vec<_>>()
        .join("-");

    match step {
        Some(step) => format!("{mapped_base}/{step}"),
        None => mapped_base,
    }
}

fn remap_dow_token(token: &str) -> String {
    // Names (MON..SUN) and wildcards are shared between the two
    // numbering schemes; only bare numbers shift.
    match token.parse::<u32>() {
        Ok(n) => ((n % 7) + 1).to_string(),
        Err(_) => token.to_string(),
    }
}

/// Validates a cron expression, for surfacing at trigger-creation time.
///
/// The calculator itself never errors on a bad expression (it reports
/// "no next occurrence"); route handlers call this to reject the value
/// up front instead.
///
/// # Errors
///
/// Returns [`ScheduleError::InvalidCronExpression`] if the expression
/// does not parse after normalization.
pub fn validate_cron_expression(expression: &str) -> Result<(), ScheduleError> {
    Schedule::from_str(&normalize_cron(expression))
        .map(|_| ())
        .map_err(|e| ScheduleError::InvalidCronExpression {
            expression: expression.to_string(),
            reason: e.to_string(),
        })
}

/// Validates an IANA time zone name, for surfacing at creation time.
///
/// The calculator falls back to UTC for empty or unknown zones; this
/// lets callers reject the value up front instead.
///
/// # Errors
///
/// Returns [`ScheduleError::InvalidTimezone`] if the name is not a known
/// IANA zone.
pub fn validate_timezone(timezone: &str) -> Result<(), ScheduleError> {
    timezone
        .parse::<Tz>()
        .map(|_| ())
        .map_err(|_| ScheduleError::InvalidTimezone {
            timezone: timezone.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn five_field_gets_seconds_prepended() {
        assert_eq!(normalize_cron("0 9 * * *"), "0 0 9 * * *");
        assert_eq!(normalize_cron("  30 6 1 * *  "), "0 30 6 1 * *");
    }

    #[test]
    fn six_field_passes_through() {
        assert_eq!(normalize_cron("0 0 9 * * 2"), "0 0 9 * * 2");
    }

    #[test]
    fn day_of_week_numbers_shift_to_sunday_first() {
        // Unix Monday (1) becomes 2; Sunday (0 or 7) becomes 1.
        assert_eq!(normalize_cron("0 9 * * 1"), "0 0 9 * * 2");
        assert_eq!(normalize_cron("0 9 * * 0"), "0 0 9 * * 1");
        assert_eq!(normalize_cron("0 9 * * 7"), "0 0 9 * * 1");
    }

    #[test]
    fn day_of_week_ranges_lists_and_steps() {
        assert_eq!(normalize_cron("0 9 * * 1-5"), "0 0 9 * * 2-6");
        assert_eq!(normalize_cron("0 9 * * 0,3,6"), "0 0 9 * * 1,4,7");
        assert_eq!(normalize_cron("0 9 * * */2"), "0 0 9 * * */2");
        assert_eq!(normalize_cron("0 9 * * 1-5/2"), "0 0 9 * * 2-6/2");
    }

    #[test]
    fn named_days_and_wildcards_untouched() {
        assert_eq!(normalize_cron("0 9 * * MON-FRI"), "0 0 9 * * MON-FRI");
        assert_eq!(normalize_cron("15 7 * * *"), "0 15 7 * * *");
    }

    #[test]
    fn validate_accepts_standard_expressions() {
        assert!(validate_cron_expression("0 9 * * 1").is_ok());
        assert!(validate_cron_expression("*/15 * * * *").is_ok());
        assert!(validate_cron_expression("0 0 9 * * Mon").is_ok());
    }

    #[test]
    fn validate_rejects_garbage() {
        let err = validate_cron_expression("every monday at nine").unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidCronExpression { .. }));
    }

    #[test]
    fn validate_timezone_accepts_iana_names() {
        assert!(validate_timezone("America/New_York").is_ok());
        assert!(validate_timezone("UTC").is_ok());
    }

    #[test]
    fn validate_timezone_rejects_unknown_names() {
        let err = validate_timezone("Mars/Olympus_Mons").unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidTimezone { .. }));
    }
}
