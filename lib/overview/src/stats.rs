//! Overview statistics across a tenant's programs.

use chrono::{DateTime, Duration, Utc};
use mainspring_program::ProgramDetail;
use serde::{Deserialize, Serialize};

/// Width of the "upcoming" window, in days.
pub const UPCOMING_WINDOW_DAYS: i64 = 7;

/// Headline counts for the maintenance dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OverviewStats {
    /// Programs currently active.
    pub active_programs: usize,
    /// Triggers whose next occurrence is strictly in the past.
    pub overdue_triggers: usize,
    /// Triggers due within the next week, inclusive on both ends.
    pub upcoming_week: usize,
    /// Checklist tasks across all programs.
    pub total_tasks: usize,
}

/// Computes the headline counts from one snapshot.
///
/// Overdue and upcoming counts consider every trigger with a non-null
/// `next_run_at`, active or not; triggers that never fire on the clock
/// contribute to neither.
#[must_use]
pub fn compute_stats(details: &[ProgramDetail], now: DateTime<Utc>) -> OverviewStats {
    let window = Duration::days(UPCOMING_WINDOW_DAYS);
    let mut stats = OverviewStats::default();

    for detail in details {
        if detail.program.is_active {
            stats.active_programs += 1;
        }
        stats.total_tasks += detail.tasks.len();

        for trigger in &detail.triggers {
            if trigger.is_overdue(now) {
                stats.overdue_triggers += 1;
            }
            if trigger.is_due_within(now, window) {
                stats.upcoming_week += 1;
            }
        }
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use mainspring_core::{ProgramId, TenantId, UserId};
    use mainspring_program::{Program, ProgramOwner, Task, Trigger, TriggerType};

    fn detail_with(program: Program, tasks: Vec<Task>, triggers: Vec<Trigger>) -> ProgramDetail {
        ProgramDetail {
            owner: ProgramOwner {
                id: program.owner_id,
                name: "Riley Kim".to_string(),
                email: None,
            },
            tasks,
            triggers,
            program,
        }
    }

    fn trigger_due_at(program_id: ProgramId, next: Option<DateTime<Utc>>) -> Trigger {
        let mut trigger = Trigger::new(program_id, TriggerType::Calendar);
        trigger.next_run_at = next;
        trigger
    }

    #[test]
    fn active_program_count() {
        let tenant = TenantId::new();
        let owner = UserId::new();
        let details: Vec<ProgramDetail> = (0..5)
            .map(|i| {
                let mut program = Program::new(tenant, owner, format!("Program {i}"));
                if i >= 3 {
                    program.deactivate();
                }
                detail_with(program, Vec::new(), Vec::new())
            })
            .collect();

        let stats = compute_stats(&details, Utc::now());
        assert_eq!(stats.active_programs, 3);
    }

    #[test]
    fn overdue_boundary_is_strict() {
        let now = Utc::now();
        let program = Program::new(TenantId::new(), UserId::new(), "Pump check");
        let triggers = vec![
            trigger_due_at(program.id, Some(now - Duration::seconds(1))),
            trigger_due_at(program.id, Some(now + Duration::seconds(1))),
            trigger_due_at(program.id, None),
        ];
        let details = vec![detail_with(program, Vec::new(), triggers)];

        let stats = compute_stats(&details, now);
        assert_eq!(stats.overdue_triggers, 1);
    }

    #[test]
    fn upcoming_week_is_inclusive_on_both_ends() {
        let now = Utc::now();
        let program = Program::new(TenantId::new(), UserId::new(), "Lube route");
        let triggers = vec![
            trigger_due_at(program.id, Some(now)),
            trigger_due_at(program.id, Some(now + Duration::days(7))),
            trigger_due_at(program.id, Some(now + Duration::days(7) + Duration::seconds(1))),
            trigger_due_at(program.id, Some(now - Duration::seconds(1))),
        ];
        let details = vec![detail_with(program, Vec::new(), triggers)];

        let stats = compute_stats(&details, now);
        assert_eq!(stats.upcoming_week, 2);
    }

    #[test]
    fn task_totals_sum_across_programs() {
        let tenant = TenantId::new();
        let owner = UserId::new();

        let first = Program::new(tenant, owner, "First");
        let first_tasks: Vec<Task> = (0..4)
            .map(|i| Task::new(first.id, format!("Step {i}"), i))
            .collect();

        let second = Program::new(tenant, owner, "Second");
        let second_tasks: Vec<Task> = (0..6)
            .map(|i| Task::new(second.id, format!("Step {i}"), i))
            .collect();

        let details = vec![
            detail_with(first, first_tasks, Vec::new()),
            detail_with(second, second_tasks, Vec::new()),
        ];

        let stats = compute_stats(&details, Utc::now());
        assert_eq!(stats.total_tasks, 10);
    }

    #[test]
    fn never_firing_triggers_count_nowhere() {
        let now = Utc::now();
        let program = Program::new(TenantId::new(), UserId::new(), "Meter watch");
        let mut meter = Trigger::new(program.id, TriggerType::Meter);
        meter.meter_threshold = Some(10_000.0);
        let details = vec![detail_with(program, Vec::new(), vec![meter])];

        let stats = compute_stats(&details, now);
        assert_eq!(stats.overdue_triggers, 0);
        assert_eq!(stats.upcoming_week, 0);
    }
}
