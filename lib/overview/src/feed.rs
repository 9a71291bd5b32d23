//! The upcoming-events feed.
//!
//! Active triggers with a computed next occurrence, flattened across
//! every program in the snapshot into denormalized entries the
//! dashboard can render without further lookups.

use chrono::{DateTime, Utc};
use mainspring_core::{ProgramId, TriggerId};
use mainspring_program::ProgramDetail;
use serde::{Deserialize, Serialize};

/// Maximum number of feed entries returned.
pub const MAX_UPCOMING_EVENTS: usize = 50;

/// One upcoming occurrence of a trigger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpcomingEvent {
    /// Composite identifier, `"<trigger_id>:<program_id>"`.
    pub id: String,
    /// The program whose trigger is due.
    pub program_id: ProgramId,
    /// Display name of the program.
    pub program_name: String,
    /// The trigger that is due.
    pub trigger_id: TriggerId,
    /// When the occurrence is scheduled.
    pub scheduled_for: DateTime<Utc>,
    /// Whether the occurrence is already past due.
    pub overdue: bool,
}

/// Flattens all active triggers with a next occurrence into a feed,
/// soonest first, capped at [`MAX_UPCOMING_EVENTS`] entries.
#[must_use]
pub fn upcoming_events(details: &[ProgramDetail], now: DateTime<Utc>) -> Vec<UpcomingEvent> {
    let mut events: Vec<UpcomingEvent> = details
        .iter()
        .flat_map(|detail| {
            detail
                .triggers
                .iter()
                .filter(|trigger| trigger.is_active)
                .filter_map(|trigger| {
                    trigger.next_run_at.map(|scheduled_for| UpcomingEvent {
                        id: format!("{}:{}", trigger.id, detail.program.id),
                        program_id: detail.program.id,
                        program_name: detail.program.name.clone(),
                        trigger_id: trigger.id,
                        scheduled_for,
                        overdue: scheduled_for < now,
                    })
                })
        })
        .collect();

    events.sort_by_key(|event| event.scheduled_for);
    events.truncate(MAX_UPCOMING_EVENTS);
    events
}
