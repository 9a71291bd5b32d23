//! The assembled dashboard payload.

use chrono::{DateTime, Utc};
use mainspring_program::{ProgramDetail, RunWithProgram};
use serde::{Deserialize, Serialize};

use crate::feed::{upcoming_events, UpcomingEvent};
use crate::history::{run_history, RunHistoryEntry};
use crate::program_view::ProgramView;
use crate::stats::{compute_stats, OverviewStats};

/// Everything the maintenance dashboard renders in one payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Overview {
    /// Headline counts.
    pub stats: OverviewStats,
    /// Serialized programs, triggers soonest first.
    pub programs: Vec<ProgramView>,
    /// Flattened next occurrences, soonest first, capped.
    pub upcoming_events: Vec<UpcomingEvent>,
    /// Recent firing attempts, newest first, capped.
    pub runs: Vec<RunHistoryEntry>,
}

/// Builds the dashboard payload from one consistent snapshot.
///
/// Pure over its arguments: the stats, program views, and feed are all
/// derived from the same `details` slice, so no count can disagree with
/// the listing it summarizes.
#[must_use]
pub fn build_overview(
    details: &[ProgramDetail],
    recent_runs: &[RunWithProgram],
    now: DateTime<Utc>,
) -> Overview {
    Overview {
        stats: compute_stats(details, now),
        programs: details.iter().map(ProgramView::overview).collect(),
        upcoming_events: upcoming_events(details, now),
        runs: run_history(recent_runs),
    }
}
