//! Dashboard aggregation over a tenant's maintenance snapshot.
//!
//! This crate provides:
//!
//! - **Stats**: Active-program, overdue, upcoming-week, and task counts
//! - **Program views**: Display-ready program serializations with both
//!   trigger orderings the product uses
//! - **Upcoming events feed**: Flattened, sorted, capped next occurrences
//! - **Run history**: The recent audit trail of trigger firing attempts
//!
//! [`build_overview`] is a pure function over one consistent snapshot;
//! the stats, views, and feed all come from the same data the caller
//! passed in.

pub mod feed;
pub mod history;
pub mod overview;
pub mod program_view;
pub mod stats;

pub use feed::{upcoming_events, UpcomingEvent, MAX_UPCOMING_EVENTS};
pub use history::{run_history, RunHistoryEntry, RUN_HISTORY_LIMIT};
pub use overview::{build_overview, Overview};
pub use program_view::{OwnerView, ProgramView, TaskView, TriggerView};
pub use stats::{compute_stats, OverviewStats, UPCOMING_WINDOW_DAYS};
