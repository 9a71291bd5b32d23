//! Trigger scheduling engine for preventive-maintenance programs.
//!
//! This crate provides:
//!
//! - **Recurrence Calculator**: Pure next-occurrence computation from a
//!   trigger's recurrence rule, time zone, and window bounds
//! - **Trigger Lifecycle Manager**: Merge-then-recompute upserts that keep
//!   `next_run_at` consistent with a trigger's own configuration
//! - **Trigger Run Recorder**: Records firing outcomes and advances (or
//!   deliberately does not advance) the schedule
//! - **Storage contracts**: The read/write interfaces collaborators supply
//!
//! The engine performs no I/O and reads no clocks; callers inject the
//! reference instant into every computation.

pub mod cron;
pub mod error;
pub mod lifecycle;
pub mod recorder;
pub mod recurrence;
pub mod store;

pub use crate::cron::{validate_cron_expression, validate_timezone};
pub use error::{ScheduleError, StoreError};
pub use lifecycle::{upsert_trigger, TriggerPatch};
pub use recorder::{record_trigger_run, RecordedRun, RunOutcome};
pub use recurrence::{
    compute_next_run, compute_next_run_with, CronEvaluator, RecurrenceInput,
    StandardCronEvaluator,
};
pub use store::{ProgramReadModel, TriggerRunStore};
