//! Preventive-maintenance program domain model.
//!
//! This crate provides:
//!
//! - **Program**: A named maintenance definition owning tasks and triggers
//! - **Task**: One ordered checklist step within a program
//! - **Trigger**: The recurrence definition that decides when work is due
//! - **TriggerRun**: An immutable record of one firing attempt
//! - **Read models**: The snapshot aggregates handed to the overview layer

pub mod detail;
pub mod program;
pub mod run;
pub mod task;
pub mod trigger;

pub use detail::{ProgramDetail, ProgramOwner, RunWithProgram};
pub use program::Program;
pub use run::{TriggerRun, TriggerRunStatus};
pub use task::Task;
pub use trigger::{Trigger, TriggerType};
