//! Checklist tasks within a program.

use chrono::{DateTime, Utc};
use mainspring_core::{ProgramId, TaskId};
use serde::{Deserialize, Serialize};

/// One ordered checklist step belonging to a program.
///
/// Position defines execution order. It is unique-ish per program but not
/// strictly enforced; ties sort stably.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier for this task.
    pub id: TaskId,
    /// The program this task belongs to.
    pub program_id: ProgramId,
    /// Short title shown in the checklist.
    pub title: String,
    /// Optional longer instructions for the technician.
    pub instructions: Option<String>,
    /// Execution order within the program.
    pub position: u32,
    /// Estimated time to complete, in minutes.
    pub estimated_minutes: Option<u32>,
    /// Whether completion requires a sign-off.
    pub requires_sign_off: bool,
    /// When this task was created.
    pub created_at: DateTime<Utc>,
    /// When this task was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new task at the given position.
    #[must_use]
    pub fn new(program_id: ProgramId, title: impl Into<String>, position: u32) -> Self {
        let now = Utc::now();
        Self {
            id: TaskId::new(),
            program_id,
            title: title.into(),
            instructions: None,
            position,
            estimated_minutes: None,
            requires_sign_off: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Sets the instructions.
    #[must_use]
    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = Some(instructions.into());
        self
    }

    /// Sets the estimated completion time in minutes.
    #[must_use]
    pub fn with_estimated_minutes(mut self, minutes: u32) -> Self {
        self.estimated_minutes = Some(minutes);
        self
    }

    /// Requires a sign-off on completion.
    #[must_use]
    pub fn with_sign_off(mut self) -> Self {
        self.requires_sign_off = true;
        self
    }

    /// Default position for a task appended to an existing list: the
    /// current task count.
    #[must_use]
    pub fn next_position(existing: &[Task]) -> u32 {
        existing.len() as u32
    }
}

/// Sorts tasks by position ascending.
pub fn sort_by_position(tasks: &mut [Task]) {
    tasks.sort_by_key(|task| task.position);
}
