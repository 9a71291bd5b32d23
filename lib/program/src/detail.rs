//! Read-model aggregates consumed by the overview layer.
//!
//! These are plain data snapshots assembled by the caller's persistence
//! layer. The engine never queries storage itself; it aggregates over
//! whatever consistent snapshot it is handed.

use crate::program::Program;
use crate::run::TriggerRun;
use crate::task::Task;
use crate::trigger::Trigger;
use mainspring_core::UserId;
use serde::{Deserialize, Serialize};

/// Summary of the user who owns a program.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramOwner {
    /// The owning user's ID.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Contact email, when known.
    pub email: Option<String>,
}

/// One program with everything the aggregator needs: its owner summary,
/// tasks, and triggers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramDetail {
    /// The program itself.
    pub program: Program,
    /// Summary of the owning user.
    pub owner: ProgramOwner,
    /// The program's checklist tasks, in storage order.
    pub tasks: Vec<Task>,
    /// The program's triggers, in storage order.
    pub triggers: Vec<Trigger>,
}

/// A trigger run joined with its trigger's program name for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunWithProgram {
    /// The run record.
    pub run: TriggerRun,
    /// Name of the program whose trigger fired.
    pub program_name: String,
}
