//! Storage contracts the engine consumes from its collaborators.
//!
//! The engine never performs I/O itself: route handlers and the
//! execution job fetch snapshots and persist results through these
//! traits. Any storage engine may implement them; the engine assumes
//! the references it is handed are valid and leaves missing-record
//! detection to the implementations.

use async_trait::async_trait;

use mainspring_core::{ProgramId, TenantId};
use mainspring_program::{ProgramDetail, RunWithProgram, TriggerRun};

use crate::error::StoreError;

/// Read model for a tenant's programs, tasks, and triggers.
#[async_trait]
pub trait ProgramReadModel: Send + Sync {
    /// Fetches one consistent snapshot of every program a tenant owns,
    /// each with its tasks and triggers.
    async fn program_details(&self, tenant_id: TenantId) -> Result<Vec<ProgramDetail>, StoreError>;

    /// Fetches one program with its tasks and triggers.
    async fn program_detail(&self, program_id: ProgramId) -> Result<ProgramDetail, StoreError>;
}

/// Read/write model for trigger run records.
#[async_trait]
pub trait TriggerRunStore: Send + Sync {
    /// Inserts one immutable run record.
    async fn insert(&self, run: TriggerRun) -> Result<(), StoreError>;

    /// Fetches the most recent runs across a tenant, newest first, each
    /// joined with its trigger's program name.
    async fn recent(
        &self,
        tenant_id: TenantId,
        limit: usize,
    ) -> Result<Vec<RunWithProgram>, StoreError>;
}
