//! Core domain types for the mainspring platform.
//!
//! This crate provides the strongly-typed identifiers used throughout
//! the mainspring preventive-maintenance scheduling engine.

pub mod id;

pub use id::{
    AssetId, ParseIdError, ProgramId, TaskId, TenantId, TriggerId, TriggerRunId, UserId,
    WorkOrderId,
};
