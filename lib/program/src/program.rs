//! Preventive-maintenance program definitions.
//!
//! A program is the aggregate root: it owns its checklist tasks and its
//! triggers, and carries the IANA time zone in which calendar triggers
//! are evaluated.

use chrono::{DateTime, Utc};
use mainspring_core::{AssetId, ProgramId, TenantId, UserId};
use serde::{Deserialize, Serialize};

/// A named preventive-maintenance definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    /// Unique identifier for this program.
    pub id: ProgramId,
    /// The tenant this program belongs to.
    pub tenant_id: TenantId,
    /// The user who owns this program.
    pub owner_id: UserId,
    /// The asset this program maintains, if targeted at one.
    pub asset_id: Option<AssetId>,
    /// Display name.
    pub name: String,
    /// Optional longer description.
    pub description: Option<String>,
    /// IANA time zone in which calendar triggers are evaluated.
    pub timezone: String,
    /// Whether this program is currently active.
    pub is_active: bool,
    /// When work orders were last generated from this program.
    pub last_generated_at: Option<DateTime<Utc>>,
    /// When this program was created.
    pub created_at: DateTime<Utc>,
    /// When this program was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Program {
    /// Creates a new active program evaluated in UTC.
    #[must_use]
    pub fn new(tenant_id: TenantId, owner_id: UserId, name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: ProgramId::new(),
            tenant_id,
            owner_id,
            asset_id: None,
            name: name.into(),
            description: None,
            timezone: "UTC".to_string(),
            is_active: true,
            last_generated_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Targets this program at an asset.
    #[must_use]
    pub fn with_asset(mut self, asset_id: AssetId) -> Self {
        self.asset_id = Some(asset_id);
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the IANA time zone.
    #[must_use]
    pub fn with_timezone(mut self, timezone: impl Into<String>) -> Self {
        self.timezone = timezone.into();
        self
    }

    /// Activates this program.
    pub fn activate(&mut self) {
        self.is_active = true;
        self.updated_at = Utc::now();
    }

    /// Deactivates this program without deleting it.
    pub fn deactivate(&mut self) {
        self.is_active = false;
        self.updated_at = Utc::now();
    }
}
