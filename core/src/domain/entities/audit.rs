//! Audit fields shared by every persisted entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Actor recorded when no authenticated user is available.
pub const SYSTEM_ACTOR: &str = "System";

/// Record lifecycle status. Rows are never physically deleted; queries
/// must exclude `Deleted` rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityStatus {
    Active,
    Inactive,
    Deleted,
}

impl EntityStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Deleted => "deleted",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "active" => Some(Self::Active),
            "inactive" => Some(Self::Inactive),
            "deleted" => Some(Self::Deleted),
            _ => None,
        }
    }
}

/// Creation and modification metadata carried by every entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditFields {
    pub created_at: DateTime<Utc>,
    pub created_by: String,
    pub last_modified_at: Option<DateTime<Utc>>,
    pub last_modified_by: Option<String>,
    pub status: EntityStatus,
}

impl AuditFields {
    /// Fresh audit fields for a newly created record.
    pub fn new(actor: &str) -> Self {
        Self {
            created_at: Utc::now(),
            created_by: actor.to_string(),
            last_modified_at: None,
            last_modified_by: None,
            status: EntityStatus::Active,
        }
    }

    /// Record a modification by `actor`.
    pub fn touch(&mut self, actor: &str) {
        self.last_modified_at = Some(Utc::now());
        self.last_modified_by = Some(actor.to_string());
    }

    /// Soft-delete the record.
    pub fn mark_deleted(&mut self, actor: &str) {
        self.status = EntityStatus::Deleted;
        self.touch(actor);
    }

    pub fn is_deleted(&self) -> bool {
        self.status == EntityStatus::Deleted
    }
}

impl Default for AuditFields {
    fn default() -> Self {
        Self::new(SYSTEM_ACTOR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_records_start_active() {
        let audit = AuditFields::new("admin");
        assert_eq!(audit.status, EntityStatus::Active);
        assert_eq!(audit.created_by, "admin");
        assert!(audit.last_modified_at.is_none());
    }

    #[test]
    fn mark_deleted_sets_status_and_actor() {
        let mut audit = AuditFields::new(SYSTEM_ACTOR);
        audit.mark_deleted("admin");
        assert!(audit.is_deleted());
        assert_eq!(audit.last_modified_by.as_deref(), Some("admin"));
    }

    #[test]
    fn status_round_trips_through_strings() {
        for status in [
            EntityStatus::Active,
            EntityStatus::Inactive,
            EntityStatus::Deleted,
        ] {
            assert_eq!(EntityStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(EntityStatus::parse("unknown"), None);
    }
}
