//! Roles and permissions

use serde::{Deserialize, Serialize};

use super::audit::AuditFields;

/// Canonical permission names checked by the HTTP layer.
pub mod permissions {
    pub const CATEGORY_VIEW: &str = "category_view";
    pub const CATEGORY_MANAGE: &str = "category_manage";
    pub const PRODUCT_VIEW: &str = "product_view";
    pub const PRODUCT_MANAGE: &str = "product_manage";
}

/// A named capability, e.g. `"category_manage"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Permission {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub audit: AuditFields,
}

/// A named bundle of permissions assignable to users.
///
/// A user's effective permission set is the distinct union across all
/// assigned roles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub audit: AuditFields,
}
