//! Category entity

use serde::{Deserialize, Serialize};

use super::audit::AuditFields;
use crate::domain::slug::slugify;

/// A node in the catalog's category tree.
///
/// Categories self-reference through `parent_id`; the parent graph must
/// stay acyclic, which is enforced at write time by the category service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier, assigned by the store
    pub id: i64,

    /// Display name
    pub name: String,

    /// Free-text description
    pub description: String,

    /// URL-safe identifier, unique among non-deleted categories
    pub slug: String,

    /// Parent category, `None` for roots
    pub parent_id: Option<i64>,

    pub audit: AuditFields,
}

impl Category {
    /// Build a new category with a slug derived from the name.
    ///
    /// The id is zero until the repository assigns one.
    pub fn new(name: &str, description: &str, parent_id: Option<i64>, actor: &str) -> Self {
        Self {
            id: 0,
            name: name.to_string(),
            description: description.to_string(),
            slug: slugify(name),
            parent_id,
            audit: AuditFields::new(actor),
        }
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Apply an update, regenerating the slug from the new name.
    pub fn apply_update(
        &mut self,
        name: &str,
        description: &str,
        parent_id: Option<i64>,
        actor: &str,
    ) {
        self.name = name.to_string();
        self.description = description.to_string();
        self.slug = slugify(name);
        self.parent_id = parent_id;
        self.audit.touch(actor);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::SYSTEM_ACTOR;

    #[test]
    fn new_category_derives_slug_from_name() {
        let category = Category::new("Action Games", "", Some(1), SYSTEM_ACTOR);
        assert_eq!(category.slug, "action-games");
        assert!(!category.is_root());
    }

    #[test]
    fn update_regenerates_slug() {
        let mut category = Category::new("Games", "", None, SYSTEM_ACTOR);
        category.apply_update("Board Games", "tabletop", None, "admin");
        assert_eq!(category.slug, "board-games");
        assert_eq!(category.audit.last_modified_by.as_deref(), Some("admin"));
    }
}
