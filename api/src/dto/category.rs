//! Category DTOs

use serde::{Deserialize, Serialize};
use validator::Validate;

use sf_core::domain::entities::Category;
use sf_core::services::category::CategoryInput;

/// Public view of a category.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDto {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub slug: String,
    pub parent_id: Option<i64>,
}

impl From<Category> for CategoryDto {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
            description: category.description,
            slug: category.slug,
            parent_id: category.parent_id,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryRequest {
    #[validate(length(min = 1, max = 100, message = "must be 1 to 100 characters"))]
    pub name: String,

    pub description: Option<String>,

    pub parent_id: Option<i64>,
}

impl CreateCategoryRequest {
    pub fn into_input(self) -> CategoryInput {
        CategoryInput {
            name: self.name,
            description: self.description.unwrap_or_default(),
            parent_id: self.parent_id,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCategoryRequest {
    #[validate(length(min = 1, max = 100, message = "must be 1 to 100 characters"))]
    pub name: String,

    pub description: Option<String>,

    pub parent_id: Option<i64>,
}

impl UpdateCategoryRequest {
    pub fn into_input(self) -> CategoryInput {
        CategoryInput {
            name: self.name,
            description: self.description.unwrap_or_default(),
            parent_id: self.parent_id,
        }
    }
}
