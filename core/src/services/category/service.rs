//! Category service

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::entities::Category;
use crate::domain::hierarchy::{self, CategoryTreeNode};
use crate::errors::{DomainResult, NotFoundError, ValidationError};
use crate::repositories::CategoryRepository;

/// Fields accepted when creating or updating a category.
#[derive(Debug, Clone)]
pub struct CategoryInput {
    pub name: String,
    pub description: String,
    pub parent_id: Option<i64>,
}

/// Business rules for the category tree: parent existence, cycle
/// prevention, and delete guards.
pub struct CategoryService<C: CategoryRepository> {
    categories: Arc<C>,
}

impl<C: CategoryRepository> CategoryService<C> {
    pub fn new(categories: Arc<C>) -> Self {
        Self { categories }
    }

    pub async fn get_by_id(&self, id: i64) -> DomainResult<Category> {
        self.categories
            .find_by_id(id)
            .await?
            .ok_or_else(|| NotFoundError::Category.into())
    }

    pub async fn get_by_slug(&self, slug: &str) -> DomainResult<Category> {
        self.categories
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| NotFoundError::Category.into())
    }

    pub async fn get_all(&self) -> DomainResult<Vec<Category>> {
        self.categories.find_all().await
    }

    /// The whole catalog as a forest of nested nodes.
    pub async fn get_tree(&self) -> DomainResult<Vec<CategoryTreeNode>> {
        let categories = self.categories.find_all().await?;
        Ok(hierarchy::build_category_tree(&categories))
    }

    /// The category's id plus every descendant id, for subtree scoping.
    pub async fn descendant_ids(&self, id: i64) -> DomainResult<Vec<i64>> {
        if !self.categories.exists(id).await? {
            return Err(NotFoundError::Category.into());
        }
        let categories = self.categories.find_all().await?;
        Ok(hierarchy::descendant_ids(&categories, id))
    }

    /// Whether reparenting `category_id` under `proposed_parent_id`
    /// would make it its own ancestor.
    pub async fn would_create_cycle(
        &self,
        category_id: i64,
        proposed_parent_id: i64,
    ) -> DomainResult<bool> {
        let categories = self.categories.find_all().await?;
        Ok(hierarchy::would_create_cycle(
            &categories,
            category_id,
            proposed_parent_id,
        ))
    }

    pub async fn create(&self, input: CategoryInput, actor: &str) -> DomainResult<Category> {
        if let Some(parent_id) = input.parent_id {
            if !self.categories.exists(parent_id).await? {
                warn!(parent_id, "category create referenced a missing parent");
                return Err(NotFoundError::ParentCategory { parent_id }.into());
            }
        }

        let category = Category::new(&input.name, &input.description, input.parent_id, actor);
        let created = self.categories.create(category).await?;

        info!(category_id = created.id, "created category");
        Ok(created)
    }

    pub async fn update(
        &self,
        id: i64,
        input: CategoryInput,
        actor: &str,
    ) -> DomainResult<Category> {
        let mut category = self.get_by_id(id).await?;

        if let Some(parent_id) = input.parent_id {
            if !self.categories.exists(parent_id).await? {
                warn!(parent_id, "category update referenced a missing parent");
                return Err(NotFoundError::ParentCategory { parent_id }.into());
            }

            if self.would_create_cycle(id, parent_id).await? {
                warn!(category_id = id, parent_id, "rejected circular reparenting");
                return Err(
                    ValidationError::business_rule("Cannot create circular reference").into(),
                );
            }
        }

        category.apply_update(&input.name, &input.description, input.parent_id, actor);
        let updated = self.categories.update(category).await?;

        info!(category_id = id, "updated category");
        Ok(updated)
    }

    /// Soft-delete a category. Refused while child categories or
    /// products still reference it.
    pub async fn delete(&self, id: i64, actor: &str) -> DomainResult<()> {
        if !self.categories.exists(id).await? {
            return Err(NotFoundError::Category.into());
        }

        if self.categories.has_children(id).await? {
            warn!(category_id = id, "refused to delete category with children");
            return Err(ValidationError::business_rule(
                "Cannot delete category with child categories",
            )
            .into());
        }

        if self.categories.has_products(id).await? {
            warn!(category_id = id, "refused to delete category with products");
            return Err(
                ValidationError::business_rule("Cannot delete category with products").into(),
            );
        }

        self.categories.soft_delete(id, actor).await?;
        info!(category_id = id, "deleted category");
        Ok(())
    }
}
