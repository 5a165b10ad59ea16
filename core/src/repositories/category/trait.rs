//! Category repository trait

use async_trait::async_trait;

use crate::domain::entities::Category;
use crate::errors::DomainResult;

/// Persistence operations for categories.
///
/// Implementations must exclude soft-deleted rows from every read.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Find a category by id.
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Category>>;

    /// Find a category by its slug.
    async fn find_by_slug(&self, slug: &str) -> DomainResult<Option<Category>>;

    /// All non-deleted categories.
    async fn find_all(&self) -> DomainResult<Vec<Category>>;

    /// Persist a new category and return it with its assigned id.
    ///
    /// Fails with a duplicate-entry error when the slug is already taken.
    async fn create(&self, category: Category) -> DomainResult<Category>;

    /// Persist changes to an existing category.
    async fn update(&self, category: Category) -> DomainResult<Category>;

    /// Soft-delete a category, recording the acting user.
    async fn soft_delete(&self, id: i64, actor: &str) -> DomainResult<()>;

    /// Whether a non-deleted category with this id exists.
    async fn exists(&self, id: i64) -> DomainResult<bool>;

    /// Whether any non-deleted category has this one as its parent.
    async fn has_children(&self, id: i64) -> DomainResult<bool>;

    /// Whether any non-deleted product belongs to this category.
    async fn has_products(&self, id: i64) -> DomainResult<bool>;
}
