//! Product repository trait

use async_trait::async_trait;

use sf_shared::Pagination;

use crate::domain::entities::Product;
use crate::errors::DomainResult;

/// Persistence operations for products.
///
/// Implementations must exclude soft-deleted rows from every read.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Product>>;

    async fn find_by_slug(&self, slug: &str) -> DomainResult<Option<Product>>;

    async fn find_all(&self) -> DomainResult<Vec<Product>>;

    /// Products belonging to any of the given categories. Callers pass
    /// a whole descendant set to scope by subtree.
    async fn find_by_category_ids(&self, category_ids: &[i64]) -> DomainResult<Vec<Product>>;

    /// Case-insensitive name/description search, optionally scoped to
    /// the given categories.
    async fn search(&self, term: &str, category_ids: Option<&[i64]>)
        -> DomainResult<Vec<Product>>;

    /// One page of products plus the total row count for the same
    /// filters.
    async fn list_page(
        &self,
        pagination: &Pagination,
        category_ids: Option<&[i64]>,
        search: Option<&str>,
    ) -> DomainResult<(Vec<Product>, u64)>;

    /// Persist a new product and return it with its assigned id.
    ///
    /// Fails with a duplicate-entry error when the slug is already taken.
    async fn create(&self, product: Product) -> DomainResult<Product>;

    async fn update(&self, product: Product) -> DomainResult<Product>;

    async fn soft_delete(&self, id: i64, actor: &str) -> DomainResult<()>;
}
