//! In-memory product repository for tests

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use sf_shared::Pagination;

use super::trait_::ProductRepository;
use crate::domain::entities::Product;
use crate::errors::{DomainResult, ValidationError};

/// HashMap-backed [`ProductRepository`].
#[derive(Default)]
pub struct MockProductRepository {
    products: RwLock<HashMap<i64, Product>>,
    next_id: AtomicI64,
}

impl MockProductRepository {
    pub fn new() -> Self {
        Self {
            products: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    fn matches(product: &Product, category_ids: Option<&[i64]>, search: Option<&str>) -> bool {
        if product.audit.is_deleted() {
            return false;
        }
        if let Some(ids) = category_ids {
            if !ids.contains(&product.category_id) {
                return false;
            }
        }
        if let Some(term) = search {
            let term = term.to_lowercase();
            if !product.name.to_lowercase().contains(&term)
                && !product.description.to_lowercase().contains(&term)
            {
                return false;
            }
        }
        true
    }

    async fn filtered(
        &self,
        category_ids: Option<&[i64]>,
        search: Option<&str>,
    ) -> Vec<Product> {
        let products = self.products.read().await;
        let mut matched: Vec<Product> = products
            .values()
            .filter(|p| Self::matches(p, category_ids, search))
            .cloned()
            .collect();
        matched.sort_by_key(|p| p.id);
        matched
    }
}

#[async_trait]
impl ProductRepository for MockProductRepository {
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.get(&id).filter(|p| !p.audit.is_deleted()).cloned())
    }

    async fn find_by_slug(&self, slug: &str) -> DomainResult<Option<Product>> {
        let products = self.products.read().await;
        Ok(products
            .values()
            .find(|p| p.slug == slug && !p.audit.is_deleted())
            .cloned())
    }

    async fn find_all(&self) -> DomainResult<Vec<Product>> {
        Ok(self.filtered(None, None).await)
    }

    async fn find_by_category_ids(&self, category_ids: &[i64]) -> DomainResult<Vec<Product>> {
        Ok(self.filtered(Some(category_ids), None).await)
    }

    async fn search(
        &self,
        term: &str,
        category_ids: Option<&[i64]>,
    ) -> DomainResult<Vec<Product>> {
        Ok(self.filtered(category_ids, Some(term)).await)
    }

    async fn list_page(
        &self,
        pagination: &Pagination,
        category_ids: Option<&[i64]>,
        search: Option<&str>,
    ) -> DomainResult<(Vec<Product>, u64)> {
        let matched = self.filtered(category_ids, search).await;
        let total = matched.len() as u64;
        let page = matched
            .into_iter()
            .skip(pagination.offset_i64() as usize)
            .take(pagination.limit_i64() as usize)
            .collect();
        Ok((page, total))
    }

    async fn create(&self, mut product: Product) -> DomainResult<Product> {
        let mut products = self.products.write().await;

        if products
            .values()
            .any(|p| p.slug == product.slug && !p.audit.is_deleted())
        {
            return Err(ValidationError::DuplicateValue {
                field: "slug".to_string(),
            }
            .into());
        }

        product.id = self.next_id.fetch_add(1, Ordering::SeqCst);
        products.insert(product.id, product.clone());
        Ok(product)
    }

    async fn update(&self, product: Product) -> DomainResult<Product> {
        let mut products = self.products.write().await;

        if products
            .values()
            .any(|p| p.id != product.id && p.slug == product.slug && !p.audit.is_deleted())
        {
            return Err(ValidationError::DuplicateValue {
                field: "slug".to_string(),
            }
            .into());
        }

        products.insert(product.id, product.clone());
        Ok(product)
    }

    async fn soft_delete(&self, id: i64, actor: &str) -> DomainResult<()> {
        let mut products = self.products.write().await;
        if let Some(product) = products.get_mut(&id) {
            product.audit.mark_deleted(actor);
        }
        Ok(())
    }
}
