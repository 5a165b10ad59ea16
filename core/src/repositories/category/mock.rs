//! In-memory category repository for tests

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::trait_::CategoryRepository;
use crate::domain::entities::Category;
use crate::errors::{DomainResult, ValidationError};

/// HashMap-backed [`CategoryRepository`].
#[derive(Default)]
pub struct MockCategoryRepository {
    categories: RwLock<HashMap<i64, Category>>,
    with_products: RwLock<HashSet<i64>>,
    next_id: AtomicI64,
}

impl MockCategoryRepository {
    pub fn new() -> Self {
        Self {
            categories: RwLock::new(HashMap::new()),
            with_products: RwLock::new(HashSet::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// Mark a category as having assigned products.
    pub async fn set_has_products(&self, id: i64) {
        self.with_products.write().await.insert(id);
    }
}

#[async_trait]
impl CategoryRepository for MockCategoryRepository {
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Category>> {
        let categories = self.categories.read().await;
        Ok(categories
            .get(&id)
            .filter(|c| !c.audit.is_deleted())
            .cloned())
    }

    async fn find_by_slug(&self, slug: &str) -> DomainResult<Option<Category>> {
        let categories = self.categories.read().await;
        Ok(categories
            .values()
            .find(|c| c.slug == slug && !c.audit.is_deleted())
            .cloned())
    }

    async fn find_all(&self) -> DomainResult<Vec<Category>> {
        let categories = self.categories.read().await;
        let mut all: Vec<Category> = categories
            .values()
            .filter(|c| !c.audit.is_deleted())
            .cloned()
            .collect();
        all.sort_by_key(|c| c.id);
        Ok(all)
    }

    async fn create(&self, mut category: Category) -> DomainResult<Category> {
        let mut categories = self.categories.write().await;

        if categories
            .values()
            .any(|c| c.slug == category.slug && !c.audit.is_deleted())
        {
            return Err(ValidationError::DuplicateValue {
                field: "slug".to_string(),
            }
            .into());
        }

        category.id = self.next_id.fetch_add(1, Ordering::SeqCst);
        categories.insert(category.id, category.clone());
        Ok(category)
    }

    async fn update(&self, category: Category) -> DomainResult<Category> {
        let mut categories = self.categories.write().await;

        if categories
            .values()
            .any(|c| c.id != category.id && c.slug == category.slug && !c.audit.is_deleted())
        {
            return Err(ValidationError::DuplicateValue {
                field: "slug".to_string(),
            }
            .into());
        }

        categories.insert(category.id, category.clone());
        Ok(category)
    }

    async fn soft_delete(&self, id: i64, actor: &str) -> DomainResult<()> {
        let mut categories = self.categories.write().await;
        if let Some(category) = categories.get_mut(&id) {
            category.audit.mark_deleted(actor);
        }
        Ok(())
    }

    async fn exists(&self, id: i64) -> DomainResult<bool> {
        let categories = self.categories.read().await;
        Ok(categories
            .get(&id)
            .is_some_and(|c| !c.audit.is_deleted()))
    }

    async fn has_children(&self, id: i64) -> DomainResult<bool> {
        let categories = self.categories.read().await;
        Ok(categories
            .values()
            .any(|c| c.parent_id == Some(id) && !c.audit.is_deleted()))
    }

    async fn has_products(&self, id: i64) -> DomainResult<bool> {
        Ok(self.with_products.read().await.contains(&id))
    }
}
