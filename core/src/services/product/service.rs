//! Product service

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{info, warn};

use sf_shared::{PageMeta, Pagination};

use crate::domain::entities::{Product, ProductStatus};
use crate::domain::hierarchy;
use crate::domain::slug::slugify;
use crate::errors::{DomainResult, NotFoundError};
use crate::repositories::{CategoryRepository, ProductRepository};

/// Fields accepted when creating or updating a product.
///
/// `business_status` is optional: when omitted, the current status is
/// kept and only the stock-driven transitions apply.
#[derive(Debug, Clone)]
pub struct ProductInput {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub image_url: Option<String>,
    pub category_id: i64,
    pub stock_quantity: i32,
    pub business_status: Option<ProductStatus>,
}

/// A product joined with its owning category's name and slug.
#[derive(Debug, Clone, Serialize)]
pub struct ProductWithCategory {
    #[serde(flatten)]
    pub product: Product,
    pub category_name: String,
    pub category_slug: String,
}

/// Business rules for products: category scoping, stock/status
/// reconciliation, and search.
pub struct ProductService<P: ProductRepository, C: CategoryRepository> {
    products: Arc<P>,
    categories: Arc<C>,
}

impl<P: ProductRepository, C: CategoryRepository> ProductService<P, C> {
    pub fn new(products: Arc<P>, categories: Arc<C>) -> Self {
        Self {
            products,
            categories,
        }
    }

    pub async fn get_by_id(&self, id: i64) -> DomainResult<Product> {
        self.products
            .find_by_id(id)
            .await?
            .ok_or_else(|| NotFoundError::Product.into())
    }

    pub async fn get_by_slug(&self, slug: &str) -> DomainResult<Product> {
        self.products
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| NotFoundError::Product.into())
    }

    pub async fn get_all(&self) -> DomainResult<Vec<Product>> {
        self.products.find_all().await
    }

    /// A product joined with its category.
    pub async fn get_detailed(&self, id: i64) -> DomainResult<ProductWithCategory> {
        let product = self.get_by_id(id).await?;
        let category = self
            .categories
            .find_by_id(product.category_id)
            .await?
            .ok_or(NotFoundError::Category)?;

        Ok(ProductWithCategory {
            product,
            category_name: category.name,
            category_slug: category.slug,
        })
    }

    /// All products in a category or any of its descendants.
    pub async fn by_category(&self, category_id: i64) -> DomainResult<Vec<Product>> {
        let scope = self.category_scope(category_id).await?;
        self.products.find_by_category_ids(&scope).await
    }

    /// Case-insensitive search, optionally scoped to a category subtree.
    pub async fn search(
        &self,
        term: &str,
        category_id: Option<i64>,
    ) -> DomainResult<Vec<Product>> {
        match category_id {
            Some(id) => {
                let scope = self.category_scope(id).await?;
                self.products.search(term, Some(&scope)).await
            }
            None => self.products.search(term, None).await,
        }
    }

    /// One page of products with page metadata, optionally scoped to a
    /// category subtree and filtered by a search term.
    pub async fn list(
        &self,
        pagination: &Pagination,
        category_id: Option<i64>,
        search: Option<&str>,
    ) -> DomainResult<(Vec<Product>, PageMeta)> {
        let scope = match category_id {
            Some(id) => Some(self.category_scope(id).await?),
            None => None,
        };

        let (products, total) = self
            .products
            .list_page(pagination, scope.as_deref(), search)
            .await?;

        Ok((products, PageMeta::new(pagination, total)))
    }

    /// One page of products joined with their category names and slugs.
    pub async fn list_with_categories(
        &self,
        pagination: &Pagination,
        category_id: Option<i64>,
        search: Option<&str>,
    ) -> DomainResult<(Vec<ProductWithCategory>, PageMeta)> {
        let (products, meta) = self.list(pagination, category_id, search).await?;

        let categories = self.categories.find_all().await?;
        let mut joined = Vec::with_capacity(products.len());
        for product in products {
            let category = categories
                .iter()
                .find(|c| c.id == product.category_id)
                .ok_or(NotFoundError::Category)?;
            joined.push(ProductWithCategory {
                category_name: category.name.clone(),
                category_slug: category.slug.clone(),
                product,
            });
        }

        Ok((joined, meta))
    }

    pub async fn create(&self, input: ProductInput, actor: &str) -> DomainResult<Product> {
        if !self.categories.exists(input.category_id).await? {
            warn!(
                category_id = input.category_id,
                "product create referenced a missing category"
            );
            return Err(NotFoundError::Category.into());
        }

        let mut product = Product::new(
            &input.name,
            &input.description,
            input.price,
            input.image_url.clone(),
            input.category_id,
            input.stock_quantity,
            actor,
        )?;

        // an explicitly requested status still goes through reconciliation
        if let Some(requested) = input.business_status {
            product.reconcile_stock_and_status(input.stock_quantity, requested)?;
        }

        let created = self.products.create(product).await?;
        info!(product_id = created.id, "created product");
        Ok(created)
    }

    pub async fn update(&self, id: i64, input: ProductInput, actor: &str) -> DomainResult<Product> {
        let mut product = self.get_by_id(id).await?;

        if !self.categories.exists(input.category_id).await? {
            warn!(
                category_id = input.category_id,
                "product update referenced a missing category"
            );
            return Err(NotFoundError::Category.into());
        }

        let requested = input.business_status.unwrap_or(product.business_status);
        product.reconcile_stock_and_status(input.stock_quantity, requested)?;

        product.name = input.name;
        product.slug = slugify(&product.name);
        product.description = input.description;
        product.price = input.price;
        product.image_url = input.image_url;
        product.category_id = input.category_id;
        product.audit.touch(actor);

        let updated = self.products.update(product).await?;
        info!(product_id = id, "updated product");
        Ok(updated)
    }

    pub async fn delete(&self, id: i64, actor: &str) -> DomainResult<()> {
        // surfaces NotFound before touching the store
        self.get_by_id(id).await?;
        self.products.soft_delete(id, actor).await?;
        info!(product_id = id, "deleted product");
        Ok(())
    }

    async fn category_scope(&self, category_id: i64) -> DomainResult<Vec<i64>> {
        if !self.categories.exists(category_id).await? {
            return Err(NotFoundError::Category.into());
        }
        let categories = self.categories.find_all().await?;
        Ok(hierarchy::descendant_ids(&categories, category_id))
    }
}
