//! MySQL implementation of the ProductRepository trait

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::mysql::MySqlRow;
use sqlx::{MySqlPool, QueryBuilder};

use sf_core::domain::entities::{Product, ProductStatus};
use sf_core::errors::{DomainError, DomainResult, ValidationError};
use sf_core::repositories::ProductRepository;
use sf_shared::Pagination;

use super::{audit_from_row, column, map_db_error};

const SELECT_COLUMNS: &str = "id, name, description, slug, price, image_url, category_id, \
     stock_quantity, business_status, \
     created_at, created_by, last_modified_at, last_modified_by, status";

/// SQLx-backed [`ProductRepository`].
pub struct MySqlProductRepository {
    pool: MySqlPool,
}

impl MySqlProductRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_product(row: &MySqlRow) -> DomainResult<Product> {
        let business_status: i32 = column(row, "business_status")?;
        let business_status = ProductStatus::from_i32(business_status).ok_or_else(|| {
            DomainError::internal(format!("unknown product status {business_status}"))
        })?;

        Ok(Product {
            id: column(row, "id")?,
            name: column(row, "name")?,
            description: column(row, "description")?,
            slug: column(row, "slug")?,
            price: column::<Decimal>(row, "price")?,
            image_url: column(row, "image_url")?,
            category_id: column(row, "category_id")?,
            stock_quantity: column(row, "stock_quantity")?,
            business_status,
            audit: audit_from_row(row)?,
        })
    }

    /// Append category and search filters to a query that already has a
    /// WHERE clause.
    fn push_filters<'a>(
        builder: &mut QueryBuilder<'a, sqlx::MySql>,
        category_ids: Option<&'a [i64]>,
        search: Option<&'a str>,
    ) {
        if let Some(ids) = category_ids {
            builder.push(" AND category_id IN (");
            let mut separated = builder.separated(", ");
            for id in ids {
                separated.push_bind(id);
            }
            builder.push(")");
        }

        if let Some(term) = search {
            let pattern = format!("%{}%", term.to_lowercase());
            builder.push(" AND (LOWER(name) LIKE ");
            builder.push_bind(pattern.clone());
            builder.push(" OR LOWER(description) LIKE ");
            builder.push_bind(pattern);
            builder.push(")");
        }
    }

    async fn fetch_filtered(
        &self,
        category_ids: Option<&[i64]>,
        search: Option<&str>,
    ) -> DomainResult<Vec<Product>> {
        if matches!(category_ids, Some(ids) if ids.is_empty()) {
            return Ok(Vec::new());
        }

        let mut builder = QueryBuilder::new(format!(
            "SELECT {SELECT_COLUMNS} FROM products WHERE status <> 'deleted'"
        ));
        Self::push_filters(&mut builder, category_ids, search);
        builder.push(" ORDER BY id");

        let rows = builder
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_db_error("failed to list products", "slug", e))?;

        rows.iter().map(Self::row_to_product).collect()
    }

    /// Slug uniqueness is scoped to non-deleted rows, so it is checked
    /// here instead of with a table-wide unique index.
    async fn slug_taken(&self, slug: &str, exclude_id: Option<i64>) -> DomainResult<bool> {
        let taken: i64 = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM products \
             WHERE slug = ? AND status <> 'deleted' AND id <> ?)",
        )
        .bind(slug)
        .bind(exclude_id.unwrap_or(0))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_db_error("failed to check product slug", "slug", e))?;

        Ok(taken != 0)
    }
}

#[async_trait]
impl ProductRepository for MySqlProductRepository {
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Product>> {
        let row = sqlx::query(&format!(
            "SELECT {SELECT_COLUMNS} FROM products WHERE id = ? AND status <> 'deleted'"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_db_error("failed to load product", "slug", e))?;

        row.as_ref().map(Self::row_to_product).transpose()
    }

    async fn find_by_slug(&self, slug: &str) -> DomainResult<Option<Product>> {
        let row = sqlx::query(&format!(
            "SELECT {SELECT_COLUMNS} FROM products WHERE slug = ? AND status <> 'deleted'"
        ))
        .bind(slug)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_db_error("failed to load product by slug", "slug", e))?;

        row.as_ref().map(Self::row_to_product).transpose()
    }

    async fn find_all(&self) -> DomainResult<Vec<Product>> {
        self.fetch_filtered(None, None).await
    }

    async fn find_by_category_ids(&self, category_ids: &[i64]) -> DomainResult<Vec<Product>> {
        self.fetch_filtered(Some(category_ids), None).await
    }

    async fn search(
        &self,
        term: &str,
        category_ids: Option<&[i64]>,
    ) -> DomainResult<Vec<Product>> {
        self.fetch_filtered(category_ids, Some(term)).await
    }

    async fn list_page(
        &self,
        pagination: &Pagination,
        category_ids: Option<&[i64]>,
        search: Option<&str>,
    ) -> DomainResult<(Vec<Product>, u64)> {
        if matches!(category_ids, Some(ids) if ids.is_empty()) {
            return Ok((Vec::new(), 0));
        }

        let mut count_builder =
            QueryBuilder::new("SELECT COUNT(*) FROM products WHERE status <> 'deleted'");
        Self::push_filters(&mut count_builder, category_ids, search);
        let total: i64 = count_builder
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_db_error("failed to count products", "slug", e))?;

        let mut builder = QueryBuilder::new(format!(
            "SELECT {SELECT_COLUMNS} FROM products WHERE status <> 'deleted'"
        ));
        Self::push_filters(&mut builder, category_ids, search);
        builder.push(" ORDER BY id LIMIT ");
        builder.push_bind(pagination.limit_i64());
        builder.push(" OFFSET ");
        builder.push_bind(pagination.offset_i64());

        let rows = builder
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_db_error("failed to page products", "slug", e))?;

        let products = rows
            .iter()
            .map(Self::row_to_product)
            .collect::<DomainResult<Vec<_>>>()?;

        Ok((products, total as u64))
    }

    async fn create(&self, product: Product) -> DomainResult<Product> {
        if self.slug_taken(&product.slug, None).await? {
            return Err(ValidationError::DuplicateValue {
                field: "slug".to_string(),
            }
            .into());
        }

        let result = sqlx::query(
            "INSERT INTO products \
             (name, description, slug, price, image_url, category_id, \
              stock_quantity, business_status, created_at, created_by, status) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&product.name)
        .bind(&product.description)
        .bind(&product.slug)
        .bind(product.price)
        .bind(&product.image_url)
        .bind(product.category_id)
        .bind(product.stock_quantity)
        .bind(product.business_status.as_i32())
        .bind(product.audit.created_at)
        .bind(&product.audit.created_by)
        .bind(product.audit.status.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| map_db_error("failed to insert product", "slug", e))?;

        let mut created = product;
        created.id = result.last_insert_id() as i64;
        Ok(created)
    }

    async fn update(&self, product: Product) -> DomainResult<Product> {
        if self.slug_taken(&product.slug, Some(product.id)).await? {
            return Err(ValidationError::DuplicateValue {
                field: "slug".to_string(),
            }
            .into());
        }

        sqlx::query(
            "UPDATE products SET \
             name = ?, description = ?, slug = ?, price = ?, image_url = ?, \
             category_id = ?, stock_quantity = ?, business_status = ?, \
             last_modified_at = ?, last_modified_by = ? \
             WHERE id = ? AND status <> 'deleted'",
        )
        .bind(&product.name)
        .bind(&product.description)
        .bind(&product.slug)
        .bind(product.price)
        .bind(&product.image_url)
        .bind(product.category_id)
        .bind(product.stock_quantity)
        .bind(product.business_status.as_i32())
        .bind(product.audit.last_modified_at)
        .bind(&product.audit.last_modified_by)
        .bind(product.id)
        .execute(&self.pool)
        .await
        .map_err(|e| map_db_error("failed to update product", "slug", e))?;

        Ok(product)
    }

    async fn soft_delete(&self, id: i64, actor: &str) -> DomainResult<()> {
        sqlx::query(
            "UPDATE products SET status = 'deleted', \
             last_modified_at = UTC_TIMESTAMP(), last_modified_by = ? \
             WHERE id = ?",
        )
        .bind(actor)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| map_db_error("failed to delete product", "slug", e))?;

        Ok(())
    }
}
