//! MySQL implementation of the CategoryRepository trait

use async_trait::async_trait;
use sqlx::mysql::MySqlRow;
use sqlx::MySqlPool;

use sf_core::domain::entities::Category;
use sf_core::errors::{DomainResult, ValidationError};
use sf_core::repositories::CategoryRepository;

use super::{audit_from_row, column, map_db_error};

const SELECT_COLUMNS: &str = "id, name, description, slug, parent_id, \
     created_at, created_by, last_modified_at, last_modified_by, status";

/// SQLx-backed [`CategoryRepository`].
pub struct MySqlCategoryRepository {
    pool: MySqlPool,
}

impl MySqlCategoryRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_category(row: &MySqlRow) -> DomainResult<Category> {
        Ok(Category {
            id: column(row, "id")?,
            name: column(row, "name")?,
            description: column(row, "description")?,
            slug: column(row, "slug")?,
            parent_id: column(row, "parent_id")?,
            audit: audit_from_row(row)?,
        })
    }

    /// Slug uniqueness is scoped to non-deleted rows, so it is checked
    /// here instead of with a table-wide unique index.
    async fn slug_taken(&self, slug: &str, exclude_id: Option<i64>) -> DomainResult<bool> {
        let taken: i64 = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM categories \
             WHERE slug = ? AND status <> 'deleted' AND id <> ?)",
        )
        .bind(slug)
        .bind(exclude_id.unwrap_or(0))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_db_error("failed to check category slug", "slug", e))?;

        Ok(taken != 0)
    }
}

#[async_trait]
impl CategoryRepository for MySqlCategoryRepository {
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Category>> {
        let row = sqlx::query(&format!(
            "SELECT {SELECT_COLUMNS} FROM categories WHERE id = ? AND status <> 'deleted'"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_db_error("failed to load category", "slug", e))?;

        row.as_ref().map(Self::row_to_category).transpose()
    }

    async fn find_by_slug(&self, slug: &str) -> DomainResult<Option<Category>> {
        let row = sqlx::query(&format!(
            "SELECT {SELECT_COLUMNS} FROM categories WHERE slug = ? AND status <> 'deleted'"
        ))
        .bind(slug)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_db_error("failed to load category by slug", "slug", e))?;

        row.as_ref().map(Self::row_to_category).transpose()
    }

    async fn find_all(&self) -> DomainResult<Vec<Category>> {
        let rows = sqlx::query(&format!(
            "SELECT {SELECT_COLUMNS} FROM categories WHERE status <> 'deleted' ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_db_error("failed to list categories", "slug", e))?;

        rows.iter().map(Self::row_to_category).collect()
    }

    async fn create(&self, category: Category) -> DomainResult<Category> {
        if self.slug_taken(&category.slug, None).await? {
            return Err(ValidationError::DuplicateValue {
                field: "slug".to_string(),
            }
            .into());
        }

        let result = sqlx::query(
            "INSERT INTO categories \
             (name, description, slug, parent_id, created_at, created_by, status) \
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&category.name)
        .bind(&category.description)
        .bind(&category.slug)
        .bind(category.parent_id)
        .bind(category.audit.created_at)
        .bind(&category.audit.created_by)
        .bind(category.audit.status.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| map_db_error("failed to insert category", "slug", e))?;

        let mut created = category;
        created.id = result.last_insert_id() as i64;
        Ok(created)
    }

    async fn update(&self, category: Category) -> DomainResult<Category> {
        if self.slug_taken(&category.slug, Some(category.id)).await? {
            return Err(ValidationError::DuplicateValue {
                field: "slug".to_string(),
            }
            .into());
        }

        sqlx::query(
            "UPDATE categories SET \
             name = ?, description = ?, slug = ?, parent_id = ?, \
             last_modified_at = ?, last_modified_by = ? \
             WHERE id = ? AND status <> 'deleted'",
        )
        .bind(&category.name)
        .bind(&category.description)
        .bind(&category.slug)
        .bind(category.parent_id)
        .bind(category.audit.last_modified_at)
        .bind(&category.audit.last_modified_by)
        .bind(category.id)
        .execute(&self.pool)
        .await
        .map_err(|e| map_db_error("failed to update category", "slug", e))?;

        Ok(category)
    }

    async fn soft_delete(&self, id: i64, actor: &str) -> DomainResult<()> {
        sqlx::query(
            "UPDATE categories SET status = 'deleted', \
             last_modified_at = UTC_TIMESTAMP(), last_modified_by = ? \
             WHERE id = ?",
        )
        .bind(actor)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| map_db_error("failed to delete category", "slug", e))?;

        Ok(())
    }

    async fn exists(&self, id: i64) -> DomainResult<bool> {
        let exists: i64 = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM categories WHERE id = ? AND status <> 'deleted')",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_db_error("failed to check category existence", "slug", e))?;

        Ok(exists != 0)
    }

    async fn has_children(&self, id: i64) -> DomainResult<bool> {
        let exists: i64 = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM categories \
             WHERE parent_id = ? AND status <> 'deleted')",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_db_error("failed to check category children", "slug", e))?;

        Ok(exists != 0)
    }

    async fn has_products(&self, id: i64) -> DomainResult<bool> {
        let exists: i64 = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM products \
             WHERE category_id = ? AND status <> 'deleted')",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_db_error("failed to check category products", "slug", e))?;

        Ok(exists != 0)
    }
}
