//! MySQL repository implementations
//!
//! Soft deletes are a status flag, so every read filters on
//! `status <> 'deleted'`. Unique constraints surface as duplicate-entry
//! domain errors.

mod category_repository_impl;
mod product_repository_impl;
mod reset_token_repository_impl;
mod user_repository_impl;

pub use category_repository_impl::MySqlCategoryRepository;
pub use product_repository_impl::MySqlProductRepository;
pub use reset_token_repository_impl::MySqlResetTokenRepository;
pub use user_repository_impl::MySqlUserRepository;

use chrono::{DateTime, Utc};
use sqlx::mysql::MySqlRow;
use sqlx::Row;

use sf_core::domain::entities::{AuditFields, EntityStatus};
use sf_core::errors::{DomainError, ValidationError};

/// Read one column, wrapping decode failures as database errors.
pub(crate) fn column<'r, T>(row: &'r MySqlRow, name: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, sqlx::MySql> + sqlx::Type<sqlx::MySql>,
{
    row.try_get(name)
        .map_err(|e| DomainError::database(format!("failed to read column {name}: {e}")))
}

/// Map the shared audit columns of a row.
pub(crate) fn audit_from_row(row: &MySqlRow) -> Result<AuditFields, DomainError> {
    let status: String = column(row, "status")?;
    let status = EntityStatus::parse(&status)
        .ok_or_else(|| DomainError::internal(format!("unknown entity status '{status}'")))?;

    Ok(AuditFields {
        created_at: column::<DateTime<Utc>>(row, "created_at")?,
        created_by: column(row, "created_by")?,
        last_modified_at: column::<Option<DateTime<Utc>>>(row, "last_modified_at")?,
        last_modified_by: column::<Option<String>>(row, "last_modified_by")?,
        status,
    })
}

/// Translate a SQLx error, turning unique violations into a
/// duplicate-entry failure on `unique_field`.
pub(crate) fn map_db_error(context: &str, unique_field: &str, e: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db) = &e {
        if matches!(db.kind(), sqlx::error::ErrorKind::UniqueViolation) {
            return ValidationError::DuplicateValue {
                field: unique_field.to_string(),
            }
            .into();
        }
    }
    DomainError::database(format!("{context}: {e}"))
}
