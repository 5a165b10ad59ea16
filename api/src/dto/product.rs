//! Product DTOs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use sf_core::domain::entities::{Product, ProductStatus};
use sf_core::errors::{DomainError, ValidationError};
use sf_core::services::product::{ProductInput, ProductWithCategory};

/// Public view of a product.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub slug: String,
    pub price: Decimal,
    pub image_url: Option<String>,
    pub category_id: i64,
    pub stock_quantity: i32,
    pub business_status: i32,
}

impl From<Product> for ProductDto {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            description: product.description,
            slug: product.slug,
            price: product.price,
            image_url: product.image_url,
            category_id: product.category_id,
            stock_quantity: product.stock_quantity,
            business_status: product.business_status.as_i32(),
        }
    }
}

/// Product joined with its owning category.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetailDto {
    #[serde(flatten)]
    pub product: ProductDto,
    pub category_name: String,
    pub category_slug: String,
}

impl From<ProductWithCategory> for ProductDetailDto {
    fn from(detail: ProductWithCategory) -> Self {
        Self {
            product: detail.product.into(),
            category_name: detail.category_name,
            category_slug: detail.category_slug,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProductRequest {
    #[validate(length(min = 1, max = 200, message = "must be 1 to 200 characters"))]
    pub name: String,

    pub description: Option<String>,

    pub price: Decimal,

    pub image_url: Option<String>,

    pub category_id: i64,

    pub stock_quantity: i32,

    /// Numeric business status; omitted to keep the current one.
    pub business_status: Option<i32>,
}

impl ProductRequest {
    /// Convert to a service input, rejecting unknown status values.
    pub fn into_input(self) -> Result<ProductInput, DomainError> {
        let business_status = self
            .business_status
            .map(|value| {
                ProductStatus::from_i32(value).ok_or_else(|| {
                    ValidationError::invalid(format!("unknown business status {value}"))
                })
            })
            .transpose()?;

        Ok(ProductInput {
            name: self.name,
            description: self.description.unwrap_or_default(),
            price: self.price,
            image_url: self.image_url,
            category_id: self.category_id,
            stock_quantity: self.stock_quantity,
            business_status,
        })
    }
}

/// Query parameters for the paginated products-with-categories list.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListQuery {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub category_id: Option<i64>,
    pub search_text: Option<String>,
}

/// Query parameters for product search.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSearchQuery {
    pub search_term: String,
    pub category_id: Option<i64>,
}
