//! Product entity and stock/status reconciliation

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::audit::AuditFields;
use crate::domain::slug::slugify;
use crate::errors::ValidationError;

/// Availability lifecycle of a product, distinct from the soft-delete
/// status on the audit fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductStatus {
    Draft = 1,
    Available = 2,
    OutOfStock = 3,
    Discontinued = 4,
}

impl ProductStatus {
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    pub fn from_i32(value: i32) -> Option<Self> {
        match value {
            1 => Some(Self::Draft),
            2 => Some(Self::Available),
            3 => Some(Self::OutOfStock),
            4 => Some(Self::Discontinued),
            _ => None,
        }
    }
}

/// A sellable item owned by exactly one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier, assigned by the store
    pub id: i64,

    pub name: String,

    pub description: String,

    /// URL-safe identifier, unique among non-deleted products
    pub slug: String,

    pub price: Decimal,

    pub image_url: Option<String>,

    /// Owning category (required foreign key)
    pub category_id: i64,

    /// On-hand quantity, never negative
    pub stock_quantity: i32,

    /// Availability lifecycle state
    pub business_status: ProductStatus,

    pub audit: AuditFields,
}

impl Product {
    /// Build a new product. Availability derives from the initial stock:
    /// positive stock starts `Available`, zero starts `OutOfStock`.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: &str,
        description: &str,
        price: Decimal,
        image_url: Option<String>,
        category_id: i64,
        stock_quantity: i32,
        actor: &str,
    ) -> Result<Self, ValidationError> {
        if stock_quantity < 0 {
            return Err(ValidationError::InvalidStockQuantity);
        }

        let business_status = if stock_quantity > 0 {
            ProductStatus::Available
        } else {
            ProductStatus::OutOfStock
        };

        Ok(Self {
            id: 0,
            name: name.to_string(),
            description: description.to_string(),
            slug: slugify(name),
            price,
            image_url,
            category_id,
            stock_quantity,
            business_status,
            audit: AuditFields::new(actor),
        })
    }

    /// Apply a stock change and reconcile the availability status.
    ///
    /// Rules, in order:
    /// 1. negative stock is rejected;
    /// 2. requesting `Available` at zero stock is rejected, the
    ///    contradiction is not silently corrected;
    /// 3. unless `Discontinued` was requested, zero stock forces
    ///    `OutOfStock` and positive stock recovers `Available` when the
    ///    previous status was `OutOfStock`;
    /// 4. `Discontinued` is sticky against the automatic transitions.
    pub fn reconcile_stock_and_status(
        &mut self,
        new_stock: i32,
        requested: ProductStatus,
    ) -> Result<(), ValidationError> {
        if new_stock < 0 {
            return Err(ValidationError::InvalidStockQuantity);
        }

        if requested == ProductStatus::Available && new_stock == 0 {
            return Err(ValidationError::business_rule(
                "Product cannot be Available with zero stock",
            ));
        }

        let previous = self.business_status;
        let mut next = requested;

        if requested != ProductStatus::Discontinued {
            if new_stock == 0 {
                next = ProductStatus::OutOfStock;
            } else if previous == ProductStatus::OutOfStock {
                next = ProductStatus::Available;
            }
        }

        self.stock_quantity = new_stock;
        self.business_status = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::SYSTEM_ACTOR;

    fn product(stock: i32) -> Product {
        Product::new(
            "F1 24",
            "racing",
            Decimal::new(5999, 2),
            None,
            1,
            stock,
            SYSTEM_ACTOR,
        )
        .unwrap()
    }

    #[test]
    fn new_product_with_zero_stock_starts_out_of_stock() {
        assert_eq!(product(0).business_status, ProductStatus::OutOfStock);
        assert_eq!(product(5).business_status, ProductStatus::Available);
    }

    #[test]
    fn negative_stock_is_rejected() {
        assert_eq!(
            Product::new("x", "", Decimal::ZERO, None, 1, -1, SYSTEM_ACTOR).unwrap_err(),
            ValidationError::InvalidStockQuantity
        );

        let mut p = product(5);
        assert!(p
            .reconcile_stock_and_status(-1, ProductStatus::Available)
            .is_err());
    }

    #[test]
    fn available_with_zero_stock_is_rejected() {
        let mut p = product(5);
        let err = p
            .reconcile_stock_and_status(0, ProductStatus::Available)
            .unwrap_err();
        assert!(matches!(err, ValidationError::BusinessRuleViolation { .. }));
        // the failed call must not have mutated the product
        assert_eq!(p.stock_quantity, 5);
        assert_eq!(p.business_status, ProductStatus::Available);
    }

    #[test]
    fn zero_stock_forces_out_of_stock() {
        let mut p = product(5);
        p.reconcile_stock_and_status(0, ProductStatus::OutOfStock)
            .unwrap();
        assert_eq!(p.business_status, ProductStatus::OutOfStock);
    }

    #[test]
    fn restock_recovers_availability() {
        let mut p = product(0);
        assert_eq!(p.business_status, ProductStatus::OutOfStock);
        p.reconcile_stock_and_status(5, p.business_status).unwrap();
        assert_eq!(p.business_status, ProductStatus::Available);
        assert_eq!(p.stock_quantity, 5);
    }

    #[test]
    fn discontinued_is_sticky() {
        let mut p = product(5);
        p.reconcile_stock_and_status(5, ProductStatus::Discontinued)
            .unwrap();
        assert_eq!(p.business_status, ProductStatus::Discontinued);

        // restocking a discontinued product keeps it discontinued
        p.reconcile_stock_and_status(10, ProductStatus::Discontinued)
            .unwrap();
        assert_eq!(p.business_status, ProductStatus::Discontinued);

        // and zero stock does not flip it to out-of-stock
        p.reconcile_stock_and_status(0, ProductStatus::Discontinued)
            .unwrap();
        assert_eq!(p.business_status, ProductStatus::Discontinued);
    }

    #[test]
    fn reconcile_is_idempotent_for_available() {
        let mut p = product(5);
        p.reconcile_stock_and_status(3, ProductStatus::Available)
            .unwrap();
        let first = p.business_status;
        p.reconcile_stock_and_status(3, ProductStatus::Available)
            .unwrap();
        assert_eq!(p.business_status, first);
        assert_eq!(p.business_status, ProductStatus::Available);
    }
}
