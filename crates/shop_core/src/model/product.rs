//! Product domain model.
//!
//! # Invariants
//! - `price` is never negative.
//! - `stock` is never negative.

use crate::model::money::Money;
use crate::model::validation::{require_text, ValidationError};
use serde::{Deserialize, Serialize};

/// System-assigned product identifier.
pub type ProductId = i64;

/// Persisted product row as seen by listing and lookups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Current unit price. Orders copy this value into their line items.
    pub price: Money,
    pub stock: i64,
}

/// Input for creating a product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub name: String,
    pub price: Money,
    pub stock: i64,
}

impl NewProduct {
    pub fn new(name: impl Into<String>, price: Money, stock: i64) -> Self {
        Self {
            name: name.into(),
            price,
            stock,
        }
    }

    /// Checks name, price and initial stock.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("product name", &self.name)?;
        validate_price(self.price)?;
        validate_stock(self.stock)
    }
}

pub fn validate_price(price: Money) -> Result<(), ValidationError> {
    if price.is_negative() {
        return Err(ValidationError::NegativePrice(price));
    }
    Ok(())
}

pub fn validate_stock(stock: i64) -> Result<(), ValidationError> {
    if stock < 0 {
        return Err(ValidationError::NegativeStock(stock));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::NewProduct;
    use crate::error::ErrorKind;
    use crate::model::money::Money;
    use crate::model::validation::ValidationError;

    #[test]
    fn validate_accepts_zero_price_and_zero_stock() {
        NewProduct::new("Sample", Money::ZERO, 0).validate().unwrap();
    }

    #[test]
    fn validate_rejects_negative_values_with_distinct_kinds() {
        let price_err = NewProduct::new("Tea", Money::from_cents(-1), 3)
            .validate()
            .unwrap_err();
        assert_eq!(price_err, ValidationError::NegativePrice(Money::from_cents(-1)));
        assert_eq!(price_err.kind(), ErrorKind::InvalidInput);

        let stock_err = NewProduct::new("Tea", Money::from_cents(800), -4)
            .validate()
            .unwrap_err();
        assert_eq!(stock_err, ValidationError::NegativeStock(-4));
        assert_eq!(stock_err.kind(), ErrorKind::InvalidQuantity);
    }

    #[test]
    fn validate_rejects_blank_name() {
        let err = NewProduct::new("   ", Money::from_cents(100), 1)
            .validate()
            .unwrap_err();
        assert_eq!(err, ValidationError::EmptyField("product name"));
    }
}
