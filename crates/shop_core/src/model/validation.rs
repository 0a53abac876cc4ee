//! Input validation errors raised before any persistence work.
//!
//! # Invariants
//! - Every variant carries the offending value so callers can report it.
//! - Validation never touches the database.

use crate::error::ErrorKind;
use crate::model::money::Money;
use crate::model::product::ProductId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} must not be empty")]
    EmptyField(&'static str),
    #[error("price must be >= 0, got {0}")]
    NegativePrice(Money),
    #[error("stock must be >= 0, got {0}")]
    NegativeStock(i64),
    #[error("quantity for product {product_id} must be > 0, got {quantity}")]
    InvalidQuantity { product_id: ProductId, quantity: i64 },
    #[error("invalid price `{0}`; expected a decimal amount with at most two fractional digits")]
    MalformedPrice(String),
    #[error("invalid order line `{0}`; expected product_id:quantity")]
    MalformedOrderLine(String),
    #[error("an order requires at least one line item")]
    EmptyOrder,
    #[error("amount overflow while computing {0}")]
    AmountOverflow(&'static str),
}

impl ValidationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NegativeStock(_) | Self::InvalidQuantity { .. } => ErrorKind::InvalidQuantity,
            Self::EmptyField(_)
            | Self::NegativePrice(_)
            | Self::MalformedPrice(_)
            | Self::MalformedOrderLine(_)
            | Self::EmptyOrder
            | Self::AmountOverflow(_) => ErrorKind::InvalidInput,
        }
    }
}

/// Rejects blank text fields.
pub(crate) fn require_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyField(field));
    }
    Ok(())
}
