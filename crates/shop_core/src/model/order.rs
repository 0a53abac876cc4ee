//! Order and line-item domain model.
//!
//! # Responsibility
//! - Parse `product_id:quantity` tokens into typed order lines.
//! - Describe placed orders, their line items and derived totals.
//!
//! # Invariants
//! - An order has at least one line and every quantity is > 0.
//! - A line item's `unit_price` is captured at order time and never
//!   follows later product price changes.
//! - Order totals are derived from line items, never stored.

use crate::model::customer::CustomerId;
use crate::model::money::Money;
use crate::model::product::ProductId;
use crate::model::validation::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

static ORDER_LINE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+):(-?\d+)$").expect("valid order line regex"));

/// System-assigned order identifier.
pub type OrderId = i64;

/// One requested `(product, quantity)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub product_id: ProductId,
    pub quantity: i64,
}

impl OrderLine {
    pub fn new(product_id: ProductId, quantity: i64) -> Self {
        Self {
            product_id,
            quantity,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.quantity <= 0 {
            return Err(ValidationError::InvalidQuantity {
                product_id: self.product_id,
                quantity: self.quantity,
            });
        }
        Ok(())
    }
}

/// Parses `product_id:quantity`.
///
/// Shape errors are `MalformedOrderLine`; a well-formed token with a
/// non-positive quantity is `InvalidQuantity`.
impl FromStr for OrderLine {
    type Err = ValidationError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let malformed = || ValidationError::MalformedOrderLine(raw.to_string());
        let captures = ORDER_LINE_RE.captures(raw.trim()).ok_or_else(malformed)?;
        let product_id: ProductId = captures[1].parse().map_err(|_| malformed())?;
        let quantity: i64 = captures[2].parse().map_err(|_| malformed())?;

        let line = OrderLine::new(product_id, quantity);
        line.validate()?;
        Ok(line)
    }
}

/// Parses every raw token, failing on the first bad one.
pub fn parse_order_lines<S: AsRef<str>>(raw_lines: &[S]) -> Result<Vec<OrderLine>, ValidationError> {
    let lines = raw_lines
        .iter()
        .map(|raw| raw.as_ref().parse::<OrderLine>())
        .collect::<Result<Vec<_>, _>>()?;
    if lines.is_empty() {
        return Err(ValidationError::EmptyOrder);
    }
    Ok(lines)
}

/// Order request handed to the order transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub customer_id: CustomerId,
    pub lines: Vec<OrderLine>,
}

impl NewOrder {
    pub fn new(customer_id: CustomerId, lines: Vec<OrderLine>) -> Self {
        Self { customer_id, lines }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.lines.is_empty() {
            return Err(ValidationError::EmptyOrder);
        }
        self.lines.iter().try_for_each(OrderLine::validate)
    }
}

/// Persisted line item with its captured unit price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub product_id: ProductId,
    pub quantity: i64,
    pub unit_price: Money,
}

impl LineItem {
    pub fn line_total(&self) -> Result<Money, ValidationError> {
        self.unit_price
            .checked_mul(self.quantity)
            .ok_or(ValidationError::AmountOverflow("line total"))
    }
}

/// Sums `quantity * unit_price` over all items.
pub fn order_total(items: &[LineItem]) -> Result<Money, ValidationError> {
    items.iter().try_fold(Money::ZERO, |total, item| {
        total
            .checked_add(item.line_total()?)
            .ok_or(ValidationError::AmountOverflow("order total"))
    })
}

/// Result of a committed order transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedOrder {
    pub order_id: OrderId,
    pub customer_id: CustomerId,
    pub items: Vec<LineItem>,
    pub total: Money,
}

/// Listing projection of one order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSummary {
    pub id: OrderId,
    pub customer_id: CustomerId,
    pub customer_name: String,
    /// Unix epoch milliseconds assigned by the database.
    pub created_at: i64,
    pub total: Money,
}

/// Order header plus line items in insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDetail {
    #[serde(flatten)]
    pub summary: OrderSummary,
    pub items: Vec<LineItem>,
}
