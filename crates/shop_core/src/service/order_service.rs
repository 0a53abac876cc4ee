//! Order use-case service.
//!
//! # Responsibility
//! - Run the order transaction and report its outcome.
//!
//! # Invariants
//! - Quantity checks finish before the repository is touched.

use super::log_failure;
use crate::model::customer::CustomerId;
use crate::model::order::{NewOrder, OrderDetail, OrderId, OrderLine, OrderSummary, PlacedOrder};
use crate::repo::order_repo::OrderRepository;
use crate::repo::{RepoError, RepoResult};
use log::info;
use std::time::Instant;

pub struct OrderService<R: OrderRepository> {
    repo: R,
}

impl<R: OrderRepository> OrderService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Places an order from already typed lines.
    pub fn place_order(
        &mut self,
        customer_id: CustomerId,
        lines: Vec<OrderLine>,
    ) -> RepoResult<PlacedOrder> {
        let started_at = Instant::now();
        let order = NewOrder::new(customer_id, lines);
        info!(
            "event=order_create module=order status=start customer_id={} lines={}",
            customer_id,
            order.lines.len()
        );

        match self.repo.create_order(&order) {
            Ok(placed) => {
                info!(
                    "event=order_create module=order status=ok order_id={} customer_id={} lines={} total_cents={} duration_ms={}",
                    placed.order_id,
                    customer_id,
                    placed.items.len(),
                    placed.total.cents(),
                    started_at.elapsed().as_millis()
                );
                Ok(placed)
            }
            Err(err) => {
                log_failure("order_create", "order", started_at, &err);
                Err(err)
            }
        }
    }

    /// Returns one order with its line items.
    pub fn get_order(&self, id: OrderId) -> RepoResult<OrderDetail> {
        self.repo
            .get_order(id)?
            .ok_or(RepoError::OrderNotFound(id))
    }

    pub fn list_orders(&self) -> RepoResult<Vec<OrderSummary>> {
        self.repo.list_orders()
    }
}
