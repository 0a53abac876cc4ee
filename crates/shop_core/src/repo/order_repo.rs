//! Order repository and the order transaction.
//!
//! # Responsibility
//! - Record an order, its line items and the matching stock decrements as
//!   one atomic unit.
//! - Provide order listings with totals derived from line items.
//!
//! # Invariants
//! - `create_order` runs inside a single `IMMEDIATE` transaction; any
//!   failure drops the transaction so no order row, line item or stock
//!   change survives.
//! - Stock checks see decrements made by earlier lines of the same order.
//! - Line items copy the product price at order time.

use super::{ensure_connection_ready, RepoError, RepoResult};
use crate::model::customer::CustomerId;
use crate::model::money::Money;
use crate::model::order::{
    order_total, LineItem, NewOrder, OrderDetail, OrderId, OrderSummary, PlacedOrder,
};
use crate::model::product::ProductId;
use rusqlite::{params, Connection, OptionalExtension, Row, Transaction, TransactionBehavior};

const ORDER_SUMMARY_SELECT_SQL: &str = "SELECT
    o.id,
    o.customer_id,
    c.name AS customer_name,
    o.created_at,
    COALESCE(SUM(oi.quantity * oi.unit_price_cents), 0) AS total_cents
FROM orders o
INNER JOIN customers c ON c.id = o.customer_id
LEFT JOIN order_items oi ON oi.order_id = o.id";

/// Repository interface for orders.
pub trait OrderRepository {
    /// Runs the order transaction.
    fn create_order(&mut self, order: &NewOrder) -> RepoResult<PlacedOrder>;
    fn get_order(&self, id: OrderId) -> RepoResult<Option<OrderDetail>>;
    /// Lists orders ordered by id, each with its derived total.
    fn list_orders(&self) -> RepoResult<Vec<OrderSummary>>;
}

/// SQLite-backed order repository.
pub struct SqliteOrderRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteOrderRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn mut Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl OrderRepository for SqliteOrderRepository<'_> {
    fn create_order(&mut self, order: &NewOrder) -> RepoResult<PlacedOrder> {
        order.validate()?;

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        if !customer_exists_in_tx(&tx, order.customer_id)? {
            return Err(RepoError::CustomerNotFound(order.customer_id));
        }

        tx.execute(
            "INSERT INTO orders (customer_id) VALUES (?1);",
            [order.customer_id],
        )?;
        let order_id = tx.last_insert_rowid();

        let mut items = Vec::with_capacity(order.lines.len());
        for line in &order.lines {
            let (unit_price, available) = load_product_in_tx(&tx, line.product_id)?
                .ok_or(RepoError::ProductNotFound(line.product_id))?;
            if available < line.quantity {
                return Err(RepoError::InsufficientStock {
                    product_id: line.product_id,
                    requested: line.quantity,
                    available,
                    shortfall: line.quantity - available,
                });
            }

            tx.execute(
                "INSERT INTO order_items (order_id, product_id, quantity, unit_price_cents)
                 VALUES (?1, ?2, ?3, ?4);",
                params![order_id, line.product_id, line.quantity, unit_price],
            )?;
            tx.execute(
                "UPDATE products
                 SET
                    stock = stock - ?2,
                    updated_at = (strftime('%s', 'now') * 1000)
                 WHERE id = ?1;",
                params![line.product_id, line.quantity],
            )?;

            items.push(LineItem {
                product_id: line.product_id,
                quantity: line.quantity,
                unit_price,
            });
        }

        let total = order_total(&items)?;
        tx.commit()?;

        Ok(PlacedOrder {
            order_id,
            customer_id: order.customer_id,
            items,
            total,
        })
    }

    fn get_order(&self, id: OrderId) -> RepoResult<Option<OrderDetail>> {
        let summary = self
            .conn
            .query_row(
                &format!(
                    "{ORDER_SUMMARY_SELECT_SQL}
                     WHERE o.id = ?1
                     GROUP BY o.id;"
                ),
                [id],
                parse_summary_row,
            )
            .optional()?;
        let Some(summary) = summary else {
            return Ok(None);
        };

        let mut stmt = self.conn.prepare(
            "SELECT product_id, quantity, unit_price_cents
             FROM order_items
             WHERE order_id = ?1
             ORDER BY id ASC;",
        )?;
        let items = stmt
            .query_map([id], |row| {
                Ok(LineItem {
                    product_id: row.get("product_id")?,
                    quantity: row.get("quantity")?,
                    unit_price: row.get("unit_price_cents")?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        if items.is_empty() {
            return Err(RepoError::InvalidData(format!(
                "order {id} has no line items"
            )));
        }

        Ok(Some(OrderDetail { summary, items }))
    }

    fn list_orders(&self) -> RepoResult<Vec<OrderSummary>> {
        let mut stmt = self.conn.prepare(&format!(
            "{ORDER_SUMMARY_SELECT_SQL}
             GROUP BY o.id
             ORDER BY o.id ASC;"
        ))?;
        let orders = stmt
            .query_map([], parse_summary_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(orders)
    }
}

fn parse_summary_row(row: &Row<'_>) -> rusqlite::Result<OrderSummary> {
    Ok(OrderSummary {
        id: row.get("id")?,
        customer_id: row.get("customer_id")?,
        customer_name: row.get("customer_name")?,
        created_at: row.get("created_at")?,
        total: row.get::<_, Money>("total_cents")?,
    })
}

fn customer_exists_in_tx(tx: &Transaction<'_>, customer_id: CustomerId) -> RepoResult<bool> {
    let exists: i64 = tx.query_row(
        "SELECT EXISTS(SELECT 1 FROM customers WHERE id = ?1);",
        [customer_id],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

/// Returns `(price, stock)` for a live product as seen by the transaction.
fn load_product_in_tx(
    tx: &Transaction<'_>,
    product_id: ProductId,
) -> RepoResult<Option<(Money, i64)>> {
    let product = tx
        .query_row(
            "SELECT price_cents, stock
             FROM products
             WHERE id = ?1
               AND is_deleted = 0;",
            [product_id],
            |row| Ok((row.get::<_, Money>(0)?, row.get::<_, i64>(1)?)),
        )
        .optional()?;
    Ok(product)
}
