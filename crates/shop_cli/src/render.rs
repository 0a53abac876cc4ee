//! Console rendering for listings.
//!
//! Tables are fixed-width with trailing whitespace trimmed; JSON output is
//! the serde form of the core records.

use crate::cli::OutputFormat;
use crate::commands::CliError;
use chrono::{DateTime, SecondsFormat};
use serde::Serialize;
use shop_core::{Customer, OrderDetail, OrderSummary, Product};

pub fn products(products: &[Product], format: OutputFormat) -> Result<String, CliError> {
    if format == OutputFormat::Json {
        return json(products);
    }

    let mut rows = vec![
        format!("{:<4}{:<21}{:>9}  {}", "ID", "Name", "Price", "Stock"),
        format!("{:<4}{:<21}{:>9}  {}", "--", "-".repeat(19), "-".repeat(7), "-----"),
    ];
    for product in products {
        rows.push(format!(
            "{:<4}{:<21}{:>9}  {}",
            product.id,
            product.name,
            product.price.to_string(),
            product.stock
        ));
    }
    Ok(table(rows))
}

pub fn customers(customers: &[Customer], format: OutputFormat) -> Result<String, CliError> {
    if format == OutputFormat::Json {
        return json(customers);
    }

    let mut rows = vec![
        format!("{:<4}{:<21}{}", "ID", "Name", "Email"),
        format!("{:<4}{:<21}{}", "--", "-".repeat(19), "-".repeat(25)),
    ];
    for customer in customers {
        rows.push(format!(
            "{:<4}{:<21}{}",
            customer.id, customer.name, customer.email
        ));
    }
    Ok(table(rows))
}

pub fn orders(orders: &[OrderSummary], format: OutputFormat) -> Result<String, CliError> {
    if format == OutputFormat::Json {
        return json(orders);
    }

    let mut rows = vec![
        format!("{:<4}{:<22}{:<20}{:>9}", "ID", "Created At", "Customer", "Total"),
        format!(
            "{:<4}{:<22}{:<20}{:>9}",
            "--",
            "-".repeat(20),
            "-".repeat(18),
            "-".repeat(7)
        ),
    ];
    for order in orders {
        rows.push(format!(
            "{:<4}{:<22}{:<20}{:>9}",
            order.id,
            timestamp(order.created_at),
            order.customer_name,
            order.total.to_string()
        ));
    }
    Ok(table(rows))
}

pub fn order_detail(detail: &OrderDetail, format: OutputFormat) -> Result<String, CliError> {
    if format == OutputFormat::Json {
        return json(detail);
    }

    let summary = &detail.summary;
    let header = format!(
        "Order {} for {} (customer {}) at {}",
        summary.id,
        summary.customer_name,
        summary.customer_id,
        timestamp(summary.created_at)
    );

    let mut rows = vec![
        format!("{:<10}{:>8}{:>12}{:>12}", "Product", "Qty", "Unit Price", "Line Total"),
        format!(
            "{:<10}{:>8}{:>12}{:>12}",
            "-".repeat(7),
            "---",
            "-".repeat(10),
            "-".repeat(10)
        ),
    ];
    for item in &detail.items {
        rows.push(format!(
            "{:<10}{:>8}{:>12}{:>12}",
            item.product_id,
            item.quantity,
            item.unit_price.to_string(),
            item.line_total()?.to_string()
        ));
    }
    Ok(format!("{header}\n{}\nTotal: {}", table(rows), summary.total))
}

fn json<T: Serialize + ?Sized>(value: &T) -> Result<String, CliError> {
    Ok(serde_json::to_string_pretty(value)?)
}

fn table(rows: Vec<String>) -> String {
    rows.iter()
        .map(|row| row.trim_end())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Renders epoch milliseconds as RFC 3339 UTC, falling back to the raw value.
fn timestamp(epoch_ms: i64) -> String {
    DateTime::from_timestamp_millis(epoch_ms)
        .map(|at| at.to_rfc3339_opts(SecondsFormat::Secs, true))
        .unwrap_or_else(|| epoch_ms.to_string())
}

#[cfg(test)]
mod tests {
    use super::{customers, order_detail, products, timestamp};
    use crate::cli::OutputFormat;
    use shop_core::{Customer, LineItem, Money, OrderDetail, OrderSummary, Product};

    #[test]
    fn product_table_has_header_and_trimmed_rows() {
        let rendered = products(
            &[Product {
                id: 1,
                name: "Coffee Beans".to_string(),
                price: Money::from_cents(1250),
                stock: 20,
            }],
            OutputFormat::Table,
        )
        .unwrap();

        let lines: Vec<_> = rendered.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("ID  Name"));
        assert_eq!(lines[2], "1   Coffee Beans             12.50  20");
        assert!(lines.iter().all(|line| !line.ends_with(' ')));
    }

    #[test]
    fn empty_customer_table_is_just_the_header() {
        let rendered = customers(&[], OutputFormat::Table).unwrap();
        assert_eq!(rendered.lines().count(), 2);
    }

    #[test]
    fn customers_render_as_json_array() {
        let rendered = customers(
            &[Customer {
                id: 1,
                name: "Jordan Lee".to_string(),
                email: "jordan@example.com".to_string(),
            }],
            OutputFormat::Json,
        )
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(value[0]["email"], "jordan@example.com");
    }

    #[test]
    fn order_detail_lists_items_and_total() {
        let detail = OrderDetail {
            summary: OrderSummary {
                id: 1,
                customer_id: 1,
                customer_name: "Jordan Lee".to_string(),
                created_at: 0,
                total: Money::from_cents(3300),
            },
            items: vec![
                LineItem {
                    product_id: 1,
                    quantity: 2,
                    unit_price: Money::from_cents(1250),
                },
                LineItem {
                    product_id: 2,
                    quantity: 1,
                    unit_price: Money::from_cents(800),
                },
            ],
        };

        let rendered = order_detail(&detail, OutputFormat::Table).unwrap();
        assert!(rendered.starts_with("Order 1 for Jordan Lee (customer 1) at 1970-01-01T00:00:00Z"));
        assert!(rendered.contains("25.00"));
        assert!(rendered.ends_with("Total: 33.00"));

        let lines: Vec<_> = rendered.lines().collect();
        assert_eq!(lines.len(), 6);
        assert!(lines[1].starts_with("Product"));
        assert_eq!(lines[3], "1                2       12.50       25.00");
    }

    #[test]
    fn timestamp_renders_utc() {
        assert_eq!(timestamp(1_700_000_000_000), "2023-11-14T22:13:20Z");
    }
}
