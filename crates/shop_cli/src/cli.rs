//! Command-line surface.
//!
//! # Responsibility
//! - Declare global options and subcommands.
//! - Keep raw user text (prices, order tokens) as strings; typed parsing
//!   happens in the dispatcher so errors carry shop error kinds.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "shop",
    version,
    about = "Manage shop inventory, customers, and orders."
)]
pub struct Cli {
    /// Path to the SQLite database.
    #[arg(long, global = true, env = "SHOP_DB", default_value = "shop.db")]
    pub db: PathBuf,

    /// Output format for listings and command results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Log level: trace|debug|info|warn|error.
    #[arg(long, global = true, env = "SHOP_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Absolute directory for rolling log files. Logs go to stderr when unset.
    #[arg(long, global = true, env = "SHOP_LOG_DIR")]
    pub log_dir: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Initialize the database schema.
    InitDb,
    /// Add a new product.
    #[command(allow_negative_numbers = true)]
    AddProduct {
        name: String,
        /// Unit price, e.g. 12.50
        price: String,
        /// Initial stock quantity.
        stock: i64,
    },
    /// List products.
    ListProducts,
    /// Overwrite the stock level of a product.
    #[command(allow_negative_numbers = true)]
    UpdateStock { product_id: i64, stock: i64 },
    /// Change the current price of a product.
    #[command(allow_negative_numbers = true)]
    UpdatePrice { product_id: i64, price: String },
    /// Delete a product. Past orders keep referencing it.
    #[command(allow_negative_numbers = true)]
    DeleteProduct { product_id: i64 },
    /// Add a customer.
    AddCustomer { name: String, email: String },
    /// List customers.
    ListCustomers,
    /// Create an order.
    #[command(allow_negative_numbers = true)]
    CreateOrder {
        customer_id: i64,
        /// Order lines formatted as product_id:quantity
        lines: Vec<String>,
    },
    /// List orders with totals.
    ListOrders,
    /// Show one order with its line items.
    #[command(allow_negative_numbers = true)]
    ShowOrder { order_id: i64 },
}

impl Command {
    /// Stable subcommand name used in log events.
    pub fn name(&self) -> &'static str {
        match self {
            Self::InitDb => "init-db",
            Self::AddProduct { .. } => "add-product",
            Self::ListProducts => "list-products",
            Self::UpdateStock { .. } => "update-stock",
            Self::UpdatePrice { .. } => "update-price",
            Self::DeleteProduct { .. } => "delete-product",
            Self::AddCustomer { .. } => "add-customer",
            Self::ListCustomers => "list-customers",
            Self::CreateOrder { .. } => "create-order",
            Self::ListOrders => "list-orders",
            Self::ShowOrder { .. } => "show-order",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command, OutputFormat};
    use clap::{CommandFactory, Parser};
    use std::path::PathBuf;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_options_default_to_shop_db_and_table() {
        let cli = Cli::try_parse_from(["shop", "list-products"]).unwrap();
        assert_eq!(cli.db, PathBuf::from("shop.db"));
        assert_eq!(cli.format, OutputFormat::Table);
        assert!(matches!(cli.command, Command::ListProducts));
        assert_eq!(cli.command.name(), "list-products");
    }

    #[test]
    fn negative_positionals_reach_validation() {
        let cli = Cli::try_parse_from(["shop", "add-product", "Tea", "-1.00", "-3"]).unwrap();
        match cli.command {
            Command::AddProduct { name, price, stock } => {
                assert_eq!(name, "Tea");
                assert_eq!(price, "-1.00");
                assert_eq!(stock, -3);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn create_order_collects_line_tokens() {
        let cli = Cli::try_parse_from([
            "shop", "--db", "/tmp/x.db", "create-order", "1", "1:2", "2:1",
        ])
        .unwrap();
        assert_eq!(cli.db, PathBuf::from("/tmp/x.db"));
        match cli.command {
            Command::CreateOrder { customer_id, lines } => {
                assert_eq!(customer_id, 1);
                assert_eq!(lines, vec!["1:2", "2:1"]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn missing_required_argument_is_a_usage_error() {
        assert!(Cli::try_parse_from(["shop", "add-customer", "Jordan"]).is_err());
    }
}
