//! Command dispatcher.
//!
//! # Responsibility
//! - Map one parsed CLI invocation to one core operation.
//! - Parse raw prices and order tokens before the database is opened.
//!
//! # Invariants
//! - Every command except `init-db` requires an existing database file.
//! - The database path only flows through `Cli`, never global state.

use crate::cli::{Cli, Command, OutputFormat};
use crate::render;
use serde_json::json;
use shop_core::db::{open_db, open_existing_db, DbError};
use shop_core::{
    parse_order_lines, CatalogService, CustomerService, ErrorKind, Money, OrderService,
    RepoError, SqliteCustomerRepository, SqliteOrderRepository, SqliteProductRepository,
    ValidationError,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error(transparent)]
    Repo(#[from] RepoError),
    #[error("failed to render output: {0}")]
    Render(#[from] serde_json::Error),
}

impl From<DbError> for CliError {
    fn from(value: DbError) -> Self {
        Self::Repo(value.into())
    }
}

impl From<ValidationError> for CliError {
    fn from(value: ValidationError) -> Self {
        Self::Repo(value.into())
    }
}

impl From<clap::Error> for CliError {
    fn from(value: clap::Error) -> Self {
        let rendered = value.to_string();
        let message = rendered.trim_end();
        Self::Usage(message.strip_prefix("error: ").unwrap_or(message).to_string())
    }
}

impl CliError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Usage(_) => ErrorKind::InvalidInput,
            Self::Repo(err) => err.kind(),
            Self::Render(_) => ErrorKind::Storage,
        }
    }
}

/// Process exit code for a failed command.
pub fn exit_code(kind: ErrorKind) -> u8 {
    match kind {
        ErrorKind::Storage => 1,
        ErrorKind::InvalidInput => 2,
        ErrorKind::NotFound => 3,
        ErrorKind::InsufficientStock => 4,
        ErrorKind::InvalidQuantity => 5,
    }
}

/// Runs the parsed command and returns the text to print on stdout.
pub fn run(cli: &Cli) -> Result<String, CliError> {
    let format = cli.format;
    match &cli.command {
        Command::InitDb => {
            drop(open_db(&cli.db)?);
            done(
                format,
                format!("Initialized database at {}", cli.db.display()),
                json!({ "db": cli.db }),
            )
        }
        Command::AddProduct { name, price, stock } => {
            let price: Money = price.parse()?;
            let conn = open_existing_db(&cli.db)?;
            let catalog = CatalogService::new(SqliteProductRepository::try_new(&conn)?);
            let id = catalog.add_product(name.as_str(), price, *stock)?;
            done(
                format,
                format!("Added product {id}"),
                json!({ "product_id": id }),
            )
        }
        Command::ListProducts => {
            let conn = open_existing_db(&cli.db)?;
            let catalog = CatalogService::new(SqliteProductRepository::try_new(&conn)?);
            render::products(&catalog.list_products()?, format)
        }
        Command::UpdateStock { product_id, stock } => {
            let conn = open_existing_db(&cli.db)?;
            let catalog = CatalogService::new(SqliteProductRepository::try_new(&conn)?);
            catalog.update_stock(*product_id, *stock)?;
            done(
                format,
                format!("Updated stock for product {product_id}"),
                json!({ "product_id": product_id, "stock": stock }),
            )
        }
        Command::UpdatePrice { product_id, price } => {
            let price: Money = price.parse()?;
            let conn = open_existing_db(&cli.db)?;
            let catalog = CatalogService::new(SqliteProductRepository::try_new(&conn)?);
            catalog.update_price(*product_id, price)?;
            done(
                format,
                format!("Updated price for product {product_id}"),
                json!({ "product_id": product_id, "price": price }),
            )
        }
        Command::DeleteProduct { product_id } => {
            let conn = open_existing_db(&cli.db)?;
            let catalog = CatalogService::new(SqliteProductRepository::try_new(&conn)?);
            catalog.delete_product(*product_id)?;
            done(
                format,
                format!("Deleted product {product_id}"),
                json!({ "product_id": product_id }),
            )
        }
        Command::AddCustomer { name, email } => {
            let conn = open_existing_db(&cli.db)?;
            let customers = CustomerService::new(SqliteCustomerRepository::try_new(&conn)?);
            let id = customers.add_customer(name.as_str(), email.as_str())?;
            done(
                format,
                format!("Added customer {id}"),
                json!({ "customer_id": id }),
            )
        }
        Command::ListCustomers => {
            let conn = open_existing_db(&cli.db)?;
            let customers = CustomerService::new(SqliteCustomerRepository::try_new(&conn)?);
            render::customers(&customers.list_customers()?, format)
        }
        Command::CreateOrder { customer_id, lines } => {
            let lines = parse_order_lines(lines.as_slice())?;
            let mut conn = open_existing_db(&cli.db)?;
            let mut orders = OrderService::new(SqliteOrderRepository::try_new(&mut conn)?);
            let placed = orders.place_order(*customer_id, lines)?;
            match format {
                OutputFormat::Table => Ok(format!(
                    "Created order {} (total {})",
                    placed.order_id, placed.total
                )),
                OutputFormat::Json => Ok(serde_json::to_string_pretty(&placed)?),
            }
        }
        Command::ListOrders => {
            let mut conn = open_existing_db(&cli.db)?;
            let orders = OrderService::new(SqliteOrderRepository::try_new(&mut conn)?);
            render::orders(&orders.list_orders()?, format)
        }
        Command::ShowOrder { order_id } => {
            let mut conn = open_existing_db(&cli.db)?;
            let orders = OrderService::new(SqliteOrderRepository::try_new(&mut conn)?);
            render::order_detail(&orders.get_order(*order_id)?, format)
        }
    }
}

fn done(
    format: OutputFormat,
    text: String,
    value: serde_json::Value,
) -> Result<String, CliError> {
    match format {
        OutputFormat::Table => Ok(text),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&value)?),
    }
}

#[cfg(test)]
mod tests {
    use super::{exit_code, run, CliError};
    use crate::cli::{Cli, Command};
    use clap::Parser;
    use shop_core::ErrorKind;
    use std::path::Path;

    fn shop(db: &Path, args: &[&str]) -> Result<String, CliError> {
        let db = db.to_str().unwrap();
        let mut argv = vec!["shop", "--db", db];
        argv.extend_from_slice(args);
        run(&Cli::try_parse_from(argv).unwrap())
    }

    fn seeded_db() -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("shop.db");
        shop(&db, &["init-db"]).unwrap();
        assert_eq!(
            shop(&db, &["add-product", "Coffee Beans", "12.50", "20"]).unwrap(),
            "Added product 1"
        );
        assert_eq!(
            shop(&db, &["add-product", "Tea", "8.00", "10"]).unwrap(),
            "Added product 2"
        );
        assert_eq!(
            shop(&db, &["add-customer", "Jordan Lee", "jordan@example.com"]).unwrap(),
            "Added customer 1"
        );
        (dir, db)
    }

    #[test]
    fn init_db_creates_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("nested.db");
        let out = shop(&db, &["init-db"]).unwrap();
        assert!(out.starts_with("Initialized database at "));
        assert!(db.exists());
    }

    #[test]
    fn commands_require_an_initialized_database() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("missing.db");
        let err = shop(&db, &["list-products"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Storage);
        assert!(!db.exists());
    }

    #[test]
    fn scenario_order_flow_through_the_cli() {
        let (_dir, db) = seeded_db();

        let created = shop(&db, &["create-order", "1", "1:2", "2:1"]).unwrap();
        assert_eq!(created, "Created order 1 (total 33.00)");

        let products = shop(&db, &["list-products"]).unwrap();
        assert!(products.contains("Coffee Beans"));
        assert!(products.lines().any(|line| line.starts_with("1 ") && line.ends_with("18")));
        assert!(products.lines().any(|line| line.starts_with("2 ") && line.ends_with("9")));

        let orders = shop(&db, &["list-orders"]).unwrap();
        assert!(orders.contains("Jordan Lee"));
        assert!(orders.contains("33.00"));

        let detail = shop(&db, &["show-order", "1"]).unwrap();
        assert!(detail.contains("Total: 33.00"));
    }

    #[test]
    fn insufficient_stock_maps_to_its_own_exit_code() {
        let (_dir, db) = seeded_db();
        let err = shop(&db, &["create-order", "1", "2:11"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InsufficientStock);
        assert_eq!(exit_code(err.kind()), 4);
        assert!(err.to_string().contains("short by 1"));
    }

    #[test]
    fn malformed_tokens_and_prices_are_invalid_input() {
        let (_dir, db) = seeded_db();

        let token = shop(&db, &["create-order", "1", "1x2"]).unwrap_err();
        assert_eq!(token.kind(), ErrorKind::InvalidInput);

        let empty = shop(&db, &["create-order", "1"]).unwrap_err();
        assert_eq!(empty.kind(), ErrorKind::InvalidInput);

        let price = shop(&db, &["add-product", "Mate", "cheap", "1"]).unwrap_err();
        assert_eq!(price.kind(), ErrorKind::InvalidInput);

        let quantity = shop(&db, &["create-order", "1", "1:0"]).unwrap_err();
        assert_eq!(quantity.kind(), ErrorKind::InvalidQuantity);
        assert_eq!(exit_code(quantity.kind()), 5);
    }

    #[test]
    fn update_stock_on_missing_product_is_not_found() {
        let (_dir, db) = seeded_db();
        let err = shop(&db, &["update-stock", "42", "3"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(exit_code(err.kind()), 3);
    }

    #[test]
    fn json_listing_is_machine_readable() {
        let (_dir, db) = seeded_db();
        let out = shop(&db, &["--format", "json", "list-products"]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value[0]["name"], "Coffee Beans");
        assert_eq!(value[0]["price"], "12.50");
        assert_eq!(value[1]["stock"], 10);
    }

    #[test]
    fn delete_then_list_hides_product() {
        let (_dir, db) = seeded_db();
        assert_eq!(
            shop(&db, &["delete-product", "2"]).unwrap(),
            "Deleted product 2"
        );
        let products = shop(&db, &["list-products"]).unwrap();
        assert!(!products.contains("Tea"));
    }

    fn usage_error(args: &[&str]) -> CliError {
        let mut argv = vec!["shop"];
        argv.extend_from_slice(args);
        CliError::from(Cli::try_parse_from(argv).unwrap_err())
    }

    #[test]
    fn missing_argument_is_invalid_input() {
        let err = usage_error(&["add-customer", "Jordan"]);
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert_eq!(exit_code(err.kind()), 2);
        let message = err.to_string();
        assert!(message.contains("<EMAIL>"));
        assert!(!message.starts_with("error:"));
    }

    #[test]
    fn malformed_numeric_argument_is_invalid_input() {
        let err = usage_error(&["add-product", "Tea", "1.00", "abc"]);
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert!(err.to_string().contains("<STOCK>"));
    }

    #[test]
    fn negative_ids_reach_the_lookup() {
        let (_dir, db) = seeded_db();

        let deleted = shop(&db, &["delete-product", "-1"]).unwrap_err();
        assert_eq!(deleted.kind(), ErrorKind::NotFound);

        let shown = shop(&db, &["show-order", "-1"]).unwrap_err();
        assert_eq!(shown.kind(), ErrorKind::NotFound);

        let ordered = shop(&db, &["create-order", "-1", "1:1"]).unwrap_err();
        assert_eq!(ordered.kind(), ErrorKind::NotFound);

        let quantity = shop(&db, &["create-order", "1", "1:-2"]).unwrap_err();
        assert_eq!(quantity.kind(), ErrorKind::InvalidQuantity);
    }

    #[test]
    fn negative_delete_id_parses_as_a_value() {
        let cli = Cli::try_parse_from(["shop", "delete-product", "-1"]).unwrap();
        assert!(matches!(cli.command, Command::DeleteProduct { product_id: -1 }));
    }
}
