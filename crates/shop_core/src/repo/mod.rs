//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Write paths validate input before any SQL mutation.
//! - Repository APIs return semantic errors (`*NotFound`,
//!   `InsufficientStock`) in addition to DB transport errors.
//! - Repositories only accept connections with migrations applied.

use crate::db::migrations::{current_user_version, latest_version};
use crate::db::DbError;
use crate::error::ErrorKind;
use crate::model::customer::CustomerId;
use crate::model::order::OrderId;
use crate::model::product::ProductId;
use crate::model::validation::ValidationError;
use rusqlite::Connection;
use thiserror::Error;

pub mod customer_repo;
pub mod order_repo;
pub mod product_repo;

pub type RepoResult<T> = Result<T, RepoError>;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Db(#[from] DbError),
    #[error("product not found: {0}")]
    ProductNotFound(ProductId),
    #[error("customer not found: {0}")]
    CustomerNotFound(CustomerId),
    #[error("order not found: {0}")]
    OrderNotFound(OrderId),
    #[error(
        "insufficient stock for product {product_id}: requested {requested}, available {available}, short by {shortfall}"
    )]
    InsufficientStock {
        product_id: ProductId,
        requested: i64,
        available: i64,
        shortfall: i64,
    },
    #[error("invalid persisted data: {0}")]
    InvalidData(String),
    #[error(
        "connection is not initialized: schema version {actual_version}, expected {expected_version}"
    )]
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    #[error("required table `{0}` is missing")]
    MissingRequiredTable(&'static str),
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl RepoError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(err) => err.kind(),
            Self::ProductNotFound(_) | Self::CustomerNotFound(_) | Self::OrderNotFound(_) => {
                ErrorKind::NotFound
            }
            Self::InsufficientStock { .. } => ErrorKind::InsufficientStock,
            Self::Db(_)
            | Self::InvalidData(_)
            | Self::UninitializedConnection { .. }
            | Self::MissingRequiredTable(_) => ErrorKind::Storage,
        }
    }
}

const REQUIRED_TABLES: [&str; 4] = ["products", "customers", "orders", "order_items"];

/// Verifies the connection was opened through `db::open_*`.
fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version = current_user_version(conn)?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    for table in REQUIRED_TABLES {
        if !table_exists(conn, table)? {
            return Err(RepoError::MissingRequiredTable(table));
        }
    }
    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}
