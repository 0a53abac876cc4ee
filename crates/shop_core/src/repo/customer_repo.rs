//! Customer repository contracts and SQLite implementation.

use super::{ensure_connection_ready, RepoResult};
use crate::model::customer::{Customer, CustomerId, NewCustomer};
use rusqlite::{params, Connection, OptionalExtension, Row};

/// Repository interface for customer operations.
pub trait CustomerRepository {
    fn create_customer(&self, customer: &NewCustomer) -> RepoResult<CustomerId>;
    fn get_customer(&self, id: CustomerId) -> RepoResult<Option<Customer>>;
    /// Lists all customers ordered by id.
    fn list_customers(&self) -> RepoResult<Vec<Customer>>;
}

/// SQLite-backed customer repository.
pub struct SqliteCustomerRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCustomerRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl CustomerRepository for SqliteCustomerRepository<'_> {
    fn create_customer(&self, customer: &NewCustomer) -> RepoResult<CustomerId> {
        customer.validate()?;

        self.conn.execute(
            "INSERT INTO customers (name, email) VALUES (?1, ?2);",
            params![customer.name.as_str(), customer.email.as_str()],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn get_customer(&self, id: CustomerId) -> RepoResult<Option<Customer>> {
        let customer = self
            .conn
            .query_row(
                "SELECT id, name, email FROM customers WHERE id = ?1;",
                [id],
                parse_customer_row,
            )
            .optional()?;
        Ok(customer)
    }

    fn list_customers(&self) -> RepoResult<Vec<Customer>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, email FROM customers ORDER BY id ASC;")?;
        let customers = stmt
            .query_map([], parse_customer_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(customers)
    }
}

fn parse_customer_row(row: &Row<'_>) -> rusqlite::Result<Customer> {
    Ok(Customer {
        id: row.get("id")?,
        name: row.get("name")?,
        email: row.get("email")?,
    })
}
