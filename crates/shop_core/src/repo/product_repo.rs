//! Product repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD APIs over the `products` table.
//! - Keep tombstoned rows out of every read and write path.
//!
//! # Invariants
//! - Write paths validate price/stock before SQL mutations.
//! - Deletion is a soft delete so historical line items keep their product.
//! - Read paths reject invalid persisted state instead of masking it.

use super::{ensure_connection_ready, RepoError, RepoResult};
use crate::model::money::Money;
use crate::model::product::{validate_price, validate_stock, NewProduct, Product, ProductId};
use rusqlite::{params, Connection, OptionalExtension, Row};

const PRODUCT_SELECT_SQL: &str = "SELECT
    id,
    name,
    price_cents,
    stock
FROM products";

/// Repository interface for product operations.
pub trait ProductRepository {
    fn create_product(&self, product: &NewProduct) -> RepoResult<ProductId>;
    fn get_product(&self, id: ProductId) -> RepoResult<Option<Product>>;
    /// Lists live products ordered by id.
    fn list_products(&self) -> RepoResult<Vec<Product>>;
    fn update_stock(&self, id: ProductId, stock: i64) -> RepoResult<()>;
    fn update_price(&self, id: ProductId, price: Money) -> RepoResult<()>;
    /// Tombstones a product. Repeating the call on the same id succeeds.
    fn delete_product(&self, id: ProductId) -> RepoResult<()>;
}

/// SQLite-backed product repository.
pub struct SqliteProductRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteProductRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl ProductRepository for SqliteProductRepository<'_> {
    fn create_product(&self, product: &NewProduct) -> RepoResult<ProductId> {
        product.validate()?;

        self.conn.execute(
            "INSERT INTO products (name, price_cents, stock) VALUES (?1, ?2, ?3);",
            params![product.name.as_str(), product.price, product.stock],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn get_product(&self, id: ProductId) -> RepoResult<Option<Product>> {
        let mut stmt = self.conn.prepare(&format!(
            "{PRODUCT_SELECT_SQL}
             WHERE id = ?1
               AND is_deleted = 0;"
        ))?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_product_row(row)?));
        }

        Ok(None)
    }

    fn list_products(&self) -> RepoResult<Vec<Product>> {
        let mut stmt = self.conn.prepare(&format!(
            "{PRODUCT_SELECT_SQL}
             WHERE is_deleted = 0
             ORDER BY id ASC;"
        ))?;
        let mut rows = stmt.query([])?;
        let mut products = Vec::new();

        while let Some(row) = rows.next()? {
            products.push(parse_product_row(row)?);
        }

        Ok(products)
    }

    fn update_stock(&self, id: ProductId, stock: i64) -> RepoResult<()> {
        validate_stock(stock)?;

        let changed = self.conn.execute(
            "UPDATE products
             SET
                stock = ?2,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?1
               AND is_deleted = 0;",
            params![id, stock],
        )?;

        if changed == 0 {
            return Err(RepoError::ProductNotFound(id));
        }

        Ok(())
    }

    fn update_price(&self, id: ProductId, price: Money) -> RepoResult<()> {
        validate_price(price)?;

        let changed = self.conn.execute(
            "UPDATE products
             SET
                price_cents = ?2,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?1
               AND is_deleted = 0;",
            params![id, price],
        )?;

        if changed == 0 {
            return Err(RepoError::ProductNotFound(id));
        }

        Ok(())
    }

    fn delete_product(&self, id: ProductId) -> RepoResult<()> {
        let exists = self
            .conn
            .query_row("SELECT 1 FROM products WHERE id = ?1;", [id], |_| Ok(()))
            .optional()?;
        if exists.is_none() {
            return Err(RepoError::ProductNotFound(id));
        }

        self.conn.execute(
            "UPDATE products
             SET
                is_deleted = 1,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?1
               AND is_deleted = 0;",
            [id],
        )?;

        Ok(())
    }
}

fn parse_product_row(row: &Row<'_>) -> RepoResult<Product> {
    let id: ProductId = row.get("id")?;
    let price: Money = row.get("price_cents")?;
    if price.is_negative() {
        return Err(RepoError::InvalidData(format!(
            "negative price `{price}` in products.price_cents for product {id}"
        )));
    }

    let stock: i64 = row.get("stock")?;
    if stock < 0 {
        return Err(RepoError::InvalidData(format!(
            "negative stock `{stock}` in products.stock for product {id}"
        )));
    }

    Ok(Product {
        id,
        name: row.get("name")?,
        price,
        stock,
    })
}
