//! Product catalog use-case service.
//!
//! # Responsibility
//! - Provide product entry points for the command dispatcher.
//! - Delegate persistence to repository implementations.

use super::log_failure;
use crate::model::money::Money;
use crate::model::product::{NewProduct, Product, ProductId};
use crate::repo::product_repo::ProductRepository;
use crate::repo::RepoResult;
use log::info;
use std::time::Instant;

/// Use-case service wrapper for product operations.
pub struct CatalogService<R: ProductRepository> {
    repo: R,
}

impl<R: ProductRepository> CatalogService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Adds a product and returns its new id.
    pub fn add_product(
        &self,
        name: impl Into<String>,
        price: Money,
        stock: i64,
    ) -> RepoResult<ProductId> {
        let started_at = Instant::now();
        let product = NewProduct::new(name, price, stock);
        match self.repo.create_product(&product) {
            Ok(id) => {
                info!(
                    "event=product_create module=catalog status=ok product_id={} price_cents={} stock={} duration_ms={}",
                    id,
                    price.cents(),
                    stock,
                    started_at.elapsed().as_millis()
                );
                Ok(id)
            }
            Err(err) => {
                log_failure("product_create", "catalog", started_at, &err);
                Err(err)
            }
        }
    }

    pub fn get_product(&self, id: ProductId) -> RepoResult<Option<Product>> {
        self.repo.get_product(id)
    }

    pub fn list_products(&self) -> RepoResult<Vec<Product>> {
        self.repo.list_products()
    }

    /// Overwrites the stock level of a live product.
    pub fn update_stock(&self, id: ProductId, stock: i64) -> RepoResult<()> {
        let started_at = Instant::now();
        self.repo
            .update_stock(id, stock)
            .inspect(|_| {
                info!(
                    "event=product_stock_update module=catalog status=ok product_id={id} stock={stock}"
                )
            })
            .inspect_err(|err| log_failure("product_stock_update", "catalog", started_at, err))
    }

    /// Changes the current price. Existing orders keep their captured prices.
    pub fn update_price(&self, id: ProductId, price: Money) -> RepoResult<()> {
        let started_at = Instant::now();
        self.repo
            .update_price(id, price)
            .inspect(|_| {
                info!(
                    "event=product_price_update module=catalog status=ok product_id={id} price_cents={}",
                    price.cents()
                )
            })
            .inspect_err(|err| log_failure("product_price_update", "catalog", started_at, err))
    }

    pub fn delete_product(&self, id: ProductId) -> RepoResult<()> {
        let started_at = Instant::now();
        self.repo
            .delete_product(id)
            .inspect(|_| info!("event=product_delete module=catalog status=ok product_id={id}"))
            .inspect_err(|err| log_failure("product_delete", "catalog", started_at, err))
    }
}
