//! Core domain logic for the shop inventory and order tracker.
//! This crate is the single source of truth for business invariants.

pub mod db;
pub mod error;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use error::ErrorKind;
pub use logging::{
    default_log_level, init_logging, init_stderr_logging, logging_status, LogTarget,
};
pub use model::customer::{Customer, CustomerId, NewCustomer};
pub use model::money::Money;
pub use model::order::{
    order_total, parse_order_lines, LineItem, NewOrder, OrderDetail, OrderId, OrderLine,
    OrderSummary, PlacedOrder,
};
pub use model::product::{NewProduct, Product, ProductId};
pub use model::validation::ValidationError;
pub use repo::customer_repo::{CustomerRepository, SqliteCustomerRepository};
pub use repo::order_repo::{OrderRepository, SqliteOrderRepository};
pub use repo::product_repo::{ProductRepository, SqliteProductRepository};
pub use repo::{RepoError, RepoResult};
pub use service::catalog_service::CatalogService;
pub use service::customer_service::CustomerService;
pub use service::order_service::OrderService;
