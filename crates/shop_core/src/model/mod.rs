//! Domain model for the shop inventory.
//!
//! # Responsibility
//! - Define canonical data structures used by repositories and services.
//! - Validate operator input before it reaches storage.
//!
//! # Invariants
//! - Identifiers are system-assigned SQLite row ids and never reused.
//! - Money is integer cents; stock and quantities are integers.

pub mod customer;
pub mod money;
pub mod order;
pub mod product;
pub mod validation;
