//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Emit metadata-only diagnostic events for every write.
//!
//! # Invariants
//! - Services never bypass repository validation/persistence contracts.
//! - Customer names and emails are never logged.

use crate::repo::RepoError;
use log::log;
use std::time::Instant;

pub mod catalog_service;
pub mod customer_service;
pub mod order_service;

/// Logs a failed use-case at the level its error kind calls for.
fn log_failure(event: &str, module: &str, started_at: Instant, err: &RepoError) {
    let kind = err.kind();
    let duration_ms = started_at.elapsed().as_millis();
    log!(
        kind.log_level(),
        "event={event} module={module} status=error duration_ms={duration_ms} error_kind={kind} error={err}"
    );
}
