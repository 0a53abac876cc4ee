//! User-facing error classification shared by every core error type.

use log::Level;
use serde::Serialize;
use std::fmt::{Display, Formatter};

/// Coarse error category surfaced to operators and mapped to exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorKind {
    /// Referenced product, customer or order does not exist.
    NotFound,
    /// Requested quantity exceeds available stock.
    InsufficientStock,
    /// Non-positive order quantity or negative stock level.
    InvalidQuantity,
    /// Malformed or out-of-range input value.
    InvalidInput,
    /// Database or file-system failure.
    Storage,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "NotFound",
            Self::InsufficientStock => "InsufficientStock",
            Self::InvalidQuantity => "InvalidQuantity",
            Self::InvalidInput => "InvalidInput",
            Self::Storage => "Storage",
        }
    }

    /// Level for failure events. Operator mistakes stay below the default
    /// stderr threshold; only storage failures surface there.
    pub fn log_level(self) -> Level {
        match self {
            Self::Storage => Level::Error,
            _ => Level::Info,
        }
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::ErrorKind;
    use log::Level;

    #[test]
    fn only_storage_failures_log_above_info() {
        assert_eq!(ErrorKind::Storage.log_level(), Level::Error);
        for kind in [
            ErrorKind::NotFound,
            ErrorKind::InsufficientStock,
            ErrorKind::InvalidQuantity,
            ErrorKind::InvalidInput,
        ] {
            assert_eq!(kind.log_level(), Level::Info);
            assert!(kind.log_level() > Level::Warn);
        }
    }
}
