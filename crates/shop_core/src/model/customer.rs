//! Customer domain model.

use crate::model::validation::{require_text, ValidationError};
use serde::{Deserialize, Serialize};

/// System-assigned customer identifier.
pub type CustomerId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub email: String,
}

/// Input for creating a customer. Customers are immutable once stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCustomer {
    pub name: String,
    pub email: String,
}

impl NewCustomer {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("customer name", &self.name)?;
        require_text("customer email", &self.email)
    }
}
