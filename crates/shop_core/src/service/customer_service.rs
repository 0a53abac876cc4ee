//! Customer use-case service.

use super::log_failure;
use crate::model::customer::{Customer, CustomerId, NewCustomer};
use crate::repo::customer_repo::CustomerRepository;
use crate::repo::RepoResult;
use log::info;
use std::time::Instant;

pub struct CustomerService<R: CustomerRepository> {
    repo: R,
}

impl<R: CustomerRepository> CustomerService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn add_customer(
        &self,
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> RepoResult<CustomerId> {
        let started_at = Instant::now();
        let customer = NewCustomer::new(name, email);
        self.repo
            .create_customer(&customer)
            .inspect(|id| {
                info!(
                    "event=customer_create module=customer status=ok customer_id={id} duration_ms={}",
                    started_at.elapsed().as_millis()
                )
            })
            .inspect_err(|err| log_failure("customer_create", "customer", started_at, err))
    }

    pub fn get_customer(&self, id: CustomerId) -> RepoResult<Option<Customer>> {
        self.repo.get_customer(id)
    }

    pub fn list_customers(&self) -> RepoResult<Vec<Customer>> {
        self.repo.list_customers()
    }
}
