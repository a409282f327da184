use std::sync::Arc;

use storefront_store::{Customer, Database, NewCustomer};
use tracing::info;

use super::or_log;

/// Keeps the last customer used at checkout, for auto-fill.
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    db: Arc<Database>,
}

impl CustomerRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    pub fn get_last(&self) -> Option<Customer> {
        or_log(self.db.last_customer(), "customers.get_last", None)
    }

    /// Replace the stored customer with `customer`.
    pub fn save(&self, customer: &NewCustomer) -> bool {
        match self.db.replace_customer(customer) {
            Ok(saved) => {
                info!(customer_id = saved.id, "saved customer {}", saved.name);
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "save customer failed");
                false
            }
        }
    }
}
