use std::collections::HashMap;
use std::sync::RwLock;

use orderflow_core::CustomerId;
use orderflow_orders::{Customer, CustomerDirectory, StoreError};

use super::poisoned;

/// In-memory customer directory.
#[derive(Debug, Default)]
pub struct InMemoryCustomerDirectory {
    customers: RwLock<HashMap<CustomerId, Customer>>,
}

impl InMemoryCustomerDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_customers(customers: impl IntoIterator<Item = Customer>) -> Self {
        let map = customers.into_iter().map(|c| (c.id.clone(), c)).collect();
        Self {
            customers: RwLock::new(map),
        }
    }
}

#[async_trait::async_trait]
impl CustomerDirectory for InMemoryCustomerDirectory {
    async fn find_by_id(&self, id: &CustomerId) -> Result<Option<Customer>, StoreError> {
        let map = self.customers.read().map_err(poisoned)?;
        Ok(map.get(id).cloned())
    }
}
