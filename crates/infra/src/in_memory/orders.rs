use std::sync::RwLock;

use chrono::Utc;

use orderflow_core::{CustomerId, OrderId};
use orderflow_orders::{NewOrder, Order, OrderStore, StoreError};

use super::poisoned;

/// In-memory, append-only order store.
///
/// Assigns UUIDv7 identifiers and the current time on `create`.
#[derive(Debug, Default)]
pub struct InMemoryOrderStore {
    orders: RwLock<Vec<Order>>,
}

impl InMemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: OrderId) -> Result<Option<Order>, StoreError> {
        let orders = self.orders.read().map_err(poisoned)?;
        Ok(orders.iter().find(|o| o.id_typed() == id).cloned())
    }

    /// Orders of a customer, oldest first.
    pub fn list_for_customer(&self, customer_id: &CustomerId) -> Result<Vec<Order>, StoreError> {
        let orders = self.orders.read().map_err(poisoned)?;
        Ok(orders
            .iter()
            .filter(|o| &o.customer().id == customer_id)
            .cloned()
            .collect())
    }

    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self.orders.read().map_err(poisoned)?.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }
}

#[async_trait::async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn create(&self, order: NewOrder) -> Result<Order, StoreError> {
        let order = Order::new(OrderId::new(), order, Utc::now());
        let mut orders = self.orders.write().map_err(poisoned)?;
        orders.push(order.clone());
        tracing::debug!(order_id = %order.id_typed(), "order stored");
        Ok(order)
    }
}
