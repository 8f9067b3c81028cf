use std::collections::HashMap;
use std::sync::RwLock;

use orderflow_core::ProductId;
use orderflow_orders::{ProductCatalog, StockRecord, StockUpdate, StoreError};

use super::poisoned;

/// In-memory product catalog.
///
/// `find_all_by_id` returns records in storage (hash) order, not request
/// order, and skips unknown ids.
#[derive(Debug, Default)]
pub struct InMemoryProductCatalog {
    records: RwLock<HashMap<ProductId, StockRecord>>,
}

impl InMemoryProductCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: impl IntoIterator<Item = StockRecord>) -> Self {
        let map = records
            .into_iter()
            .map(|r| (r.product_id.clone(), r))
            .collect();
        Self {
            records: RwLock::new(map),
        }
    }

    pub fn get(&self, id: &ProductId) -> Result<Option<StockRecord>, StoreError> {
        let map = self.records.read().map_err(poisoned)?;
        Ok(map.get(id).cloned())
    }

    /// Current available quantity, if the product exists.
    pub fn quantity(&self, id: &ProductId) -> Result<Option<i64>, StoreError> {
        Ok(self.get(id)?.map(|r| r.quantity))
    }
}

#[async_trait::async_trait]
impl ProductCatalog for InMemoryProductCatalog {
    async fn find_all_by_id(&self, ids: &[ProductId]) -> Result<Vec<StockRecord>, StoreError> {
        let map = self.records.read().map_err(poisoned)?;
        Ok(map
            .values()
            .filter(|r| ids.contains(&r.product_id))
            .cloned()
            .collect())
    }

    /// All-or-nothing: the batch is checked in full before any record changes.
    async fn update_quantity(&self, updates: Vec<StockUpdate>) -> Result<(), StoreError> {
        let mut map = self.records.write().map_err(poisoned)?;

        for (idx, update) in updates.iter().enumerate() {
            if !map.contains_key(&update.product_id) {
                return Err(StoreError::Conflict(format!(
                    "unknown product {} (index {idx})",
                    update.product_id
                )));
            }
            if update.quantity < 0 {
                return Err(StoreError::Conflict(format!(
                    "negative quantity {} for product {} (index {idx})",
                    update.quantity, update.product_id
                )));
            }
        }

        for update in updates {
            if let Some(record) = map.get_mut(&update.product_id) {
                record.quantity = update.quantity;
            }
        }
        Ok(())
    }
}
