//! In-memory collaborator adapters for tests/dev.
//!
//! Not optimized for performance. Each adapter guards its state with a single
//! `RwLock`, so a batch update is applied atomically with respect to readers.

mod catalog;
mod customers;
mod orders;

pub use catalog::InMemoryProductCatalog;
pub use customers::InMemoryCustomerDirectory;
pub use orders::InMemoryOrderStore;

use orderflow_orders::StoreError;

fn poisoned<T>(_: T) -> StoreError {
    StoreError::Storage("lock poisoned".to_string())
}
