//! Infrastructure layer: collaborator adapters for the order creation core.

pub mod in_memory;

pub use in_memory::{InMemoryCustomerDirectory, InMemoryOrderStore, InMemoryProductCatalog};
