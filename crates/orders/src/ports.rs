//! Collaborator ports consumed by the order creation workflow.
//!
//! Storage adapters implement these traits; the workflow only ever talks to
//! them. Each call is awaited once, in a fixed order, and never retried here.

use std::sync::Arc;

use thiserror::Error;

use orderflow_core::{CustomerId, ProductId};

use crate::model::{Customer, NewOrder, Order, StockRecord, StockUpdate};

/// Collaborator (storage) failure.
///
/// These are **infrastructure errors**, distinct from the domain rejections in
/// [`orderflow_core::DomainError`]. The workflow propagates them untouched.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("storage conflict: {0}")]
    Conflict(String),

    #[error("storage error: {0}")]
    Storage(String),
}

/// Resolves customer identifiers to customer records.
#[async_trait::async_trait]
pub trait CustomerDirectory: Send + Sync {
    /// `Ok(None)` when the customer does not exist.
    async fn find_by_id(&self, id: &CustomerId) -> Result<Option<Customer>, StoreError>;
}

/// Product stock lookup and update.
#[async_trait::async_trait]
pub trait ProductCatalog: Send + Sync {
    /// Batch lookup. Missing ids are simply absent from the result, and the
    /// result order is unspecified.
    async fn find_all_by_id(&self, ids: &[ProductId]) -> Result<Vec<StockRecord>, StoreError>;

    /// Apply a batch of absolute quantity updates.
    async fn update_quantity(&self, updates: Vec<StockUpdate>) -> Result<(), StoreError>;
}

/// Order persistence sink.
#[async_trait::async_trait]
pub trait OrderStore: Send + Sync {
    /// Persist a validated order, returning it with its assigned identity.
    async fn create(&self, order: NewOrder) -> Result<Order, StoreError>;
}

#[async_trait::async_trait]
impl<S> CustomerDirectory for Arc<S>
where
    S: CustomerDirectory + ?Sized,
{
    async fn find_by_id(&self, id: &CustomerId) -> Result<Option<Customer>, StoreError> {
        (**self).find_by_id(id).await
    }
}

#[async_trait::async_trait]
impl<S> ProductCatalog for Arc<S>
where
    S: ProductCatalog + ?Sized,
{
    async fn find_all_by_id(&self, ids: &[ProductId]) -> Result<Vec<StockRecord>, StoreError> {
        (**self).find_all_by_id(ids).await
    }

    async fn update_quantity(&self, updates: Vec<StockUpdate>) -> Result<(), StoreError> {
        (**self).update_quantity(updates).await
    }
}

#[async_trait::async_trait]
impl<S> OrderStore for Arc<S>
where
    S: OrderStore + ?Sized,
{
    async fn create(&self, order: NewOrder) -> Result<Order, StoreError> {
        (**self).create(order).await
    }
}
