//! Domain error model.

use thiserror::Error;

use crate::id::{CustomerId, ProductId};

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error: the reasons an order request is rejected.
///
/// Every variant is detected before any stock or order mutation. Storage
/// failures are not domain errors and live with the collaborator ports.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The customer identifier does not resolve.
    #[error("customer not found: {0}")]
    CustomerNotFound(CustomerId),

    /// One or more requested products have no stock record.
    #[error("product not found: {}", join_ids(.0))]
    ProductNotFound(Vec<ProductId>),

    /// A requested quantity exceeds the available stock.
    #[error("insufficient stock for {product_id}: requested {requested}, available {available}")]
    InsufficientStock {
        product_id: ProductId,
        requested: i64,
        available: i64,
    },

    /// The request itself is malformed (e.g. non-positive quantity).
    #[error("validation failed: {0}")]
    Validation(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn product_not_found(ids: impl IntoIterator<Item = ProductId>) -> Self {
        Self::ProductNotFound(ids.into_iter().collect())
    }

    pub fn insufficient_stock(product_id: ProductId, requested: i64, available: i64) -> Self {
        Self::InsufficientStock {
            product_id,
            requested,
            available,
        }
    }

    /// Stable machine-readable code, for transport layers.
    pub fn code(&self) -> &'static str {
        match self {
            DomainError::CustomerNotFound(_) => "customer_not_found",
            DomainError::ProductNotFound(_) => "product_not_found",
            DomainError::InsufficientStock { .. } => "insufficient_stock",
            DomainError::Validation(_) => "validation_error",
        }
    }
}

fn join_ids(ids: &[ProductId]) -> String {
    ids.iter()
        .map(ProductId::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
