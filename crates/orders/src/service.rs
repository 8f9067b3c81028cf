//! Order creation workflow (application-level orchestration).
//!
//! ```text
//! OrderRequest
//!   ↓
//! 1. CustomerDirectory::find_by_id      → CustomerNotFound
//!   ↓
//!    validate request shape (policy)    → Validation
//!   ↓
//! 2. ProductCatalog::find_all_by_id     → ProductNotFound
//!   ↓
//! 3. plan_order (pure)                  → InsufficientStock
//!   ↓
//! 4. ProductCatalog::update_quantity    (one batch)
//!   ↓
//! 5. OrderStore::create                 → Order
//! ```
//!
//! Every rejection happens before step 4 and is logged once at WARN.
//! Collaborator failures are logged once at ERROR and returned as-is; a
//! failure in step 5 leaves the step 4 decrement in place.

use thiserror::Error;
use tracing::{error, info, instrument, warn};

use orderflow_core::DomainError;

use crate::model::{NewOrder, Order, OrderRequest};
use crate::plan::{distinct_product_ids, plan_order, validate_request};
use crate::policy::OrderPolicy;
use crate::ports::{CustomerDirectory, OrderStore, ProductCatalog, StoreError};

/// Failure of [`OrderCreationService::execute`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CreateOrderError {
    /// The request was rejected; nothing was mutated.
    #[error(transparent)]
    Rejected(#[from] DomainError),

    /// A collaborator failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl CreateOrderError {
    /// `true` for domain rejections, `false` for infrastructure failures.
    pub fn is_rejection(&self) -> bool {
        matches!(self, CreateOrderError::Rejected(_))
    }
}

/// Creates customer orders against injected collaborators.
///
/// Holds no lock and no mutable state; share it behind `Arc` to serve
/// concurrent requests. Stock race protection is the storage layer's job.
#[derive(Debug)]
pub struct OrderCreationService<C, P, O> {
    customers: C,
    catalog: P,
    orders: O,
    policy: OrderPolicy,
}

impl<C, P, O> OrderCreationService<C, P, O> {
    pub fn new(customers: C, catalog: P, orders: O) -> Self {
        Self::with_policy(customers, catalog, orders, OrderPolicy::default())
    }

    pub fn with_policy(customers: C, catalog: P, orders: O, policy: OrderPolicy) -> Self {
        Self {
            customers,
            catalog,
            orders,
            policy,
        }
    }
}

impl<C, P, O> OrderCreationService<C, P, O>
where
    C: CustomerDirectory,
    P: ProductCatalog,
    O: OrderStore,
{
    /// Validate, price, decrement stock and persist one order.
    #[instrument(
        skip(self, request),
        fields(
            customer_id = %request.customer_id,
            line_count = request.lines.len()
        )
    )]
    pub async fn execute(&self, request: OrderRequest) -> Result<Order, CreateOrderError> {
        let customer = self
            .customers
            .find_by_id(&request.customer_id)
            .await
            .inspect_err(log_store_failure)?
            .ok_or_else(|| DomainError::CustomerNotFound(request.customer_id.clone()))
            .inspect_err(log_rejection)?;

        validate_request(&request, &self.policy).inspect_err(log_rejection)?;

        let plan = if request.lines.is_empty() {
            plan_order(&[], &[])?
        } else {
            let ids = distinct_product_ids(&request.lines);
            let stock = self
                .catalog
                .find_all_by_id(&ids)
                .await
                .inspect_err(log_store_failure)?;
            plan_order(&request.lines, &stock).inspect_err(log_rejection)?
        };

        if !plan.stock_updates.is_empty() {
            self.catalog
                .update_quantity(plan.stock_updates)
                .await
                .inspect_err(log_store_failure)?;
        }

        let order = self
            .orders
            .create(NewOrder {
                customer,
                lines: plan.lines,
            })
            .await
            .inspect_err(|e| error!(error = %e, "order persistence failed after stock decrement"))?;

        info!(
            order_id = %order.id_typed(),
            total = plan.total,
            "order created"
        );
        Ok(order)
    }
}

fn log_rejection(e: &DomainError) {
    warn!(code = e.code(), "order rejected: {e}");
}

fn log_store_failure(e: &StoreError) {
    error!(error = %e, "collaborator call failed");
}
