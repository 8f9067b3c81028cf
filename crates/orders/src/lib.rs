//! Order creation (application core).
//!
//! Validates a customer order against the customer directory and the product
//! catalog, prices its lines, decrements stock and persists the order. Storage
//! lives behind the traits in [`ports`]; this crate performs no IO of its own.

pub mod model;
pub mod plan;
pub mod policy;
pub mod ports;
pub mod service;

pub use model::{
    Customer, NewOrder, Order, OrderLine, OrderRequest, RequestedLine, StockRecord, StockUpdate,
};
pub use plan::{plan_order, OrderPlan};
pub use policy::OrderPolicy;
pub use ports::{CustomerDirectory, OrderStore, ProductCatalog, StoreError};
pub use service::{CreateOrderError, OrderCreationService};
