use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use orderflow_core::{CustomerId, OrderId, ProductId};

/// Customer record as resolved by the customer directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub email: Option<String>,
}

impl Customer {
    pub fn new(id: impl Into<CustomerId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: None,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

/// Stock record owned by the product catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockRecord {
    pub product_id: ProductId,
    /// Price in smallest currency unit (e.g., cents).
    pub unit_price: u64,
    /// Available quantity (non-negative).
    pub quantity: i64,
}

impl StockRecord {
    pub fn new(product_id: impl Into<ProductId>, unit_price: u64, quantity: i64) -> Self {
        Self {
            product_id: product_id.into(),
            unit_price,
            quantity,
        }
    }
}

/// One requested line of an order request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestedLine {
    pub product_id: ProductId,
    pub quantity: i64,
}

impl RequestedLine {
    pub fn new(product_id: impl Into<ProductId>, quantity: i64) -> Self {
        Self {
            product_id: product_id.into(),
            quantity,
        }
    }
}

/// Input of the order creation workflow. Never persisted as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub customer_id: CustomerId,
    pub lines: Vec<RequestedLine>,
}

impl OrderRequest {
    pub fn new(customer_id: impl Into<CustomerId>, lines: Vec<RequestedLine>) -> Self {
        Self {
            customer_id: customer_id.into(),
            lines,
        }
    }
}

/// Order line: product, unit price, quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    product_id: ProductId,
    unit_price: u64,
    quantity: i64,
}

impl OrderLine {
    pub fn new(product_id: ProductId, unit_price: u64, quantity: i64) -> Self {
        Self {
            product_id,
            unit_price,
            quantity,
        }
    }

    pub fn product_id(&self) -> &ProductId {
        &self.product_id
    }

    pub fn unit_price(&self) -> u64 {
        self.unit_price
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    /// `unit_price * quantity`, or `None` on overflow or a negative quantity.
    pub fn line_total(&self) -> Option<u64> {
        let quantity = u64::try_from(self.quantity).ok()?;
        self.unit_price.checked_mul(quantity)
    }
}

/// Payload handed to the order store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOrder {
    pub customer: Customer,
    pub lines: Vec<OrderLine>,
}

/// A persisted order.
///
/// Identity and creation time are assigned by the order store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    id: OrderId,
    customer: Customer,
    lines: Vec<OrderLine>,
    created_at: DateTime<Utc>,
}

impl Order {
    pub fn new(id: OrderId, new_order: NewOrder, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            customer: new_order.customer,
            lines: new_order.lines,
            created_at,
        }
    }

    pub fn id_typed(&self) -> OrderId {
        self.id
    }

    pub fn customer(&self) -> &Customer {
        &self.customer
    }

    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Sum of line totals, or `None` on overflow.
    pub fn total(&self) -> Option<u64> {
        self.lines
            .iter()
            .try_fold(0u64, |acc, line| acc.checked_add(line.line_total()?))
    }
}

/// New absolute quantity for a product, submitted to the catalog in a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockUpdate {
    pub product_id: ProductId,
    pub quantity: i64,
}
