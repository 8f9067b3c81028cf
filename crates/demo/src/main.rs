use std::sync::Arc;

use orderflow_core::ProductId;
use orderflow_infra::{InMemoryCustomerDirectory, InMemoryOrderStore, InMemoryProductCatalog};
use orderflow_orders::{
    Customer, OrderCreationService, OrderPolicy, OrderRequest, RequestedLine, StockRecord,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    orderflow_observability::init();

    let policy = OrderPolicy::from_env();
    tracing::info!(?policy, "order policy loaded");

    let customers = InMemoryCustomerDirectory::with_customers([
        Customer::new("C1", "Ada Lovelace").with_email("ada@example.com"),
    ]);
    let catalog = Arc::new(InMemoryProductCatalog::with_records([
        StockRecord::new("P1", 500, 10),
        StockRecord::new("P2", 300, 2),
    ]));
    let orders = Arc::new(InMemoryOrderStore::new());
    let service =
        OrderCreationService::with_policy(customers, catalog.clone(), orders.clone(), policy);

    let scenarios = [
        (
            "two lines within stock",
            OrderRequest::new(
                "C1",
                vec![RequestedLine::new("P1", 3), RequestedLine::new("P2", 1)],
            ),
        ),
        (
            "more than available",
            OrderRequest::new("C1", vec![RequestedLine::new("P2", 5)]),
        ),
        (
            "unknown product",
            OrderRequest::new("C1", vec![RequestedLine::new("P9", 1)]),
        ),
    ];

    for (name, request) in scenarios {
        match service.execute(request).await {
            Ok(order) => {
                let json = serde_json::to_string(&order)?;
                tracing::info!(scenario = name, order = %json, "accepted");
            }
            Err(e) if e.is_rejection() => {
                tracing::info!(scenario = name, error = %e, "rejected");
            }
            Err(e) => return Err(e.into()),
        }
    }

    for id in ["P1", "P2"] {
        let quantity = catalog.quantity(&ProductId::from(id))?;
        tracing::info!(product_id = id, ?quantity, "stock after scenarios");
    }
    tracing::info!(orders = orders.len()?, "orders stored");

    Ok(())
}
