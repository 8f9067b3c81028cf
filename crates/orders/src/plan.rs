//! Pure decision logic of order creation.
//!
//! Given the request and the stock records looked up for it, decide which
//! order lines to persist and which stock updates to submit. No IO, no side
//! effects: the service applies the resulting [`OrderPlan`].

use std::collections::HashMap;

use orderflow_core::{DomainError, DomainResult, ProductId};

use crate::model::{OrderLine, OrderRequest, RequestedLine, StockRecord, StockUpdate};
use crate::policy::OrderPolicy;

/// Outcome of a successful decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderPlan {
    /// One line per requested line, in request order.
    pub lines: Vec<OrderLine>,
    /// One update per distinct product, in first-appearance order.
    pub stock_updates: Vec<StockUpdate>,
    /// Sum of line totals in smallest currency unit.
    pub total: u64,
}

/// Check the request shape before any collaborator is consulted.
pub fn validate_request(request: &OrderRequest, policy: &OrderPolicy) -> DomainResult<()> {
    if request.lines.is_empty() && !policy.allow_empty_orders {
        return Err(DomainError::validation("order must contain at least one line"));
    }

    if request.lines.len() > policy.max_lines {
        return Err(DomainError::validation(format!(
            "order has {} lines, at most {} allowed",
            request.lines.len(),
            policy.max_lines
        )));
    }

    if let Some(line) = request.lines.iter().find(|l| l.quantity <= 0) {
        return Err(DomainError::validation(format!(
            "quantity must be positive (product {}, quantity {})",
            line.product_id, line.quantity
        )));
    }

    Ok(())
}

/// Distinct product ids of the request, in first-appearance order.
pub fn distinct_product_ids(lines: &[RequestedLine]) -> Vec<ProductId> {
    let mut ids: Vec<ProductId> = Vec::with_capacity(lines.len());
    for line in lines {
        if !ids.contains(&line.product_id) {
            ids.push(line.product_id.clone());
        }
    }
    ids
}

/// Decide lines and stock updates for `lines` against the looked-up `stock`.
///
/// Stock records are matched by product id, never by position. Quantities of
/// repeated product ids are summed before being checked against stock, so a
/// product is decremented once by its cumulative quantity.
pub fn plan_order(lines: &[RequestedLine], stock: &[StockRecord]) -> DomainResult<OrderPlan> {
    let mut by_id: HashMap<&ProductId, &StockRecord> = HashMap::with_capacity(stock.len());
    for record in stock {
        by_id.entry(&record.product_id).or_insert(record);
    }

    let requested = accumulate(lines)?;

    let missing: Vec<ProductId> = requested
        .iter()
        .filter(|(id, _)| !by_id.contains_key(id))
        .map(|(id, _)| id.clone())
        .collect();
    if !missing.is_empty() {
        return Err(DomainError::ProductNotFound(missing));
    }

    let mut stock_updates = Vec::with_capacity(requested.len());
    for (product_id, quantity) in &requested {
        let record = by_id[product_id];
        if *quantity > record.quantity {
            return Err(DomainError::insufficient_stock(
                product_id.clone(),
                *quantity,
                record.quantity,
            ));
        }
        stock_updates.push(StockUpdate {
            product_id: product_id.clone(),
            quantity: record.quantity - quantity,
        });
    }

    let order_lines: Vec<OrderLine> = lines
        .iter()
        .map(|line| {
            let record = by_id[&line.product_id];
            OrderLine::new(line.product_id.clone(), record.unit_price, line.quantity)
        })
        .collect();

    let total = order_lines
        .iter()
        .try_fold(0u64, |acc, line| acc.checked_add(line.line_total()?))
        .ok_or_else(|| DomainError::validation("order total overflows"))?;

    Ok(OrderPlan {
        lines: order_lines,
        stock_updates,
        total,
    })
}

fn accumulate(lines: &[RequestedLine]) -> DomainResult<Vec<(ProductId, i64)>> {
    let mut totals: Vec<(ProductId, i64)> = Vec::new();
    let mut index: HashMap<&ProductId, usize> = HashMap::new();

    for line in lines {
        match index.get(&line.product_id) {
            Some(&i) => {
                let entry = &mut totals[i];
                entry.1 = entry.1.checked_add(line.quantity).ok_or_else(|| {
                    DomainError::validation(format!(
                        "requested quantity overflows for product {}",
                        line.product_id
                    ))
                })?;
            }
            None => {
                index.insert(&line.product_id, totals.len());
                totals.push((line.product_id.clone(), line.quantity));
            }
        }
    }

    Ok(totals)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stock() -> Vec<StockRecord> {
        vec![StockRecord::new("P1", 500, 10), StockRecord::new("P2", 300, 2)]
    }

    fn update(id: &str, quantity: i64) -> StockUpdate {
        StockUpdate {
            product_id: ProductId::from(id),
            quantity,
        }
    }

    #[test]
    fn prices_lines_from_stock_and_decrements() {
        let lines = vec![RequestedLine::new("P1", 3), RequestedLine::new("P2", 1)];

        let plan = plan_order(&lines, &stock()).unwrap();

        assert_eq!(
            plan.lines,
            vec![
                OrderLine::new(ProductId::from("P1"), 500, 3),
                OrderLine::new(ProductId::from("P2"), 300, 1),
            ]
        );
        assert_eq!(plan.stock_updates, vec![update("P1", 7), update("P2", 1)]);
        assert_eq!(plan.total, 1800);
    }

    #[test]
    fn matches_stock_by_id_not_position() {
        let lines = vec![RequestedLine::new("P2", 1), RequestedLine::new("P1", 3)];

        let plan = plan_order(&lines, &stock()).unwrap();

        assert_eq!(plan.lines[0].unit_price(), 300);
        assert_eq!(plan.lines[1].unit_price(), 500);
        assert_eq!(plan.stock_updates, vec![update("P2", 1), update("P1", 7)]);
    }

    #[test]
    fn rejects_quantity_above_stock() {
        let lines = vec![RequestedLine::new("P1", 1), RequestedLine::new("P2", 5)];

        let err = plan_order(&lines, &stock()).unwrap_err();

        assert_eq!(err, DomainError::insufficient_stock(ProductId::from("P2"), 5, 2));
    }

    #[test]
    fn quantity_equal_to_stock_empties_it() {
        let lines = vec![RequestedLine::new("P2", 2)];

        let plan = plan_order(&lines, &stock()).unwrap();

        assert_eq!(plan.stock_updates, vec![update("P2", 0)]);
    }

    #[test]
    fn reports_every_missing_product() {
        let lines = vec![
            RequestedLine::new("P9", 1),
            RequestedLine::new("P1", 1),
            RequestedLine::new("P8", 1),
        ];

        let err = plan_order(&lines, &stock()).unwrap_err();

        assert_eq!(
            err,
            DomainError::ProductNotFound(vec![ProductId::from("P9"), ProductId::from("P8")])
        );
    }

    #[test]
    fn duplicate_lines_accumulate_against_stock() {
        // 1 + 1 fits in a stock of 2, a third unit does not.
        let ok = vec![RequestedLine::new("P2", 1), RequestedLine::new("P2", 1)];
        let plan = plan_order(&ok, &stock()).unwrap();
        assert_eq!(plan.lines.len(), 2);
        assert_eq!(plan.stock_updates, vec![update("P2", 0)]);

        let too_many = vec![
            RequestedLine::new("P2", 1),
            RequestedLine::new("P2", 1),
            RequestedLine::new("P2", 1),
        ];
        let err = plan_order(&too_many, &stock()).unwrap_err();
        assert_eq!(err, DomainError::insufficient_stock(ProductId::from("P2"), 3, 2));
    }

    #[test]
    fn rejects_overflowing_total() {
        let stock = vec![StockRecord::new("P1", u64::MAX, i64::MAX)];
        let lines = vec![RequestedLine::new("P1", 2)];

        let err = plan_order(&lines, &stock).unwrap_err();

        assert!(matches!(err, DomainError::Validation(msg) if msg.contains("overflows")));
    }

    #[test]
    fn empty_request_plans_nothing() {
        let plan = plan_order(&[], &[]).unwrap();
        assert!(plan.lines.is_empty());
        assert!(plan.stock_updates.is_empty());
        assert_eq!(plan.total, 0);
    }

    #[test]
    fn validate_request_enforces_policy() {
        let policy = OrderPolicy::default();

        let empty = OrderRequest::new("C1", vec![]);
        assert!(validate_request(&empty, &policy).is_err());
        let permissive = OrderPolicy {
            allow_empty_orders: true,
            ..OrderPolicy::default()
        };
        assert!(validate_request(&empty, &permissive).is_ok());

        let zero = OrderRequest::new("C1", vec![RequestedLine::new("P1", 0)]);
        let err = validate_request(&zero, &policy).unwrap_err();
        assert!(matches!(err, DomainError::Validation(msg) if msg.contains("positive")));

        let capped = OrderPolicy {
            max_lines: 1,
            ..OrderPolicy::default()
        };
        let two = OrderRequest::new(
            "C1",
            vec![RequestedLine::new("P1", 1), RequestedLine::new("P2", 1)],
        );
        assert!(validate_request(&two, &capped).is_err());
    }

    #[test]
    fn distinct_ids_keep_first_appearance_order() {
        let lines = vec![
            RequestedLine::new("P2", 1),
            RequestedLine::new("P1", 1),
            RequestedLine::new("P2", 4),
        ];
        assert_eq!(
            distinct_product_ids(&lines),
            vec![ProductId::from("P2"), ProductId::from("P1")]
        );
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn requested_lines() -> impl Strategy<Value = Vec<RequestedLine>> {
            prop::collection::vec((0usize..5, 1i64..20), 1..12).prop_map(|raw| {
                raw.into_iter()
                    .map(|(p, q)| RequestedLine::new(format!("P{p}"), q))
                    .collect()
            })
        }

        fn ample_stock() -> Vec<StockRecord> {
            (0..5)
                .map(|p| StockRecord::new(format!("P{p}"), 100 + p as u64, 1_000))
                .collect()
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 500,
                ..ProptestConfig::default()
            })]

            /// Property: lines mirror the request (ids, quantities, order).
            #[test]
            fn lines_mirror_request(lines in requested_lines()) {
                let plan = plan_order(&lines, &ample_stock()).unwrap();

                prop_assert_eq!(plan.lines.len(), lines.len());
                for (line, req) in plan.lines.iter().zip(&lines) {
                    prop_assert_eq!(line.product_id(), &req.product_id);
                    prop_assert_eq!(line.quantity(), req.quantity);
                }
            }

            /// Property: total decrement per product equals its requested quantity.
            #[test]
            fn decrements_sum_to_requested(lines in requested_lines()) {
                let stock = ample_stock();
                let plan = plan_order(&lines, &stock).unwrap();

                for update in &plan.stock_updates {
                    let before = stock
                        .iter()
                        .find(|r| r.product_id == update.product_id)
                        .unwrap()
                        .quantity;
                    let requested: i64 = lines
                        .iter()
                        .filter(|l| l.product_id == update.product_id)
                        .map(|l| l.quantity)
                        .sum();
                    prop_assert_eq!(before - update.quantity, requested);
                }
                prop_assert_eq!(plan.stock_updates.len(), distinct_product_ids(&lines).len());
            }

            /// Property: results never depend on the order the catalog returns records in.
            #[test]
            fn stock_order_is_irrelevant(lines in requested_lines()) {
                let stock = ample_stock();
                let mut reversed = stock.clone();
                reversed.reverse();

                prop_assert_eq!(plan_order(&lines, &stock), plan_order(&lines, &reversed));
            }
        }
    }
}
