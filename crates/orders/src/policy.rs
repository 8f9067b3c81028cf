//! Order creation policy (configuration).

use serde::{Deserialize, Serialize};

const DEFAULT_MAX_LINES: usize = 100;

/// Knobs for request-shape validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderPolicy {
    /// Accept requests with no lines (producing an order with no lines).
    pub allow_empty_orders: bool,
    /// Upper bound on the number of requested lines.
    pub max_lines: usize,
}

impl Default for OrderPolicy {
    fn default() -> Self {
        Self {
            allow_empty_orders: false,
            max_lines: DEFAULT_MAX_LINES,
        }
    }
}

impl OrderPolicy {
    /// Load the policy from `ORDERS_ALLOW_EMPTY` and `ORDERS_MAX_LINES`.
    ///
    /// Unset variables keep their defaults; unparseable ones are logged and ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut policy = Self::default();

        if let Some(raw) = lookup("ORDERS_ALLOW_EMPTY") {
            match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => policy.allow_empty_orders = true,
                "0" | "false" | "no" => policy.allow_empty_orders = false,
                other => {
                    tracing::warn!("ORDERS_ALLOW_EMPTY={other:?} is not a boolean; using default")
                }
            }
        }

        if let Some(raw) = lookup("ORDERS_MAX_LINES") {
            match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => policy.max_lines = n,
                _ => tracing::warn!(
                    "ORDERS_MAX_LINES={raw:?} is not a positive integer; using {DEFAULT_MAX_LINES}"
                ),
            }
        }

        policy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_reject_empty_orders() {
        let policy = OrderPolicy::from_lookup(lookup(&[]));
        assert_eq!(policy, OrderPolicy::default());
        assert!(!policy.allow_empty_orders);
        assert_eq!(policy.max_lines, 100);
    }

    #[test]
    fn reads_overrides() {
        let policy = OrderPolicy::from_lookup(lookup(&[
            ("ORDERS_ALLOW_EMPTY", "TRUE"),
            ("ORDERS_MAX_LINES", "5"),
        ]));
        assert!(policy.allow_empty_orders);
        assert_eq!(policy.max_lines, 5);
    }

    #[test]
    fn invalid_values_fall_back_to_defaults() {
        let policy = OrderPolicy::from_lookup(lookup(&[
            ("ORDERS_ALLOW_EMPTY", "maybe"),
            ("ORDERS_MAX_LINES", "0"),
        ]));
        assert_eq!(policy, OrderPolicy::default());
    }
}
