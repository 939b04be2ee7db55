//! Derived monthly spending summaries. Never persisted.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Accumulated spend for one category name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryTotal {
    pub name: String,
    pub amount: f64,
    pub color: String,
}

impl CategoryTotal {
    /// Percentage of `total` this entry represents; zero when `total` is zero.
    pub fn share_of(&self, total: f64) -> f64 {
        if total == 0.0 {
            0.0
        } else {
            self.amount / total * 100.0
        }
    }
}

/// Total spend plus a per-category breakdown in unspecified order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MonthlySummary {
    pub total: f64,
    pub breakdown: Vec<CategoryTotal>,
}

impl MonthlySummary {
    pub fn is_empty(&self) -> bool {
        self.breakdown.is_empty()
    }

    pub fn entry(&self, name: &str) -> Option<&CategoryTotal> {
        self.breakdown.iter().find(|entry| entry.name == name)
    }

    /// Breakdown sorted by descending amount, ties broken by name.
    pub fn sorted_by_amount(&self) -> Vec<&CategoryTotal> {
        let mut entries: Vec<&CategoryTotal> = self.breakdown.iter().collect();
        entries.sort_by(|a, b| {
            b.amount
                .partial_cmp(&a.amount)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.name.cmp(&b.name))
        });
        entries
    }

    /// Sum of the breakdown amounts; equals `total` for summaries built by aggregation.
    pub fn breakdown_total(&self) -> f64 {
        self.breakdown.iter().map(|entry| entry.amount).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, amount: f64) -> CategoryTotal {
        CategoryTotal {
            name: name.into(),
            amount,
            color: "#000000".into(),
        }
    }

    #[test]
    fn sorted_by_amount_orders_descending_then_by_name() {
        let summary = MonthlySummary {
            total: 60.0,
            breakdown: vec![entry("b", 10.0), entry("c", 40.0), entry("a", 10.0)],
        };
        let names: Vec<&str> = summary
            .sorted_by_amount()
            .iter()
            .map(|entry| entry.name.as_str())
            .collect();
        assert_eq!(names, vec!["c", "a", "b"]);
    }

    #[test]
    fn share_of_zero_total_is_zero() {
        assert_eq!(entry("x", 0.0).share_of(0.0), 0.0);
        assert_eq!(entry("x", 25.0).share_of(100.0), 25.0);
    }
}
