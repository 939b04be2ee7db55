//! Monthly budget consumption per category.

use tally_domain::{Category, MonthlySummary};

/// Spend against one category's monthly budget.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetUsage {
    pub category_id: i64,
    pub name: String,
    pub budget: f64,
    pub spent: f64,
    pub remaining: f64,
    pub over_budget: bool,
}

impl BudgetUsage {
    /// Percentage of the budget already spent; zero for a zero budget with no spend.
    pub fn percent_used(&self) -> f64 {
        if self.budget > 0.0 {
            self.spent / self.budget * 100.0
        } else if self.spent > 0.0 {
            100.0
        } else {
            0.0
        }
    }
}

/// Compares each budgeted category with the summary's spend.
///
/// Spend is looked up by category name, matching how the summary groups.
/// Categories without a budget are skipped. Sorted by name.
pub fn budget_usage(categories: &[Category], summary: &MonthlySummary) -> Vec<BudgetUsage> {
    let mut usage: Vec<BudgetUsage> = categories
        .iter()
        .filter_map(|category| {
            let budget = category.monthly_budget?;
            let spent = summary
                .entry(&category.name)
                .map(|entry| entry.amount)
                .unwrap_or(0.0);
            Some(BudgetUsage {
                category_id: category.id,
                name: category.name.clone(),
                budget,
                spent,
                remaining: budget - spent,
                over_budget: spent > budget,
            })
        })
        .collect();
    usage.sort_by(|a, b| a.name.cmp(&b.name).then(a.category_id.cmp(&b.category_id)));
    usage
}

#[cfg(test)]
mod tests {
    use super::*;
    use tally_domain::CategoryTotal;

    fn summary() -> MonthlySummary {
        MonthlySummary {
            total: 450.0,
            breakdown: vec![
                CategoryTotal {
                    name: "Food".into(),
                    amount: 350.0,
                    color: "#22c55e".into(),
                },
                CategoryTotal {
                    name: "Fun".into(),
                    amount: 100.0,
                    color: "#a855f7".into(),
                },
            ],
        }
    }

    #[test]
    fn reports_remaining_and_overspend() {
        let categories = vec![
            Category::new(2, "Food").with_budget(300.0),
            Category::new(1, "Books").with_budget(50.0),
            Category::new(3, "Fun"),
        ];

        let usage = budget_usage(&categories, &summary());

        assert_eq!(usage.len(), 2);
        assert_eq!(usage[0].name, "Books");
        assert_eq!(usage[0].spent, 0.0);
        assert!(!usage[0].over_budget);
        assert_eq!(usage[1].name, "Food");
        assert_eq!(usage[1].remaining, -50.0);
        assert!(usage[1].over_budget);
    }

    #[test]
    fn percent_used_handles_zero_budget() {
        let usage = budget_usage(&[Category::new(1, "Fun").with_budget(0.0)], &summary());
        assert_eq!(usage[0].percent_used(), 100.0);
    }
}
