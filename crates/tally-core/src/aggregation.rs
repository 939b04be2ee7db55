//! Monthly spending summary derived from a flat expense list.

use std::collections::HashMap;

use tally_domain::{CategoryTotal, Expense, MonthlySummary};

/// Breakdown name used for expenses without a category.
pub const UNCATEGORIZED_NAME: &str = "Uncategorized";

/// Display color of the uncategorized bucket.
pub const UNCATEGORIZED_COLOR: &str = "#cbd5e1";

/// Sums `expenses` into a total and a per-category breakdown.
///
/// Entries are keyed by category display name, not identifier: two categories
/// sharing a name end up in one entry, colored by whichever was seen first.
/// The breakdown order is unspecified.
pub fn aggregate(expenses: &[Expense]) -> MonthlySummary {
    let mut total = 0.0;
    let mut by_name: HashMap<&str, CategoryTotal> = HashMap::new();

    for expense in expenses {
        let (name, color) = match expense.category.as_ref() {
            Some(category) => (category.name.as_str(), category.display_color()),
            None => (UNCATEGORIZED_NAME, UNCATEGORIZED_COLOR),
        };
        total += expense.amount;
        by_name
            .entry(name)
            .or_insert_with(|| CategoryTotal {
                name: name.to_string(),
                amount: 0.0,
                color: color.to_string(),
            })
            .amount += expense.amount;
    }

    MonthlySummary {
        total,
        breakdown: by_name.into_values().collect(),
    }
}
