//! Dated spending records and their create/update payloads.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::common::*;

/// A single dated spending record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: ExpenseId,
    pub description: String,
    pub amount: f64,
    pub expense_date: NaiveDate,
    #[serde(default)]
    pub category: Option<Category>,
}

impl Expense {
    pub fn new(
        id: ExpenseId,
        description: impl Into<String>,
        amount: f64,
        expense_date: NaiveDate,
    ) -> Self {
        Self {
            id,
            description: description.into(),
            amount,
            expense_date,
            category: None,
        }
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn category_id(&self) -> Option<CategoryId> {
        self.category.as_ref().map(|category| category.id)
    }

    pub fn category_name(&self) -> Option<&str> {
        self.category.as_ref().map(|category| category.name.as_str())
    }
}

impl Identifiable for Expense {
    fn id(&self) -> i64 {
        self.id
    }
}

impl Amounted for Expense {
    fn amount(&self) -> f64 {
        self.amount
    }
}

/// Create/update payload for an expense.
///
/// The target category travels in the request path, so it is not part of the
/// JSON body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseDraft {
    pub description: String,
    pub amount: f64,
    pub expense_date: NaiveDate,
    #[serde(skip)]
    pub category_id: CategoryId,
}

impl ExpenseDraft {
    pub fn new(
        category_id: CategoryId,
        description: impl Into<String>,
        amount: f64,
        expense_date: NaiveDate,
    ) -> Self {
        Self {
            description: description.into(),
            amount,
            expense_date,
            category_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expense_accepts_null_category() {
        let json = r#"{"id":9,"description":"Taxi","amount":30.0,"expenseDate":"2024-03-05","category":null}"#;
        let expense: Expense = serde_json::from_str(json).expect("decode expense");
        assert_eq!(expense.expense_date, NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
        assert!(expense.category.is_none());
        assert_eq!(expense.category_id(), None);
    }

    #[test]
    fn draft_body_omits_category_id() {
        let draft = ExpenseDraft::new(
            4,
            "Lunch",
            12.5,
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        );
        let value = serde_json::to_value(&draft).expect("encode draft");
        assert_eq!(value["expenseDate"], "2024-03-01");
        assert!(value.get("categoryId").is_none());
    }
}
