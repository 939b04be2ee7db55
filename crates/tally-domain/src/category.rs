//! Budget categories as served by the remote API.

use serde::{Deserialize, Serialize};

use crate::common::*;

/// Color used when the server returns a category without a display token.
pub const FALLBACK_CATEGORY_COLOR: &str = "#6366f1";

/// Color preselected for new categories.
pub const DEFAULT_DRAFT_COLOR: &str = "#000000";

/// A user-defined budget grouping.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    #[serde(default)]
    pub monthly_budget: Option<f64>,
    #[serde(default)]
    pub color: Option<String>,
}

impl Category {
    pub fn new(id: CategoryId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            monthly_budget: None,
            color: None,
        }
    }

    pub fn with_budget(mut self, amount: f64) -> Self {
        self.monthly_budget = Some(amount);
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Returns the declared color, or the fallback token when none is set.
    pub fn display_color(&self) -> &str {
        self.color
            .as_deref()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or(FALLBACK_CATEGORY_COLOR)
    }

    /// Builds an edit payload pre-populated from this category.
    ///
    /// A missing color becomes the color the category is displayed with.
    pub fn to_draft(&self) -> CategoryDraft {
        CategoryDraft {
            name: self.name.clone(),
            monthly_budget: self.monthly_budget,
            color: self.display_color().to_string(),
        }
    }
}

impl Identifiable for Category {
    fn id(&self) -> i64 {
        self.id
    }
}

impl NamedEntity for Category {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Create/update payload for a category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDraft {
    pub name: String,
    pub monthly_budget: Option<f64>,
    pub color: String,
}

impl CategoryDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            monthly_budget: None,
            color: DEFAULT_DRAFT_COLOR.to_string(),
        }
    }

    pub fn with_budget(mut self, amount: Option<f64>) -> Self {
        self.monthly_budget = amount;
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }
}
