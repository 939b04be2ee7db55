//! Contracts for the remote REST API consumed by the stores.

use async_trait::async_trait;
use tally_domain::{
    Category, CategoryDraft, CategoryId, Expense, ExpenseDraft, ExpenseId, LoginRequest,
    LoginResponse, RegisterRequest, ResetPasswordRequest, YearMonth,
};

use crate::CoreResult;

/// Category and expense endpoints of the finance backend.
///
/// Implementations attach the bearer credential captured at send time and map
/// transport/status failures onto [`crate::CoreError`].
#[async_trait]
pub trait FinanceApi: Send + Sync {
    async fn list_categories(&self) -> CoreResult<Vec<Category>>;
    async fn create_category(&self, draft: &CategoryDraft) -> CoreResult<Category>;
    async fn update_category(&self, id: CategoryId, draft: &CategoryDraft)
        -> CoreResult<Category>;
    async fn delete_category(&self, id: CategoryId) -> CoreResult<()>;

    async fn list_expenses(&self) -> CoreResult<Vec<Expense>>;
    async fn list_expenses_for_month(&self, period: YearMonth) -> CoreResult<Vec<Expense>>;
    async fn create_expense(
        &self,
        category_id: CategoryId,
        draft: &ExpenseDraft,
    ) -> CoreResult<Expense>;
    async fn update_expense(
        &self,
        id: ExpenseId,
        category_id: CategoryId,
        draft: &ExpenseDraft,
    ) -> CoreResult<Expense>;
    async fn delete_expense(&self, id: ExpenseId) -> CoreResult<()>;
}

/// Account endpoints. They do not require a credential.
#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn login(&self, request: &LoginRequest) -> CoreResult<LoginResponse>;
    async fn register(&self, request: &RegisterRequest) -> CoreResult<()>;
    async fn reset_password(&self, request: &ResetPasswordRequest) -> CoreResult<()>;
}
