//! Local reflection of a server-side collection.
//!
//! Every mutation goes to the server first and is followed by a full refresh;
//! the local list is never patched in place.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use tally_domain::{
    Category, CategoryDraft, Expense, ExpenseDraft, Identifiable, YearMonth,
};
use tracing::{debug, info, warn};

use crate::{CoreError, CoreResult, FinanceApi};

/// Per-entity adapter between a [`CollectionStore`] and the remote API.
#[async_trait]
pub trait Collection: Send + Sync + 'static {
    type Item: Identifiable + Clone + Send + Sync + 'static;
    type Draft: Send + Sync + 'static;

    fn label(&self) -> &'static str;

    /// Checks required fields before anything is sent.
    fn validate(&self, draft: &Self::Draft) -> CoreResult<()>;

    async fn fetch(&self, api: &dyn FinanceApi) -> CoreResult<Vec<Self::Item>>;
    async fn create(&self, api: &dyn FinanceApi, draft: &Self::Draft) -> CoreResult<Self::Item>;
    async fn update(
        &self,
        api: &dyn FinanceApi,
        id: i64,
        draft: &Self::Draft,
    ) -> CoreResult<Self::Item>;
    async fn delete(&self, api: &dyn FinanceApi, id: i64) -> CoreResult<()>;
}

/// Categories of the signed-in user.
#[derive(Debug, Clone, Copy, Default)]
pub struct CategoryCollection;

#[async_trait]
impl Collection for CategoryCollection {
    type Item = Category;
    type Draft = CategoryDraft;

    fn label(&self) -> &'static str {
        "categories"
    }

    fn validate(&self, draft: &CategoryDraft) -> CoreResult<()> {
        if draft.name.trim().is_empty() {
            return Err(CoreError::Validation("category name is required".into()));
        }
        if let Some(budget) = draft.monthly_budget {
            if !budget.is_finite() || budget < 0.0 {
                return Err(CoreError::Validation(format!(
                    "monthly budget must be a non-negative amount, got {budget}"
                )));
            }
        }
        Ok(())
    }

    async fn fetch(&self, api: &dyn FinanceApi) -> CoreResult<Vec<Category>> {
        api.list_categories().await
    }

    async fn create(&self, api: &dyn FinanceApi, draft: &CategoryDraft) -> CoreResult<Category> {
        api.create_category(draft).await
    }

    async fn update(
        &self,
        api: &dyn FinanceApi,
        id: i64,
        draft: &CategoryDraft,
    ) -> CoreResult<Category> {
        api.update_category(id, draft).await
    }

    async fn delete(&self, api: &dyn FinanceApi, id: i64) -> CoreResult<()> {
        api.delete_category(id).await
    }
}

/// Which expenses an [`ExpenseCollection`] reflects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExpenseScope {
    #[default]
    All,
    Month(YearMonth),
}

/// Expenses of the signed-in user, optionally limited to one calendar month.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExpenseCollection {
    pub scope: ExpenseScope,
}

impl ExpenseCollection {
    pub fn all() -> Self {
        Self {
            scope: ExpenseScope::All,
        }
    }

    pub fn month(period: YearMonth) -> Self {
        Self {
            scope: ExpenseScope::Month(period),
        }
    }
}

#[async_trait]
impl Collection for ExpenseCollection {
    type Item = Expense;
    type Draft = ExpenseDraft;

    fn label(&self) -> &'static str {
        "expenses"
    }

    fn validate(&self, draft: &ExpenseDraft) -> CoreResult<()> {
        if draft.description.trim().is_empty() {
            return Err(CoreError::Validation("expense description is required".into()));
        }
        if !draft.amount.is_finite() || draft.amount <= 0.0 {
            return Err(CoreError::Validation(format!(
                "expense amount must be positive, got {}",
                draft.amount
            )));
        }
        if draft.category_id <= 0 {
            return Err(CoreError::Validation(
                "expense requires a target category".into(),
            ));
        }
        Ok(())
    }

    async fn fetch(&self, api: &dyn FinanceApi) -> CoreResult<Vec<Expense>> {
        match self.scope {
            ExpenseScope::All => api.list_expenses().await,
            ExpenseScope::Month(period) => api.list_expenses_for_month(period).await,
        }
    }

    async fn create(&self, api: &dyn FinanceApi, draft: &ExpenseDraft) -> CoreResult<Expense> {
        api.create_expense(draft.category_id, draft).await
    }

    async fn update(
        &self,
        api: &dyn FinanceApi,
        id: i64,
        draft: &ExpenseDraft,
    ) -> CoreResult<Expense> {
        api.update_expense(id, draft.category_id, draft).await
    }

    async fn delete(&self, api: &dyn FinanceApi, id: i64) -> CoreResult<()> {
        api.delete_expense(id).await
    }
}

/// Proof that the user explicitly confirmed an irreversible deletion.
///
/// Only the view layer mints one, right after asking the user.
#[derive(Debug)]
pub struct DeleteConfirmation {
    _confirmed: (),
}

impl DeleteConfirmation {
    pub fn confirmed() -> Self {
        Self { _confirmed: () }
    }
}

/// Result message of a successful mutation.
///
/// `resynced` is `false` when the mutation went through but the follow-up
/// refresh failed; the refresh error is then available via
/// [`CollectionStore::last_error`].
#[derive(Debug, Clone, PartialEq)]
pub struct Completion<T> {
    pub value: T,
    pub resynced: bool,
}

struct StoreState<T> {
    items: Vec<T>,
    last_error: Option<CoreError>,
    issued: u64,
    applied: u64,
    generation: u64,
    detached: bool,
}

impl<T> Default for StoreState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            last_error: None,
            issued: 0,
            applied: 0,
            generation: 0,
            detached: false,
        }
    }
}

/// Holds the current local list of one collection and keeps it in step with the server.
pub struct CollectionStore<C: Collection> {
    api: Arc<dyn FinanceApi>,
    collection: C,
    state: Mutex<StoreState<C::Item>>,
}

pub type CategoryStore = CollectionStore<CategoryCollection>;
pub type ExpenseStore = CollectionStore<ExpenseCollection>;

impl CollectionStore<CategoryCollection> {
    pub fn categories(api: Arc<dyn FinanceApi>) -> Self {
        Self::new(api, CategoryCollection)
    }
}

impl CollectionStore<ExpenseCollection> {
    pub fn expenses(api: Arc<dyn FinanceApi>, scope: ExpenseScope) -> Self {
        Self::new(api, ExpenseCollection { scope })
    }
}

impl<C: Collection> CollectionStore<C> {
    pub fn new(api: Arc<dyn FinanceApi>, collection: C) -> Self {
        Self {
            api,
            collection,
            state: Mutex::new(StoreState::default()),
        }
    }

    /// Fetches the full collection and replaces the local list with it.
    ///
    /// Returns the number of locally held items afterwards. On failure the
    /// previous list is kept. A response that resolves after a newer refresh
    /// was applied, or after [`detach`](Self::detach), is discarded.
    pub async fn refresh(&self) -> CoreResult<usize> {
        let label = self.collection.label();
        let ticket = {
            let mut state = self.lock();
            state.issued += 1;
            state.issued
        };
        debug!(collection = label, ticket, "refresh issued");

        let result = self.collection.fetch(&*self.api).await;

        let mut state = self.lock();
        match result {
            Ok(items) => {
                if state.detached {
                    debug!(collection = label, ticket, "refresh discarded, consumer detached");
                    return Ok(state.items.len());
                }
                if ticket <= state.applied {
                    debug!(
                        collection = label,
                        ticket,
                        applied = state.applied,
                        "stale refresh discarded"
                    );
                    return Ok(state.items.len());
                }
                state.items = items;
                state.applied = ticket;
                state.generation += 1;
                state.last_error = None;
                debug!(collection = label, ticket, count = state.items.len(), "refresh applied");
                Ok(state.items.len())
            }
            Err(err) => {
                warn!(collection = label, ticket, error = %err, "refresh failed");
                if ticket > state.applied {
                    state.last_error = Some(err.clone());
                }
                Err(err)
            }
        }
    }

    /// Creates an entity on the server, then resynchronises.
    pub async fn create(&self, draft: &C::Draft) -> CoreResult<Completion<C::Item>> {
        self.collection
            .validate(draft)
            .map_err(|err| self.record_failure("create", err))?;
        let created = self
            .collection
            .create(&*self.api, draft)
            .await
            .map_err(|err| self.record_failure("create", err))?;
        info!(
            collection = self.collection.label(),
            id = created.id(),
            "entity created"
        );
        let resynced = self.resync().await;
        Ok(Completion {
            value: created,
            resynced,
        })
    }

    /// Updates the entity `id` on the server, then resynchronises.
    ///
    /// A failed update leaves the local list as it was.
    pub async fn update(&self, id: i64, draft: &C::Draft) -> CoreResult<Completion<C::Item>> {
        self.collection
            .validate(draft)
            .map_err(|err| self.record_failure("update", err))?;
        let updated = self
            .collection
            .update(&*self.api, id, draft)
            .await
            .map_err(|err| self.record_failure("update", err))?;
        info!(collection = self.collection.label(), id, "entity updated");
        let resynced = self.resync().await;
        Ok(Completion {
            value: updated,
            resynced,
        })
    }

    /// Deletes the entity `id` on the server, then resynchronises.
    pub async fn remove(
        &self,
        id: i64,
        _confirmation: DeleteConfirmation,
    ) -> CoreResult<Completion<i64>> {
        self.collection
            .delete(&*self.api, id)
            .await
            .map_err(|err| self.record_failure("remove", err))?;
        info!(collection = self.collection.label(), id, "entity removed");
        let resynced = self.resync().await;
        Ok(Completion {
            value: id,
            resynced,
        })
    }

    /// Stops applying responses; used once the consumer is no longer interested.
    pub fn detach(&self) {
        self.lock().detached = true;
    }

    pub fn is_detached(&self) -> bool {
        self.lock().detached
    }

    /// Snapshot of the local list.
    pub fn items(&self) -> Vec<C::Item> {
        self.lock().items.clone()
    }

    /// Runs `f` against the local list without cloning it.
    pub fn with_items<R>(&self, f: impl FnOnce(&[C::Item]) -> R) -> R {
        let state = self.lock();
        f(&state.items)
    }

    pub fn get(&self, id: i64) -> Option<C::Item> {
        self.lock().items.iter().find(|item| item.id() == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().items.is_empty()
    }

    pub fn last_error(&self) -> Option<CoreError> {
        self.lock().last_error.clone()
    }

    /// Number of refresh responses applied so far.
    pub fn generation(&self) -> u64 {
        self.lock().generation
    }

    async fn resync(&self) -> bool {
        self.refresh().await.is_ok()
    }

    fn record_failure(&self, operation: &'static str, err: CoreError) -> CoreError {
        warn!(
            collection = self.collection.label(),
            operation,
            error = %err,
            "mutation failed"
        );
        self.lock().last_error = Some(err.clone());
        err
    }

    fn lock(&self) -> MutexGuard<'_, StoreState<C::Item>> {
        self.state.lock().unwrap_or_else(|err| err.into_inner())
    }
}
