//! tally-core
//!
//! Client-side synchronisation and aggregation for Tally.
//! Depends on tally-domain. No HTTP, no terminal I/O: the remote API is consumed
//! through the [`FinanceApi`] and [`AuthApi`] contracts.

pub mod aggregation;
pub mod budget;
pub mod credential;
pub mod error;
pub mod remote;
pub mod store;
pub mod summary_service;

pub use aggregation::{aggregate, UNCATEGORIZED_COLOR, UNCATEGORIZED_NAME};
pub use budget::{budget_usage, BudgetUsage};
pub use credential::CredentialContext;
pub use error::{CoreError, CoreResult, ErrorKind};
pub use remote::{AuthApi, FinanceApi};
pub use store::{
    CategoryCollection, CategoryStore, Collection, CollectionStore, Completion,
    DeleteConfirmation, ExpenseCollection, ExpenseScope, ExpenseStore,
};
pub use summary_service::SummaryService;
