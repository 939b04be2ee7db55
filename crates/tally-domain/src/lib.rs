//! tally-domain
//!
//! Pure data types shared by the client (Category, Expense, drafts, periods,
//! summaries, auth payloads). No I/O, no HTTP, no terminal.

pub mod auth;
pub mod category;
pub mod common;
pub mod expense;
pub mod period;
pub mod summary;

pub use auth::*;
pub use category::*;
pub use common::*;
pub use expense::*;
pub use period::*;
pub use summary::*;
