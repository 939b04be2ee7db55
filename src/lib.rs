#![doc(test(attr(deny(warnings))))]

//! Tally is a terminal client for a personal finance REST service: categories
//! with monthly budgets, dated expenses, and monthly spending summaries.

pub mod cli;
pub mod errors;
pub mod utils;

pub use errors::TallyError;

use std::sync::Once;

/// Directive used when neither `RUST_LOG` nor the config provides one.
pub const DEFAULT_LOG_FILTER: &str = "tally=info";

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing with the default filter.
pub fn init() {
    init_with_filter(DEFAULT_LOG_FILTER);
}

/// Initializes global tracing once; later calls are ignored.
pub fn init_with_filter(filter: &str) {
    INIT_TRACING.call_once(|| {
        utils::init_tracing(filter);
        tracing::debug!("Tally tracing initialized.");
    });
}
