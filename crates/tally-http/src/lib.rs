//! tally-http
//!
//! `reqwest` implementation of the tally-core remote API contracts.

pub mod client;
mod routes;

pub use client::{HttpFinanceClient, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
