//! tally-config
//!
//! Persistent client configuration and the saved login session.
//! Owns the Config data structure plus disk persistence helpers.

pub mod error;
pub mod manager;
pub mod model;
pub mod session;

pub use error::ConfigError;
pub use manager::{ConfigManager, HOME_ENV};
pub use model::{Config, API_URL_ENV};
pub use session::SessionStore;
