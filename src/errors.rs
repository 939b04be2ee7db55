use thiserror::Error;

use tally_config::ConfigError;
use tally_core::CoreError;

/// Failures that end a `tally_cli` run.
#[derive(Debug, Error)]
pub enum TallyError {
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Line editor error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
    #[error("Command failed: {0}")]
    Command(String),
}
