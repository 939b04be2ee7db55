pub mod build_info;

use tracing_subscriber::{fmt, EnvFilter};

/// Installs the global fmt subscriber writing to stderr.
///
/// `RUST_LOG` wins over `default_filter`; an unparsable filter falls back to
/// [`crate::DEFAULT_LOG_FILTER`].
pub fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new(crate::DEFAULT_LOG_FILTER));

    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
