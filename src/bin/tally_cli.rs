use tally::{cli::run_cli, init_with_filter, DEFAULT_LOG_FILTER};
use tally_config::ConfigManager;

fn main() {
    let filter = ConfigManager::from_env()
        .and_then(|manager| manager.load())
        .map(|config| config.log_filter)
        .unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string());
    init_with_filter(&filter);

    if let Err(err) = run_cli() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
