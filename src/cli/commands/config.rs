use tally_config::Config;

use crate::cli::core::{CommandError, CommandResult};
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::registry::CommandEntry;
use crate::cli::shell_context::ShellContext;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "config",
        "View and change client settings",
        "config [show|set <key> <value>]",
        cmd_config,
    )]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args.first().map(|arg| arg.to_lowercase()).as_deref() {
        None | Some("show") => show(context),
        Some("set") => {
            if args.len() < 3 {
                return Err(CommandError::InvalidArguments(format!(
                    "usage: config set <{}> <value>",
                    Config::KEYS.join("|")
                )));
            }
            set(context, args[1], &args[2..].join(" "))
        }
        Some(other) => Err(CommandError::InvalidArguments(format!(
            "unknown config subcommand `{other}`"
        ))),
    }
}

fn show(context: &ShellContext) -> CommandResult {
    output_section("Configuration");
    for key in Config::KEYS {
        let value = context.config.get(key).unwrap_or_default();
        io::print_info(format!("  {key:<22} {value}"));
    }
    io::print_info(format!(
        "  {:<22} {}",
        "file",
        context.config_manager.config_path().display()
    ));
    Ok(())
}

fn set(context: &mut ShellContext, key: &str, value: &str) -> CommandResult {
    let key = key.to_lowercase();
    let mut stored = context.config_manager.load()?;
    stored.set(&key, value)?;
    context.config_manager.save(&stored)?;
    context.config.set(&key, value)?;
    if matches!(key.as_str(), "api_base_url" | "request_timeout_secs") {
        context.reload_client();
    }
    if key == "log_filter" {
        io::print_hint("The new log filter applies from the next start.");
    }
    io::print_success(format!(
        "{key} = {}",
        context.config.get(&key).unwrap_or_default()
    ));
    Ok(())
}
