pub mod auth;
pub mod category;
pub mod config;
pub mod expense;
pub mod report;
pub mod system;

use crate::cli::registry::{CommandEntry, CommandRegistry};

pub(crate) fn all_entries() -> Vec<CommandEntry> {
    let mut commands = Vec::new();
    commands.extend(auth::definitions());
    commands.extend(category::definitions());
    commands.extend(expense::definitions());
    commands.extend(report::definitions());
    commands.extend(config::definitions());
    commands.extend(system::definitions());
    commands
}

pub(crate) fn register_all(registry: &mut CommandRegistry) {
    for entry in all_entries() {
        registry.register(entry);
    }
}
