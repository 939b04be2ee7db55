//! Shared runtime state for CLI interactions and command execution.

use std::{future::Future, sync::Arc, time::Duration};

use dialoguer::theme::ColorfulTheme;
use tally_config::{Config, ConfigManager, SessionStore};
use tally_core::{
    CategoryStore, CoreError, CredentialContext, DeleteConfirmation, ExpenseScope, ExpenseStore,
    FinanceApi,
};
use tally_domain::Session;
use tally_http::HttpFinanceClient;
use tokio::runtime::Runtime;
use tracing::{info, warn};

use crate::cli::{
    commands,
    core::{format_money, CliMode, CommandError, LoopControl},
    io as cli_io,
    output::{self, OutputPreferences},
    registry::{CommandEntry, CommandRegistry},
};
use crate::TallyError;

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub theme: ColorfulTheme,
    pub config_manager: ConfigManager,
    pub config: Config,
    pub sessions: SessionStore,
    pub session: Option<Session>,
    pub credentials: CredentialContext,
    pub client: Arc<HttpFinanceClient>,
    pub runtime: Runtime,
    pub running: bool,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, TallyError> {
        let config_manager = ConfigManager::from_env()?;
        Self::with_manager(mode, config_manager)
    }

    pub fn with_manager(mode: CliMode, config_manager: ConfigManager) -> Result<Self, TallyError> {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);

        output::set_preferences(OutputPreferences {
            color: mode == CliMode::Interactive,
        });

        let config = config_manager.load_effective()?;
        let sessions = config_manager.sessions();
        let session = match sessions.load() {
            Ok(session) => session,
            Err(err) => {
                warn!(error = %err, "discarding unreadable saved session");
                sessions.clear()?;
                None
            }
        };

        let credentials = CredentialContext::new();
        if let Some(session) = &session {
            credentials.set(session.credential.clone());
        }
        let client = Arc::new(build_client(&config, &credentials));
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;

        Ok(ShellContext {
            mode,
            registry,
            theme: ColorfulTheme::default(),
            config_manager,
            config,
            sessions,
            session,
            credentials,
            client,
            runtime,
            running: true,
        })
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    pub fn prompt(&self) -> String {
        match &self.session {
            Some(session) => format!("tally({})> ", session.user_name),
            None => "tally> ".to_string(),
        }
    }

    /// Drives one async operation to completion on the shell runtime.
    pub fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }

    pub fn api(&self) -> Arc<dyn FinanceApi> {
        self.client.clone()
    }

    pub fn require_session(&self) -> Result<&Session, CommandError> {
        self.session.as_ref().ok_or(CommandError::NotLoggedIn)
    }

    pub fn category_store(&self) -> Result<CategoryStore, CommandError> {
        self.require_session()?;
        Ok(CategoryStore::categories(self.api()))
    }

    pub fn expense_store(&self, scope: ExpenseScope) -> Result<ExpenseStore, CommandError> {
        self.require_session()?;
        Ok(ExpenseStore::expenses(self.api(), scope))
    }

    pub fn sign_in(&mut self, session: Session) -> Result<(), CommandError> {
        self.sessions.save(&session)?;
        self.credentials.set(session.credential.clone());
        info!(user = %session.user_email, "signed in");
        self.session = Some(session);
        Ok(())
    }

    /// Drops the credential and the saved session. Safe to call when signed out.
    pub fn sign_out(&mut self) -> Result<(), CommandError> {
        self.credentials.clear();
        self.sessions.clear()?;
        if let Some(session) = self.session.take() {
            info!(user = %session.user_email, "signed out");
        }
        Ok(())
    }

    /// Rebuilds the API client after the base URL or timeout changed.
    pub fn reload_client(&mut self) {
        self.client = Arc::new(build_client(&self.config, &self.credentials));
    }

    pub fn money(&self, amount: f64) -> String {
        format_money(&self.config.currency_symbol, amount)
    }

    /// Mints a [`DeleteConfirmation`] once the user agreed.
    ///
    /// `--yes` skips the prompt. Script mode never prompts and refuses without it.
    pub fn confirm_delete(
        &self,
        what: &str,
        assume_yes: bool,
    ) -> Result<DeleteConfirmation, CommandError> {
        if assume_yes {
            return Ok(DeleteConfirmation::confirmed());
        }
        if self.mode == CliMode::Script {
            return Err(CommandError::InvalidArguments(format!(
                "refusing to delete {what} without `--yes` in script mode"
            )));
        }
        let prompt = format!("Delete {what}? This cannot be undone.");
        if cli_io::confirm_action(&self.theme, &prompt, false)? {
            Ok(DeleteConfirmation::confirmed())
        } else {
            Err(CommandError::Cancelled)
        }
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.handler(command) {
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        cli_io::print_warning(format!(
            "Unknown command `{input}`. Type `help` to see available commands."
        ));
        if let Some(best) = self.registry.closest(input) {
            cli_io::print_info(format!("Suggestion: `{best}`?"));
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, TallyError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        cli_io::confirm_action(&self.theme, "Exit shell?", true).map_err(TallyError::from)
    }

    pub(crate) fn report_error(&mut self, err: CommandError) -> Result<(), TallyError> {
        match err {
            CommandError::ExitRequested => Ok(()),
            CommandError::Cancelled => {
                cli_io::print_info("Cancelled.");
                Ok(())
            }
            CommandError::InvalidArguments(message) => {
                cli_io::print_error(&message);
                cli_io::print_hint("Use `help <command>` for usage details.");
                Ok(())
            }
            CommandError::Api(err) if err.requires_login() => {
                cli_io::print_error(&err);
                if self.session.is_some() {
                    self.sign_out()?;
                    cli_io::print_hint("Your session is no longer valid. Use `login <email>` again.");
                }
                Ok(())
            }
            CommandError::Api(CoreError::Network(message)) => {
                cli_io::print_error(format!("Could not reach the server: {message}"));
                cli_io::print_hint(format!(
                    "Check that the API at {} is running.",
                    self.config.api_base_url
                ));
                Ok(())
            }
            other => {
                cli_io::print_error(&other);
                Ok(())
            }
        }
    }
}

fn build_client(config: &Config, credentials: &CredentialContext) -> HttpFinanceClient {
    HttpFinanceClient::new(
        config.api_base_url.clone(),
        credentials.clone(),
        Duration::from_secs(config.request_timeout_secs.max(1)),
    )
}
