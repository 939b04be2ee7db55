use tally_core::{AuthApi, CoreError};
use tally_domain::{LoginRequest, RegisterRequest, ResetPasswordRequest, Session};

use crate::cli::core::{CliMode, CommandError, CommandResult};
use crate::cli::io;
use crate::cli::registry::CommandEntry;
use crate::cli::shell_context::ShellContext;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "login",
            "Sign in and remember the session",
            "login <email> [password]",
            cmd_login,
        ),
        CommandEntry::new(
            "register",
            "Create a new account",
            "register <name> <email> [password]",
            cmd_register,
        ),
        CommandEntry::new(
            "reset-password",
            "Set a new password for an account",
            "reset-password <email> [new-password]",
            cmd_reset_password,
        ),
        CommandEntry::new("logout", "Forget the saved session", "logout", cmd_logout),
        CommandEntry::new("whoami", "Show the signed-in user", "whoami", cmd_whoami),
    ]
}

/// Uses the password argument when given, else prompts for one.
fn password_arg(
    context: &ShellContext,
    given: Option<&&str>,
    prompt: &str,
    confirm: bool,
) -> Result<String, CommandError> {
    if let Some(password) = given {
        return Ok(password.to_string());
    }
    if context.mode == CliMode::Script {
        return Err(CommandError::InvalidArguments(
            "password argument required in script mode".into(),
        ));
    }
    io::prompt_password(&context.theme, prompt, confirm)
}

fn require_email(value: &str) -> Result<String, CommandError> {
    let email = value.trim();
    if email.contains('@') && !email.starts_with('@') && !email.ends_with('@') {
        Ok(email.to_string())
    } else {
        Err(CommandError::InvalidArguments(format!(
            "`{value}` is not an email address"
        )))
    }
}

/// Keeps a 401/403 from an auth endpoint apart from an expired session.
fn rejected_by_auth(err: CoreError, message: impl FnOnce(String) -> String) -> CommandError {
    match err {
        CoreError::Auth(detail) => CommandError::Rejected(message(detail)),
        other => CommandError::Api(other),
    }
}

fn cmd_login(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(email) = args.first() else {
        return Err(CommandError::InvalidArguments("usage: login <email> [password]".into()));
    };
    let request = LoginRequest {
        user_email: require_email(email)?,
        user_password: password_arg(context, args.get(1), "Password", false)?,
    };
    let client = context.client.clone();
    let response = context
        .block_on(async move { client.login(&request).await })
        .map_err(|err| rejected_by_auth(err, |_| "Invalid credentials.".to_string()))?;
    let session = Session::from(response);
    let greeting = format!("Welcome, {}.", session.user_name);
    context.sign_in(session)?;
    io::print_success(greeting);
    Ok(())
}

fn cmd_register(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (Some(name), Some(email)) = (args.first(), args.get(1)) else {
        return Err(CommandError::InvalidArguments(
            "usage: register <name> <email> [password]".into(),
        ));
    };
    if name.trim().is_empty() {
        return Err(CommandError::InvalidArguments("name cannot be empty".into()));
    }
    let request = RegisterRequest {
        user_name: name.trim().to_string(),
        user_email: require_email(email)?,
        user_password: password_arg(context, args.get(2), "Choose a password", true)?,
    };
    let client = context.client.clone();
    context
        .block_on(async move { client.register(&request).await })
        .map_err(|err| rejected_by_auth(err, |detail| format!("Registration rejected: {detail}")))?;
    io::print_success(format!("Account created for {}.", email.trim()));
    io::print_hint(format!("Use `login {}` to sign in.", email.trim()));
    Ok(())
}

fn cmd_reset_password(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(email) = args.first() else {
        return Err(CommandError::InvalidArguments(
            "usage: reset-password <email> [new-password]".into(),
        ));
    };
    let request = ResetPasswordRequest {
        user_email: require_email(email)?,
        new_password: password_arg(context, args.get(1), "New password", true)?,
    };
    let client = context.client.clone();
    context
        .block_on(async move { client.reset_password(&request).await })
        .map_err(|err| rejected_by_auth(err, |detail| format!("Password reset rejected: {detail}")))?;
    io::print_success("Password updated.");
    Ok(())
}

fn cmd_logout(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let was_signed_in = context.session.is_some();
    context.sign_out()?;
    if was_signed_in {
        io::print_success("Logged out.");
    } else {
        io::print_info("Not logged in.");
    }
    Ok(())
}

fn cmd_whoami(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    match &context.session {
        Some(session) => io::print_info(format!(
            "{} <{}> via {}",
            session.user_name, session.user_email, context.config.api_base_url
        )),
        None => io::print_info("Not logged in."),
    }
    Ok(())
}
