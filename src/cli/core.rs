//! Command results, errors, and argument parsing shared by all handlers.

use std::io;

use chrono::NaiveDate;
use tally_config::ConfigError;
use tally_core::CoreError;
use tally_domain::YearMonth;

use crate::TallyError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error("Not logged in. Use `login <email>` first.")]
    NotLoggedIn,
    #[error("Cancelled.")]
    Cancelled,
    /// The auth endpoints turned the submitted credentials down. Any saved
    /// session is left alone.
    #[error("{0}")]
    Rejected(String),
    #[error(transparent)]
    Api(#[from] CoreError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

impl From<CommandError> for TallyError {
    fn from(err: CommandError) -> Self {
        match err {
            CommandError::Api(err) => TallyError::Core(err),
            CommandError::Config(err) => TallyError::Config(err),
            CommandError::Io(err) => TallyError::Io(err),
            other => TallyError::Command(other.to_string()),
        }
    }
}

/// Options accepted after positional arguments.
#[derive(Debug, Default, Clone, PartialEq)]
pub(crate) struct Flags {
    pub budget: Option<f64>,
    pub clear_budget: bool,
    pub color: Option<String>,
    pub yes: bool,
}

/// Splits `args` into positional values and recognised `--flags`.
pub(crate) fn split_flags<'a>(args: &[&'a str]) -> Result<(Vec<&'a str>, Flags), CommandError> {
    let mut positional = Vec::new();
    let mut flags = Flags::default();
    let mut iter = args.iter().copied();
    while let Some(arg) = iter.next() {
        match arg {
            "--budget" => {
                let value = iter.next().ok_or_else(|| missing_value("--budget"))?;
                if value.eq_ignore_ascii_case("none") {
                    flags.clear_budget = true;
                } else {
                    flags.budget = Some(parse_budget(value)?);
                }
            }
            "--color" => {
                let value = iter.next().ok_or_else(|| missing_value("--color"))?;
                flags.color = Some(parse_color(value)?);
            }
            "--yes" | "-y" => flags.yes = true,
            other if other.starts_with("--") => {
                return Err(CommandError::InvalidArguments(format!(
                    "unknown option `{other}`"
                )))
            }
            other => positional.push(other),
        }
    }
    Ok((positional, flags))
}

fn missing_value(flag: &str) -> CommandError {
    CommandError::InvalidArguments(format!("`{flag}` expects a value"))
}

pub(crate) fn parse_id(input: &str, what: &str) -> Result<i64, CommandError> {
    input
        .trim_start_matches('#')
        .parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| CommandError::InvalidArguments(format!("invalid {what} id `{input}`")))
}

pub(crate) fn parse_amount(input: &str) -> Result<f64, CommandError> {
    input
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && *value > 0.0)
        .ok_or_else(|| {
            CommandError::InvalidArguments(format!(
                "invalid amount `{input}` (expected a positive number)"
            ))
        })
}

fn parse_budget(input: &str) -> Result<f64, CommandError> {
    input
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && *value >= 0.0)
        .ok_or_else(|| {
            CommandError::InvalidArguments(format!(
                "invalid budget `{input}` (expected a non-negative number or `none`)"
            ))
        })
}

pub(crate) fn parse_color(input: &str) -> Result<String, CommandError> {
    let digits = input.strip_prefix('#').unwrap_or(input);
    if digits.len() == 6 && digits.chars().all(|ch| ch.is_ascii_hexdigit()) {
        Ok(format!("#{}", digits.to_ascii_lowercase()))
    } else {
        Err(CommandError::InvalidArguments(format!(
            "invalid color `{input}` (use #rrggbb)"
        )))
    }
}

pub(crate) fn parse_date(input: &str) -> Result<NaiveDate, CommandError> {
    NaiveDate::parse_from_str(input, "%Y-%m-%d").map_err(|_| {
        CommandError::InvalidArguments(format!("invalid date `{input}` (use YYYY-MM-DD)"))
    })
}

/// Optional `YYYY-MM` argument, defaulting to the current month.
pub(crate) fn parse_period(input: Option<&str>) -> Result<YearMonth, CommandError> {
    match input {
        None => Ok(YearMonth::current()),
        Some(raw) => raw
            .parse::<YearMonth>()
            .map_err(|err| CommandError::InvalidArguments(format!("{err} (use YYYY-MM)"))),
    }
}

pub(crate) fn format_money(symbol: &str, amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let fixed = format!("{:.2}", amount.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let mut grouped = String::new();
    for (idx, ch) in whole.chars().enumerate() {
        if idx > 0 && (whole.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{sign}{symbol}{grouped}.{cents}")
}
