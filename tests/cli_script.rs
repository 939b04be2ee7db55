use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use tempfile::tempdir;

/// Nothing listens on port 9 of the loopback interface in the test environment.
const UNREACHABLE_API: &str = "http://127.0.0.1:9/api";

fn tally(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("tally_cli").expect("tally_cli binary");
    cmd.env("TALLY_CLI_SCRIPT", "1")
        .env("TALLY_HOME", home)
        .env("TALLY_API_URL", UNREACHABLE_API)
        .env_remove("RUST_LOG");
    cmd
}

fn write_session(home: &Path) {
    std::fs::write(
        home.join("session.json"),
        r#"{"credential":"stale-token","user_name":"Asha","user_email":"asha@example.com"}"#,
    )
    .expect("write session");
}

#[test]
fn help_lists_commands() {
    let home = tempdir().expect("tempdir");
    tally(home.path())
        .write_stdin("help\nhelp summary\nexit\n")
        .assert()
        .success()
        .stdout(
            contains("Available commands")
                .and(contains("category-add"))
                .and(contains("Usage: summary [YYYY-MM]")),
        );
}

#[test]
fn unknown_command_gets_a_suggestion() {
    let home = tempdir().expect("tempdir");
    tally(home.path())
        .write_stdin("sumary\n")
        .assert()
        .success()
        .stdout(contains("Unknown command `sumary`").and(contains("Suggestion: `summary`?")));
}

#[test]
fn protected_commands_require_login() {
    let home = tempdir().expect("tempdir");
    tally(home.path())
        .write_stdin("categories\nsummary 2024-05\nwhoami\n")
        .assert()
        .success()
        .stdout(contains("Not logged in. Use `login <email>` first.").and(contains("Not logged in.")));
}

#[test]
fn script_mode_refuses_unconfirmed_delete() {
    let home = tempdir().expect("tempdir");
    write_session(home.path());
    tally(home.path())
        .write_stdin("category-delete 3\nexpense-delete 4\n")
        .assert()
        .success()
        .stdout(
            contains("refusing to delete category #3 without `--yes`")
                .and(contains("refusing to delete expense #4 without `--yes`")),
        );
}

#[test]
fn invalid_arguments_print_usage_hint() {
    let home = tempdir().expect("tempdir");
    write_session(home.path());
    tally(home.path())
        .write_stdin("expense-add 1 -4 2024-05-01 Coffee\nexpenses 2024-13\n")
        .assert()
        .success()
        .stdout(
            contains("invalid amount `-4`")
                .and(contains("use YYYY-MM"))
                .and(contains("Use `help <command>` for usage details.")),
        );
}

#[test]
fn unreachable_server_is_reported_and_session_kept() {
    let home = tempdir().expect("tempdir");
    write_session(home.path());
    tally(home.path())
        .write_stdin("whoami\ncategories\n")
        .assert()
        .success()
        .stdout(contains("Asha <asha@example.com>").and(contains("Could not reach the server")));

    assert!(home.path().join("session.json").exists());
}

#[test]
fn config_set_persists_to_home() {
    let home = tempdir().expect("tempdir");
    tally(home.path())
        .write_stdin("config set currency_symbol $\nconfig set request_timeout_secs zero\nconfig\n")
        .assert()
        .success()
        .stdout(
            contains("currency_symbol = $")
                .and(contains("Invalid value for `request_timeout_secs`"))
                .and(contains(UNREACHABLE_API)),
        );

    let saved = std::fs::read_to_string(home.path().join("config.json")).expect("config file");
    assert!(saved.contains("\"currency_symbol\": \"$\""));
    assert!(!saved.contains(UNREACHABLE_API));
}

#[test]
fn version_shows_build_metadata() {
    let home = tempdir().expect("tempdir");
    tally(home.path())
        .write_stdin("version\n")
        .assert()
        .success()
        .stdout(contains("Tally ").and(contains("Build hash")));
}
