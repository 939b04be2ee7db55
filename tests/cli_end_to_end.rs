use std::{
    net::SocketAddr,
    sync::{Arc, Mutex},
};

use assert_cmd::Command;
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use predicates::prelude::*;
use predicates::str::contains;
use serde_json::{json, Value};
use tempfile::tempdir;

const TOKEN: &str = "e2e-token";

#[derive(Default)]
struct Backend {
    next_id: i64,
    categories: Vec<Value>,
    expenses: Vec<Value>,
}

type Shared = Arc<Mutex<Backend>>;

fn authorized(headers: &HeaderMap) -> Result<(), StatusCode> {
    let expected = format!("Bearer {TOKEN}");
    match headers.get("authorization").and_then(|v| v.to_str().ok()) {
        Some(value) if value == expected => Ok(()),
        _ => Err(StatusCode::UNAUTHORIZED),
    }
}

async fn login(Json(body): Json<Value>) -> Result<Json<Value>, StatusCode> {
    if body["userPassword"] != "secret" {
        return Err(StatusCode::UNAUTHORIZED);
    }
    Ok(Json(json!({ "token": TOKEN, "userName": "Asha", "userEmail": body["userEmail"] })))
}

async fn list_categories(
    State(backend): State<Shared>,
    headers: HeaderMap,
) -> Result<Json<Value>, StatusCode> {
    authorized(&headers)?;
    let backend = backend.lock().expect("backend lock");
    Ok(Json(Value::Array(backend.categories.clone())))
}

async fn create_category(
    State(backend): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    authorized(&headers)?;
    let mut backend = backend.lock().expect("backend lock");
    backend.next_id += 1;
    let category = json!({
        "id": backend.next_id,
        "name": body["name"],
        "monthlyBudget": body["monthlyBudget"],
        "color": body["color"],
    });
    backend.categories.push(category.clone());
    Ok(Json(category))
}

async fn create_expense(
    State(backend): State<Shared>,
    Path(category_id): Path<i64>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    authorized(&headers)?;
    let mut backend = backend.lock().expect("backend lock");
    let category = backend
        .categories
        .iter()
        .find(|category| category["id"] == json!(category_id))
        .cloned()
        .ok_or(StatusCode::NOT_FOUND)?;
    backend.next_id += 1;
    let expense = json!({
        "id": backend.next_id,
        "description": body["description"],
        "amount": body["amount"],
        "expenseDate": body["expenseDate"],
        "category": category,
    });
    backend.expenses.push(expense.clone());
    Ok(Json(expense))
}

async fn list_expenses(
    State(backend): State<Shared>,
    headers: HeaderMap,
) -> Result<Json<Value>, StatusCode> {
    authorized(&headers)?;
    let backend = backend.lock().expect("backend lock");
    Ok(Json(Value::Array(backend.expenses.clone())))
}

async fn month_expenses(
    State(backend): State<Shared>,
    Path((year, month)): Path<(i32, u32)>,
    headers: HeaderMap,
) -> Result<Json<Value>, StatusCode> {
    authorized(&headers)?;
    let prefix = format!("{year}-{month:02}-");
    let backend = backend.lock().expect("backend lock");
    let matching = backend
        .expenses
        .iter()
        .filter(|expense| {
            expense["expenseDate"]
                .as_str()
                .is_some_and(|date| date.starts_with(&prefix))
        })
        .cloned()
        .collect();
    Ok(Json(Value::Array(matching)))
}

fn spawn_backend() -> SocketAddr {
    let app = Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/categories", get(list_categories).post(create_category))
        .route("/api/expenses", get(list_expenses))
        .route("/api/expenses/:category_id", post(create_expense))
        .route("/api/expenses/month/:year/:month", get(month_expenses))
        .with_state(Shared::default());

    let (tx, rx) = std::sync::mpsc::channel();
    std::thread::spawn(move || {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("backend runtime");
        runtime.block_on(async move {
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                .await
                .expect("bind listener");
            tx.send(listener.local_addr().expect("local addr"))
                .expect("send addr");
            axum::serve(listener, app).await.expect("serve backend");
        });
    });
    rx.recv().expect("backend address")
}

#[test]
fn login_record_and_summarise_a_month() {
    let addr = spawn_backend();
    let home = tempdir().expect("tempdir");
    let script = "\
login asha@example.com secret
category-add Food --budget 200 --color 22c55e
expense-add 1 130 2024-05-03 Groceries
expense-add 1 100 2024-05-09 Market
expense-add 1 45 2024-06-01 Next month
summary 2024-05
budgets 2024-05
expenses
";

    Command::cargo_bin("tally_cli")
        .expect("tally_cli binary")
        .env("TALLY_CLI_SCRIPT", "1")
        .env("TALLY_HOME", home.path())
        .env("TALLY_API_URL", format!("http://{addr}/api"))
        .env_remove("RUST_LOG")
        .write_stdin(script)
        .assert()
        .success()
        .stdout(
            contains("Welcome, Asha.")
                .and(contains("Category #1 `Food` created."))
                .and(contains("Expense #2 recorded"))
                .and(contains("Summary for 2024-05"))
                .and(contains("Total spent: ₹230.00"))
                .and(contains("115% OVER"))
                .and(contains("3 expense(s), total ₹275.00")),
        );

    assert!(home.path().join("session.json").exists());
}

#[test]
fn saved_session_is_reused_then_cleared_on_logout() {
    let addr = spawn_backend();
    let home = tempdir().expect("tempdir");
    let run = |script: &'static str| {
        Command::cargo_bin("tally_cli")
            .expect("tally_cli binary")
            .env("TALLY_CLI_SCRIPT", "1")
            .env("TALLY_HOME", home.path())
            .env("TALLY_API_URL", format!("http://{addr}/api"))
            .env_remove("RUST_LOG")
            .write_stdin(script)
            .assert()
            .success()
    };

    run("login asha@example.com secret\n").stdout(contains("Welcome, Asha."));
    run("categories\nlogout\n")
        .stdout(contains("No categories yet").and(contains("Logged out.")));
    assert!(!home.path().join("session.json").exists());
    run("categories\n").stdout(contains("Not logged in"));
}

#[test]
fn rejected_credential_drops_the_session() {
    let addr = spawn_backend();
    let home = tempdir().expect("tempdir");
    std::fs::write(
        home.path().join("session.json"),
        r#"{"credential":"expired","user_name":"Asha","user_email":"asha@example.com"}"#,
    )
    .expect("write session");

    Command::cargo_bin("tally_cli")
        .expect("tally_cli binary")
        .env("TALLY_CLI_SCRIPT", "1")
        .env("TALLY_HOME", home.path())
        .env("TALLY_API_URL", format!("http://{addr}/api"))
        .env_remove("RUST_LOG")
        .write_stdin("categories\nwhoami\n")
        .assert()
        .success()
        .stdout(
            contains("Authentication required")
                .and(contains("Use `login <email>` again."))
                .and(contains("Not logged in.")),
        );

    assert!(!home.path().join("session.json").exists());
}

#[test]
fn wrong_password_keeps_the_existing_session() {
    let addr = spawn_backend();
    let home = tempdir().expect("tempdir");

    Command::cargo_bin("tally_cli")
        .expect("tally_cli binary")
        .env("TALLY_CLI_SCRIPT", "1")
        .env("TALLY_HOME", home.path())
        .env("TALLY_API_URL", format!("http://{addr}/api"))
        .env_remove("RUST_LOG")
        .write_stdin("login asha@example.com secret\nlogin asha@example.com typo\nwhoami\ncategories\n")
        .assert()
        .success()
        .stdout(
            contains("Invalid credentials.")
                .and(contains("Asha <asha@example.com>"))
                .and(contains("No categories yet"))
                .and(contains("Use `login <email>` again.").not()),
        );

    assert!(home.path().join("session.json").exists());
}

#[test]
fn editing_an_unknown_category_reports_not_found() {
    let addr = spawn_backend();
    let home = tempdir().expect("tempdir");

    Command::cargo_bin("tally_cli")
        .expect("tally_cli binary")
        .env("TALLY_CLI_SCRIPT", "1")
        .env("TALLY_HOME", home.path())
        .env("TALLY_API_URL", format!("http://{addr}/api"))
        .env_remove("RUST_LOG")
        .write_stdin("login asha@example.com secret\ncategory-edit 42\ncategory-edit 42 Rent\n")
        .assert()
        .success()
        .stdout(
            contains("Not found: category 42")
                .and(contains("category name is required").not()),
        );
}
