use std::time::Duration;

use async_trait::async_trait;
use reqwest::{
    header::{HeaderValue, AUTHORIZATION},
    Method, RequestBuilder, Response,
};
use serde::{de::DeserializeOwned, Serialize};
use tally_core::{AuthApi, CoreError, CoreResult, CredentialContext, FinanceApi};
use tally_domain::{
    Category, CategoryDraft, CategoryId, Expense, ExpenseDraft, ExpenseId, LoginRequest,
    LoginResponse, RegisterRequest, ResetPasswordRequest, YearMonth,
};
use tracing::{debug, instrument, warn};

use crate::routes;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Remote API client for the finance backend.
///
/// Reads the bearer credential from the shared [`CredentialContext`] when a
/// request is built, so a logout applies to every later request. Failures are
/// never retried.
#[derive(Debug, Clone)]
pub struct HttpFinanceClient {
    base_url: String,
    credentials: CredentialContext,
    client: reqwest::Client,
}

impl HttpFinanceClient {
    pub fn new(
        base_url: impl Into<String>,
        credentials: CredentialContext,
        timeout: Duration,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|err| {
                warn!(
                    error = %err,
                    ?timeout,
                    "http client setup failed, using defaults without timeout"
                );
                reqwest::Client::new()
            });
        Self {
            base_url,
            credentials,
            client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn credentials(&self) -> &CredentialContext {
        &self.credentials
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str) -> CoreResult<RequestBuilder> {
        let mut builder = self.client.request(method, self.url(path));
        if let Some(credential) = self.credentials.snapshot() {
            let value = HeaderValue::from_str(&credential.bearer_value())
                .map_err(|err| CoreError::Auth(format!("invalid credential header: {err}")))?;
            builder = builder.header(AUTHORIZATION, value);
        }
        Ok(builder)
    }

    async fn send(&self, builder: RequestBuilder) -> CoreResult<Response> {
        let response = builder.send().await.map_err(transport_error)?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_else(|err| {
            warn!(status = status.as_u16(), error = %err, "error body could not be read");
            String::new()
        });
        let err = CoreError::from_status(status.as_u16(), &body);
        warn!(status = status.as_u16(), error = %err, "request rejected");
        Err(err)
    }

    async fn fetch<T: DeserializeOwned>(&self, path: &str) -> CoreResult<T> {
        let builder = self.request(Method::GET, path)?;
        decode(self.send(builder).await?).await
    }

    async fn write<B, T>(&self, method: Method, path: &str, body: &B) -> CoreResult<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let builder = self.request(method, path)?.json(body);
        decode(self.send(builder).await?).await
    }

    /// Sends a request whose response body carries nothing the caller needs.
    async fn command<B>(&self, method: Method, path: &str, body: Option<&B>) -> CoreResult<()>
    where
        B: Serialize + ?Sized + Sync,
    {
        let mut builder = self.request(method, path)?;
        if let Some(body) = body {
            builder = builder.json(body);
        }
        self.send(builder).await.map(drop)
    }
}

fn transport_error(err: reqwest::Error) -> CoreError {
    warn!(error = %err, "request failed before a response arrived");
    if err.is_timeout() {
        CoreError::Network(format!("request timed out: {err}"))
    } else {
        CoreError::Network(err.to_string())
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> CoreResult<T> {
    let bytes = response.bytes().await.map_err(transport_error)?;
    serde_json::from_slice(&bytes).map_err(|err| CoreError::Decode(err.to_string()))
}

#[async_trait]
impl FinanceApi for HttpFinanceClient {
    #[instrument(name = "api_list_categories", skip(self))]
    async fn list_categories(&self) -> CoreResult<Vec<Category>> {
        let categories: Vec<Category> = self.fetch(routes::CATEGORIES).await?;
        debug!(count = categories.len(), "categories fetched");
        Ok(categories)
    }

    #[instrument(name = "api_create_category", skip(self, draft), fields(name = %draft.name))]
    async fn create_category(&self, draft: &CategoryDraft) -> CoreResult<Category> {
        let category: Category = self.write(Method::POST, routes::CATEGORIES, draft).await?;
        debug!(id = category.id, "category created");
        Ok(category)
    }

    #[instrument(name = "api_update_category", skip(self, draft))]
    async fn update_category(
        &self,
        id: CategoryId,
        draft: &CategoryDraft,
    ) -> CoreResult<Category> {
        self.write(Method::PUT, &routes::category(id), draft).await
    }

    #[instrument(name = "api_delete_category", skip(self))]
    async fn delete_category(&self, id: CategoryId) -> CoreResult<()> {
        self.command::<()>(Method::DELETE, &routes::category(id), None)
            .await
    }

    #[instrument(name = "api_list_expenses", skip(self))]
    async fn list_expenses(&self) -> CoreResult<Vec<Expense>> {
        let expenses: Vec<Expense> = self.fetch(routes::EXPENSES).await?;
        debug!(count = expenses.len(), "expenses fetched");
        Ok(expenses)
    }

    #[instrument(name = "api_list_expenses_for_month", skip(self, period), fields(period = %period))]
    async fn list_expenses_for_month(&self, period: YearMonth) -> CoreResult<Vec<Expense>> {
        let expenses: Vec<Expense> = self.fetch(&routes::expenses_in_month(period)).await?;
        debug!(count = expenses.len(), "monthly expenses fetched");
        Ok(expenses)
    }

    #[instrument(name = "api_create_expense", skip(self, draft))]
    async fn create_expense(
        &self,
        category_id: CategoryId,
        draft: &ExpenseDraft,
    ) -> CoreResult<Expense> {
        let expense: Expense = self
            .write(Method::POST, &routes::expenses_of_category(category_id), draft)
            .await?;
        debug!(id = expense.id, "expense created");
        Ok(expense)
    }

    #[instrument(name = "api_update_expense", skip(self, draft))]
    async fn update_expense(
        &self,
        id: ExpenseId,
        category_id: CategoryId,
        draft: &ExpenseDraft,
    ) -> CoreResult<Expense> {
        self.write(
            Method::PUT,
            &routes::expense_in_category(id, category_id),
            draft,
        )
        .await
    }

    #[instrument(name = "api_delete_expense", skip(self))]
    async fn delete_expense(&self, id: ExpenseId) -> CoreResult<()> {
        self.command::<()>(Method::DELETE, &routes::expense(id), None)
            .await
    }
}

#[async_trait]
impl AuthApi for HttpFinanceClient {
    #[instrument(name = "api_login", skip(self, request), fields(email = %request.user_email))]
    async fn login(&self, request: &LoginRequest) -> CoreResult<LoginResponse> {
        self.write(Method::POST, routes::LOGIN, request).await
    }

    #[instrument(name = "api_register", skip(self, request), fields(email = %request.user_email))]
    async fn register(&self, request: &RegisterRequest) -> CoreResult<()> {
        self.command(Method::POST, routes::REGISTER, Some(request))
            .await
    }

    #[instrument(name = "api_reset_password", skip(self, request), fields(email = %request.user_email))]
    async fn reset_password(&self, request: &ResetPasswordRequest) -> CoreResult<()> {
        self.command(Method::POST, routes::RESET_PASSWORD, Some(request))
            .await
    }
}
