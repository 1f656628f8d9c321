//! HTTP implementation of [`FinanceApi`] on top of `reqwest`

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use super::{FinanceApi, SignInRequest, SignInResponse};
use crate::error::{FinboardError, FinboardResult};
use crate::models::{
    Budget, BudgetId, Category, Expense, ExpenseId, Income, IncomeCategory, IncomeId, NewBudget,
    NewExpense, NewIncome,
};
use crate::storage::Password;

/// Client for the finance backend's REST API
pub struct HttpApi {
    client: Client,
    base_url: String,
    token: Option<String>,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

impl HttpApi {
    /// Build a client for `base_url` (e.g. `http://localhost:8080/api`)
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> FinboardResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FinboardError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            token: None,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an API path
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.client.request(method, self.endpoint(path));
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn fetch<T: DeserializeOwned>(&self, builder: RequestBuilder) -> FinboardResult<T> {
        let response = check_status(builder.send().await?).await?;
        response.json::<T>().await.map_err(|e| {
            FinboardError::Fetch(format!("Unexpected response body: {}", e))
        })
    }

    async fn execute(&self, builder: RequestBuilder) -> FinboardResult<()> {
        check_status(builder.send().await?).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_list<T: DeserializeOwned>(&self, path: &str) -> FinboardResult<Vec<T>> {
        let items: Vec<T> = self.fetch(self.request(Method::GET, path)).await?;
        debug!(count = items.len(), "Fetched collection");
        Ok(items)
    }

    #[instrument(skip(self))]
    async fn delete(&self, path: &str) -> FinboardResult<()> {
        self.execute(self.request(Method::DELETE, path)).await
    }
}

/// Map non-success responses onto the error taxonomy
async fn check_status(response: Response) -> FinboardResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status == StatusCode::UNAUTHORIZED {
        warn!("Backend rejected the session token");
        return Err(FinboardError::Unauthorized);
    }

    let text = response.text().await.unwrap_or_default();
    Err(FinboardError::Api {
        status: status.as_u16(),
        message: error_message(status, &text),
    })
}

fn error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.trim().is_empty())
        .or_else(|| {
            let trimmed = body.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        })
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string()
        })
}

#[async_trait]
impl FinanceApi for HttpApi {
    fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    #[instrument(skip(self, password))]
    async fn sign_in(
        &self,
        username_or_email: &str,
        password: &Password,
    ) -> FinboardResult<SignInResponse> {
        let body = SignInRequest {
            username_or_email,
            password: password.expose(),
        };
        self.fetch(self.request(Method::POST, "auth/signin").json(&body))
            .await
    }

    async fn list_categories(&self) -> FinboardResult<Vec<Category>> {
        self.get_list("categories").await
    }

    async fn list_expenses(&self) -> FinboardResult<Vec<Expense>> {
        self.get_list("expenses").await
    }

    async fn list_incomes(&self) -> FinboardResult<Vec<Income>> {
        self.get_list("incomes").await
    }

    async fn list_income_categories(&self) -> FinboardResult<Vec<IncomeCategory>> {
        self.get_list("income-categories").await
    }

    async fn list_budgets(&self) -> FinboardResult<Vec<Budget>> {
        self.get_list("budgets").await
    }

    #[instrument(skip(self, expense))]
    async fn create_expense(&self, expense: &NewExpense) -> FinboardResult<Expense> {
        self.fetch(self.request(Method::POST, "expenses").json(expense))
            .await
    }

    async fn delete_expense(&self, id: ExpenseId) -> FinboardResult<()> {
        self.delete(&format!("expenses/{}", id.get())).await
    }

    #[instrument(skip(self, income))]
    async fn create_income(&self, income: &NewIncome) -> FinboardResult<Income> {
        self.fetch(self.request(Method::POST, "incomes").json(income))
            .await
    }

    async fn delete_income(&self, id: IncomeId) -> FinboardResult<()> {
        self.delete(&format!("incomes/{}", id.get())).await
    }

    #[instrument(skip(self, budget))]
    async fn create_budget(&self, budget: &NewBudget) -> FinboardResult<Budget> {
        self.fetch(self.request(Method::POST, "budgets").json(budget))
            .await
    }

    async fn delete_budget(&self, id: BudgetId) -> FinboardResult<()> {
        self.delete(&format!("budgets/{}", id.get())).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(base: &str) -> HttpApi {
        HttpApi::new(base, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_endpoint_joining() {
        assert_eq!(
            api("http://localhost:8080/api").endpoint("expenses"),
            "http://localhost:8080/api/expenses"
        );
        assert_eq!(
            api("http://localhost:8080/api/").endpoint("/income-categories"),
            "http://localhost:8080/api/income-categories"
        );
    }

    #[test]
    fn test_error_message_prefers_message_field() {
        assert_eq!(
            error_message(
                StatusCode::BAD_REQUEST,
                r#"{"message": "Error: Bad credentials"}"#
            ),
            "Error: Bad credentials"
        );
    }

    #[test]
    fn test_error_message_fallbacks() {
        assert_eq!(
            error_message(StatusCode::INTERNAL_SERVER_ERROR, "boom"),
            "boom"
        );
        assert_eq!(
            error_message(StatusCode::NOT_FOUND, ""),
            "Not Found"
        );
        assert_eq!(
            error_message(StatusCode::BAD_REQUEST, r#"{"message": ""}"#),
            r#"{"message": ""}"#
        );
    }

    #[test]
    fn test_bearer_header_only_when_signed_in() {
        let mut client = api("http://localhost:8080/api");
        let request = client.request(Method::GET, "budgets").build().unwrap();
        assert!(request.headers().get("authorization").is_none());

        client.set_token(Some("abc".into()));
        let request = client.request(Method::GET, "budgets").build().unwrap();
        assert_eq!(
            request.headers().get("authorization").unwrap(),
            "Bearer abc"
        );
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_a_fetch_error() {
        let client = HttpApi::new("http://127.0.0.1:9", Duration::from_millis(500)).unwrap();
        let err = client.list_expenses().await.unwrap_err();
        assert!(matches!(err, FinboardError::Fetch(_)));
    }
}
