//! Backend API boundary
//!
//! [`FinanceApi`] is the seam between the dashboard and the REST backend.
//! [`HttpApi`] talks to the real server; tests drive [`crate::state::AppState`]
//! with an in-memory implementation instead.

pub mod client;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::FinboardResult;
use crate::models::{
    Budget, BudgetId, Category, Expense, ExpenseId, Income, IncomeCategory, IncomeId, NewBudget,
    NewExpense, NewIncome,
};
use crate::storage::{Password, Session, SessionUser};

pub use client::HttpApi;

/// Body of `POST /auth/signin`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInRequest<'a> {
    pub username_or_email: &'a str,
    pub password: &'a str,
}

/// What the backend answers to a successful sign-in
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInResponse {
    #[serde(alias = "accessToken")]
    pub token: String,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

impl SignInResponse {
    pub fn into_session(self) -> Session {
        Session {
            token: self.token,
            user: SessionUser {
                username: self.username,
                first_name: self.first_name,
            },
        }
    }
}

/// Operations the dashboard needs from the backend
#[async_trait]
pub trait FinanceApi: Send + Sync {
    /// Use `token` as the bearer credential for subsequent calls
    fn set_token(&mut self, token: Option<String>);

    async fn sign_in(&self, username_or_email: &str, password: &Password)
        -> FinboardResult<SignInResponse>;

    async fn list_categories(&self) -> FinboardResult<Vec<Category>>;
    async fn list_expenses(&self) -> FinboardResult<Vec<Expense>>;
    async fn list_incomes(&self) -> FinboardResult<Vec<Income>>;
    async fn list_income_categories(&self) -> FinboardResult<Vec<IncomeCategory>>;
    async fn list_budgets(&self) -> FinboardResult<Vec<Budget>>;

    async fn create_expense(&self, expense: &NewExpense) -> FinboardResult<Expense>;
    async fn delete_expense(&self, id: ExpenseId) -> FinboardResult<()>;

    async fn create_income(&self, income: &NewIncome) -> FinboardResult<Income>;
    async fn delete_income(&self, id: IncomeId) -> FinboardResult<()>;

    async fn create_budget(&self, budget: &NewBudget) -> FinboardResult<Budget>;
    async fn delete_budget(&self, id: BudgetId) -> FinboardResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_in_response_accepts_either_token_name() {
        let jwt: SignInResponse = serde_json::from_str(
            r#"{"token": "abc", "type": "Bearer", "id": 1, "username": "jdoe", "firstName": "Jane"}"#,
        )
        .unwrap();
        assert_eq!(jwt.token, "abc");

        let alt: SignInResponse =
            serde_json::from_str(r#"{"accessToken": "xyz", "username": "jdoe"}"#).unwrap();
        let session = alt.into_session();
        assert_eq!(session.token, "xyz");
        assert_eq!(session.user.display_name(), "jdoe");
    }

    #[test]
    fn test_sign_in_request_shape() {
        let body = serde_json::to_value(SignInRequest {
            username_or_email: "jane@example.com",
            password: "pw",
        })
        .unwrap();
        assert_eq!(body["usernameOrEmail"], "jane@example.com");
    }
}
