//! Custom error types for Finboard
//!
//! One error hierarchy covers local validation, storage, and the backend API.
//! Aggregation never returns these per record: unresolved references and bad
//! dates degrade to placeholders and are logged instead.

use thiserror::Error;

/// The main error type for Finboard operations
#[derive(Error, Debug)]
pub enum FinboardError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// User-supplied values rejected before anything is persisted or sent
    #[error("Validation error: {0}")]
    Validation(String),

    /// A record points at a category that is not in the loaded list
    #[error("Unresolved {entity_type} reference: {identifier}")]
    UnresolvedReference {
        entity_type: &'static str,
        identifier: String,
    },

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Network or transport failure talking to the backend
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// The backend answered 401; the session is no longer valid
    #[error("Session expired or missing, please run 'finboard login'")]
    Unauthorized,

    /// The backend rejected a request
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Local key-value storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl FinboardError {
    /// Create a "not found" error for expenses
    pub fn expense_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Expense",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for incomes
    pub fn income_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Income",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for budgets
    pub fn budget_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Budget",
            identifier: identifier.into(),
        }
    }

    /// Create an unresolved category reference
    pub fn unresolved_category(identifier: impl Into<String>) -> Self {
        Self::UnresolvedReference {
            entity_type: "category",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if the backend rejected our credentials
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }
}

impl From<std::io::Error> for FinboardError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for FinboardError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<reqwest::Error> for FinboardError {
    fn from(err: reqwest::Error) -> Self {
        if err.status().map(|s| s.as_u16()) == Some(401) {
            return Self::Unauthorized;
        }
        Self::Fetch(err.to_string())
    }
}

impl From<crate::models::RecordValidationError> for FinboardError {
    fn from(err: crate::models::RecordValidationError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<crate::models::BudgetValidationError> for FinboardError {
    fn from(err: crate::models::BudgetValidationError) -> Self {
        Self::Validation(err.to_string())
    }
}

/// Result type alias for Finboard operations
pub type FinboardResult<T> = Result<T, FinboardError>;
