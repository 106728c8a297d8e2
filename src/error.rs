//! Defines the app level error type and its mapping to JSON error responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A required field was absent or empty in the request body.
    #[error("Missing parameters")]
    MissingParameters,

    /// The opening balance for a new account could not be read as a number.
    ///
    /// Holds the text that failed to parse.
    #[error("Balance must be a number")]
    InvalidBalance(String),

    /// The transaction amount could not be read as a finite number.
    ///
    /// Holds the text that failed to parse.
    #[error("Amount must be a number")]
    InvalidAmount(String),

    /// The named user has no account in the ledger.
    #[error("User does not exist")]
    AccountNotFound(String),

    /// The account has no transaction with the given id.
    #[error("Transaction does not exist")]
    TransactionNotFound(String),

    /// Tried to create an account under a user name that is already taken.
    #[error("User already exists")]
    DuplicateAccount(String),

    /// Tried to add a transaction whose content identity matches one already
    /// on the account.
    ///
    /// This is how resubmitting the same date, object and amount is detected
    /// and rejected instead of being applied twice.
    #[error("Transaction already exists")]
    DuplicateTransaction(String),

    /// Could not acquire the ledger lock because it was poisoned.
    #[error("Could not access the ledger")]
    LedgerLockError,
}

impl Error {
    /// The HTTP status code the error maps to.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::MissingParameters | Error::InvalidBalance(_) | Error::InvalidAmount(_) => {
                StatusCode::BAD_REQUEST
            }
            Error::AccountNotFound(_) | Error::TransactionNotFound(_) => StatusCode::NOT_FOUND,
            Error::DuplicateAccount(_) | Error::DuplicateTransaction(_) => StatusCode::CONFLICT,
            Error::LedgerLockError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        if self == Error::LedgerLockError {
            tracing::error!("the ledger lock was poisoned by a panicking handler");
        }

        (self.status_code(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}
