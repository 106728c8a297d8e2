//! Account creation, lookup and deletion, plus their route handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::{AppState, Error, number::RawNumber, store::Ledger, transaction::Transaction};

/// A named ledger account with a balance and transaction history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// The user name the account is stored under. Unique and immutable.
    pub user: String,
    /// The currency label chosen at creation, e.g. `"$"`.
    pub currency: String,
    /// A free-text description of the account.
    pub description: String,
    /// The current balance: the opening balance plus the sum of all
    /// transaction amounts.
    pub balance: f64,
    /// The transactions applied to the account, in insertion order.
    pub transactions: Vec<Transaction>,
}

/// The request body for creating an account.
///
/// All fields are optional so that the create operation can report missing
/// parameters itself instead of the JSON layer rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct AccountForm {
    /// The user name for the new account.
    pub user: Option<String>,
    /// The currency label for the new account.
    pub currency: Option<String>,
    /// An optional description, defaults to `"<user>'s budget"`.
    pub description: Option<String>,
    /// An optional opening balance, defaults to zero.
    pub balance: Option<RawNumber>,
}

/// Create a new account from `form` and store it in `ledger`.
///
/// The new account starts with an empty transaction history; the opening
/// balance is not recorded as a transaction.
///
/// # Errors
/// Returns [Error::MissingParameters] if the user or currency is absent or
/// empty, [Error::DuplicateAccount] if the user name is taken, and
/// [Error::InvalidBalance] if a balance was supplied but is not a number.
pub fn create_account(form: &AccountForm, ledger: &mut Ledger) -> Result<Account, Error> {
    let user = form
        .user
        .as_deref()
        .filter(|user| !user.is_empty())
        .ok_or(Error::MissingParameters)?;
    let currency = form
        .currency
        .as_deref()
        .filter(|currency| !currency.is_empty())
        .ok_or(Error::MissingParameters)?;

    if ledger.contains(user) {
        return Err(Error::DuplicateAccount(user.to_owned()));
    }

    let balance = match &form.balance {
        Some(raw) => raw
            .parse()
            .ok_or_else(|| Error::InvalidBalance(raw.as_text()))?,
        None => 0.0,
    };

    let description = form
        .description
        .clone()
        .filter(|description| !description.is_empty())
        .unwrap_or_else(|| format!("{user}'s budget"));

    let account = Account {
        user: user.to_owned(),
        currency: currency.to_owned(),
        description,
        balance,
        transactions: Vec::new(),
    };
    ledger.insert(account.clone());

    Ok(account)
}

/// Look up the account for `user`.
///
/// # Errors
/// Returns [Error::AccountNotFound] if there is no such account.
pub fn get_account<'a>(user: &str, ledger: &'a Ledger) -> Result<&'a Account, Error> {
    ledger
        .get(user)
        .ok_or_else(|| Error::AccountNotFound(user.to_owned()))
}

/// Delete the account for `user`, discarding all its transactions.
///
/// Deletion is not idempotent at the contract level: a second call for the
/// same user reports not-found even though the end state is identical.
///
/// # Errors
/// Returns [Error::AccountNotFound] if there is no such account.
pub fn delete_account(user: &str, ledger: &mut Ledger) -> Result<(), Error> {
    ledger
        .remove(user)
        .map(|_| ())
        .ok_or_else(|| Error::AccountNotFound(user.to_owned()))
}

/// A route handler for creating a new account.
pub async fn create_account_endpoint(
    State(state): State<AppState>,
    Json(form): Json<AccountForm>,
) -> Response {
    let mut ledger = match state.lock_ledger() {
        Ok(ledger) => ledger,
        Err(error) => return error.into_response(),
    };

    match create_account(&form, &mut ledger) {
        Ok(account) => (StatusCode::CREATED, Json(account)).into_response(),
        Err(error) => error.into_response(),
    }
}

/// A route handler for fetching all data for an account.
pub async fn get_account_endpoint(
    State(state): State<AppState>,
    Path(user): Path<String>,
) -> Response {
    let ledger = match state.lock_ledger() {
        Ok(ledger) => ledger,
        Err(error) => return error.into_response(),
    };

    match get_account(&user, &ledger) {
        Ok(account) => Json(account).into_response(),
        Err(error) => error.into_response(),
    }
}

/// A route handler for deleting an account and all its transactions.
pub async fn delete_account_endpoint(
    State(state): State<AppState>,
    Path(user): Path<String>,
) -> Response {
    let mut ledger = match state.lock_ledger() {
        Ok(ledger) => ledger,
        Err(error) => return error.into_response(),
    };

    match delete_account(&user, &mut ledger) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => error.into_response(),
    }
}

#[cfg(test)]
fn form(user: &str, currency: &str) -> AccountForm {
    AccountForm {
        user: Some(user.to_owned()),
        currency: Some(currency.to_owned()),
        ..Default::default()
    }
}



#[cfg(test)]
mod delete_account_tests {
    use crate::{Error, store::Ledger};

    use super::{create_account, delete_account, form, get_account};

    #[test]
    fn removes_account() {
        let mut ledger = Ledger::new();
        create_account(&form("alice", "$"), &mut ledger).unwrap();

        assert_eq!(delete_account("alice", &mut ledger), Ok(()));
        assert_eq!(
            get_account("alice", &ledger),
            Err(Error::AccountNotFound("alice".to_owned()))
        );
    }

    #[test]
    fn second_delete_reports_not_found() {
        let mut ledger = Ledger::new();
        create_account(&form("alice", "$"), &mut ledger).unwrap();
        delete_account("alice", &mut ledger).unwrap();

        assert_eq!(
            delete_account("alice", &mut ledger),
            Err(Error::AccountNotFound("alice".to_owned()))
        );
    }
}
