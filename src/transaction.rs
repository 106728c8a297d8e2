//! Transaction creation and removal, including the content-derived identity
//! scheme that makes submissions idempotent, plus the route handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::{AppState, Error, number::RawNumber, store::Ledger};

/// A single dated, labelled entry that affects an account's balance.
///
/// Transactions are immutable once created and only exist as part of their
/// owning account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The identity derived from the transaction's content, a 32-char hex
    /// digest.
    pub id: String,
    /// The date the client supplied. Opaque to the ledger, no calendar
    /// validation is applied.
    pub date: String,
    /// A free-text description of the transaction.
    pub object: String,
    /// The amount added to the account balance. May be negative or zero.
    pub amount: f64,
}

/// The request body for adding a transaction to an account.
#[derive(Debug, Default, Deserialize)]
pub struct TransactionForm {
    /// The date of the transaction.
    pub date: Option<String>,
    /// What the transaction was for.
    pub object: Option<String>,
    /// The amount, as a JSON number or a numeric string.
    pub amount: Option<RawNumber>,
}

/// Compute the identity of a transaction from its content.
///
/// The digest covers the date, object and the amount exactly as the client
/// wrote it, so resubmitting the same transaction always produces the same
/// id regardless of whether the amount arrived as a number or a string. MD5
/// is plenty here: the id is a duplicate detector, not a security boundary.
pub fn transaction_id(date: &str, object: &str, amount_text: &str) -> String {
    format!("{:x}", md5::compute(format!("{date}{object}{amount_text}")))
}

/// Append a transaction built from `form` to the account for `user` and add
/// its amount to the account balance.
///
/// A zero amount is a valid amount; only an absent amount field is rejected.
///
/// # Errors
/// Returns [Error::AccountNotFound] if the account does not exist,
/// [Error::MissingParameters] if the date, object or amount is absent,
/// [Error::InvalidAmount] if the amount is not a finite number, and
/// [Error::DuplicateTransaction] if a transaction with the same content
/// identity is already on the account.
pub fn add_transaction(
    user: &str,
    form: &TransactionForm,
    ledger: &mut Ledger,
) -> Result<Transaction, Error> {
    let account = ledger
        .get_mut(user)
        .ok_or_else(|| Error::AccountNotFound(user.to_owned()))?;

    let date = form
        .date
        .as_deref()
        .filter(|date| !date.is_empty())
        .ok_or(Error::MissingParameters)?;
    let object = form
        .object
        .as_deref()
        .filter(|object| !object.is_empty())
        .ok_or(Error::MissingParameters)?;
    let raw_amount = form.amount.as_ref().ok_or(Error::MissingParameters)?;
    let amount = raw_amount
        .parse()
        .ok_or_else(|| Error::InvalidAmount(raw_amount.as_text()))?;

    let id = transaction_id(date, object, &raw_amount.as_text());
    if account
        .transactions
        .iter()
        .any(|transaction| transaction.id == id)
    {
        return Err(Error::DuplicateTransaction(id));
    }

    let transaction = Transaction {
        id,
        date: date.to_owned(),
        object: object.to_owned(),
        amount,
    };
    account.transactions.push(transaction.clone());
    account.balance += amount;

    Ok(transaction)
}

/// Remove the transaction with `transaction_id` from the account for `user`
/// and subtract its amount from the account balance, keeping the balance
/// equal to the opening balance plus the sum of the remaining transactions.
///
/// # Errors
/// Returns [Error::AccountNotFound] if the account does not exist and
/// [Error::TransactionNotFound] if no transaction on the account has the
/// given id.
pub fn remove_transaction(
    user: &str,
    transaction_id: &str,
    ledger: &mut Ledger,
) -> Result<(), Error> {
    let account = ledger
        .get_mut(user)
        .ok_or_else(|| Error::AccountNotFound(user.to_owned()))?;

    let index = account
        .transactions
        .iter()
        .position(|transaction| transaction.id == transaction_id)
        .ok_or_else(|| Error::TransactionNotFound(transaction_id.to_owned()))?;

    let removed = account.transactions.remove(index);
    account.balance -= removed.amount;

    Ok(())
}

/// A route handler for adding a transaction to an account.
pub async fn create_transaction_endpoint(
    State(state): State<AppState>,
    Path(user): Path<String>,
    Json(form): Json<TransactionForm>,
) -> Response {
    let mut ledger = match state.lock_ledger() {
        Ok(ledger) => ledger,
        Err(error) => return error.into_response(),
    };

    match add_transaction(&user, &form, &mut ledger) {
        Ok(transaction) => (StatusCode::CREATED, Json(transaction)).into_response(),
        Err(error) => error.into_response(),
    }
}

/// A route handler for deleting a single transaction from an account.
pub async fn delete_transaction_endpoint(
    State(state): State<AppState>,
    Path((user, transaction_id)): Path<(String, String)>,
) -> Response {
    let mut ledger = match state.lock_ledger() {
        Ok(ledger) => ledger,
        Err(error) => return error.into_response(),
    };

    match remove_transaction(&user, &transaction_id, &mut ledger) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => error.into_response(),
    }
}

#[cfg(test)]
fn ledger_with_account(user: &str) -> crate::store::Ledger {
    use crate::account::{AccountForm, create_account};

    let mut ledger = crate::store::Ledger::new();
    create_account(
        &AccountForm {
            user: Some(user.to_owned()),
            currency: Some("$".to_owned()),
            ..Default::default()
        },
        &mut ledger,
    )
    .expect("could not create test account");

    ledger
}

#[cfg(test)]
fn transaction_form(date: &str, object: &str, amount: &str) -> TransactionForm {
    TransactionForm {
        date: Some(date.to_owned()),
        object: Some(object.to_owned()),
        amount: Some(RawNumber::Text(amount.to_owned())),
    }
}


#[cfg(test)]
mod add_transaction_tests {
    use crate::{Error, number::RawNumber};

    use super::{TransactionForm, add_transaction, ledger_with_account, transaction_form};

    #[test]
    fn appends_transaction_and_updates_balance() {
        let mut ledger = ledger_with_account("alice");

        let transaction = add_transaction(
            "alice",
            &transaction_form("2023-01-01", "Coffee", "-3"),
            &mut ledger,
        )
        .unwrap();

        assert_eq!(transaction.amount, -3.0);
        assert_eq!(transaction.id, "91fd2d8ff50c95196b370466bced0bb8");

        let account = ledger.get("alice").unwrap();
        assert_eq!(account.balance, -3.0);
        assert_eq!(account.transactions, vec![transaction]);
    }

    #[test]
    fn balance_is_opening_balance_plus_transaction_sum() {
        let mut ledger = ledger_with_account("alice");

        add_transaction(
            "alice",
            &transaction_form("2024-05-06", "Paycheck", "1250.5"),
            &mut ledger,
        )
        .unwrap();
        add_transaction(
            "alice",
            &transaction_form("2024-05-07", "Rent", "-800"),
            &mut ledger,
        )
        .unwrap();

        let account = ledger.get("alice").unwrap();
        let sum: f64 = account
            .transactions
            .iter()
            .map(|transaction| transaction.amount)
            .sum();
        assert_eq!(account.balance, sum);
        assert_eq!(account.balance, 450.5);
    }

    #[test]
    fn zero_amount_is_a_valid_amount() {
        let mut ledger = ledger_with_account("alice");

        let transaction = add_transaction(
            "alice",
            &transaction_form("2023-01-01", "Voided cheque", "0"),
            &mut ledger,
        )
        .unwrap();

        assert_eq!(transaction.amount, 0.0);
        assert_eq!(ledger.get("alice").unwrap().balance, 0.0);
    }

    #[test]
    fn absent_amount_is_rejected() {
        let mut ledger = ledger_with_account("alice");
        let form = TransactionForm {
            amount: None,
            ..transaction_form("2023-01-01", "Coffee", "0")
        };

        assert_eq!(
            add_transaction("alice", &form, &mut ledger),
            Err(Error::MissingParameters)
        );
    }

    #[test]
    fn non_numeric_amount_is_rejected() {
        let mut ledger = ledger_with_account("alice");
        let form = transaction_form("2023-01-01", "Coffee", "three");

        assert_eq!(
            add_transaction("alice", &form, &mut ledger),
            Err(Error::InvalidAmount("three".to_owned()))
        );
        assert!(ledger.get("alice").unwrap().transactions.is_empty());
    }

    #[test]
    fn unknown_account_is_rejected() {
        let mut ledger = ledger_with_account("alice");

        let result = add_transaction(
            "ghost",
            &transaction_form("2023-01-01", "Coffee", "-3"),
            &mut ledger,
        );

        assert_eq!(result, Err(Error::AccountNotFound("ghost".to_owned())));
    }

    #[test]
    fn resubmission_is_rejected_and_applied_once() {
        let mut ledger = ledger_with_account("alice");
        let form = transaction_form("2020-10-01", "Pocket money", "50");

        let transaction = add_transaction("alice", &form, &mut ledger).unwrap();
        let result = add_transaction("alice", &form, &mut ledger);

        assert_eq!(result, Err(Error::DuplicateTransaction(transaction.id)));
        let account = ledger.get("alice").unwrap();
        assert_eq!(account.balance, 50.0);
        assert_eq!(account.transactions.len(), 1);
    }

    #[test]
    fn resubmission_with_number_amount_collides_with_string_amount() {
        let mut ledger = ledger_with_account("alice");
        add_transaction(
            "alice",
            &transaction_form("2020-10-01", "Pocket money", "50"),
            &mut ledger,
        )
        .unwrap();

        let form = TransactionForm {
            amount: Some(RawNumber::Number(50.into())),
            ..transaction_form("2020-10-01", "Pocket money", "50")
        };
        let result = add_transaction("alice", &form, &mut ledger);

        assert!(matches!(result, Err(Error::DuplicateTransaction(_))));
    }
}
