//! The in-memory ledger that owns all accounts.

use std::collections::HashMap;

use crate::{account::Account, transaction::Transaction};

/// Owns the mapping from user name to [Account].
///
/// The ledger lives for the lifetime of the process and is never persisted.
/// Iteration order over accounts is not part of the contract.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ledger {
    accounts: HashMap<String, Account>,
}

impl Ledger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a ledger pre-populated with the two fixture accounts used for
    /// manual testing.
    ///
    /// The fixtures are a convenience for poking at the API, not data clients
    /// may rely on.
    pub fn with_seed_data() -> Self {
        let mut ledger = Self::new();

        ledger.insert(Account {
            user: "test".to_owned(),
            currency: "$".to_owned(),
            description: "Test account".to_owned(),
            balance: 75.0,
            transactions: vec![
                Transaction {
                    id: "1".to_owned(),
                    date: "2020-10-01".to_owned(),
                    object: "Pocket money".to_owned(),
                    amount: 50.0,
                },
                Transaction {
                    id: "2".to_owned(),
                    date: "2020-10-03".to_owned(),
                    object: "Book".to_owned(),
                    amount: -10.0,
                },
                Transaction {
                    id: "3".to_owned(),
                    date: "2020-10-04".to_owned(),
                    object: "Sandwich".to_owned(),
                    amount: -5.0,
                },
            ],
        });

        ledger.insert(Account {
            user: "jondoe".to_owned(),
            currency: "$".to_owned(),
            description: "Second test account".to_owned(),
            balance: 150.0,
            transactions: vec![
                Transaction {
                    id: "1".to_owned(),
                    date: "2022-10-01".to_owned(),
                    object: "Gum".to_owned(),
                    amount: -2.0,
                },
                Transaction {
                    id: "2".to_owned(),
                    date: "2022-10-03".to_owned(),
                    object: "Book".to_owned(),
                    amount: -10.0,
                },
                Transaction {
                    id: "3".to_owned(),
                    date: "2022-10-04".to_owned(),
                    object: "Restaurant".to_owned(),
                    amount: -45.0,
                },
            ],
        });

        ledger
    }

    /// Look up the account for `user`.
    pub fn get(&self, user: &str) -> Option<&Account> {
        self.accounts.get(user)
    }

    /// Look up the account for `user` for mutation.
    pub(crate) fn get_mut(&mut self, user: &str) -> Option<&mut Account> {
        self.accounts.get_mut(user)
    }

    /// Whether an account exists for `user`.
    pub fn contains(&self, user: &str) -> bool {
        self.accounts.contains_key(user)
    }

    /// Insert `account`, overwriting any account stored under the same user.
    pub fn insert(&mut self, account: Account) {
        self.accounts.insert(account.user.clone(), account);
    }

    /// Remove the account for `user` along with all its transactions,
    /// returning it if it existed.
    pub fn remove(&mut self, user: &str) -> Option<Account> {
        self.accounts.remove(user)
    }
}

#[cfg(test)]
mod ledger_tests {
    use crate::account::Account;

    use super::Ledger;

    fn test_account(user: &str) -> Account {
        Account {
            user: user.to_owned(),
            currency: "$".to_owned(),
            description: format!("{user}'s budget"),
            balance: 0.0,
            transactions: Vec::new(),
        }
    }

    #[test]
    fn insert_then_get_returns_account() {
        let mut ledger = Ledger::new();

        ledger.insert(test_account("alice"));

        assert!(ledger.contains("alice"));
        assert_eq!(ledger.get("alice"), Some(&test_account("alice")));
    }

    #[test]
    fn get_unknown_user_returns_none() {
        let ledger = Ledger::new();

        assert_eq!(ledger.get("ghost"), None);
        assert!(!ledger.contains("ghost"));
    }

    #[test]
    fn remove_discards_account() {
        let mut ledger = Ledger::new();
        ledger.insert(test_account("alice"));

        assert_eq!(ledger.remove("alice"), Some(test_account("alice")));
        assert_eq!(ledger.remove("alice"), None);
        assert_eq!(ledger.get("alice"), None);
    }

    #[test]
    fn seed_data_contains_fixture_accounts() {
        let ledger = Ledger::with_seed_data();

        let test = ledger.get("test").expect("seed account missing");
        assert_eq!(test.balance, 75.0);
        assert_eq!(test.transactions.len(), 3);

        let jondoe = ledger.get("jondoe").expect("seed account missing");
        assert_eq!(jondoe.balance, 150.0);
        assert_eq!(jondoe.transactions.len(), 3);
    }

    #[test]
    fn seed_transactions_keep_insertion_order() {
        let ledger = Ledger::with_seed_data();

        let objects: Vec<&str> = ledger
            .get("test")
            .unwrap()
            .transactions
            .iter()
            .map(|transaction| transaction.object.as_str())
            .collect();

        assert_eq!(objects, vec!["Pocket money", "Book", "Sandwich"]);
    }
}
