//! The API endpoint URIs.

/// The API root, returns the service name.
pub const API_ROOT: &str = "/api";
/// The route to create an account.
pub const ACCOUNTS: &str = "/api/accounts";
/// The route to fetch or delete a single account.
pub const ACCOUNT: &str = "/api/accounts/{user}";
/// The route to add a transaction to an account.
pub const ACCOUNT_TRANSACTIONS: &str = "/api/accounts/{user}/transactions";
/// The route to delete a single transaction from an account.
pub const ACCOUNT_TRANSACTION: &str = "/api/accounts/{user}/transactions/{transaction_id}";
