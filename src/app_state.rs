//! Implements a struct that holds the state of the REST server.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::{Error, store::Ledger};

/// The state of the REST server.
///
/// Cloning is cheap: handlers share one [Ledger] behind an `Arc<Mutex<_>>`,
/// so the check-then-mutate sequences inside each operation are atomic with
/// respect to other requests.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The ledger shared by all request handlers.
    pub ledger: Arc<Mutex<Ledger>>,
}

impl AppState {
    /// Create a new [AppState] serving the given ledger.
    ///
    /// Taking the ledger as an argument lets tests build isolated instances
    /// while the server binary passes in the seeded one.
    pub fn new(ledger: Ledger) -> Self {
        Self {
            ledger: Arc::new(Mutex::new(ledger)),
        }
    }

    /// Acquire the ledger lock.
    ///
    /// # Errors
    /// Returns [Error::LedgerLockError] if the lock was poisoned.
    pub(crate) fn lock_ledger(&self) -> Result<MutexGuard<'_, Ledger>, Error> {
        self.ledger.lock().map_err(|_| Error::LedgerLockError)
    }
}
