//! A small in-memory bank ledger served over a JSON REST API.
//!
//! Accounts hold a balance and an ordered transaction history. Each
//! transaction's identifier is derived from its content, so resubmitting the
//! same transaction is rejected as a duplicate instead of being applied
//! twice. Nothing is persisted: the ledger lives and dies with the process.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod account;
mod app_state;
mod endpoints;
mod error;
mod logging;
mod number;
mod routing;
mod store;
mod transaction;

pub use account::{Account, AccountForm, create_account, delete_account, get_account};
pub use app_state::AppState;
pub use error::Error;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use number::RawNumber;
pub use routing::build_router;
pub use store::Ledger;
pub use transaction::{
    Transaction, TransactionForm, add_transaction, remove_transaction, transaction_id,
};

/// An async task that waits for either the ctrl+c or terminate signal,
/// whichever comes first, and then signals the server to shut down
/// gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}
