//! Application router configuration.

use axum::{
    Router,
    http::HeaderValue,
    routing::{delete, get, post},
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::{
    AppState,
    account::{create_account_endpoint, delete_account_endpoint, get_account_endpoint},
    endpoints,
    transaction::{create_transaction_endpoint, delete_transaction_endpoint},
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::API_ROOT, get(get_api_root))
        .route(endpoints::ACCOUNTS, post(create_account_endpoint))
        .route(
            endpoints::ACCOUNT,
            get(get_account_endpoint).delete(delete_account_endpoint),
        )
        .route(
            endpoints::ACCOUNT_TRANSACTIONS,
            post(create_transaction_endpoint),
        )
        .route(
            endpoints::ACCOUNT_TRANSACTION,
            delete(delete_transaction_endpoint),
        )
        .layer(cors_layer())
        .with_state(state)
}

/// The API root greets callers with the service name.
async fn get_api_root() -> &'static str {
    "Bank API"
}

/// Browser clients are expected to be front ends served from the local
/// machine, so cross-origin requests are only allowed from loopback origins.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(
            |origin: &HeaderValue, _request_parts| {
                origin.to_str().is_ok_and(is_local_origin)
            },
        ))
        .allow_methods(Any)
        .allow_headers(Any)
}

fn is_local_origin(origin: &str) -> bool {
    origin.starts_with("http://localhost") || origin.starts_with("http://127.")
}


#[cfg(test)]
mod router_tests {
    use axum_test::TestServer;

    use crate::{AppState, store::Ledger};

    use super::build_router;

    #[tokio::test]
    async fn api_root_returns_service_name() {
        let app = build_router(AppState::new(Ledger::new()));
        let server = TestServer::try_new(app).expect("could not create test server");

        let response = server.get("/api").await;

        response.assert_status_ok();
        response.assert_text("Bank API");
    }

    #[tokio::test]
    async fn unknown_route_returns_not_found() {
        let app = build_router(AppState::new(Ledger::new()));
        let server = TestServer::try_new(app).expect("could not create test server");

        server.get("/api/nope").await.assert_status_not_found();
    }
}
