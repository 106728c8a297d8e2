//! Middleware for logging requests and responses.

use axum::{extract::Request, middleware::Next, response::Response};

/// How many characters of a request or response body to log at the `info`
/// level.
pub const LOG_BODY_LENGTH_LIMIT: usize = 256;

/// Log each request and its response at the `info` level.
///
/// Bodies longer than [LOG_BODY_LENGTH_LIMIT] characters are truncated, with
/// the full body logged at the `debug` level.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let body_bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .unwrap_or_default();
    let body_text = String::from_utf8_lossy(&body_bytes).to_string();

    log_body(
        &format!("request {} {}", parts.method, parts.uri),
        &body_text,
    );

    let request = Request::from_parts(parts, body_text.into());
    let response = next.run(request).await;

    let (parts, body) = response.into_parts();
    let body_bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .unwrap_or_default();
    let body_text = String::from_utf8_lossy(&body_bytes).to_string();

    log_body(&format!("response {}", parts.status), &body_text);

    Response::from_parts(parts, body_text.into())
}

fn log_body(context: &str, body: &str) {
    match truncated_prefix(body) {
        Some(prefix) => {
            tracing::info!("{context} body: {prefix}...");
            tracing::debug!("full {context} body: {body:?}");
        }
        None => tracing::info!("{context} body: {body:?}"),
    }
}

/// The first [LOG_BODY_LENGTH_LIMIT] characters of `body`, or `None` if the
/// body is short enough to log in full.
///
/// The limit and the prefix are both measured in characters so that multibyte
/// bodies are never cut mid-character or logged past the limit.
fn truncated_prefix(body: &str) -> Option<String> {
    let mut chars = body.chars();
    let prefix: String = chars.by_ref().take(LOG_BODY_LENGTH_LIMIT).collect();

    chars.next().is_some().then_some(prefix)
}
