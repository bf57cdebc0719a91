//! Request/response logging middleware.

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use std::time::Instant;
use tracing::info;

use authhub_core::redact::filter_fields;

/// Query-string fields that must never be logged in clear text.
const SENSITIVE_FIELDS: &[&str] = &["password", "new_password", "reset_token", "email"];

/// Logs request method, path, status, and duration.
///
/// Query strings are scrubbed of credential fields before logging.
pub async fn request_logging(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = Instant::now();

    let response = next.run(request).await;

    let duration = start.elapsed();
    let status = response.status();
    let query = uri
        .query()
        .map(|q| filter_fields(SENSITIVE_FIELDS, "***", q, '&'))
        .unwrap_or_default();

    info!(
        method = %method,
        path = %uri.path(),
        query = %query,
        status = %status.as_u16(),
        duration_ms = %duration.as_millis(),
        "HTTP request"
    );

    response
}
