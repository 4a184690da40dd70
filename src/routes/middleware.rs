// ============================================================================
// Axum Middleware
// ============================================================================
//
// Middleware for request processing:
// - correlation: assigns/propagates the request-scoped correlation id and
//   logs method, path, remote address, correlation id and final status
//   exactly once per request, including error paths
//
// ============================================================================

use axum::{
    extract::{ConnectInfo, Request},
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use std::net::SocketAddr;
use std::time::Instant;

/// Request-scoped correlation id, stored in request extensions and
/// propagated to every outbound collaborator call.
#[derive(Clone, Debug)]
pub struct RequestId(pub String);

/// Pull a client-supplied `request_id` out of the raw query string.
/// Empty values count as absent.
pub fn correlation_id_from_query(query: Option<&str>) -> Option<String> {
    query
        .and_then(|q| {
            url::form_urlencoded::parse(q.as_bytes())
                .find(|(key, _)| key == "request_id")
                .map(|(_, value)| value.into_owned())
        })
        .filter(|value| !value.is_empty())
}

/// Correlation id derived from the current time. Monotonic enough for
/// tracing; uniqueness across concurrent requests under one clock tick is
/// not guaranteed.
pub fn generate_request_id() -> String {
    Utc::now().timestamp_nanos_opt().unwrap_or_default().to_string()
}

/// Correlation and request logging middleware
pub async fn correlation(
    ConnectInfo(remote): ConnectInfo<SocketAddr>,
    mut req: Request,
    next: Next,
) -> Response {
    let request_id =
        correlation_id_from_query(req.uri().query()).unwrap_or_else(generate_request_id);
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    req.extensions_mut().insert(RequestId(request_id.clone()));

    let start = Instant::now();
    let response = next.run(req).await;
    let duration = start.elapsed();

    // Error responses also pass through here: AppError renders into a
    // response before this layer observes it, so the status recorded is
    // always the one the client saw.
    tracing::info!(
        method = %method,
        path = %path,
        remote = %remote,
        request_id = %request_id,
        status = %response.status().as_u16(),
        duration_ms = duration.as_millis(),
        "Request completed"
    );

    response
}
