use std::time::Instant;

use axum::extract::{MatchedPath, Request};
use axum::middleware::Next;
use axum::response::Response;

/// Per-request audit line.
///
/// Logs the route template rather than the raw path so events group by
/// endpoint, and pulls the client id out of record routes so every access
/// to a client's checklist data is attributable. Server errors log at
/// `warn`.
pub async fn audit_log(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|matched| matched.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());
    let client_id = client_id_from_path(req.uri().path()).map(str::to_string);
    let started = Instant::now();

    let response = next.run(req).await;

    let status = response.status();
    let elapsed_ms = started.elapsed().as_millis() as u64;
    let client_id = client_id.as_deref().unwrap_or("-");
    if status.is_server_error() {
        tracing::warn!(%method, %route, client_id, status = status.as_u16(), elapsed_ms, "api_request");
    } else {
        tracing::info!(%method, %route, client_id, status = status.as_u16(), elapsed_ms, "api_request");
    }

    response
}

/// `/clients/{client_id}/...` -> `client_id`.
fn client_id_from_path(path: &str) -> Option<&str> {
    let mut parts = path.trim_start_matches('/').split('/');
    match (parts.next(), parts.next()) {
        (Some("clients"), Some(id)) if !id.is_empty() => Some(id),
        _ => None,
    }
}
