//! Route handlers.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode, Uri},
    response::IntoResponse,
};

use crate::http::server::AppState;
use crate::observability::metrics::{GreeterMetrics, PROMETHEUS_CONTENT_TYPE};

/// `GET /`: the configured greeting, verbatim.
///
/// In the metrics variant the greeting counter is bumped before responding.
pub async fn greet(State(state): State<AppState>) -> String {
    if let Some(metrics) = &state.metrics {
        metrics.record_greeting();
    }
    state.greeting.to_string()
}

/// `GET /metrics`: Prometheus text exposition of the greeting counter.
pub async fn metrics(State(metrics): State<Arc<GreeterMetrics>>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, PROMETHEUS_CONTENT_TYPE)],
        metrics.render(),
    )
}

/// Fallback for every path without a route.
pub async fn not_found(uri: Uri) -> (StatusCode, &'static str) {
    tracing::warn!(path = %uri.path(), "No route matched");
    (StatusCode::NOT_FOUND, "Not Found")
}
