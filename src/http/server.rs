//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the greeting and metrics handlers
//! - Wire up middleware (tracing, request ID, timeout, concurrency limit)
//! - Serve on a bound listener until shutdown is broadcast

use std::sync::Arc;
use std::time::Duration;

use axum::{body::Body, http::Request, routing::get, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::limit::GlobalConcurrencyLimitLayer;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::Span;

use crate::config::GreeterConfig;
use crate::http::handlers;
use crate::http::request::{request_id, UuidRequestId};
use crate::observability::metrics::GreeterMetrics;

/// Application state injected into handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Greeting resolved at startup.
    pub greeting: Arc<str>,
    /// Present only in the metrics variant.
    pub metrics: Option<Arc<GreeterMetrics>>,
}

impl AppState {
    pub fn from_config(config: &GreeterConfig) -> Self {
        Self {
            greeting: Arc::from(config.greeting.message.as_str()),
            metrics: config
                .observability
                .metrics_enabled
                .then(|| Arc::new(GreeterMetrics::new())),
        }
    }
}

/// HTTP server for the greeter.
pub struct HttpServer {
    router: Router,
    config: GreeterConfig,
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    ///
    /// The configuration must already have passed `validate_config`; an
    /// invalid metrics path makes route registration panic, and an oversized
    /// `max_connections` makes the concurrency limiter panic.
    pub fn new(config: GreeterConfig) -> Self {
        let state = AppState::from_config(&config);
        let router = Self::build_router(&config, state.clone());
        Self {
            router,
            config,
            state,
        }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &GreeterConfig, state: AppState) -> Router {
        let mut router = Router::new()
            .route("/", get(handlers::greet))
            .with_state(state.clone());

        if let Some(metrics) = state.metrics {
            router = router.merge(
                Router::new()
                    .route(&config.observability.metrics_path, get(handlers::metrics))
                    .with_state(metrics),
            );
        }

        with_middleware(router.fallback(handlers::not_found), config)
    }

    /// Run the server until a shutdown signal is broadcast.
    ///
    /// In-flight requests are allowed to finish before this returns.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            metrics_enabled = self.state.metrics.is_some(),
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// A clone of the fully layered router, for driving in-process.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GreeterConfig {
        &self.config
    }

    /// Get a reference to the shared handler state.
    pub fn state(&self) -> &AppState {
        &self.state
    }
}

/// Wrap `router` in the tracing, request ID, timeout and concurrency layers.
///
/// Layers added last run first, so the request ID exists before the span is
/// opened, and the timeout also covers time spent waiting for a slot.
#[allow(deprecated)]
fn with_middleware(router: Router, config: &GreeterConfig) -> Router {
    router
        .layer(GlobalConcurrencyLimitLayer::new(config.listener.max_connections))
        .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http().make_span_with(request_span))
        .layer(SetRequestIdLayer::x_request_id(UuidRequestId))
}

fn request_span(request: &Request<Body>) -> Span {
    tracing::info_span!(
        "request",
        method = %request.method(),
        path = %request.uri().path(),
        request_id = %request_id(request),
    )
}
