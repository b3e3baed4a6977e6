//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Handlers and middleware produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (greeting counter)
//!
//! Consumers:
//!     → stdout (log aggregation picks it up from the container)
//!     → /metrics endpoint (Prometheus scrape)
//! ```

pub mod logging;
pub mod metrics;

pub use logging::init_logging;
pub use metrics::{GreeterMetrics, PROMETHEUS_CONTENT_TYPE, REQUESTS_TOTAL};
