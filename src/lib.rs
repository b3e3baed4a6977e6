//! Greeter: a minimal HTTP greeting service with an optional Prometheus
//! request counter.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::GreeterConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
