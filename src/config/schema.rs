//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the greeter.
//! All types derive Serde traits for deserialization from config files.

use serde::Deserialize;

/// Greeting served when neither `GREETING` nor the config file sets one.
pub const DEFAULT_GREETING: &str = "Hello, Kubernetes!";

/// Environment variable that overrides the configured greeting.
pub const GREETING_ENV_VAR: &str = "GREETING";

/// Root configuration for the greeter service.
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct GreeterConfig {
    /// Listener configuration (bind address, connection limit).
    pub listener: ListenerConfig,

    /// Greeting served on `/`.
    pub greeting: GreetingConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl GreeterConfig {
    /// Apply overrides from the process environment.
    pub fn apply_env(self) -> Self {
        self.apply_env_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides using the given variable lookup.
    ///
    /// A variable that is set but empty still counts as set.
    pub fn apply_env_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(message) = lookup(GREETING_ENV_VAR) {
            self.greeting.message = message;
            self.greeting.from_env = true;
        }
        self
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:5000").
    pub bind_address: String,

    /// Maximum requests in flight (backpressure).
    pub max_connections: usize,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:5000".to_string(),
            max_connections: 10_000,
        }
    }
}

/// Greeting configuration.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct GreetingConfig {
    /// Text returned verbatim by `GET /`.
    pub message: String,

    /// Set when `message` came from the environment.
    #[serde(skip)]
    pub from_env: bool,
}

impl Default for GreetingConfig {
    fn default() -> Self {
        Self {
            message: DEFAULT_GREETING.to_string(),
            from_env: false,
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Count greetings and serve them on `metrics_path`.
    pub metrics_enabled: bool,

    /// Path of the Prometheus scrape endpoint.
    pub metrics_path: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: true,
            metrics_path: "/metrics".to_string(),
        }
    }
}
