//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize, defaults when absent)
//!     → CLI overrides (--bind, --plain)
//!     → GREETING environment variable
//!     → validation.rs (semantic checks)
//!     → GreeterConfig (validated, immutable)
//! ```
//!
//! Config is resolved once at startup; there is no reload.

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{
    GreeterConfig, GreetingConfig, ListenerConfig, ObservabilityConfig, TimeoutConfig,
    DEFAULT_GREETING, GREETING_ENV_VAR,
};
pub use validation::{validate_config, ValidationError};
