//! Configuration validation.
//!
//! Serde handles syntax; this module checks values the server would
//! otherwise trip over at bind or route-registration time. Every problem is
//! reported, not just the first.

use std::net::SocketAddr;

use thiserror::Error;
use tokio::sync::Semaphore;

use crate::config::schema::GreeterConfig;

/// A single semantic problem in a [`GreeterConfig`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address {0:?} is not a socket address")]
    InvalidBindAddress(String),

    #[error("listener.max_connections must be greater than zero")]
    ZeroMaxConnections,

    #[error("listener.max_connections {0} exceeds the limit of {max}", max = Semaphore::MAX_PERMITS)]
    TooManyConnections(usize),

    #[error("timeouts.request_secs must be greater than zero")]
    ZeroRequestTimeout,

    #[error("observability.metrics_path {0:?} must be a static path starting with '/'")]
    InvalidMetricsPath(String),

    #[error("observability.metrics_path must not be '/'")]
    MetricsPathConflictsWithRoot,
}

/// Validate a configuration, collecting every error found.
pub fn validate_config(config: &GreeterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    match config.listener.max_connections {
        0 => errors.push(ValidationError::ZeroMaxConnections),
        n if n > Semaphore::MAX_PERMITS => errors.push(ValidationError::TooManyConnections(n)),
        _ => {}
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    }

    let path = config.observability.metrics_path.as_str();
    if path == "/" {
        errors.push(ValidationError::MetricsPathConflictsWithRoot);
    } else if !path.starts_with('/')
        || path.contains(&['{', '}', '*'][..])
        || path.split('/').any(|segment| segment.starts_with(':'))
    {
        errors.push(ValidationError::InvalidMetricsPath(path.to_string()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(validate_config(&GreeterConfig::default()), Ok(()));
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = GreeterConfig::default();
        config.listener.bind_address = "not-an-address".into();
        config.listener.max_connections = 0;
        config.timeouts.request_secs = 0;
        config.observability.metrics_path = "metrics".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::InvalidBindAddress("not-an-address".into()),
                ValidationError::ZeroMaxConnections,
                ValidationError::ZeroRequestTimeout,
                ValidationError::InvalidMetricsPath("metrics".into()),
            ]
        );
    }

    #[test]
    fn test_metrics_path_cannot_shadow_greeting() {
        let mut config = GreeterConfig::default();
        config.observability.metrics_path = "/".into();
        assert_eq!(
            validate_config(&config),
            Err(vec![ValidationError::MetricsPathConflictsWithRoot])
        );
    }

    #[test]
    fn test_max_connections_capped_at_semaphore_limit() {
        let mut config = GreeterConfig::default();
        config.listener.max_connections = Semaphore::MAX_PERMITS;
        assert_eq!(validate_config(&config), Ok(()));

        config.listener.max_connections = Semaphore::MAX_PERMITS + 1;
        assert_eq!(
            validate_config(&config),
            Err(vec![ValidationError::TooManyConnections(
                Semaphore::MAX_PERMITS + 1
            )])
        );
    }

    #[test]
    fn test_huge_max_connections_from_toml_is_rejected() {
        let config: GreeterConfig = toml::from_str(
            "[listener]\nmax_connections = 4611686018427387904\n",
        )
        .unwrap();
        assert!(matches!(
            validate_config(&config).unwrap_err().as_slice(),
            [ValidationError::TooManyConnections(_)]
        ));
    }

    #[test]
    fn test_metrics_path_rejects_colon_segments() {
        for path in ["/:name", "/internal/:metrics"] {
            let mut config = GreeterConfig::default();
            config.observability.metrics_path = path.into();
            assert_eq!(
                validate_config(&config),
                Err(vec![ValidationError::InvalidMetricsPath(path.into())]),
                "path {path}"
            );
        }

        let mut config = GreeterConfig::default();
        config.observability.metrics_path = "/metrics:v1".into();
        assert_eq!(validate_config(&config), Ok(()));
    }

    #[test]
    fn test_metrics_path_rejects_captures() {
        let mut config = GreeterConfig::default();
        config.observability.metrics_path = "/{name}".into();
        assert!(matches!(
            validate_config(&config).unwrap_err().as_slice(),
            [ValidationError::InvalidMetricsPath(_)]
        ));
    }
}
