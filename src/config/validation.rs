//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, addresses parse)
//! - Check the endpoint path shape
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServerConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::ServerConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field}: '{value}' is not a socket address")]
    InvalidAddress { field: &'static str, value: String },

    #[error("{0} must be greater than zero")]
    ZeroTimeout(&'static str),

    #[error("{0} must be at least 1")]
    ZeroLimit(&'static str),

    #[error("config_info.endpoint_path '{0}' must start with '/' and name at least one segment")]
    InvalidEndpointPath(String),

    #[error("config_info.public_config is required")]
    MissingPublicConfig,
}

pub fn validate_config(config: &ServerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("timeouts.request_secs"));
    }

    let info = &config.config_info;
    if info.read_timeout_ms == 0 {
        errors.push(ValidationError::ZeroTimeout("config_info.read_timeout_ms"));
    }

    if info.max_pending_reads == 0 {
        errors.push(ValidationError::ZeroLimit("config_info.max_pending_reads"));
    }

    let path = info.endpoint_path.as_str();
    if !path.starts_with('/') || path.len() < 2 || path.ends_with('/') {
        errors.push(ValidationError::InvalidEndpointPath(path.to_string()));
    }

    if info.public_config.is_none() {
        errors.push(ValidationError::MissingPublicConfig);
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

    fn valid() -> ServerConfig {
        let mut config = ServerConfig::default();
        config.config_info.public_config = Some("section1".into());
        config
    }

    #[test]
    fn test_valid_config() {
        assert!(validate_config(&valid()).is_ok());
    }

    #[test]
    fn test_missing_public_config() {
        let errors = validate_config(&ServerConfig::default()).unwrap_err();
        assert_eq!(errors, vec![ValidationError::MissingPublicConfig]);
    }

    #[test]
    fn test_bad_endpoint_paths() {
        for path in ["configinfo", "/", "/configinfo/", ""] {
            let mut config = valid();
            config.config_info.endpoint_path = path.into();
            let errors = validate_config(&config).unwrap_err();
            assert_eq!(errors, vec![ValidationError::InvalidEndpointPath(path.into())]);
        }
    }

    #[test]
    fn test_collects_every_error() {
        let mut config = valid();
        config.listener.bind_address = "nowhere".into();
        config.timeouts.request_secs = 0;
        config.config_info.read_timeout_ms = 0;
        config.config_info.max_pending_reads = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors.contains(&ValidationError::ZeroLimit("config_info.max_pending_reads")));
        assert!(errors.contains(&ValidationError::ZeroTimeout("timeouts.request_secs")));
        assert!(errors.contains(&ValidationError::ZeroTimeout("config_info.read_timeout_ms")));
    }

    #[test]
    fn test_metrics_address_checked_only_when_enabled() {
        let mut config = valid();
        config.observability.metrics_address = "bad".into();
        assert!(validate_config(&config).is_ok());

        config.observability.metrics_enabled = true;
        assert!(validate_config(&config).is_err());
    }
}
