//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges and formats (bind address, log level, timeouts)
//! - Check route names are present and unique
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Patterns and methods are not checked here: registering the route table
//!   is the authoritative check and reports the exact fault

use std::collections::HashSet;
use std::net::SocketAddr;
use thiserror::Error;
use tracing::Level;

use crate::config::schema::MuxConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address {0:?} is not a socket address")]
    BindAddress(String),

    #[error("observability.log_level {0:?} is not a log level")]
    LogLevel(String),

    #[error("timeouts.request_secs must be greater than zero")]
    RequestTimeout,

    #[error("route #{0} has an empty name")]
    EmptyRouteName(usize),

    #[error("route name {0:?} is used more than once")]
    DuplicateRouteName(String),
}

/// Check `config`, collecting every problem found.
pub fn validate_config(config: &MuxConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(config.listener.bind_address.clone()));
    }

    if config.observability.log_level.parse::<Level>().is_err() {
        errors.push(ValidationError::LogLevel(config.observability.log_level.clone()));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::RequestTimeout);
    }

    let mut seen = HashSet::new();
    for (i, route) in config.routes.iter().enumerate() {
        if route.name.trim().is_empty() {
            errors.push(ValidationError::EmptyRouteName(i));
        } else if !seen.insert(route.name.as_str()) {
            errors.push(ValidationError::DuplicateRouteName(route.name.clone()));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
