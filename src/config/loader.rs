//! Configuration loading from the environment.
//!
//! The tracker is configured exclusively through environment variables,
//! all optional:
//!
//! | Variable          | Default         |
//! |-------------------|-----------------|
//! | `APP_NAME`        | `Khalid Tracker`|
//! | `REDIS_HOST`      | `redis`         |
//! | `REDIS_PORT`      | `6379`          |
//! | `BIND_ADDRESS`    | `0.0.0.0:5000`  |
//! | `METRICS_ENABLED` | `false`         |
//! | `METRICS_ADDRESS` | `0.0.0.0:9090`  |
//!
//! Values are validated before the config is accepted; a bad value is a
//! startup failure, not a silent fallback.

use std::env;
use std::net::{SocketAddr, ToSocketAddrs};

use thiserror::Error;

use crate::config::schema::{AppConfig, AppName};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {detail}")]
    Invalid { var: &'static str, detail: String },
}

/// Load and validate configuration from the environment. Unset (or empty)
/// variables fall back to their defaults.
pub fn load_from_env() -> Result<AppConfig, ConfigError> {
    let mut config = AppConfig::default();

    if let Some(name) = read("APP_NAME") {
        if name.trim().is_empty() {
            return Err(invalid("APP_NAME", "display name must not be blank"));
        }
        config.app_name = AppName(name);
    }

    if let Some(host) = read("REDIS_HOST") {
        config.store.host = host;
    }

    if let Some(port) = read("REDIS_PORT") {
        config.store.port = port
            .parse()
            .map_err(|_| invalid("REDIS_PORT", format!("`{port}` is not a port number")))?;
    }

    if let Some(addr) = read("BIND_ADDRESS") {
        resolve_bind_address("BIND_ADDRESS", &addr)?;
        config.listener.bind_address = addr;
    }

    if let Some(flag) = read("METRICS_ENABLED") {
        config.observability.metrics_enabled = parse_flag("METRICS_ENABLED", &flag)?;
    }

    if let Some(addr) = read("METRICS_ADDRESS") {
        config.observability.metrics_address = parse_socket_addr("METRICS_ADDRESS", &addr)?;
    }

    Ok(config)
}

/// Read a variable, treating empty values as unset.
fn read(var: &str) -> Option<String> {
    env::var(var).ok().filter(|v| !v.is_empty())
}

fn invalid(var: &'static str, detail: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        var,
        detail: detail.into(),
    }
}

fn parse_socket_addr(var: &'static str, value: &str) -> Result<SocketAddr, ConfigError> {
    value
        .parse()
        .map_err(|_| invalid(var, format!("`{value}` is not a socket address")))
}

/// Bind targets may be hostnames; accept any value that resolves to at
/// least one socket address.
fn resolve_bind_address(var: &'static str, value: &str) -> Result<(), ConfigError> {
    let resolves = value
        .to_socket_addrs()
        .map(|mut addrs| addrs.next().is_some())
        .unwrap_or(false);
    if resolves {
        Ok(())
    } else {
        Err(invalid(
            var,
            format!("`{value}` does not resolve to a socket address"),
        ))
    }
}

fn parse_flag(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(invalid(var, format!("`{value}` is not a boolean"))),
    }
}
