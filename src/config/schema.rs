//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the
//! tracker. Every field has a default so the process can come up with no
//! environment set at all.

use std::net::SocketAddr;

/// Root configuration for the visit tracker.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// Application display name, rendered into every page.
    pub app_name: AppName,

    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Counter store (Redis) connection target.
    pub store: StoreConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Newtype wrapper so the display name default lives with the schema.
#[derive(Debug, Clone)]
pub struct AppName(pub String);

impl Default for AppName {
    fn default() -> Self {
        Self("Khalid Tracker".to_string())
    }
}

impl AppName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AppName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Listener configuration.
#[derive(Debug, Clone)]
pub struct ListenerConfig {
    /// Bind address, an IP or resolvable hostname with port
    /// (e.g., "0.0.0.0:5000", "localhost:5000").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:5000".to_string(),
        }
    }
}

/// Counter store connection target.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Store host name or address.
    pub host: String,

    /// Store port.
    pub port: u16,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            host: "redis".to_string(),
            port: 6379,
        }
    }
}

impl StoreConfig {
    /// Connection URL for the store client. The counter lives in the
    /// default logical database (index 0).
    pub fn url(&self) -> String {
        format!("redis://{}:{}/0", self.host, self.port)
    }
}

/// Observability settings.
#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    /// Enable the Prometheus exporter.
    pub metrics_enabled: bool,

    /// Exporter bind address. Typed because the exporter wants a
    /// [`SocketAddr`], not a hostname.
    pub metrics_address: SocketAddr,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            metrics_enabled: false,
            metrics_address: SocketAddr::from(([0, 0, 0, 0], 9090)),
        }
    }
}
