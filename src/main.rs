//! Visit Tracker
//!
//! A small web application that counts visits in Redis, built with Tokio
//! and Axum.
//!
//! # Architecture Overview
//!
//! ```text
//!                     ┌────────────────────────────────────────────────┐
//!                     │                 VISIT TRACKER                   │
//!                     │                                                 │
//!     Client Request  │  ┌─────────┐      ┌──────────┐                 │
//!     ────────────────┼─▶│  http   │─────▶│ handlers │                 │
//!                     │  │ server  │      │          │                 │
//!                     │  └─────────┘      └────┬─────┘                 │
//!                     │       /  /about        │ /count  /health       │
//!                     │   ┌────────┐      ┌────▼─────┐                 │
//!                     │   │ render │◀─────│  store   │────────────────┼──▶ Redis
//!                     │   │+ quotes│      │ (visits) │                 │
//!                     │   └────────┘      └──────────┘                 │
//!                     │                                                 │
//!                     │  ┌───────────────────────────────────────────┐ │
//!                     │  │           Cross-Cutting Concerns           │ │
//!                     │  │  config · observability · lifecycle        │ │
//!                     │  └───────────────────────────────────────────┘ │
//!                     └────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use visit_tracker::config;
use visit_tracker::http::HttpServer;
use visit_tracker::lifecycle::{signals, Shutdown};
use visit_tracker::observability::metrics;
use visit_tracker::quotes::QuotePicker;
use visit_tracker::render::Pages;
use visit_tracker::store::CounterStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "visit_tracker=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("visit-tracker v0.1.0 starting");

    let config = config::load_from_env()?;

    tracing::info!(
        app_name = %config.app_name,
        bind_address = %config.listener.bind_address,
        store_url = %config.store.url(),
        "Configuration loaded"
    );

    // Bind TCP listener
    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(
        address = %local_addr,
        "Listening for connections"
    );

    // Metrics exporter is opt-in
    if config.observability.metrics_enabled {
        metrics::init_metrics(config.observability.metrics_address);
    }

    // Wire subsystems. The store pool is lazy, so startup succeeds even
    // while Redis is down; requests report degraded until it comes back.
    let store = CounterStore::connect(&config.store)?;
    let pages = Pages::new(config.app_name.as_str())?;
    let quotes = QuotePicker::new();

    // Take the receiver before the watcher can fire; a trigger with no
    // receivers is dropped.
    let shutdown = Arc::new(Shutdown::new());
    let shutdown_rx = shutdown.subscribe();
    tokio::spawn(signals::watch(shutdown.clone()));

    // Create and run HTTP server
    let server = HttpServer::new(store, pages, quotes);
    server.run(listener, shutdown_rx).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
