//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with the tracker's four routes
//! - Wire up middleware (request ID, tracing)
//! - Share wired subsystems with handlers through [`AppState`]
//! - Serve connections until shutdown is triggered, then drain

use axum::body::Body;
use axum::http::Request;
use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::http::request::{RequestIdExt, RequestIdLayer};
use crate::quotes::QuotePicker;
use crate::render::Pages;
use crate::store::CounterStore;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: CounterStore,
    pub pages: Arc<Pages>,
    pub quotes: Arc<QuotePicker>,
}

/// HTTP server for the visit tracker.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server around already-wired subsystems.
    pub fn new(store: CounterStore, pages: Pages, quotes: QuotePicker) -> Self {
        let state = AppState {
            store,
            pages: Arc::new(pages),
            quotes: Arc::new(quotes),
        };

        Self {
            router: Self::build_router(state),
        }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        // RequestIdLayer is added last so it runs first and the trace span
        // can pick the ID up.
        Router::new()
            .route("/", get(handlers::home))
            .route("/count", get(handlers::count))
            .route("/about", get(handlers::about))
            .route("/health", get(handlers::health))
            .with_state(state)
            .layer(
                TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                    tracing::info_span!(
                        "request",
                        method = %request.method(),
                        path = %request.uri().path(),
                        request_id = request.request_id().unwrap_or("unknown"),
                    )
                }),
            )
            .layer(RequestIdLayer)
    }

    /// Run the server, accepting connections on the given listener until
    /// the shutdown channel fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        let app = self.router.into_make_service();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
