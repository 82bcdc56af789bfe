//! Route handlers.
//!
//! # Responsibilities
//! - Serve the four routes: `/`, `/count`, `/about`, `/health`
//! - Drive the counter store on the visit path and render the outcome
//! - Record per-request metrics inline
//!
//! # Design Decisions
//! - A visit that cannot reach the store gets an explicit degraded page
//!   with 503, mirroring the health probe; the handler never invents a
//!   count
//! - Render failures map to plain 500s; templates are parsed at startup,
//!   so a failure here is a bug rather than an operational state

use std::time::Instant;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;

use crate::health::check_health;
use crate::observability::metrics;
use crate::render::RenderError;
use crate::store::StoreError;

use super::server::AppState;

/// GET / - landing page.
pub async fn home(State(state): State<AppState>) -> Response {
    let started = Instant::now();
    let response = match state.pages.home() {
        Ok(html) => (StatusCode::OK, Html(html)).into_response(),
        Err(err) => render_failure(err),
    };
    metrics::record_request("GET", "/", response.status().as_u16(), started);
    response
}

/// GET /count - increment the visit counter and show the new total.
pub async fn count(State(state): State<AppState>) -> Response {
    let started = Instant::now();
    let response = match state.store.increment_and_get().await {
        Ok(count) => {
            let quote = state.quotes.pick();
            metrics::record_visit(count);
            tracing::debug!(count, quote, "Visit recorded");
            match state.pages.count(count, quote) {
                Ok(html) => (StatusCode::OK, Html(html)).into_response(),
                Err(err) => render_failure(err),
            }
        }
        Err(err) if err.is_unavailable() => {
            metrics::record_store_error();
            tracing::warn!(error = %err, "Counter store unreachable, serving degraded page");
            match state.pages.store_down() {
                Ok(html) => (StatusCode::SERVICE_UNAVAILABLE, Html(html)).into_response(),
                Err(err) => render_failure(err),
            }
        }
        Err(err) => {
            metrics::record_store_error();
            store_failure(err)
        }
    };
    metrics::record_request("GET", "/count", response.status().as_u16(), started);
    response
}

/// GET /about - static page describing the application.
pub async fn about(State(state): State<AppState>) -> Response {
    let started = Instant::now();
    let response = match state.pages.about() {
        Ok(html) => (StatusCode::OK, Html(html)).into_response(),
        Err(err) => render_failure(err),
    };
    metrics::record_request("GET", "/about", response.status().as_u16(), started);
    response
}

/// GET /health - liveness report including the store probe.
pub async fn health(State(state): State<AppState>) -> Response {
    let started = Instant::now();
    let (status, body) = check_health(&state.store).await;
    metrics::record_request("GET", "/health", status.as_u16(), started);
    (status, Json(body)).into_response()
}

fn render_failure(err: RenderError) -> Response {
    tracing::error!(error = %err, "Template rendering failed");
    (StatusCode::INTERNAL_SERVER_ERROR, "template rendering failed").into_response()
}

fn store_failure(err: StoreError) -> Response {
    tracing::error!(error = %err, "Unexpected counter store failure");
    (StatusCode::INTERNAL_SERVER_ERROR, "counter store failure").into_response()
}
