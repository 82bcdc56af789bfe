//! Health reporting subsystem.
//!
//! # Data Flow
//! ```text
//! GET /health
//!     → check_health
//!     → store liveness probe (PING)
//!     → (200, {"status":"ok","redis":"up"})        probe succeeded
//!     → (503, {"status":"degraded","redis":"down"}) probe failed
//! ```
//!
//! # Design Decisions
//! - Health is derived fresh per request, never cached
//! - Every probe failure maps to degraded, not just connection refusal;
//!   callers never see a health error
//! - Probe failures count toward the store error metric, same as a
//!   failed increment

use axum::http::StatusCode;
use serde::Serialize;

use crate::observability::metrics::record_store_error;
use crate::store::CounterStore;

/// Wire body of the health endpoint. Field order is part of the contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HealthBody {
    pub status: &'static str,
    pub redis: &'static str,
}

impl HealthBody {
    pub const OK: Self = Self {
        status: "ok",
        redis: "up",
    };

    pub const DEGRADED: Self = Self {
        status: "degraded",
        redis: "down",
    };
}

/// Probe the store and report aggregate service health.
///
/// This function never errors: any probe failure, whatever the cause,
/// reports the degraded body with 503 and counts toward the store error
/// metric.
pub async fn check_health(store: &CounterStore) -> (StatusCode, HealthBody) {
    match store.ping().await {
        Ok(()) => (StatusCode::OK, HealthBody::OK),
        Err(err) => {
            record_store_error();
            tracing::warn!(error = %err, "Health probe failed");
            (StatusCode::SERVICE_UNAVAILABLE, HealthBody::DEGRADED)
        }
    }
}
