//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Handlers produce:
//!     → tracing events (structured log lines, request-id in span)
//!     → metrics.rs (counters, gauges, histograms)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Metrics endpoint (Prometheus scrape, opt-in)
//! ```
//!
//! # Design Decisions
//! - Log subscriber setup lives in main; this module owns metrics only
//! - Metric updates are cheap (atomic increments), recorded inline in
//!   handlers rather than through a middleware layer

pub mod metrics;
