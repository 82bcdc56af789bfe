//! Counter store subsystem.
//!
//! # Data Flow
//! ```text
//! AppConfig.store
//!     → counter.rs (pooled client, lazy connections)
//!     → INCRBY visits 1   (counter page)
//!     → PING              (health endpoint)
//! ```
//!
//! The store owns the visit count; this process never caches it.

pub mod counter;

pub use counter::{CounterStore, StoreError, VISITS_KEY};
