//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Shutdown (shutdown.rs):
//!     Trigger → Stop accepting → Drain in-flight requests → Exit
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger graceful shutdown
//! ```
//!
//! # Design Decisions
//! - Startup order lives in main: config first, then subsystems, then the
//!   listener (traffic only when ready)
//! - One broadcast channel coordinates server and tests alike

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
