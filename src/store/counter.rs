//! Counter store client.
//!
//! # Responsibilities
//! - Own the pooled connection handle to the external store
//! - Atomic increment-and-fetch of the visit counter
//! - Liveness probe backing the health endpoint
//!
//! # Design Decisions
//! - Pool creation is lazy: the process starts even while the store is down
//! - No retries, no fallback values; failures surface to the caller
//! - All connectivity failures collapse into one `Unavailable` variant;
//!   anything else the store sends back is a `Protocol` error

use deadpool_redis::redis::{cmd, AsyncCommands, RedisError};
use deadpool_redis::{Config as PoolConfig, CreatePoolError, Pool, PoolError, Runtime};
use thiserror::Error;

use crate::config::StoreConfig;

/// Fixed key holding the visit counter in the store's database 0. The only
/// key this system ever reads or writes.
pub const VISITS_KEY: &str = "visits";

/// Errors that can occur while talking to the counter store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The configured target could not be turned into a client. Startup
    /// only; never produced by a request.
    #[error("Invalid counter store target: {0}")]
    Config(#[from] CreatePoolError),

    /// The store could not be reached: connection refused, dropped, or
    /// timed out.
    #[error("Counter store unavailable: {0}")]
    Unavailable(String),

    /// The store answered, but the reply was not usable.
    #[error("Counter store protocol error: {0}")]
    Protocol(#[source] RedisError),
}

impl StoreError {
    /// True when the failure means the store cannot currently be reached.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, StoreError::Unavailable(_))
    }
}

/// Handle to the external counter store.
///
/// Cheap to clone; all clones share one connection pool, which is safe for
/// concurrent use by in-flight requests without any locking here.
#[derive(Clone)]
pub struct CounterStore {
    pool: Pool,
}

impl CounterStore {
    /// Build the pooled client for the given target. Does not dial the
    /// store; connections are established on first use.
    pub fn connect(config: &StoreConfig) -> Result<Self, StoreError> {
        let pool = PoolConfig::from_url(config.url()).create_pool(Some(Runtime::Tokio1))?;
        Ok(Self { pool })
    }

    /// Atomically increment the visit counter and return the new value.
    ///
    /// Exactly one store mutation per call. The value is at least one
    /// greater than the previous successful call's; atomicity is the
    /// store's guarantee, not ours. A missing key counts as zero, so the
    /// first ever call returns 1.
    pub async fn increment_and_get(&self) -> Result<u64, StoreError> {
        let mut conn = self.pool.get().await.map_err(classify_pool)?;
        let count: u64 = conn.incr(VISITS_KEY, 1).await.map_err(classify_redis)?;
        Ok(count)
    }

    /// Liveness probe: a bare `PING`. Success means the store is reachable;
    /// the reply payload is irrelevant.
    pub async fn ping(&self) -> Result<(), StoreError> {
        let mut conn = self.pool.get().await.map_err(classify_pool)?;
        cmd("PING")
            .query_async::<String>(&mut conn)
            .await
            .map_err(classify_redis)?;
        Ok(())
    }
}

fn classify_pool(err: PoolError) -> StoreError {
    match err {
        PoolError::Backend(err) => classify_redis(err),
        other => StoreError::Unavailable(other.to_string()),
    }
}

fn classify_redis(err: RedisError) -> StoreError {
    if err.is_io_error()
        || err.is_timeout()
        || err.is_connection_refusal()
        || err.is_connection_dropped()
    {
        StoreError::Unavailable(err.to_string())
    } else {
        StoreError::Protocol(err)
    }
}
