//! Connection acquisition.
//!
//! [`try_connect`] is the single entry point for both "connect for the first
//! time" and "make sure the connection I have still works": a live pool is
//! returned as-is, anything else is replaced by a freshly opened and pinged
//! pool.

use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use sqlx::Connection;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{CrdbError, Result};

/// Returns `existing` if it answers a ping, otherwise opens and pings a new
/// pool from `dsn`.
///
/// `dsn` is only parsed when a new pool is needed, so a live `existing` pool
/// is returned even for a malformed `dsn`.
pub async fn try_connect(dsn: &str, existing: Option<&PgPool>) -> Result<PgPool> {
    if let Some(pool) = existing {
        match ping(pool).await {
            Ok(()) => {
                debug!("Existing connection is alive");
                return Ok(pool.clone());
            }
            Err(err) => {
                warn!(error = %err, "Existing connection failed ping, reconnecting");
            }
        }
    }
    db_conn(dsn).await
}

/// Opens a new pool from `dsn` and verifies it with a ping.
///
/// Opening is lazy, so an unreachable host surfaces as
/// [`CrdbError::Unreachable`], which carries the unusable pool.
pub async fn db_conn(dsn: &str) -> Result<PgPool> {
    let pool = open(dsn)?;
    if let Err(source) = ping(&pool).await {
        return Err(CrdbError::Unreachable { source, pool });
    }
    info!("Connected to database");
    Ok(pool)
}

/// Checks that `pool` can currently reach the database.
pub async fn ping(pool: &PgPool) -> std::result::Result<(), sqlx::Error> {
    let mut conn = pool.acquire().await?;
    conn.ping().await
}

/// Creates a lazily connecting pool; no network I/O happens here.
fn open(dsn: &str) -> Result<PgPool> {
    let (options, connect_timeout) = parse_dsn(dsn)?;
    let mut pool_options = PgPoolOptions::new();
    if let Some(timeout) = connect_timeout {
        pool_options = pool_options.acquire_timeout(timeout);
    }
    Ok(pool_options.connect_lazy_with(options))
}

/// Accepts both `postgres://` URLs and key/value connection strings.
fn parse_dsn(dsn: &str) -> Result<(PgConnectOptions, Option<Duration>)> {
    let trimmed = dsn.trim();
    if trimmed.starts_with("postgres://") || trimmed.starts_with("postgresql://") {
        let options = trimmed
            .parse::<PgConnectOptions>()
            .map_err(CrdbError::Open)?;
        return Ok((options, None));
    }
    let config: Config = trimmed.parse()?;
    Ok((config.connect_options()?, config.connect_timeout()))
}
