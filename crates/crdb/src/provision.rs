//! Database provisioning.
//!
//! This module creates a database if needed and applies schema statements to
//! it. Statements run one after another on a single session; there is no
//! transaction, so statements that succeeded before a failure stay applied.

use sqlx::postgres::{PgConnection, PgPool};
use sqlx::Connection;
use tracing::{debug, info, warn};

use crate::classify::ignore_not_found;
use crate::error::{CrdbError, Result};

/// SQL creating `database` unless it exists.
///
/// The name is not quoted, so it must be a valid bare identifier.
#[must_use]
pub fn create_database_sql(database: &str) -> String {
    format!("CREATE DATABASE IF NOT EXISTS {database}")
}

/// SQL switching the session to `database`.
#[must_use]
pub fn use_database_sql(database: &str) -> String {
    format!("SET DATABASE = {database}")
}

/// SQL dropping `database` and everything in it.
#[must_use]
pub fn drop_database_sql(database: &str) -> String {
    format!("DROP DATABASE IF EXISTS {database} CASCADE")
}

/// Ensures `database` exists, then executes each of `statements` against it
/// in order.
///
/// Stops at the first failing statement. Running this twice with the same
/// arguments succeeds both times as long as every statement is itself
/// idempotent (e.g. `CREATE TABLE IF NOT EXISTS`).
///
/// The work happens on a session detached from `pool` and closed afterwards,
/// so the session-level database switch is never seen by other pool users.
pub async fn instantiate_database<S: AsRef<str>>(
    pool: &PgPool,
    database: &str,
    statements: &[S],
) -> Result<()> {
    info!(
        database = %database,
        statements = statements.len(),
        "Instantiating database"
    );

    let mut conn = pool
        .acquire()
        .await
        .map_err(|source| CrdbError::Acquire {
            database: database.to_string(),
            source,
        })?
        .detach();
    let result = apply(&mut conn, database, statements).await;
    if let Err(err) = conn.close().await {
        warn!(error = %err, "Failed to close provisioning session");
    }
    result?;

    info!(database = %database, "Database instantiated successfully");
    Ok(())
}

async fn apply<S: AsRef<str>>(
    conn: &mut PgConnection,
    database: &str,
    statements: &[S],
) -> Result<()> {
    let create = create_database_sql(database);
    debug!(sql = %create, "Executing SQL");
    sqlx::raw_sql(&create)
        .execute(&mut *conn)
        .await
        .map_err(|source| CrdbError::CreateDatabase {
            database: database.to_string(),
            source,
        })?;

    let use_db = use_database_sql(database);
    debug!(sql = %use_db, "Executing SQL");
    sqlx::raw_sql(&use_db)
        .execute(&mut *conn)
        .await
        .map_err(|source| CrdbError::UseDatabase {
            database: database.to_string(),
            source,
        })?;

    for (index, statement) in statements.iter().enumerate() {
        let sql = statement.as_ref();
        debug!(position = index + 1, sql = %sql, "Executing SQL");
        sqlx::raw_sql(sql)
            .execute(&mut *conn)
            .await
            .map_err(|source| CrdbError::Statement {
                database: database.to_string(),
                position: index + 1,
                statement: sql.to_string(),
                source,
            })?;
    }

    Ok(())
}

/// Drops `database` with `CASCADE`; a database that does not exist is not
/// an error.
pub async fn drop_database(pool: &PgPool, database: &str) -> Result<()> {
    let sql = drop_database_sql(database);
    debug!(sql = %sql, "Executing SQL");

    let result = sqlx::raw_sql(&sql)
        .execute(pool)
        .await
        .map_err(|source| CrdbError::DropDatabase {
            database: database.to_string(),
            source,
        });

    if ignore_not_found(result)?.is_none() {
        debug!(database = %database, "Database did not exist, nothing to drop");
    } else {
        info!(database = %database, "Database dropped");
    }
    Ok(())
}
