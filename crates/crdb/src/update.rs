//! Executing partial UPDATE statements.

use crdb_sql::{SqlValue, ToSqlValue, UpdateSet};
use sqlx::postgres::{PgArguments, PgPool};
use sqlx::query::Query;
use sqlx::Postgres;
use tracing::debug;

use crate::error::{CrdbError, Result};

/// Binds a `SqlValue` parameter to a raw query.
pub fn bind_value<'q>(
    query: Query<'q, Postgres, PgArguments>,
    value: SqlValue,
) -> Query<'q, Postgres, PgArguments> {
    match value {
        SqlValue::Bool(b) => query.bind(b),
        SqlValue::Int(i) => query.bind(i),
        SqlValue::Float(f) => query.bind(f),
        SqlValue::Text(s) => query.bind(s),
    }
}

/// Binds `values` in order.
pub fn bind_values<'q>(
    mut query: Query<'q, Postgres, PgArguments>,
    values: Vec<SqlValue>,
) -> Query<'q, Postgres, PgArguments> {
    for value in values {
        query = bind_value(query, value);
    }
    query
}

/// Updates the changed columns in `set` on the row of `table` whose
/// `key_column` equals `key`.
///
/// Returns the number of rows affected. When nothing is being updated no
/// statement is sent and 0 is returned.
pub async fn execute_partial_update<K: ToSqlValue>(
    pool: &PgPool,
    table: &str,
    key_column: &str,
    key: K,
    set: UpdateSet,
) -> Result<u64> {
    let Some((sql, args)) = set.build(table, key_column, key) else {
        debug!(table = %table, "No columns to update");
        return Ok(0);
    };

    debug!(sql = %sql, params = args.len(), "Executing SQL");
    let result = bind_values(sqlx::query(&sql), args)
        .execute(pool)
        .await
        .map_err(|source| CrdbError::Update {
            table: table.to_string(),
            source,
        })?;
    Ok(result.rows_affected())
}
