#![allow(dead_code)]

use crdb::prelude::*;
use sqlx::PgPool;

/// Environment variable naming a JSON configuration for a live cluster.
pub const CONFIG_ENV: &str = "CRDB_TEST_CONFIG";

/// Reads the live-cluster configuration.
///
/// Panics when it is not set up, so an ignored test run with `--ignored`
/// never passes without a cluster.
pub fn read_config() -> Config {
    let path = std::env::var(CONFIG_ENV)
        .unwrap_or_else(|_| panic!("{CONFIG_ENV} must name a JSON config for a live cluster"));
    Config::from_json_file(&path).unwrap_or_else(|e| panic!("Failed to read config {path}: {e}"))
}

/// Appends the segments of a random UUID joined with `_`, since hyphens are
/// not legal in database names.
pub fn rand_db_name(prefix: &str) -> String {
    let id = uuid::Uuid::new_v4().to_string();
    let mut name = prefix.to_string();
    for segment in id.split('-') {
        name.push('_');
        name.push_str(segment);
    }
    name
}

pub async fn new_conn(dsn: &str) -> PgPool {
    db_conn(dsn)
        .await
        .unwrap_or_else(|e| panic!("Failed to connect: {e}"))
}

pub async fn tear_down(pool: &PgPool, database: &str) {
    let result = sqlx::raw_sql(&format!("DROP DATABASE IF EXISTS {database} CASCADE"))
        .execute(pool)
        .await;
    ignore_not_found(result).unwrap_or_else(|e| panic!("Failed teardown: {e}"));
}

pub async fn table_exists(pool: &PgPool, database: &str, table: &str) -> bool {
    let row: Option<(String,)> = sqlx::query_as(
        "SELECT table_name::STRING FROM information_schema.tables \
         WHERE table_catalog = $1 AND table_name = $2",
    )
    .bind(database)
    .bind(table)
    .fetch_optional(pool)
    .await
    .unwrap();
    row.is_some()
}
