//! Connection and schema helpers for CockroachDB.
//!
//! `crdb` sits on top of `sqlx`'s PostgreSQL driver and covers the startup
//! chores of a database client:
//! - Formatting a [`Config`] into a connection string
//! - Getting a verified pool, reusing an existing one while it is alive
//! - Idempotently creating a database and its tables
//! - Ignoring "does not exist" errors during teardown
//! - Running partial UPDATEs built with [`crdb_sql::UpdateSet`]
//!
//! # Architecture
//!
//! - **Config** - Connection parameters and their connection-string form
//! - **Connect** - `try_connect` / `db_conn` liveness-checked pools
//! - **Provision** - `CREATE DATABASE IF NOT EXISTS` plus caller DDL
//! - **Classify** - Textual "not found" / "already exists" predicates
//! - **Update** - Binding untyped values and executing partial UPDATEs
//!
//! # Example
//!
//! ```rust,no_run
//! use crdb::prelude::*;
//!
//! # async fn run() -> crdb::error::Result<()> {
//! let config = Config {
//!     user: "root".to_string(),
//!     port: 26257,
//!     db_name: "crdb_test".to_string(),
//!     ssl_mode: "require".to_string(),
//!     ssl_cert: "/etc/cockroachdb/certs/node.crt".to_string(),
//!     ssl_key: "/etc/cockroachdb/certs/node.key".to_string(),
//!     ssl_root_cert: "/etc/cockroachdb/certs/ca.crt".to_string(),
//!     ..Config::default()
//! };
//!
//! let pool = db_conn(&config.format_dsn()).await?;
//!
//! instantiate_database(
//!     &pool,
//!     &config.db_name,
//!     &[
//!         "CREATE TABLE IF NOT EXISTS foos (name VARCHAR(25))",
//!         "CREATE TABLE IF NOT EXISTS bars (name VARCHAR(25))",
//!     ],
//! )
//! .await?;
//! # Ok(())
//! # }
//! ```

pub mod classify;
pub mod config;
pub mod connect;
pub mod error;
pub mod provision;
pub mod update;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::classify::{
        ignore_already_exists, ignore_not_found, is_already_exists, is_not_found,
    };
    pub use crate::config::Config;
    pub use crate::connect::{db_conn, ping, try_connect};
    pub use crate::error::{CrdbError, Result};
    pub use crate::provision::{drop_database, instantiate_database};
    pub use crate::update::{bind_values, execute_partial_update};
    pub use crdb_sql::{
        append_update, column_list, qualified_column_list, BoolUpdate, FieldUpdate,
        Float64Update, Int64Update, SqlValue, StringUpdate, Updatable, UpdateSet,
    };
}
