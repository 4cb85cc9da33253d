//! Error types for connecting to and provisioning databases.

use sqlx::PgPool;

/// Errors returned by the connection and provisioning helpers.
#[derive(Debug, thiserror::Error)]
pub enum CrdbError {
    /// The connection string could not be parsed.
    #[error("Invalid connection string: {0}")]
    InvalidDsn(String),

    /// The driver rejected the connection options.
    #[error("Failed to open connection: {0}")]
    Open(#[source] sqlx::Error),

    /// A freshly opened pool failed its liveness check.
    ///
    /// The pool is handed back so the caller can inspect or close it.
    #[error("Failed to ping database: {source}")]
    Unreachable {
        /// The driver error from the liveness check.
        source: sqlx::Error,
        /// The pool that failed verification.
        pool: PgPool,
    },

    /// Database error outside any named operation.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// No session could be taken from the pool to provision a database.
    #[error("Failed to acquire a session for database '{database}': {source}")]
    Acquire {
        /// Target database name.
        database: String,
        /// The driver error.
        source: sqlx::Error,
    },

    /// `CREATE DATABASE` failed.
    #[error("Failed to create database '{database}': {source}")]
    CreateDatabase {
        /// Target database name.
        database: String,
        /// The driver error.
        source: sqlx::Error,
    },

    /// Switching the session to the target database failed.
    #[error("Failed to use database '{database}': {source}")]
    UseDatabase {
        /// Target database name.
        database: String,
        /// The driver error.
        source: sqlx::Error,
    },

    /// A schema statement failed.
    #[error("Failed to execute statement {position} on '{database}' ({statement}): {source}")]
    Statement {
        /// Target database name.
        database: String,
        /// 1-based position of the statement in the supplied list.
        position: usize,
        /// The statement text.
        statement: String,
        /// The driver error.
        source: sqlx::Error,
    },

    /// `DROP DATABASE` failed.
    #[error("Failed to drop database '{database}': {source}")]
    DropDatabase {
        /// Target database name.
        database: String,
        /// The driver error.
        source: sqlx::Error,
    },

    /// A partial UPDATE failed.
    #[error("Failed to update '{table}': {source}")]
    Update {
        /// Target table.
        table: String,
        /// The driver error.
        source: sqlx::Error,
    },

    /// IO error (reading configuration files).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file is not valid JSON.
    #[error("Invalid configuration: {0}")]
    Json(#[from] serde_json::Error),
}

impl CrdbError {
    /// Takes the pool out of an [`CrdbError::Unreachable`] error.
    #[must_use]
    pub fn into_pool(self) -> Option<PgPool> {
        match self {
            Self::Unreachable { pool, .. } => Some(pool),
            _ => None,
        }
    }
}

/// Result type for connection and provisioning operations.
pub type Result<T> = std::result::Result<T, CrdbError>;
