//! crdb CLI
//!
//! Command-line tool for checking connectivity and provisioning databases.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use crdb::prelude::*;

/// Connection and schema helpers for CockroachDB.
#[derive(Parser)]
#[command(name = "crdb")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON configuration file.
    #[arg(short, long, env = "CRDB_CONFIG")]
    config: Option<PathBuf>,

    /// Connection string; overrides the configuration file.
    #[arg(short, long, env = "CRDB_DSN")]
    dsn: Option<String>,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the connection string for the configuration.
    Dsn,

    /// Connect and ping the database.
    Ping,

    /// Create the database if needed and apply schema statements.
    Provision {
        /// Database name (defaults to the configured dbName).
        #[arg(long)]
        database: Option<String>,

        /// File of `;`-separated statements, applied before STATEMENTS.
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Statements to execute, in order.
        statements: Vec<String>,
    },

    /// Drop a database; a missing database is not an error.
    Drop {
        /// Database name (defaults to the configured dbName).
        #[arg(long)]
        database: Option<String>,
    },
}

fn split_statements(script: &str) -> Vec<String> {
    script
        .split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn database_name(database: Option<String>, config: &Config) -> anyhow::Result<String> {
    database
        .or_else(|| (!config.db_name.is_empty()).then(|| config.db_name.clone()))
        .context("no database name given and none configured")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = match &cli.config {
        Some(path) => Config::from_json_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => Config::default(),
    };
    let dsn = cli.dsn.clone().unwrap_or_else(|| config.format_dsn());

    match cli.command {
        Commands::Dsn => {
            println!("{dsn}");
        }

        Commands::Ping => {
            let pool = db_conn(&dsn).await?;
            info!("Database is reachable.");
            pool.close().await;
        }

        Commands::Provision {
            database,
            file,
            statements,
        } => {
            let database = database_name(database, &config)?;
            let mut all = Vec::new();
            if let Some(path) = file {
                let script = std::fs::read_to_string(&path)
                    .with_context(|| format!("reading {}", path.display()))?;
                all.extend(split_statements(&script));
            }
            all.extend(statements);

            let pool = db_conn(&dsn).await?;
            instantiate_database(&pool, &database, &all).await?;
            info!(statements = all.len(), "Provisioned database {database}.");
            pool.close().await;
        }

        Commands::Drop { database } => {
            let database = database_name(database, &config)?;
            let pool = db_conn(&dsn).await?;
            drop_database(&pool, &database).await?;
            pool.close().await;
        }
    }

    Ok(())
}
