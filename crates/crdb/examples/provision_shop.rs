//! Connects to a local insecure CockroachDB node and creates a small schema.
//!
//! Run with: `cargo run -p crdb --example provision_shop`

use crdb::prelude::*;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::DEBUG)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // A Config can also be read from JSON with Config::from_json_file.
    let config = Config {
        user: "root".to_string(),
        host: "localhost".to_string(),
        port: 26257,
        db_name: "shop".to_string(),
        connect_timeout: 5,
        ssl_mode: "disable".to_string(),
        ..Config::default()
    };
    let dsn = config.format_dsn();
    println!("{dsn}");

    let pool = db_conn(&dsn).await?;
    instantiate_database(
        &pool,
        &config.db_name,
        &[
            "CREATE TABLE IF NOT EXISTS items (id INT8 PRIMARY KEY, name STRING, unit_price FLOAT8, quantity INT8)",
        ],
    )
    .await?;

    // Later on, reuse the pool while it is alive.
    let pool = try_connect(&dsn, Some(&pool)).await?;

    sqlx::query("UPSERT INTO items (id, name, unit_price, quantity) VALUES (1, 'bolt', 0.1, 100)")
        .execute(&pool)
        .await?;

    let set = UpdateSet::new()
        .with("name", &StringUpdate::unchanged())
        .with("unit_price", &Float64Update::set(0.12))
        .with("quantity", &Int64Update::set(90));
    println!("updating {}", set.column_list());
    let rows = execute_partial_update(&pool, "items", "id", 1_i64, set).await?;
    println!("{rows} row(s) updated");

    println!(
        "SELECT {} FROM items",
        qualified_column_list("items", &["name", "unit_price", "quantity"])
    );

    pool.close().await;
    Ok(())
}
