use crate::config::Config;
use crate::models::StatusCheck;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

/// Upper bound on records returned by a single listing.
pub const STATUS_CHECK_LIST_LIMIT: i64 = 1000;

pub async fn connect(config: &Config) -> anyhow::Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(&config.database_url())?;

    // File databases live under ./data by default; make sure the directory exists.
    if let Some(parent) = options.get_filename().parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(config.db_max_connections)
        .connect_with(options)
        .await?;

    tracing::info!("Connected to database {}", config.db_name);
    Ok(pool)
}

pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS status_checks (
            id TEXT PRIMARY KEY,
            client_name TEXT NOT NULL,
            timestamp TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    tracing::info!("Database migrations completed");
    Ok(())
}

pub async fn insert_status_check(pool: &SqlitePool, check: &StatusCheck) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO status_checks (id, client_name, timestamp) VALUES (?, ?, ?)")
        .bind(&check.id)
        .bind(&check.client_name)
        .bind(check.timestamp)
        .execute(pool)
        .await?;
    Ok(())
}

/// Records in storage order, capped at [`STATUS_CHECK_LIST_LIMIT`].
pub async fn list_status_checks(pool: &SqlitePool) -> Result<Vec<StatusCheck>, sqlx::Error> {
    sqlx::query_as("SELECT id, client_name, timestamp FROM status_checks LIMIT ?")
        .bind(STATUS_CHECK_LIST_LIMIT)
        .fetch_all(pool)
        .await
}

#[cfg(test)]
pub(crate) async fn memory_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    run_migrations(&pool).await.unwrap();
    pool
}
