use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};
use tracing::{error, info, warn};

use crate::config::AppConfig;

/// Opens the process-wide pool. A failed probe is logged but not fatal: store
/// calls report `StorageError` until the database becomes reachable.
pub async fn connect(config: &AppConfig) -> anyhow::Result<PgPool> {
    let db = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect_lazy(&config.database_url)
        .context("parse DATABASE_URL")?;

    match sqlx::query("SELECT 1").execute(&db).await {
        Ok(_) => info!("Connected to PostgreSQL database"),
        Err(e) => error!(error = %e, "Error connecting to database"),
    }
    Ok(db)
}

pub async fn migrate(db: &PgPool) {
    if let Err(e) = sqlx::migrate!("./migrations").run(db).await {
        warn!(error = %e, "migration failed; continuing");
    }
}
