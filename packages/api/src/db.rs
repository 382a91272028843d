use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::DatabaseConfig;
use crate::error::Result;

pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout)
        .connect(&config.url)
        .await?;

    Ok(pool)
}

pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

/// Connect and migrate; `None` when the database cannot be used, so the
/// service can start from the content tree alone.
pub async fn connect(config: &DatabaseConfig) -> Option<PgPool> {
    let pool = match create_pool(config).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::warn!(error = %e, "database unreachable, serving from the content tree only");
            return None;
        }
    };
    tracing::info!("connected to database");

    if config.run_migrations {
        tracing::info!("running database migrations...");
        if let Err(e) = run_migrations(&pool).await {
            tracing::warn!(error = %e, "migrations failed, serving from the content tree only");
            return None;
        }
        tracing::info!("migrations completed");
    }

    Some(pool)
}
