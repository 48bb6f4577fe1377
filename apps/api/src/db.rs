use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

const SCHEMA_SQL: &str = include_str!("../migrations/0001_resumes.sql");

/// Creates and returns a PostgreSQL connection pool.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;

    info!("PostgreSQL connection pool established");
    Ok(pool)
}

/// Splits the schema file into single statements; Postgres prepared
/// statements accept one command each.
fn schema_statements(sql: &str) -> impl Iterator<Item = &str> {
    sql.split(';').map(str::trim).filter(|s| !s.is_empty())
}

/// Creates the `resumes` table and its index when missing.
pub async fn ensure_schema(pool: &PgPool) -> Result<()> {
    for statement in schema_statements(SCHEMA_SQL) {
        sqlx::query(statement)
            .execute(pool)
            .await
            .with_context(|| format!("schema statement failed: {statement}"))?;
    }
    info!("Database schema ready");
    Ok(())
}
