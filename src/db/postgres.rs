use sqlx::{postgres::PgPoolOptions, PgPool};

/// Creates the PostgreSQL pool backing garden storage
pub async fn create_pool(database_url: &str) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;

    tracing::info!("Connected to PostgreSQL");

    Ok(pool)
}
