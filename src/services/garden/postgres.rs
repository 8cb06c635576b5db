use sqlx::PgPool;
use uuid::Uuid;

use crate::{error::AppResult, models::GardenEntry, services::garden::GardenStore};

/// Garden storage in the `user_plants` table
///
/// Expected columns: `id UUID PRIMARY KEY`, `user_id TEXT`, `plant_id BIGINT`,
/// `started_at TIMESTAMPTZ`.
#[derive(Clone)]
pub struct PgGardenStore {
    pool: PgPool,
}

impl PgGardenStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl GardenStore for PgGardenStore {
    async fn add(&self, entry: GardenEntry) -> AppResult<GardenEntry> {
        sqlx::query(
            r#"
            INSERT INTO user_plants (id, user_id, plant_id, started_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(entry.id)
        .bind(&entry.user_id)
        .bind(entry.plant_id)
        .bind(entry.started_at)
        .execute(&self.pool)
        .await?;

        Ok(entry)
    }

    async fn list(&self, user_id: &str) -> AppResult<Vec<GardenEntry>> {
        let entries = sqlx::query_as::<_, GardenEntry>(
            r#"
            SELECT id, user_id, plant_id, started_at
            FROM user_plants
            WHERE user_id = $1
            ORDER BY started_at ASC, id ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    async fn remove(&self, user_id: &str, entry_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM user_plants WHERE id = $1 AND user_id = $2")
            .bind(entry_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    fn name(&self) -> &'static str {
        "postgres"
    }
}
