//! Personal gardens: plants a user has marked as planted
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{GardenEntry, GardenPlant},
    services::catalog::{find_plant, CatalogSource},
};

pub mod memory;
pub mod postgres;

pub use memory::InMemoryGardenStore;
pub use postgres::PgGardenStore;

/// Storage for garden entries
#[async_trait::async_trait]
pub trait GardenStore: Send + Sync {
    /// Stores a new entry
    async fn add(&self, entry: GardenEntry) -> AppResult<GardenEntry>;

    /// Every entry of one user, oldest first
    async fn list(&self, user_id: &str) -> AppResult<Vec<GardenEntry>>;

    /// Deletes an entry if it belongs to the user; returns whether one was deleted
    async fn remove(&self, user_id: &str, entry_id: Uuid) -> AppResult<bool>;

    /// Store name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Marks a catalog plant as planted for the user
pub async fn plant(
    catalog: &dyn CatalogSource,
    store: &dyn GardenStore,
    user_id: &str,
    plant_id: i64,
) -> AppResult<GardenEntry> {
    let plant = find_plant(catalog, plant_id).await?;
    let entry = store
        .add(GardenEntry::new(user_id.to_string(), plant.id))
        .await?;

    tracing::info!(
        user_id = %user_id,
        plant_id,
        entry_id = %entry.id,
        "Plant added to garden"
    );

    Ok(entry)
}

/// Lists the user's garden joined with the catalog
pub async fn list_garden(
    catalog: &dyn CatalogSource,
    store: &dyn GardenStore,
    user_id: &str,
    now: DateTime<Utc>,
) -> AppResult<Vec<GardenPlant>> {
    let entries = store.list(user_id).await?;
    if entries.is_empty() {
        return Ok(Vec::new());
    }

    let plants = catalog.fetch_plants().await?;
    let by_id: HashMap<i64, _> = plants.iter().map(|p| (p.id, p)).collect();

    let garden: Vec<GardenPlant> = entries
        .iter()
        .map(|entry| GardenPlant::join(entry, by_id.get(&entry.plant_id).copied(), now))
        .collect();

    tracing::debug!(user_id = %user_id, entry_count = garden.len(), "Loaded garden");

    Ok(garden)
}

/// Removes an entry from the user's garden
pub async fn uproot(store: &dyn GardenStore, user_id: &str, entry_id: Uuid) -> AppResult<()> {
    if store.remove(user_id, entry_id).await? {
        tracing::info!(user_id = %user_id, entry_id = %entry_id, "Plant removed from garden");
        Ok(())
    } else {
        Err(AppError::NotFound(format!(
            "Garden entry {} not found",
            entry_id
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Plant, TimeAlive};
    use crate::services::catalog::MockCatalogSource;

    fn catalog_with(plants: Vec<Plant>) -> MockCatalogSource {
        let mut source = MockCatalogSource::new();
        source
            .expect_fetch_plants()
            .returning(move || Ok(plants.clone()));
        source
    }

    fn monstera() -> Plant {
        Plant {
            common: vec!["Swiss cheese plant".to_string(), "Janda Bolong".to_string()],
            ..Plant::new(7, "Monstera deliciosa")
        }
    }

    #[tokio::test]
    async fn test_plant_and_list() {
        let catalog = catalog_with(vec![monstera()]);
        let store = InMemoryGardenStore::new();

        let entry = plant(&catalog, &store, "user-1", 7).await.unwrap();
        assert_eq!(entry.plant_id, 7);
        assert_eq!(entry.user_id, "user-1");

        let garden = list_garden(&catalog, &store, "user-1", entry.started_at)
            .await
            .unwrap();
        assert_eq!(garden.len(), 1);
        assert_eq!(garden[0].id, entry.id);
        assert_eq!(garden[0].latin_name, "Monstera deliciosa");
        assert_eq!(garden[0].last_common_name, "Janda Bolong");
        assert_eq!(garden[0].time_alive, TimeAlive::Hours(0));
    }

    #[tokio::test]
    async fn test_plant_unknown_id_is_not_found() {
        let catalog = catalog_with(vec![monstera()]);
        let store = InMemoryGardenStore::new();

        let result = plant(&catalog, &store, "user-1", 99).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
        assert!(store.list("user-1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_garden_skips_catalog_fetch() {
        let mut catalog = MockCatalogSource::new();
        catalog.expect_fetch_plants().never();
        let store = InMemoryGardenStore::new();

        let garden = list_garden(&catalog, &store, "user-1", Utc::now()).await.unwrap();
        assert!(garden.is_empty());
    }

    #[tokio::test]
    async fn test_entry_for_removed_plant_uses_placeholders() {
        let store = InMemoryGardenStore::new();
        store
            .add(GardenEntry::new("user-1".to_string(), 404))
            .await
            .unwrap();
        let catalog = catalog_with(vec![monstera()]);

        let garden = list_garden(&catalog, &store, "user-1", Utc::now()).await.unwrap();
        assert_eq!(garden[0].latin_name, "Unknown latin name");
    }

    #[tokio::test]
    async fn test_uproot() {
        let catalog = catalog_with(vec![monstera()]);
        let store = InMemoryGardenStore::new();
        let entry = plant(&catalog, &store, "user-1", 7).await.unwrap();

        // Another user cannot remove it.
        let result = uproot(&store, "user-2", entry.id).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));

        uproot(&store, "user-1", entry.id).await.unwrap();
        assert!(store.list("user-1").await.unwrap().is_empty());

        let again = uproot(&store, "user-1", entry.id).await;
        assert!(matches!(again, Err(AppError::NotFound(_))));
    }
}
