//! Plant catalog sources
//!
//! The catalog is owned by an external document store. Each source only has to
//! return the full list of [`Plant`] records; scoring and search work on that list.
use crate::{
    error::{AppError, AppResult},
    models::Plant,
};

pub mod firestore;
pub mod static_catalog;

pub use firestore::FirestoreCatalog;
pub use static_catalog::StaticCatalog;

/// Trait for plant catalog sources
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetches every plant in the catalog
    async fn fetch_plants(&self) -> AppResult<Vec<Plant>>;

    /// Source name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Looks up one plant by id
pub async fn find_plant(source: &dyn CatalogSource, plant_id: i64) -> AppResult<Plant> {
    source
        .fetch_plants()
        .await?
        .into_iter()
        .find(|p| p.id == plant_id)
        .ok_or_else(|| AppError::NotFound(format!("Plant {} not found", plant_id)))
}
