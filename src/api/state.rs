use std::sync::Arc;

use crate::{
    config::{CatalogSourceKind, Config},
    db::{self, Cache, CacheWriterHandle},
    services::{
        catalog::{CatalogSource, FirestoreCatalog, StaticCatalog},
        discovery::DiscoverySettings,
        garden::{GardenStore, InMemoryGardenStore, PgGardenStore},
    },
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn CatalogSource>,
    pub garden: Arc<dyn GardenStore>,
    pub settings: DiscoverySettings,
}

impl AppState {
    pub fn new(
        catalog: Arc<dyn CatalogSource>,
        garden: Arc<dyn GardenStore>,
        settings: DiscoverySettings,
    ) -> Self {
        Self {
            catalog,
            garden,
            settings,
        }
    }

    /// Wires the catalog source and garden store selected by the configuration
    ///
    /// Returns the cache writer handle when a Redis cache was started, so the
    /// caller can flush it on shutdown.
    pub async fn from_config(config: &Config) -> anyhow::Result<(Self, Option<CacheWriterHandle>)> {
        let mut cache_handle = None;

        let catalog: Arc<dyn CatalogSource> = match config.catalog_source {
            CatalogSourceKind::File => {
                Arc::new(StaticCatalog::from_json_file(&config.catalog_file).await?)
            }
            CatalogSourceKind::Firestore => {
                let project_id = config.firestore_project_id.clone().ok_or_else(|| {
                    anyhow::anyhow!("FIRESTORE_PROJECT_ID is required for the Firestore catalog")
                })?;
                let redis_client = db::create_redis_client(&config.redis_url)?;
                let (cache, handle) = Cache::new(redis_client);
                cache_handle = Some(handle);

                Arc::new(FirestoreCatalog::new(
                    cache,
                    config.firestore_api_url.clone(),
                    project_id,
                    config.firestore_api_key.clone(),
                    config.catalog_collection.clone(),
                    config.catalog_cache_ttl_secs,
                ))
            }
        };

        let garden: Arc<dyn GardenStore> = match &config.database_url {
            Some(url) => Arc::new(PgGardenStore::new(db::create_pool(url).await?)),
            None => {
                tracing::warn!("DATABASE_URL not set, garden entries are kept in memory");
                Arc::new(InMemoryGardenStore::new())
            }
        };

        tracing::info!(
            catalog = catalog.name(),
            garden = garden.name(),
            "Application state initialized"
        );

        Ok((
            Self::new(catalog, garden, config.discovery_settings()),
            cache_handle,
        ))
    }
}
