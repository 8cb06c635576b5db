use serde::Deserialize;

use crate::models::RecommendationWeights;
use crate::services::discovery::DiscoverySettings;
use crate::services::plant_search::DEFAULT_SEARCH_THRESHOLD;

/// Where the plant catalog is loaded from
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CatalogSourceKind {
    /// Firestore REST API, cached in Redis
    Firestore,
    /// Local JSON file
    File,
}

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Catalog backend
    #[serde(default = "default_catalog_source")]
    pub catalog_source: CatalogSourceKind,

    /// JSON file holding the catalog when `catalog_source` is `file`
    #[serde(default = "default_catalog_file")]
    pub catalog_file: String,

    /// Firestore collection holding the catalog documents
    #[serde(default = "default_catalog_collection")]
    pub catalog_collection: String,

    /// Firestore project id
    #[serde(default)]
    pub firestore_project_id: Option<String>,

    /// Firestore web API key
    #[serde(default)]
    pub firestore_api_key: Option<String>,

    /// Firestore REST base URL
    #[serde(default = "default_firestore_api_url")]
    pub firestore_api_url: String,

    /// How long a fetched catalog stays in Redis
    #[serde(default = "default_catalog_cache_ttl_secs")]
    pub catalog_cache_ttl_secs: u64,

    /// Redis connection URL
    #[serde(default = "default_redis_url")]
    pub redis_url: String,

    /// PostgreSQL connection URL for garden storage; in-memory when unset
    #[serde(default)]
    pub database_url: Option<String>,

    /// Maximum fuzzy-search distance (0 = exact, 1 = anything)
    #[serde(default = "default_search_threshold")]
    pub search_threshold: f64,

    /// Show the whole catalog when a filter matches nothing and no query is given
    #[serde(default = "default_fallback_to_full_catalog")]
    pub fallback_to_full_catalog: bool,

    #[serde(default = "default_weight_category")]
    pub weight_category: f64,

    #[serde(default = "default_weight_climate")]
    pub weight_climate: f64,

    #[serde(default = "default_weight_light_ideal")]
    pub weight_light_ideal: f64,

    #[serde(default = "default_weight_light_tolerated")]
    pub weight_light_tolerated: f64,

    #[serde(default = "default_weight_aesthetic")]
    pub weight_aesthetic: f64,

    #[serde(default = "default_weight_watering")]
    pub weight_watering: f64,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_catalog_source() -> CatalogSourceKind {
    CatalogSourceKind::File
}

fn default_catalog_file() -> String {
    "data/plants.json".to_string()
}

fn default_catalog_collection() -> String {
    "plants".to_string()
}

fn default_firestore_api_url() -> String {
    "https://firestore.googleapis.com".to_string()
}

fn default_catalog_cache_ttl_secs() -> u64 {
    3600
}

fn default_redis_url() -> String {
    "redis://localhost:6379".to_string()
}

fn default_search_threshold() -> f64 {
    DEFAULT_SEARCH_THRESHOLD
}

fn default_fallback_to_full_catalog() -> bool {
    true
}

fn default_weight_category() -> f64 {
    RecommendationWeights::DEFAULT.category
}

fn default_weight_climate() -> f64 {
    RecommendationWeights::DEFAULT.climate
}

fn default_weight_light_ideal() -> f64 {
    RecommendationWeights::DEFAULT.light_ideal
}

fn default_weight_light_tolerated() -> f64 {
    RecommendationWeights::DEFAULT.light_tolerated
}

fn default_weight_aesthetic() -> f64 {
    RecommendationWeights::DEFAULT.aesthetic
}

fn default_weight_watering() -> f64 {
    RecommendationWeights::DEFAULT.watering
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let config = envy::from_env::<Config>()
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if !(0.0..=1.0).contains(&self.search_threshold) {
            anyhow::bail!(
                "SEARCH_THRESHOLD must be within 0.0..=1.0, got {}",
                self.search_threshold
            );
        }

        if !self.weights().is_valid() {
            anyhow::bail!("Recommendation weights must be finite and non-negative");
        }

        if self.catalog_source == CatalogSourceKind::Firestore
            && self.firestore_project_id.is_none()
        {
            anyhow::bail!("FIRESTORE_PROJECT_ID is required when CATALOG_SOURCE=firestore");
        }

        Ok(())
    }

    /// Weight table assembled from the `WEIGHT_*` variables
    pub fn weights(&self) -> RecommendationWeights {
        RecommendationWeights {
            category: self.weight_category,
            climate: self.weight_climate,
            light_ideal: self.weight_light_ideal,
            light_tolerated: self.weight_light_tolerated,
            aesthetic: self.weight_aesthetic,
            watering: self.weight_watering,
        }
    }

    pub fn discovery_settings(&self) -> DiscoverySettings {
        DiscoverySettings {
            weights: self.weights(),
            search_threshold: self.search_threshold,
            fallback_to_full_catalog_on_empty_result: self.fallback_to_full_catalog,
        }
    }
}
