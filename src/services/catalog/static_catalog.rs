use std::path::Path;

use serde_json::Value;

use crate::{
    error::{AppError, AppResult},
    models::Plant,
    services::catalog::CatalogSource,
};

/// Catalog held in memory, optionally loaded from a JSON file
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    plants: Vec<Plant>,
}

impl StaticCatalog {
    pub fn new(plants: Vec<Plant>) -> Self {
        Self { plants }
    }

    /// Loads a JSON array of plant documents
    pub async fn from_json_file(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let contents = tokio::fs::read_to_string(path).await.map_err(|e| {
            AppError::Internal(format!("Failed to read catalog {}: {}", path.display(), e))
        })?;

        let catalog = Self::from_json_str(&contents)?;

        tracing::info!(
            path = %path.display(),
            plant_count = catalog.plants.len(),
            "Loaded catalog from file"
        );

        Ok(catalog)
    }

    /// Parses a JSON array of plant documents
    ///
    /// Records without a usable `id` or `latin` are skipped with a warning; the
    /// catalog only fails to load when the document is not a JSON array.
    pub fn from_json_str(json: &str) -> AppResult<Self> {
        let records: Vec<Value> = serde_json::from_str(json)
            .map_err(|e| AppError::InvalidInput(format!("Invalid catalog JSON: {}", e)))?;

        let plants = records
            .into_iter()
            .enumerate()
            .filter_map(|(index, record)| match serde_json::from_value::<Plant>(record) {
                Ok(plant) => Some(plant),
                Err(e) => {
                    tracing::warn!(
                        index,
                        error = %e,
                        "Skipping catalog record that does not decode as a plant"
                    );
                    None
                }
            })
            .collect();

        Ok(Self::new(plants))
    }
}

#[async_trait::async_trait]
impl CatalogSource for StaticCatalog {
    async fn fetch_plants(&self) -> AppResult<Vec<Plant>> {
        Ok(self.plants.clone())
    }

    fn name(&self) -> &'static str {
        "static"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG_JSON: &str = r#"[
        {"id": 1, "latin": "Sansevieria trifasciata", "category": "Indoor"},
        {"id": 2, "latin": "Aloe vera", "use": ["medicinal"]}
    ]"#;

    #[test]
    fn test_from_json_str() {
        let catalog = StaticCatalog::from_json_str(CATALOG_JSON).unwrap();
        let plants = tokio_test::block_on(catalog.fetch_plants()).unwrap();
        assert_eq!(plants.len(), 2);
        assert_eq!(plants[1].uses, vec!["medicinal"]);
    }

    #[test]
    fn test_from_json_str_skips_records_without_latin() {
        let catalog =
            StaticCatalog::from_json_str(r#"[{"id": 1}, {"id": 2, "latin": "Aloe vera"}]"#).unwrap();
        let plants = tokio_test::block_on(catalog.fetch_plants()).unwrap();
        assert_eq!(plants.len(), 1);
        assert_eq!(plants[0].id, 2);
    }

    #[test]
    fn test_from_json_str_keeps_plants_with_malformed_optional_fields() {
        let catalog = StaticCatalog::from_json_str(
            r#"[
                {"id": 1, "latin": "Aloe vera", "use": "medicinal", "watering": 2},
                {"id": 2, "latin": "Ficus elastica", "tempmax": {"celsius": 30}}
            ]"#,
        )
        .unwrap();
        let plants = tokio_test::block_on(catalog.fetch_plants()).unwrap();

        assert_eq!(plants.len(), 2);
        assert!(plants[0].uses.is_empty());
        assert_eq!(plants[0].watering.as_deref(), Some("2"));
        assert!(plants[1].temp_max.is_none());
    }

    #[test]
    fn test_from_json_str_rejects_non_array() {
        let result = StaticCatalog::from_json_str(r#"{"id": 1, "latin": "Aloe vera"}"#);
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_from_json_file() {
        let path = std::env::temp_dir().join(format!("plants-{}.json", uuid::Uuid::new_v4()));
        tokio::fs::write(&path, CATALOG_JSON).await.unwrap();

        let catalog = StaticCatalog::from_json_file(&path).await.unwrap();
        assert_eq!(catalog.fetch_plants().await.unwrap().len(), 2);

        tokio::fs::remove_file(&path).await.unwrap();
    }

    #[tokio::test]
    async fn test_from_missing_file() {
        let result = StaticCatalog::from_json_file("/nonexistent/plants.json").await;
        assert!(matches!(result, Err(AppError::Internal(_))));
    }
}
