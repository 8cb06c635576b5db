use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::{Plant, RecommendationWeights, UserFilter};
use crate::services::plant_search::{PlantSearcher, DEFAULT_SEARCH_THRESHOLD};
use crate::services::recommendations::{recommend, NormalizedFilter};

/// Tunables for turning scores and search hits into the displayed list
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiscoverySettings {
    pub weights: RecommendationWeights,
    pub search_threshold: f64,
    /// When a filter matches nothing and there is no query, show the whole
    /// catalog instead of an empty list
    pub fallback_to_full_catalog_on_empty_result: bool,
}

impl Default for DiscoverySettings {
    fn default() -> Self {
        Self {
            weights: RecommendationWeights::DEFAULT,
            search_threshold: DEFAULT_SEARCH_THRESHOLD,
            fallback_to_full_catalog_on_empty_result: true,
        }
    }
}

/// What the user asked for: structured preferences and/or a free-text query
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveryRequest {
    #[serde(default)]
    pub filter: UserFilter,
    #[serde(default)]
    pub query: Option<String>,
    /// Overrides the configured weight table for this request
    #[serde(default)]
    pub weights: Option<RecommendationWeights>,
}

/// A plant in the displayed list
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ShownPlant<'a> {
    pub plant: &'a Plant,
    pub raw_score: f64,
    pub normalized_score: f64,
    /// Fuzzy distance, present only when a query was applied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_distance: Option<f64>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Discovery<'a> {
    pub plants: Vec<ShownPlant<'a>>,
    /// True when an empty filtered result was replaced by the full catalog
    pub fell_back: bool,
}

/// Builds the list shown for a request
///
/// Without a query the weighted ranking is used, restricted to plants scoring above
/// zero when a filter is active. With a query the fuzzy hits are used in relevance
/// order, restricted to plants scoring above zero when a filter is active.
pub fn discover<'a>(
    catalog: &'a [Plant],
    request: &DiscoveryRequest,
    settings: &DiscoverySettings,
) -> Discovery<'a> {
    let weights = request.weights.unwrap_or(settings.weights);
    let filter_active = NormalizedFilter::new(&request.filter).is_active();
    let scored = recommend(catalog, &request.filter, &weights);

    let query = request
        .query
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty());

    let Some(query) = query else {
        let plants: Vec<ShownPlant<'a>> = scored
            .into_iter()
            .filter(|s| !filter_active || s.raw_score > 0.0)
            .map(|s| ShownPlant {
                plant: s.plant,
                raw_score: s.raw_score,
                normalized_score: s.normalized_score,
                search_distance: None,
            })
            .collect();

        if plants.is_empty() && settings.fallback_to_full_catalog_on_empty_result {
            tracing::info!(
                plant_count = catalog.len(),
                "Filter matched nothing, falling back to full catalog"
            );
            return Discovery {
                plants: catalog
                    .iter()
                    .map(|plant| ShownPlant {
                        plant,
                        raw_score: 0.0,
                        normalized_score: 0.0,
                        search_distance: None,
                    })
                    .collect(),
                fell_back: !catalog.is_empty(),
            };
        }

        return Discovery {
            plants,
            fell_back: false,
        };
    };

    let scores: HashMap<i64, (f64, f64)> = scored
        .iter()
        .map(|s| (s.plant.id, (s.raw_score, s.normalized_score)))
        .collect();

    let plants: Vec<ShownPlant<'a>> = PlantSearcher::new(settings.search_threshold)
        .search(catalog, query)
        .into_iter()
        .filter_map(|hit| {
            let (raw_score, normalized_score) =
                scores.get(&hit.plant.id).copied().unwrap_or((0.0, 0.0));
            if filter_active && raw_score <= 0.0 {
                return None;
            }
            Some(ShownPlant {
                plant: hit.plant,
                raw_score,
                normalized_score,
                search_distance: Some(hit.distance),
            })
        })
        .collect();

    Discovery {
        plants,
        fell_back: false,
    }
}
