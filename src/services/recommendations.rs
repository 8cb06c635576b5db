use std::cmp::Ordering;

use crate::models::{Plant, RecommendationWeights, ScoredResult, UserFilter};

/// Filter values after trimming and case folding; blank values become `None`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedFilter {
    pub light: Option<String>,
    pub climate: Option<String>,
    pub aesthetic: Option<String>,
    pub watering: Option<String>,
    pub category: Option<String>,
}

impl NormalizedFilter {
    pub fn new(filter: &UserFilter) -> Self {
        Self {
            light: clean_input(filter.light.as_deref()),
            climate: clean_input(filter.climate.as_deref()),
            aesthetic: clean_input(filter.aesthetic.as_deref()),
            watering: clean_input(filter.watering.as_deref()),
            category: clean_input(filter.category.as_deref()),
        }
    }

    /// True when at least one scoring field is present
    pub fn is_active(&self) -> bool {
        self.light.is_some()
            || self.climate.is_some()
            || self.aesthetic.is_some()
            || self.watering.is_some()
            || self.category.is_some()
    }

    /// Raw score of one plant: the sum of the weights of every matching factor
    pub fn score(&self, plant: &Plant, weights: &RecommendationWeights) -> f64 {
        let mut score = 0.0;

        if let Some(category) = &self.category {
            if field_contains(plant.category.as_deref(), category) {
                score += weights.category;
            }
        }

        if let Some(climate) = &self.climate {
            if field_contains(plant.climate.as_deref(), climate) {
                score += weights.climate;
            }
        }

        // Ideal light wins; tolerated light is only a fallback.
        if let Some(light) = &self.light {
            if field_contains(plant.ideal_light.as_deref(), light) {
                score += weights.light_ideal;
            } else if field_contains(plant.tolerated_light.as_deref(), light) {
                score += weights.light_tolerated;
            }
        }

        if let Some(aesthetic) = &self.aesthetic {
            if plant.uses.iter().any(|u| u.to_lowercase().contains(aesthetic.as_str())) {
                score += weights.aesthetic;
            }
        }

        if let Some(watering) = &self.watering {
            if field_contains(plant.watering.as_deref(), watering) {
                score += weights.watering;
            }
        }

        score
    }
}

fn clean_input(input: Option<&str>) -> Option<String> {
    input
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase)
}

fn field_contains(field: Option<&str>, needle: &str) -> bool {
    field.unwrap_or_default().to_lowercase().contains(needle)
}

/// Scores every plant in the catalog against the filter and ranks them
///
/// Results are ordered by raw score (highest first), then by latin name. No plant
/// is dropped: plants matching nothing keep a score of zero and sort last. The
/// normalized score divides by the sum of all weights, or is zero when that sum
/// is not positive.
pub fn recommend<'a>(
    catalog: &'a [Plant],
    filter: &UserFilter,
    weights: &RecommendationWeights,
) -> Vec<ScoredResult<'a>> {
    let max_score = weights.sum();
    let cleaned = NormalizedFilter::new(filter);

    let mut results: Vec<ScoredResult<'a>> = catalog
        .iter()
        .map(|plant| {
            let raw_score = cleaned.score(plant, weights);
            let normalized_score = if max_score > 0.0 {
                raw_score / max_score
            } else {
                0.0
            };
            ScoredResult {
                plant,
                raw_score,
                normalized_score,
            }
        })
        .collect();

    results.sort_by(|a, b| {
        b.raw_score
            .partial_cmp(&a.raw_score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.plant.latin_name.cmp(&b.plant.latin_name))
    });

    tracing::debug!(
        plant_count = results.len(),
        active_filter = cleaned.is_active(),
        "Scored catalog"
    );

    results
}

/// Same as [`recommend`] with the default weight table
pub fn recommend_with_defaults<'a>(
    catalog: &'a [Plant],
    filter: &UserFilter,
) -> Vec<ScoredResult<'a>> {
    recommend(catalog, filter, &RecommendationWeights::DEFAULT)
}
