//! Fuzzy free-text search over the plant catalog.
//!
//! Each plant is indexed by its latin name, common names, category, climate and
//! use tags. A query is compared to every indexed value and the best (lowest)
//! distance wins; plants within the threshold are returned closest first.

use serde::Serialize;
use strsim::normalized_levenshtein;

use crate::models::Plant;

/// Distances above this are not considered a match
pub const DEFAULT_SEARCH_THRESHOLD: f64 = 0.3;

/// Largest distance given to a substring hit, reached when the query sits at the
/// very end of the value.
const SUBSTRING_PENALTY: f64 = 0.1;

/// A plant matched by a free-text query
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit<'a> {
    pub plant: &'a Plant,
    /// 0.0 is an exact match, 1.0 no similarity at all
    pub distance: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct PlantSearcher {
    threshold: f64,
}

impl Default for PlantSearcher {
    fn default() -> Self {
        Self::new(DEFAULT_SEARCH_THRESHOLD)
    }
}

impl PlantSearcher {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold: threshold.clamp(0.0, 1.0),
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Returns the plants matching `query`, closest first
    ///
    /// Ties keep catalog order. A blank query matches nothing.
    pub fn search<'a>(&self, catalog: &'a [Plant], query: &str) -> Vec<SearchHit<'a>> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }

        let mut hits: Vec<SearchHit<'a>> = catalog
            .iter()
            .filter_map(|plant| {
                let distance = plant_distance(plant, &query);
                (distance <= self.threshold).then_some(SearchHit { plant, distance })
            })
            .collect();

        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));

        tracing::debug!(
            query = %query,
            hit_count = hits.len(),
            "Fuzzy search completed"
        );

        hits
    }
}

fn indexed_values(plant: &Plant) -> impl Iterator<Item = &str> {
    std::iter::once(plant.latin_name.as_str())
        .chain(plant.common.iter().map(String::as_str))
        .chain(plant.category.as_deref())
        .chain(plant.climate.as_deref())
        .chain(plant.uses.iter().map(String::as_str))
}

fn plant_distance(plant: &Plant, query: &str) -> f64 {
    indexed_values(plant)
        .map(|value| field_distance(query, &value.to_lowercase()))
        .fold(1.0, f64::min)
}

/// Distance between a lower-cased query and a lower-cased field value
pub fn field_distance(query: &str, value: &str) -> f64 {
    if value.is_empty() {
        return 1.0;
    }
    if value == query {
        return 0.0;
    }

    if let Some(position) = value.find(query) {
        let offset = position as f64 / value.len() as f64;
        // Never zero, so an exact match still ranks first.
        return (SUBSTRING_PENALTY * offset).max(f64::EPSILON);
    }

    let query_len = query.chars().count();
    let best = value
        .split(|c: char| c.is_whitespace() || c == '-' || c == ',')
        .filter(|word| !word.is_empty())
        .map(|word| word_similarity(query, query_len, word))
        .fold(normalized_levenshtein(query, value), f64::max);

    1.0 - best
}

/// Similarity to a whole word, or to its leading characters while the word is
/// still being typed.
fn word_similarity(query: &str, query_len: usize, word: &str) -> f64 {
    let whole = normalized_levenshtein(query, word);
    if word.chars().count() <= query_len {
        return whole;
    }

    let prefix: String = word.chars().take(query_len).collect();
    whole.max(normalized_levenshtein(query, &prefix))
}
