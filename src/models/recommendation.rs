use serde::{Deserialize, Serialize};

use super::Plant;

/// Preferences a user picks in the filter panel
///
/// Every field is optional free text. `location` and `placement` are accepted
/// from older clients but do not take part in scoring.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub light: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placement: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub climate: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aesthetic: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub watering: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Relative importance of each matching factor
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationWeights {
    pub category: f64,
    pub climate: f64,
    pub light_ideal: f64,
    pub light_tolerated: f64,
    pub aesthetic: f64,
    pub watering: f64,
}

impl RecommendationWeights {
    /// Category is the most specific factor, climate next.
    pub const DEFAULT: Self = Self {
        category: 4.0,
        climate: 3.0,
        light_ideal: 2.0,
        light_tolerated: 1.0,
        aesthetic: 1.0,
        watering: 1.0,
    };

    /// Sum of every factor; the normalization denominator
    pub fn sum(&self) -> f64 {
        self.category
            + self.climate
            + self.light_ideal
            + self.light_tolerated
            + self.aesthetic
            + self.watering
    }

    /// Every factor is finite and non-negative, so `sum` is too
    pub fn is_valid(&self) -> bool {
        [
            self.category,
            self.climate,
            self.light_ideal,
            self.light_tolerated,
            self.aesthetic,
            self.watering,
        ]
        .iter()
        .all(|w| w.is_finite() && *w >= 0.0)
    }
}

impl Default for RecommendationWeights {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// A plant together with its match score
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScoredResult<'a> {
    pub plant: &'a Plant,
    pub raw_score: f64,
    pub normalized_score: f64,
}
