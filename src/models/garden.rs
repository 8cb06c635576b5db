use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use uuid::Uuid;

use super::Plant;

const UNKNOWN_LATIN_NAME: &str = "Unknown latin name";
const UNKNOWN_PLANT_NAME: &str = "Unknown plant";

/// A plant a user marked as planted
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct GardenEntry {
    pub id: Uuid,
    pub user_id: String,
    pub plant_id: i64,
    pub started_at: DateTime<Utc>,
}

impl GardenEntry {
    /// Creates an entry planted now
    pub fn new(user_id: String, plant_id: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            plant_id,
            started_at: Utc::now(),
        }
    }
}

/// How long a plant has been in the garden
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "unit", content = "value", rename_all = "snake_case")]
pub enum TimeAlive {
    JustPlanted,
    Hours(i64),
    Days(i64),
}

impl TimeAlive {
    /// Whole hours below one day, whole days from then on
    pub fn between(started_at: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let elapsed = now - started_at;
        if elapsed < chrono::Duration::zero() {
            return TimeAlive::JustPlanted;
        }

        let hours = elapsed.num_hours();
        if hours < 24 {
            TimeAlive::Hours(hours)
        } else {
            TimeAlive::Days(hours / 24)
        }
    }
}

impl Display for TimeAlive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimeAlive::JustPlanted => write!(f, "just planted"),
            TimeAlive::Hours(h) => write!(f, "{} hours", h),
            TimeAlive::Days(d) => write!(f, "{} days", d),
        }
    }
}

/// A garden entry joined with its catalog record
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GardenPlant {
    pub id: Uuid,
    pub plant_id: i64,
    pub started_at: DateTime<Utc>,
    pub latin_name: String,
    pub last_common_name: String,
    pub time_alive: TimeAlive,
}

impl GardenPlant {
    /// Joins an entry with the plant it refers to, if the catalog still has it
    pub fn join(entry: &GardenEntry, plant: Option<&Plant>, now: DateTime<Utc>) -> Self {
        let latin_name = plant
            .map(|p| p.latin_name.clone())
            .unwrap_or_else(|| UNKNOWN_LATIN_NAME.to_string());

        let last_common_name = plant
            .and_then(Plant::last_common_name)
            .unwrap_or(UNKNOWN_PLANT_NAME)
            .to_string();

        Self {
            id: entry.id,
            plant_id: entry.plant_id,
            started_at: entry.started_at,
            latin_name,
            last_common_name,
            time_alive: TimeAlive::between(entry.started_at, now),
        }
    }
}
