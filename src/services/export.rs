use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
    error::{AppError, AppResult},
    models::Plant,
};

const EXPORT_TITLE: &str = "Plant selection";

/// One plant in an exported selection
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExportRow {
    pub id: i64,
    pub display_name: String,
    pub latin_name: String,
    pub family: Option<String>,
    pub category: Option<String>,
    pub climate: Option<String>,
    pub ideal_light: Option<String>,
    pub tolerated_light: Option<String>,
    pub watering: Option<String>,
    pub uses: Vec<String>,
}

impl From<&Plant> for ExportRow {
    fn from(plant: &Plant) -> Self {
        Self {
            id: plant.id,
            display_name: plant.display_name().to_string(),
            latin_name: plant.latin_name.clone(),
            family: plant.family.clone(),
            category: plant.category.clone(),
            climate: plant.climate.clone(),
            ideal_light: plant.ideal_light.clone(),
            tolerated_light: plant.tolerated_light.clone(),
            watering: plant.watering.clone(),
            uses: plant.uses.clone(),
        }
    }
}

/// Document model handed to the client for rendering
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub title: String,
    pub generated_at: DateTime<Utc>,
    pub plants: Vec<ExportRow>,
}

/// Builds the export for the selected plants, in selection order
///
/// Repeated ids are exported once. Every id must exist in the catalog.
pub fn build_export(
    catalog: &[Plant],
    plant_ids: &[i64],
    generated_at: DateTime<Utc>,
) -> AppResult<ExportDocument> {
    if plant_ids.is_empty() {
        return Err(AppError::InvalidInput(
            "Select at least one plant to export".to_string(),
        ));
    }

    let by_id: HashMap<i64, &Plant> = catalog.iter().map(|p| (p.id, p)).collect();
    let mut seen = HashSet::new();
    let mut plants = Vec::with_capacity(plant_ids.len());

    for id in plant_ids {
        if !seen.insert(*id) {
            continue;
        }
        let plant = by_id
            .get(id)
            .ok_or_else(|| AppError::NotFound(format!("Plant {} not found", id)))?;
        plants.push(ExportRow::from(*plant));
    }

    Ok(ExportDocument {
        title: EXPORT_TITLE.to_string(),
        generated_at,
        plants,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<Plant> {
        vec![
            Plant {
                common: vec!["Snake Plant".to_string(), "Lidah Mertua".to_string()],
                watering: Some("Light".to_string()),
                ..Plant::new(1, "Sansevieria trifasciata")
            },
            Plant::new(2, "Aloe vera"),
        ]
    }

    #[test]
    fn test_export_keeps_selection_order() {
        let now = Utc::now();
        let document = build_export(&catalog(), &[2, 1], now).unwrap();

        assert_eq!(document.generated_at, now);
        let ids: Vec<i64> = document.plants.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![2, 1]);
        assert_eq!(document.plants[1].display_name, "Lidah Mertua");
        assert_eq!(document.plants[1].watering.as_deref(), Some("Light"));
    }

    #[test]
    fn test_export_drops_duplicates() {
        let document = build_export(&catalog(), &[1, 1, 2, 1], Utc::now()).unwrap();
        assert_eq!(document.plants.len(), 2);
    }

    #[test]
    fn test_export_requires_selection() {
        let result = build_export(&catalog(), &[], Utc::now());
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn test_export_unknown_plant() {
        let result = build_export(&catalog(), &[1, 3], Utc::now());
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
