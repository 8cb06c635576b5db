use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    middleware::{CurrentUser, RequestId},
    models::{GardenEntry, GardenPlant, Plant},
    services::{
        discovery::{self, DiscoveryRequest},
        export::{self, ExportDocument},
        garden,
        plant_search::PlantSearcher,
    },
};

use super::AppState;

// Request types

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlantRequest {
    pub plant_id: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRequest {
    pub plant_ids: Vec<i64>,
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Full plant catalog
pub async fn list_plants(State(state): State<AppState>) -> AppResult<Json<Vec<Plant>>> {
    let plants = state.catalog.fetch_plants().await?;
    Ok(Json(plants))
}

/// Fuzzy search over the catalog
pub async fn search_plants(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> AppResult<Response> {
    if params.q.trim().is_empty() {
        return Err(AppError::InvalidInput(
            "Search query cannot be empty".to_string(),
        ));
    }

    let plants = state.catalog.fetch_plants().await?;
    let hits = PlantSearcher::new(state.settings.search_threshold).search(&plants, &params.q);

    Ok(Json(hits).into_response())
}

/// Scores, searches and ranks the catalog for the user's preferences
pub async fn recommend(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<DiscoveryRequest>,
) -> AppResult<Response> {
    if let Some(weights) = &request.weights {
        if !weights.is_valid() {
            return Err(AppError::InvalidInput(
                "Recommendation weights must be finite and non-negative".to_string(),
            ));
        }
    }

    tracing::info!(
        request_id = %request_id,
        has_query = request.query.as_deref().is_some_and(|q| !q.trim().is_empty()),
        custom_weights = request.weights.is_some(),
        "Processing recommendation request"
    );

    let plants = state.catalog.fetch_plants().await?;
    let result = discovery::discover(&plants, &request, &state.settings);

    tracing::info!(
        request_id = %request_id,
        shown = result.plants.len(),
        fell_back = result.fell_back,
        "Recommendation completed"
    );

    Ok(Json(result).into_response())
}

/// The current user's garden
pub async fn get_garden(
    State(state): State<AppState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<GardenPlant>>> {
    let garden = garden::list_garden(
        state.catalog.as_ref(),
        state.garden.as_ref(),
        user.id(),
        Utc::now(),
    )
    .await?;
    Ok(Json(garden))
}

/// Marks a plant as planted
pub async fn add_to_garden(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(request): Json<PlantRequest>,
) -> AppResult<(StatusCode, Json<GardenEntry>)> {
    let entry = garden::plant(
        state.catalog.as_ref(),
        state.garden.as_ref(),
        user.id(),
        request.plant_id,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

/// Removes an entry from the garden
pub async fn remove_from_garden(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(entry_id): Path<Uuid>,
) -> AppResult<StatusCode> {
    garden::uproot(state.garden.as_ref(), user.id(), entry_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Document model for the selected plants
pub async fn export_selection(
    State(state): State<AppState>,
    Json(request): Json<ExportRequest>,
) -> AppResult<Json<ExportDocument>> {
    let plants = state.catalog.fetch_plants().await?;
    let document = export::build_export(&plants, &request.plant_ids, Utc::now())?;
    Ok(Json(document))
}
