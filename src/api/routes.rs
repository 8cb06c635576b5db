use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::handlers;
use super::AppState;
use crate::middleware::{make_span_with_request_id, request_id_middleware};

/// Creates the application router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", api_routes())
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// API routes under /api/v1
fn api_routes() -> Router<AppState> {
    Router::new()
        // Catalog
        .route("/plants", get(handlers::list_plants))
        .route("/plants/search", get(handlers::search_plants))
        // Recommendations
        .route("/recommendations", post(handlers::recommend))
        // Garden
        .route(
            "/garden",
            get(handlers::get_garden).post(handlers::add_to_garden),
        )
        .route("/garden/:entry_id", delete(handlers::remove_from_garden))
        // Export
        .route("/export", post(handlers::export_selection))
}
