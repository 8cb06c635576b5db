use std::sync::Arc;

use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use serde_json::{json, Value};

use plantmatch_api::api::{create_router, AppState};
use plantmatch_api::services::catalog::StaticCatalog;
use plantmatch_api::services::discovery::DiscoverySettings;
use plantmatch_api::services::garden::InMemoryGardenStore;

const CATALOG: &str = r#"[
    {
        "id": 1,
        "latin": "Sansevieria trifasciata",
        "common": ["Snake Plant", "Lidah Mertua"],
        "category": "Indoor",
        "climate": "Tropical",
        "ideallight": "Bright Indirect",
        "toleratedlight": "Low Light",
        "watering": "Light",
        "use": ["decorative", "air-purifying"]
    },
    {
        "id": 2,
        "latin": "Aloe vera",
        "common": ["Lidah Buaya"],
        "category": "Succulent",
        "climate": "Arid",
        "ideallight": "Full Sun",
        "watering": "Light",
        "use": ["medicinal"]
    },
    {
        "id": 3,
        "latin": "Ficus elastica",
        "common": ["Rubber Plant"],
        "category": "Indoor",
        "climate": "Tropical",
        "ideallight": "Bright Indirect",
        "watering": "Moderate",
        "use": ["decorative"]
    }
]"#;

fn user_header() -> HeaderName {
    HeaderName::from_static("x-user-id")
}

fn create_test_server() -> TestServer {
    let catalog = StaticCatalog::from_json_str(CATALOG).unwrap();
    let state = AppState::new(
        Arc::new(catalog),
        Arc::new(InMemoryGardenStore::new()),
        DiscoverySettings::default(),
    );
    TestServer::new(create_router(state)).unwrap()
}

fn ids(plants: &Value) -> Vec<i64> {
    plants
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["plant"]["id"].as_i64().unwrap())
        .collect()
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server();
    let response = server.get("/health").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let server = create_test_server();

    let response = server
        .get("/health")
        .add_header(
            HeaderName::from_static("x-request-id"),
            HeaderValue::from_static("req-42"),
        )
        .await;
    assert_eq!(response.header("x-request-id"), "req-42");

    let generated = server.get("/health").await;
    assert!(!generated.header("x-request-id").is_empty());
}

#[tokio::test]
async fn test_list_plants() {
    let server = create_test_server();
    let response = server.get("/api/v1/plants").await;
    response.assert_status_ok();

    let plants: Vec<Value> = response.json();
    assert_eq!(plants.len(), 3);
    assert_eq!(plants[0]["latin"], "Sansevieria trifasciata");
    assert_eq!(plants[0]["ideallight"], "Bright Indirect");
}

#[tokio::test]
async fn test_recommendations_concrete_scenario() {
    let server = create_test_server();
    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({
            "filter": {
                "category": "indoor",
                "light": "low light",
                "watering": "light"
            }
        }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["fellBack"], false);
    // Sansevieria: category + tolerated light + watering; Ficus: category; Aloe: watering
    assert_eq!(ids(&body["plants"]), vec![1, 3, 2]);
    assert_eq!(body["plants"][0]["rawScore"], 6.0);
    assert_eq!(body["plants"][0]["normalizedScore"], 0.5);
    assert!(body["plants"][0].get("searchDistance").is_none());
}

#[tokio::test]
async fn test_recommendations_empty_filter_is_alphabetical() {
    let server = create_test_server();
    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({}))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(ids(&body["plants"]), vec![2, 3, 1]);
}

#[tokio::test]
async fn test_recommendations_fall_back_when_nothing_matches() {
    let server = create_test_server();
    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({ "filter": { "category": "aquatic" } }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["fellBack"], true);
    assert_eq!(ids(&body["plants"]), vec![1, 2, 3]);
}

#[tokio::test]
async fn test_recommendations_with_query_intersects_filter() {
    let server = create_test_server();
    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({
            "filter": { "climate": "tropical" },
            "query": "indoor"
        }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(ids(&body["plants"]), vec![1, 3]);
    assert!(body["plants"][0]["searchDistance"].is_number());
}

#[tokio::test]
async fn test_recommendations_reject_negative_weights() {
    let server = create_test_server();
    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({
            "filter": { "category": "indoor" },
            "weights": {
                "category": -1, "climate": 3, "lightIdeal": 2,
                "lightTolerated": 1, "aesthetic": 1, "watering": 1
            }
        }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_search() {
    let server = create_test_server();
    let response = server.get("/api/v1/plants/search?q=lidah%20buaya").await;
    response.assert_status_ok();

    let hits: Vec<Value> = response.json();
    assert_eq!(hits[0]["plant"]["id"], 2);
    assert_eq!(hits[0]["distance"], 0.0);
}

#[tokio::test]
async fn test_search_requires_query() {
    let server = create_test_server();
    let response = server.get("/api/v1/plants/search?q=").await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "Search query cannot be empty");
}

#[tokio::test]
async fn test_garden_requires_user() {
    let server = create_test_server();
    let response = server.get("/api/v1/garden").await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_garden_flow() {
    let server = create_test_server();

    let response = server
        .post("/api/v1/garden")
        .add_header(user_header(), HeaderValue::from_static("alice"))
        .json(&json!({ "plantId": 1 }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let entry: Value = response.json();
    let entry_id = entry["id"].as_str().unwrap().to_string();
    assert_eq!(entry["plantId"], 1);

    let response = server
        .get("/api/v1/garden")
        .add_header(user_header(), HeaderValue::from_static("alice"))
        .await;
    response.assert_status_ok();
    let garden: Vec<Value> = response.json();
    assert_eq!(garden.len(), 1);
    assert_eq!(garden[0]["latinName"], "Sansevieria trifasciata");
    assert_eq!(garden[0]["lastCommonName"], "Lidah Mertua");
    assert_eq!(garden[0]["timeAlive"]["unit"], "hours");

    // Gardens are per user.
    let response = server
        .get("/api/v1/garden")
        .add_header(user_header(), HeaderValue::from_static("bob"))
        .await;
    let garden: Vec<Value> = response.json();
    assert!(garden.is_empty());

    let response = server
        .delete(&format!("/api/v1/garden/{}", entry_id))
        .add_header(user_header(), HeaderValue::from_static("bob"))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);

    let response = server
        .delete(&format!("/api/v1/garden/{}", entry_id))
        .add_header(user_header(), HeaderValue::from_static("alice"))
        .await;
    response.assert_status(StatusCode::NO_CONTENT);

    let response = server
        .get("/api/v1/garden")
        .add_header(user_header(), HeaderValue::from_static("alice"))
        .await;
    let garden: Vec<Value> = response.json();
    assert!(garden.is_empty());
}

#[tokio::test]
async fn test_garden_rejects_unknown_plant() {
    let server = create_test_server();
    let response = server
        .post("/api/v1/garden")
        .add_header(user_header(), HeaderValue::from_static("alice"))
        .json(&json!({ "plantId": 99 }))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_export_selection() {
    let server = create_test_server();
    let response = server
        .post("/api/v1/export")
        .json(&json!({ "plantIds": [3, 1] }))
        .await;
    response.assert_status_ok();

    let document: Value = response.json();
    assert_eq!(document["plants"][0]["latinName"], "Ficus elastica");
    assert_eq!(document["plants"][1]["displayName"], "Lidah Mertua");
}

#[tokio::test]
async fn test_export_requires_selection() {
    let server = create_test_server();
    let response = server
        .post("/api/v1/export")
        .json(&json!({ "plantIds": [] }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}
