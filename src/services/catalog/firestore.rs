/// Firestore catalog source
///
/// Lists every document of the catalog collection through the Firestore REST API
/// and decodes the typed field values into [`Plant`] records.
///
/// API Flow:
/// 1. GET /v1/projects/{project}/databases/(default)/documents/{collection}?pageSize=..
/// 2. Repeat with `pageToken` while the response carries `nextPageToken`
///
/// The decoded catalog is cached in Redis for `cache_ttl` seconds.
use std::collections::HashMap;

use reqwest::Client as HttpClient;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::{
    cached,
    db::{Cache, CacheKey},
    error::{AppError, AppResult},
    models::Plant,
    services::catalog::CatalogSource,
};

const PAGE_SIZE: u32 = 300;

#[derive(Clone)]
pub struct FirestoreCatalog {
    http_client: HttpClient,
    api_url: String,
    project_id: String,
    api_key: Option<String>,
    collection: String,
    cache: Cache,
    cache_ttl: u64,
}

impl FirestoreCatalog {
    pub fn new(
        cache: Cache,
        api_url: String,
        project_id: String,
        api_key: Option<String>,
        collection: String,
        cache_ttl: u64,
    ) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_url,
            project_id,
            api_key,
            collection,
            cache,
            cache_ttl,
        }
    }

    fn collection_url(&self) -> String {
        format!(
            "{}/v1/projects/{}/databases/(default)/documents/{}",
            self.api_url.trim_end_matches('/'),
            self.project_id,
            self.collection
        )
    }

    /// Fetches one page of documents
    async fn fetch_page(&self, page_token: Option<&str>) -> AppResult<ListDocumentsResponse> {
        let mut query: Vec<(&str, String)> = vec![("pageSize", PAGE_SIZE.to_string())];
        if let Some(token) = page_token {
            query.push(("pageToken", token.to_string()));
        }
        if let Some(key) = &self.api_key {
            query.push(("key", key.clone()));
        }

        let response = self
            .http_client
            .get(self.collection_url())
            .query(&query)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                collection = %self.collection,
                status = %status,
                body = %body,
                "Firestore request failed"
            );
            return Err(AppError::ExternalApi(format!(
                "Firestore returned status {}: {}",
                status, body
            )));
        }

        Ok(response.json().await?)
    }

    /// Walks every page of the collection
    async fn fetch_all_pages(&self) -> AppResult<Vec<Plant>> {
        let mut plants = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let page = self.fetch_page(page_token.as_deref()).await?;
            plants.extend(decode_documents(page.documents));

            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        tracing::info!(
            collection = %self.collection,
            plant_count = plants.len(),
            "Fetched catalog from Firestore"
        );

        Ok(plants)
    }
}

#[async_trait::async_trait]
impl CatalogSource for FirestoreCatalog {
    async fn fetch_plants(&self) -> AppResult<Vec<Plant>> {
        cached!(
            self.cache,
            CacheKey::Catalog(self.collection.clone()),
            self.cache_ttl,
            async move { self.fetch_all_pages().await }
        )
    }

    fn name(&self) -> &'static str {
        "firestore"
    }
}

// ============================================================================
// Firestore REST Types
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListDocumentsResponse {
    #[serde(default)]
    documents: Vec<FirestoreDocument>,
    #[serde(default)]
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FirestoreDocument {
    name: String,
    #[serde(default)]
    fields: HashMap<String, FirestoreValue>,
}

/// A typed Firestore value, e.g. `{"stringValue": "Aloe vera"}`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
enum FirestoreValue {
    NullValue(Value),
    BooleanValue(bool),
    /// int64 values are sent as JSON strings
    IntegerValue(Value),
    DoubleValue(f64),
    TimestampValue(String),
    StringValue(String),
    BytesValue(String),
    ReferenceValue(String),
    GeoPointValue(Value),
    ArrayValue(ArrayValue),
    MapValue(MapValue),
}

#[derive(Debug, Deserialize)]
struct ArrayValue {
    #[serde(default)]
    values: Vec<FirestoreValue>,
}

#[derive(Debug, Deserialize)]
struct MapValue {
    #[serde(default)]
    fields: HashMap<String, FirestoreValue>,
}

impl FirestoreValue {
    fn into_json(self) -> Value {
        match self {
            FirestoreValue::NullValue(_) => Value::Null,
            FirestoreValue::BooleanValue(b) => Value::Bool(b),
            FirestoreValue::IntegerValue(v) => match v {
                Value::String(s) => s.parse::<i64>().map(Value::from).unwrap_or(Value::Null),
                Value::Number(n) => Value::Number(n),
                _ => Value::Null,
            },
            FirestoreValue::DoubleValue(d) => Value::from(d),
            FirestoreValue::TimestampValue(s)
            | FirestoreValue::StringValue(s)
            | FirestoreValue::BytesValue(s)
            | FirestoreValue::ReferenceValue(s) => Value::String(s),
            FirestoreValue::GeoPointValue(v) => v,
            FirestoreValue::ArrayValue(array) => Value::Array(
                array
                    .values
                    .into_iter()
                    .map(FirestoreValue::into_json)
                    .collect(),
            ),
            FirestoreValue::MapValue(map) => fields_into_json(map.fields),
        }
    }
}

fn fields_into_json(fields: HashMap<String, FirestoreValue>) -> Value {
    Value::Object(
        fields
            .into_iter()
            .map(|(k, v)| (k, v.into_json()))
            .collect::<Map<String, Value>>(),
    )
}

/// Plant ids are sometimes stored as strings or doubles
fn normalize_id(fields: &mut Value) {
    let Some(id) = fields.get_mut("id") else {
        return;
    };

    let normalized = match &*id {
        Value::String(s) => s.trim().parse::<i64>().ok(),
        Value::Number(n) if n.is_f64() => n
            .as_f64()
            .filter(|f| f.fract() == 0.0)
            .map(|f| f as i64),
        _ => None,
    };

    if let Some(n) = normalized {
        *id = Value::from(n);
    }
}

fn decode_document(document: FirestoreDocument) -> Option<Plant> {
    let mut fields = fields_into_json(document.fields);
    normalize_id(&mut fields);

    match serde_json::from_value::<Plant>(fields) {
        Ok(plant) => Some(plant),
        Err(e) => {
            tracing::warn!(
                document = %document.name,
                error = %e,
                "Skipping catalog document that does not decode as a plant"
            );
            None
        }
    }
}

fn decode_documents(documents: Vec<FirestoreDocument>) -> Vec<Plant> {
    documents.into_iter().filter_map(decode_document).collect()
}
