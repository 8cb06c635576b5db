use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{error::AppResult, models::GardenEntry, services::garden::GardenStore};

/// Garden storage kept in process memory
#[derive(Clone, Default)]
pub struct InMemoryGardenStore {
    entries: Arc<RwLock<HashMap<Uuid, GardenEntry>>>,
}

impl InMemoryGardenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl GardenStore for InMemoryGardenStore {
    async fn add(&self, entry: GardenEntry) -> AppResult<GardenEntry> {
        let mut entries = self.entries.write().await;
        entries.insert(entry.id, entry.clone());
        Ok(entry)
    }

    async fn list(&self, user_id: &str) -> AppResult<Vec<GardenEntry>> {
        let entries = self.entries.read().await;
        let mut garden: Vec<GardenEntry> = entries
            .values()
            .filter(|e| e.user_id == user_id)
            .cloned()
            .collect();
        garden.sort_by(|a, b| a.started_at.cmp(&b.started_at).then(a.id.cmp(&b.id)));
        Ok(garden)
    }

    async fn remove(&self, user_id: &str, entry_id: Uuid) -> AppResult<bool> {
        let mut entries = self.entries.write().await;
        let owned = entries
            .get(&entry_id)
            .is_some_and(|e| e.user_id == user_id);
        if owned {
            entries.remove(&entry_id);
        }
        Ok(owned)
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
