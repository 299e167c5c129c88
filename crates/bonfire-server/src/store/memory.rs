// SPDX-License-Identifier: Apache-2.0

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use bonfire_model::{project_document, Document, ItemId, GAME_FIELD, ID_FIELD};
use serde_json::Value;
use tokio::sync::Mutex;

use super::{mint_item_id, DocumentStore, StoreError};

/// In-process backend over plain maps. Serves as the test double and as an
/// ephemeral dev backend; nothing survives the process.
#[derive(Default)]
pub struct MemoryStore {
    collections: Mutex<HashMap<String, BTreeMap<String, Document>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    fn backend_tag(&self) -> &'static str {
        "memory"
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn insert_one(
        &self,
        collection: &str,
        mut document: Document,
    ) -> Result<ItemId, StoreError> {
        let id = mint_item_id()?;
        document.insert(ID_FIELD.to_string(), Value::String(id.as_str().to_string()));
        let mut collections = self.collections.lock().await;
        collections
            .entry(collection.to_string())
            .or_default()
            .insert(id.as_str().to_string(), document);
        Ok(id)
    }

    async fn find(
        &self,
        collection: &str,
        game: Option<&str>,
        projection: Option<&[&str]>,
    ) -> Result<Vec<Document>, StoreError> {
        let collections = self.collections.lock().await;
        let Some(documents) = collections.get(collection) else {
            return Ok(Vec::new());
        };
        let mut found = Vec::new();
        for document in documents.values() {
            if let Some(tag) = game {
                if document.get(GAME_FIELD).and_then(Value::as_str) != Some(tag) {
                    continue;
                }
            }
            found.push(match projection {
                Some(fields) => project_document(document, fields),
                None => document.clone(),
            });
        }
        Ok(found)
    }

    async fn find_one(
        &self,
        collection: &str,
        id: &ItemId,
    ) -> Result<Option<Document>, StoreError> {
        let collections = self.collections.lock().await;
        Ok(collections
            .get(collection)
            .and_then(|documents| documents.get(id.as_str()))
            .cloned())
    }

    async fn update_one(
        &self,
        collection: &str,
        id: &ItemId,
        fields: Document,
    ) -> Result<(), StoreError> {
        let mut collections = self.collections.lock().await;
        let Some(documents) = collections.get_mut(collection) else {
            return Ok(());
        };
        let Some(stored) = documents.get_mut(id.as_str()) else {
            return Ok(());
        };
        let mut next = fields;
        for key in [ID_FIELD, GAME_FIELD] {
            if let Some(value) = stored.get(key) {
                next.insert(key.to_string(), value.clone());
            }
        }
        *stored = next;
        Ok(())
    }

    async fn delete_one(&self, collection: &str, id: &ItemId) -> Result<(), StoreError> {
        let mut collections = self.collections.lock().await;
        if let Some(documents) = collections.get_mut(collection) {
            documents.remove(id.as_str());
        }
        Ok(())
    }
}
