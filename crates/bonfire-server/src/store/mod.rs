// SPDX-License-Identifier: Apache-2.0

//! Document-store abstraction and its backends. Handlers only ever see
//! [`DocumentStore`]; which backend sits behind it is decided once, at
//! startup, from a store URI.

use std::error::Error;
use std::fmt;
use std::path::PathBuf;

use async_trait::async_trait;
use bonfire_model::{Document, ItemId};
use uuid::Uuid;

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreError(pub String);

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Error for StoreError {}

/// Async facade over one document database. Object safe; the server holds
/// it as `Arc<dyn DocumentStore>` so tests can swap in doubles.
#[async_trait]
pub trait DocumentStore: Send + Sync + 'static {
    fn backend_tag(&self) -> &'static str;

    /// Connectivity check used at startup and by `/readyz`.
    async fn ping(&self) -> Result<(), StoreError>;

    /// Inserts a document, assigning its identity. The stored body carries
    /// the assigned `_id`; the caller is expected to have injected `game`
    /// already.
    async fn insert_one(&self, collection: &str, document: Document)
        -> Result<ItemId, StoreError>;

    /// Lists documents, optionally filtered to one `game` tag and reduced
    /// to a top-level field projection. Result order is deterministic per
    /// backend but not part of the contract.
    async fn find(
        &self,
        collection: &str,
        game: Option<&str>,
        projection: Option<&[&str]>,
    ) -> Result<Vec<Document>, StoreError>;

    async fn find_one(&self, collection: &str, id: &ItemId)
        -> Result<Option<Document>, StoreError>;

    /// Replaces a document's client fields while preserving the stored
    /// `_id` and `game` values. An absent id is a silent no-op.
    async fn update_one(
        &self,
        collection: &str,
        id: &ItemId,
        fields: Document,
    ) -> Result<(), StoreError>;

    /// Idempotent delete.
    async fn delete_one(&self, collection: &str, id: &ItemId) -> Result<(), StoreError>;
}

/// Store selector parsed from `BONFIRE_STORE_URI`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreUri {
    Memory,
    Sqlite(PathBuf),
}

impl StoreUri {
    pub fn parse(raw: &str) -> Result<Self, StoreError> {
        let uri = raw.trim();
        if uri.is_empty() {
            return Err(StoreError("store uri must not be empty".to_string()));
        }
        if uri == "memory:" || uri == "memory" {
            return Ok(Self::Memory);
        }
        if let Some(path) = uri.strip_prefix("sqlite:") {
            if path.is_empty() {
                return Err(StoreError(
                    "sqlite store uri is missing a database path".to_string(),
                ));
            }
            return Ok(Self::Sqlite(PathBuf::from(path)));
        }
        Err(StoreError(format!(
            "unsupported store uri scheme in {uri}; use memory: or sqlite:/path/to.db"
        )))
    }
}

/// Mints a fresh 32-hex item identity. Both backends assign ids the same
/// way so documents can move between them untouched.
pub(crate) fn mint_item_id() -> Result<ItemId, StoreError> {
    let raw = Uuid::new_v4().simple().to_string();
    ItemId::parse(&raw).map_err(|e| StoreError(e.to_string()))
}
