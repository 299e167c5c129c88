use std::path::Path;

use async_trait::async_trait;
use bonfire_model::{project_document, Document, ItemId, ID_FIELD};
use rusqlite::{params, Connection, OptionalExtension};
use tokio::sync::Mutex;

use super::{mint_item_id, DocumentStore, StoreError};

/// Production backend: one bundled-SQLite connection serializing all
/// access behind a `tokio::sync::Mutex`. Bodies are stored as JSON text;
/// tag filtering and the tag-preserving update go through JSON1 so the
/// store never re-parses documents to enforce its own invariants.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path).map_err(|e| StoreError(e.to_string()))?;
        conn.execute_batch(
            "
            PRAGMA journal_mode=WAL;
            PRAGMA synchronous=NORMAL;
            PRAGMA busy_timeout=5000;
            PRAGMA temp_store=MEMORY;
            CREATE TABLE IF NOT EXISTS documents (
              collection TEXT NOT NULL,
              id TEXT NOT NULL,
              body TEXT NOT NULL,
              PRIMARY KEY (collection, id)
            ) WITHOUT ROWID;
            CREATE INDEX IF NOT EXISTS idx_documents_collection_game
              ON documents (collection, json_extract(body, '$.game'));
            ",
        )
        .map_err(|e| StoreError(e.to_string()))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

fn decode_body(body: &str) -> Result<Document, StoreError> {
    serde_json::from_str(body).map_err(|e| StoreError(format!("stored body is not an object: {e}")))
}

#[async_trait]
impl DocumentStore for SqliteStore {
    fn backend_tag(&self) -> &'static str {
        "sqlite"
    }

    async fn ping(&self) -> Result<(), StoreError> {
        let conn = self.conn.lock().await;
        conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))
            .map_err(|e| StoreError(e.to_string()))?;
        Ok(())
    }

    async fn insert_one(
        &self,
        collection: &str,
        mut document: Document,
    ) -> Result<ItemId, StoreError> {
        let id = mint_item_id()?;
        document.insert(
            ID_FIELD.to_string(),
            serde_json::Value::String(id.as_str().to_string()),
        );
        let body = serde_json::to_string(&document).map_err(|e| StoreError(e.to_string()))?;
        let conn = self.conn.lock().await;
        conn.execute(
            "INSERT INTO documents (collection, id, body) VALUES (?1, ?2, ?3)",
            params![collection, id.as_str(), body],
        )
        .map_err(|e| StoreError(e.to_string()))?;
        Ok(id)
    }

    async fn find(
        &self,
        collection: &str,
        game: Option<&str>,
        projection: Option<&[&str]>,
    ) -> Result<Vec<Document>, StoreError> {
        let conn = self.conn.lock().await;
        let mut bodies: Vec<String> = Vec::new();
        match game {
            Some(tag) => {
                let mut stmt = conn
                    .prepare(
                        "SELECT body FROM documents
                         WHERE collection = ?1 AND json_extract(body, '$.game') = ?2
                         ORDER BY id",
                    )
                    .map_err(|e| StoreError(e.to_string()))?;
                let rows = stmt
                    .query_map(params![collection, tag], |row| row.get::<_, String>(0))
                    .map_err(|e| StoreError(e.to_string()))?;
                for row in rows {
                    bodies.push(row.map_err(|e| StoreError(e.to_string()))?);
                }
            }
            None => {
                let mut stmt = conn
                    .prepare("SELECT body FROM documents WHERE collection = ?1 ORDER BY id")
                    .map_err(|e| StoreError(e.to_string()))?;
                let rows = stmt
                    .query_map(params![collection], |row| row.get::<_, String>(0))
                    .map_err(|e| StoreError(e.to_string()))?;
                for row in rows {
                    bodies.push(row.map_err(|e| StoreError(e.to_string()))?);
                }
            }
        }
        drop(conn);
        let mut found = Vec::with_capacity(bodies.len());
        for body in bodies {
            let document = decode_body(&body)?;
            found.push(match projection {
                Some(fields) => project_document(&document, fields),
                None => document,
            });
        }
        Ok(found)
    }

    async fn find_one(
        &self,
        collection: &str,
        id: &ItemId,
    ) -> Result<Option<Document>, StoreError> {
        let conn = self.conn.lock().await;
        let body: Option<String> = conn
            .query_row(
                "SELECT body FROM documents WHERE collection = ?1 AND id = ?2",
                params![collection, id.as_str()],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| StoreError(e.to_string()))?;
        match body {
            Some(body) => Ok(Some(decode_body(&body)?)),
            None => Ok(None),
        }
    }

    async fn update_one(
        &self,
        collection: &str,
        id: &ItemId,
        fields: Document,
    ) -> Result<(), StoreError> {
        let body = serde_json::to_string(&serde_json::Value::Object(fields))
            .map_err(|e| StoreError(e.to_string()))?;
        let conn = self.conn.lock().await;
        // Single statement: the replacement body takes the stored _id and
        // game, so the one-tag invariant holds even under interleaving.
        // Zero affected rows means the id was absent, which is a no-op.
        conn.execute(
            "UPDATE documents
             SET body = json_set(?3,
                                 '$._id', json_extract(body, '$._id'),
                                 '$.game', json_extract(body, '$.game'))
             WHERE collection = ?1 AND id = ?2",
            params![collection, id.as_str(), body],
        )
        .map_err(|e| StoreError(e.to_string()))?;
        Ok(())
    }

    async fn delete_one(&self, collection: &str, id: &ItemId) -> Result<(), StoreError> {
        let conn = self.conn.lock().await;
        conn.execute(
            "DELETE FROM documents WHERE collection = ?1 AND id = ?2",
            params![collection, id.as_str()],
        )
        .map_err(|e| StoreError(e.to_string()))?;
        Ok(())
    }
}
