//! Document storage trait and implementations

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use chat_core::{ChatError, Result};
use tokio::fs;
use uuid::Uuid;

use crate::document::ChatDocument;

/// Storage for whole conversation documents, one record per conversation.
#[async_trait]
pub trait DocumentStorage: Send + Sync + 'static {
    /// Load a conversation document.
    async fn load(&self, conversation_id: Uuid) -> Result<ChatDocument>;

    /// Persist a conversation document as a single atomic record write.
    async fn save(&self, document: &ChatDocument) -> Result<()>;

    /// Check whether a conversation exists.
    async fn exists(&self, conversation_id: Uuid) -> bool;

    /// List ids of all stored conversations.
    async fn list(&self) -> Result<Vec<Uuid>>;
}

/// File-based document storage: one pretty-printed JSON file per conversation.
#[derive(Clone)]
pub struct FileDocumentStorage {
    base_path: PathBuf,
}

impl FileDocumentStorage {
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    fn document_path(&self, conversation_id: Uuid) -> PathBuf {
        self.base_path.join(format!("{}.json", conversation_id))
    }
}

#[async_trait]
impl DocumentStorage for FileDocumentStorage {
    async fn load(&self, conversation_id: Uuid) -> Result<ChatDocument> {
        let path = self.document_path(conversation_id);

        if !path.exists() {
            return Err(ChatError::not_found(format!(
                "conversation {conversation_id}"
            )));
        }

        let contents = fs::read_to_string(&path).await?;
        let document: ChatDocument = serde_json::from_str(&contents)?;

        Ok(document)
    }

    async fn save(&self, document: &ChatDocument) -> Result<()> {
        fs::create_dir_all(&self.base_path).await?;

        let path = self.document_path(document.id());
        let contents = serde_json::to_string_pretty(document)?;

        // Write to a sibling temp file and rename so a crash mid-write never
        // leaves a torn document where a valid one used to be.
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, contents).await?;
        fs::rename(&tmp, &path).await?;

        Ok(())
    }

    async fn exists(&self, conversation_id: Uuid) -> bool {
        self.document_path(conversation_id).exists()
    }

    async fn list(&self) -> Result<Vec<Uuid>> {
        if !self.base_path.exists() {
            return Ok(Vec::new());
        }

        let mut ids = Vec::new();
        let mut entries = fs::read_dir(&self.base_path).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                if let Ok(id) = stem.parse::<Uuid>() {
                    ids.push(id);
                }
            }
        }
        Ok(ids)
    }
}

/// In-memory document storage for tests.
#[derive(Default)]
pub struct MemoryDocumentStorage {
    documents: Mutex<HashMap<Uuid, ChatDocument>>,
}

impl MemoryDocumentStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStorage for MemoryDocumentStorage {
    async fn load(&self, conversation_id: Uuid) -> Result<ChatDocument> {
        self.documents
            .lock()
            .map_err(|e| ChatError::Storage(e.to_string()))?
            .get(&conversation_id)
            .cloned()
            .ok_or_else(|| ChatError::not_found(format!("conversation {conversation_id}")))
    }

    async fn save(&self, document: &ChatDocument) -> Result<()> {
        self.documents
            .lock()
            .map_err(|e| ChatError::Storage(e.to_string()))?
            .insert(document.id(), document.clone());
        Ok(())
    }

    async fn exists(&self, conversation_id: Uuid) -> bool {
        self.documents
            .lock()
            .map(|docs| docs.contains_key(&conversation_id))
            .unwrap_or(false)
    }

    async fn list(&self) -> Result<Vec<Uuid>> {
        Ok(self
            .documents
            .lock()
            .map_err(|e| ChatError::Storage(e.to_string()))?
            .keys()
            .copied()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_file_storage_save_and_load() {
        let dir = tempdir().unwrap();
        let storage = FileDocumentStorage::new(dir.path());

        let document = ChatDocument::new("alice", Some("Trip planning".to_string()));
        storage.save(&document).await.unwrap();

        let loaded = storage.load(document.id()).await.unwrap();
        assert_eq!(loaded.id(), document.id());
        assert_eq!(loaded.conversation.title, "Trip planning");
        assert_eq!(loaded.nodes.len(), 1);
    }

    #[tokio::test]
    async fn test_file_storage_not_found() {
        let dir = tempdir().unwrap();
        let storage = FileDocumentStorage::new(dir.path());

        let result = storage.load(Uuid::new_v4()).await;
        assert!(matches!(result, Err(ChatError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_file_storage_list() {
        let dir = tempdir().unwrap();
        let storage = FileDocumentStorage::new(dir.path());

        assert!(storage.list().await.unwrap().is_empty());

        let a = ChatDocument::new("alice", None);
        let b = ChatDocument::new("bob", None);
        storage.save(&a).await.unwrap();
        storage.save(&b).await.unwrap();

        let mut ids = storage.list().await.unwrap();
        ids.sort();
        let mut expected = vec![a.id(), b.id()];
        expected.sort();
        assert_eq!(ids, expected);
    }

    #[tokio::test]
    async fn test_memory_storage_round_trip() {
        let storage = MemoryDocumentStorage::new();
        let document = ChatDocument::new("alice", None);

        assert!(!storage.exists(document.id()).await);
        storage.save(&document).await.unwrap();
        assert!(storage.exists(document.id()).await);

        let loaded = storage.load(document.id()).await.unwrap();
        assert_eq!(loaded.id(), document.id());
    }
}
