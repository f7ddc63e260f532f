//! TreeStore - the persistence facade the turn engine works against

use std::sync::Arc;

use chat_core::{ChatError, Conversation, MessageNode, NodeRole, Result};
use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::document::ChatDocument;
use crate::storage::DocumentStorage;

/// Keyed access to conversations and their message trees.
///
/// Every mutation loads the conversation document, applies the change and
/// saves it back under that conversation's lock, so concurrent appends to the
/// same parent serialize on the read-modify-write instead of clobbering each
/// other. The node index maps node ids to their conversation so operations
/// addressed by node id alone (edit, regenerate, respond) can find their
/// document.
pub struct TreeStore<S: DocumentStorage> {
    storage: Arc<S>,
    locks: DashMap<Uuid, Arc<Mutex<()>>>,
    node_index: DashMap<Uuid, Uuid>,
}

impl<S: DocumentStorage> TreeStore<S> {
    /// Open the store, rebuilding the node index from existing documents.
    pub async fn open(storage: S) -> Result<Self> {
        let store = Self {
            storage: Arc::new(storage),
            locks: DashMap::new(),
            node_index: DashMap::new(),
        };

        for conversation_id in store.storage.list().await? {
            match store.storage.load(conversation_id).await {
                Ok(document) => {
                    if let Err(e) = document.validate() {
                        warn!("conversation {conversation_id} failed validation: {e}");
                        continue;
                    }
                    store.index_document(&document);
                }
                Err(e) => warn!("skipping unreadable conversation {conversation_id}: {e}"),
            }
        }

        debug!("tree store opened, {} nodes indexed", store.node_index.len());
        Ok(store)
    }

    fn index_document(&self, document: &ChatDocument) {
        for node_id in document.nodes.keys() {
            self.node_index.insert(*node_id, document.id());
        }
    }

    fn lock_for(&self, conversation_id: Uuid) -> Arc<Mutex<()>> {
        self.locks
            .entry(conversation_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Resolve the conversation a node belongs to.
    fn locate(&self, node_id: Uuid) -> Result<Uuid> {
        self.node_index
            .get(&node_id)
            .map(|entry| *entry)
            .ok_or_else(|| ChatError::not_found(format!("node {node_id}")))
    }

    /// Create a conversation together with its root node. The single document
    /// write is what makes the pair atomic: both persist or neither does.
    pub async fn create_conversation(
        &self,
        owner: &str,
        title: Option<String>,
    ) -> Result<Conversation> {
        if owner.trim().is_empty() {
            return Err(ChatError::validation("owner must not be empty"));
        }

        let document = ChatDocument::new(owner, title);
        self.storage.save(&document).await?;
        self.index_document(&document);

        debug!(
            "created conversation {} (root node {})",
            document.id(),
            document.conversation.root_node_id
        );
        Ok(document.conversation)
    }

    pub async fn get_conversation(&self, conversation_id: Uuid) -> Result<Conversation> {
        Ok(self.storage.load(conversation_id).await?.conversation)
    }

    /// List a user's conversations, most recently active first.
    pub async fn list_conversations(&self, owner: &str) -> Result<Vec<Conversation>> {
        let mut conversations = Vec::new();
        for conversation_id in self.storage.list().await? {
            let document = self.storage.load(conversation_id).await?;
            if document.conversation.owner == owner {
                conversations.push(document.conversation);
            }
        }
        conversations.sort_by(|a, b| b.last_message_time.cmp(&a.last_message_time));
        Ok(conversations)
    }

    pub async fn rename_conversation(&self, conversation_id: Uuid, title: &str) -> Result<()> {
        if title.trim().is_empty() {
            return Err(ChatError::validation("title must not be empty"));
        }

        let lock = self.lock_for(conversation_id);
        let _guard = lock.lock().await;

        let mut document = self.storage.load(conversation_id).await?;
        document.conversation.title = title.to_string();
        self.storage.save(&document).await
    }

    /// Fetch a node by id alone.
    pub async fn get_node(&self, node_id: Uuid) -> Result<MessageNode> {
        let conversation_id = self.locate(node_id)?;
        let document = self.storage.load(conversation_id).await?;
        document.node(node_id).cloned()
    }

    /// The conversation's full node set, unordered.
    pub async fn get_conversation_nodes(&self, conversation_id: Uuid) -> Result<Vec<MessageNode>> {
        let document = self.storage.load(conversation_id).await?;
        Ok(document.nodes.into_values().collect())
    }

    /// Append a new leaf under `parent_id`. The node insert and the parent's
    /// `child_ids` push land in the same document write.
    pub async fn append_node(
        &self,
        parent_id: Uuid,
        role: NodeRole,
        content: &str,
        version: u32,
    ) -> Result<MessageNode> {
        let conversation_id = self.locate(parent_id)?;
        let lock = self.lock_for(conversation_id);
        let _guard = lock.lock().await;

        let mut document = self.storage.load(conversation_id).await?;
        let node = document.append_node(parent_id, role, content, version)?;
        self.storage.save(&document).await?;
        self.node_index.insert(node.id, conversation_id);

        debug!(
            "appended {} node {} under {} in conversation {}",
            node.role, node.id, parent_id, conversation_id
        );
        Ok(node)
    }

    pub async fn mark_edited(&self, node_id: Uuid) -> Result<()> {
        self.with_document_of(node_id, |document| document.mark_edited(node_id))
            .await
    }

    pub async fn mark_regenerated(&self, node_id: Uuid) -> Result<()> {
        self.with_document_of(node_id, |document| document.mark_regenerated(node_id))
            .await
    }

    async fn with_document_of<F>(&self, node_id: Uuid, apply: F) -> Result<()>
    where
        F: FnOnce(&mut ChatDocument) -> Result<()>,
    {
        let conversation_id = self.locate(node_id)?;
        let lock = self.lock_for(conversation_id);
        let _guard = lock.lock().await;

        let mut document = self.storage.load(conversation_id).await?;
        apply(&mut document)?;
        self.storage.save(&document).await
    }
}
