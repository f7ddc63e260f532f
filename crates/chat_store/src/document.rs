//! ChatDocument - one conversation plus its flat node set
//!
//! All tree invariants are enforced here, at the only place nodes are ever
//! created: a new node is always a fresh leaf under an existing parent in the
//! same conversation, and a parent's `child_ids` only ever grows.

use std::collections::HashMap;

use chat_core::{ChatError, Conversation, MessageNode, NodeRole, Result};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A conversation and every node of its tree, stored flat and keyed by id.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ChatDocument {
    pub conversation: Conversation,
    pub nodes: HashMap<Uuid, MessageNode>,
}

impl ChatDocument {
    /// Create a conversation together with its synthetic root node. The two
    /// are never persisted separately.
    pub fn new(owner: impl Into<String>, title: Option<String>) -> Self {
        let conversation_id = Uuid::new_v4();
        let root = MessageNode::root(conversation_id);

        let mut conversation = Conversation::new(owner, title, root.id);
        conversation.id = conversation_id;

        let mut nodes = HashMap::new();
        nodes.insert(root.id, root);

        Self {
            conversation,
            nodes,
        }
    }

    pub fn id(&self) -> Uuid {
        self.conversation.id
    }

    pub fn node(&self, node_id: Uuid) -> Result<&MessageNode> {
        self.nodes
            .get(&node_id)
            .ok_or_else(|| ChatError::not_found(format!("node {node_id}")))
    }

    pub fn root(&self) -> Result<&MessageNode> {
        self.node(self.conversation.root_node_id)
    }

    /// Append a new leaf under `parent_id`. Inserts the node and pushes its
    /// id onto the parent's child list in one step; the caller persists the
    /// whole document afterwards, so neither half can land alone.
    pub fn append_node(
        &mut self,
        parent_id: Uuid,
        role: NodeRole,
        content: impl Into<String>,
        version: u32,
    ) -> Result<MessageNode> {
        if !self.nodes.contains_key(&parent_id) {
            return Err(ChatError::not_found(format!("parent node {parent_id}")));
        }

        let node = MessageNode::new(self.id(), Some(parent_id), role, content, version);

        // contains_key was checked above
        if let Some(parent) = self.nodes.get_mut(&parent_id) {
            parent.child_ids.push(node.id);
        }
        self.nodes.insert(node.id, node.clone());
        self.conversation.touch();

        Ok(node)
    }

    /// Flag a node as superseded by an edit. Never reset.
    pub fn mark_edited(&mut self, node_id: Uuid) -> Result<()> {
        let node = self
            .nodes
            .get_mut(&node_id)
            .ok_or_else(|| ChatError::not_found(format!("node {node_id}")))?;
        node.edited = true;
        Ok(())
    }

    /// Flag a node as having a regenerated answer. Never reset.
    pub fn mark_regenerated(&mut self, node_id: Uuid) -> Result<()> {
        let node = self
            .nodes
            .get_mut(&node_id)
            .ok_or_else(|| ChatError::not_found(format!("node {node_id}")))?;
        node.regenerated = true;
        Ok(())
    }

    /// Check referential closure: exactly one root, every other node's parent
    /// resolves within this conversation and lists the node exactly once.
    /// Used by tests and by the store after loading a document from disk.
    pub fn validate(&self) -> Result<()> {
        let mut roots = 0;
        for node in self.nodes.values() {
            if node.conversation_id != self.id() {
                return Err(ChatError::Storage(format!(
                    "node {} belongs to conversation {}",
                    node.id, node.conversation_id
                )));
            }
            match node.parent_id {
                None => roots += 1,
                Some(parent_id) => {
                    let parent = self.node(parent_id)?;
                    let links = parent.child_ids.iter().filter(|c| **c == node.id).count();
                    if links != 1 {
                        return Err(ChatError::Storage(format!(
                            "node {} appears {links} times in parent {parent_id}",
                            node.id
                        )));
                    }
                }
            }
        }
        if roots != 1 {
            return Err(ChatError::Storage(format!(
                "conversation {} has {roots} root nodes",
                self.id()
            )));
        }
        Ok(())
    }
}
