//! MessageNode - one turn in a conversation tree

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Who produced a node. `Root` exists only on the synthetic head of each
/// conversation tree.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NodeRole {
    Root,
    User,
    Assistant,
}

impl std::fmt::Display for NodeRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeRole::Root => write!(f, "root"),
            NodeRole::User => write!(f, "user"),
            NodeRole::Assistant => write!(f, "assistant"),
        }
    }
}

/// A single turn in a conversation.
///
/// Nodes are only ever appended as new leaves; `child_ids` grows in creation
/// order and existing entries are never removed or reordered, which is what
/// keeps the structure a forest without any cycle checks.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct MessageNode {
    pub id: Uuid,

    /// Owning conversation; immutable after creation.
    pub conversation_id: Uuid,

    /// Parent node in the same conversation. `None` only for the root.
    pub parent_id: Option<Uuid>,

    pub role: NodeRole,

    pub content: String,

    /// Starts at 1; incremented only on the replacement created by an edit or
    /// regeneration of this node. Local to its branch, never global.
    pub version: u32,

    /// Set once when this node is superseded by an edit; never reset.
    pub edited: bool,

    /// Set once when this node's answer is regenerated; never reset.
    pub regenerated: bool,

    /// Children in insertion order.
    pub child_ids: Vec<Uuid>,

    pub created_at: DateTime<Utc>,
}

impl MessageNode {
    /// Create a new leaf node. Linking into the parent's `child_ids` is the
    /// store's job, not the node's.
    pub fn new(
        conversation_id: Uuid,
        parent_id: Option<Uuid>,
        role: NodeRole,
        content: impl Into<String>,
        version: u32,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            conversation_id,
            parent_id,
            role,
            content: content.into(),
            version: version.max(1),
            edited: false,
            regenerated: false,
            child_ids: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// The synthetic placeholder at the head of a conversation tree.
    pub fn root(conversation_id: Uuid) -> Self {
        Self::new(conversation_id, None, NodeRole::Root, "", 1)
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    pub fn is_leaf(&self) -> bool {
        self.child_ids.is_empty()
    }
}
