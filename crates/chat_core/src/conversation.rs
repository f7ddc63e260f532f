//! Conversation - a named, owned chat rooted at one message tree

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const DEFAULT_TITLE: &str = "New Chat";

/// Conversation metadata. The message tree itself lives in the store as a
/// flat keyed node set; this record only pins down the root.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Conversation {
    pub id: Uuid,

    /// Owning user; immutable after creation.
    pub owner: String,

    /// Display title, mutable.
    pub title: String,

    /// The synthetic root node of this conversation's tree. Set when the
    /// conversation is created, together with the root node itself.
    pub root_node_id: Uuid,

    /// Advisory timestamp bumped on every mutation.
    pub last_message_time: DateTime<Utc>,

    pub created_at: DateTime<Utc>,
}

impl Conversation {
    pub fn new(owner: impl Into<String>, title: Option<String>, root_node_id: Uuid) -> Self {
        let now = Utc::now();
        let title = title
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_TITLE.to_string());
        Self {
            id: Uuid::new_v4(),
            owner: owner.into(),
            title,
            root_node_id,
            last_message_time: now,
            created_at: now,
        }
    }

    /// Bump the advisory last-message timestamp.
    pub fn touch(&mut self) {
        self.last_message_time = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_title() {
        let conv = Conversation::new("alice", None, Uuid::new_v4());
        assert_eq!(conv.title, DEFAULT_TITLE);

        let conv = Conversation::new("alice", Some("  ".to_string()), Uuid::new_v4());
        assert_eq!(conv.title, DEFAULT_TITLE);

        let conv = Conversation::new("alice", Some("Trip planning".to_string()), Uuid::new_v4());
        assert_eq!(conv.title, "Trip planning");
    }
}
