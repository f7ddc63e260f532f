//! Tree reconstruction - flat node set to nested trees
//!
//! The store hands back nodes unordered, so children are attached in a
//! deterministic order (created_at ascending, node id as tie-break) to make
//! reconstruction idempotent.

use std::collections::HashMap;

use chat_core::{ChatError, MessageNode, NodeRole, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// A node view with its children nested, ready for client consumption.
#[derive(Serialize, Clone, Debug)]
pub struct MessageTree {
    pub id: Uuid,
    pub parent_id: Option<Uuid>,
    pub role: NodeRole,
    pub content: String,
    pub version: u32,
    pub edited: bool,
    pub regenerated: bool,
    pub created_at: DateTime<Utc>,
    pub children: Vec<MessageTree>,
}

impl MessageTree {
    fn leaf(node: &MessageNode) -> Self {
        Self {
            id: node.id,
            parent_id: node.parent_id,
            role: node.role,
            content: node.content.clone(),
            version: node.version,
            edited: node.edited,
            regenerated: node.regenerated,
            created_at: node.created_at,
            children: Vec::new(),
        }
    }

    /// Depth-first lookup, mostly useful in tests.
    pub fn find(&self, id: Uuid) -> Option<&MessageTree> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }
}

/// Build the forest for one conversation. Nodes whose parent is absent from
/// the set become roots of the result; in a well-formed tree that is exactly
/// the conversation's synthetic root.
pub fn build_trees(mut nodes: Vec<MessageNode>, conversation_id: Uuid) -> Result<Vec<MessageTree>> {
    if nodes.is_empty() {
        return Err(ChatError::not_found(format!(
            "conversation {conversation_id} has no nodes"
        )));
    }

    nodes.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));

    let present: HashMap<Uuid, &MessageNode> = nodes.iter().map(|n| (n.id, n)).collect();

    let mut children_of: HashMap<Uuid, Vec<&MessageNode>> = HashMap::new();
    let mut roots: Vec<&MessageNode> = Vec::new();
    for node in &nodes {
        match node.parent_id.filter(|p| present.contains_key(p)) {
            Some(parent_id) => children_of.entry(parent_id).or_default().push(node),
            None => roots.push(node),
        }
    }

    Ok(roots
        .into_iter()
        .map(|root| attach(root, &children_of))
        .collect())
}

fn attach(node: &MessageNode, children_of: &HashMap<Uuid, Vec<&MessageNode>>) -> MessageTree {
    let mut view = MessageTree::leaf(node);
    if let Some(children) = children_of.get(&node.id) {
        view.children = children
            .iter()
            .map(|child| attach(child, children_of))
            .collect();
    }
    view
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(
        conversation_id: Uuid,
        parent_id: Option<Uuid>,
        role: NodeRole,
        content: &str,
    ) -> MessageNode {
        MessageNode::new(conversation_id, parent_id, role, content, 1)
    }

    #[test]
    fn test_empty_set_is_not_found() {
        let err = build_trees(Vec::new(), Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, ChatError::NotFound(_)));
    }

    #[test]
    fn test_root_only_conversation() {
        let conv = Uuid::new_v4();
        let root = MessageNode::root(conv);
        let trees = build_trees(vec![root.clone()], conv).unwrap();

        assert_eq!(trees.len(), 1);
        assert_eq!(trees[0].id, root.id);
        assert!(trees[0].children.is_empty());
    }

    #[test]
    fn test_children_ordered_by_creation() {
        let conv = Uuid::new_v4();
        let mut root = MessageNode::root(conv);
        let a = node(conv, Some(root.id), NodeRole::User, "first");
        let b = node(conv, Some(root.id), NodeRole::User, "second");
        root.child_ids = vec![a.id, b.id];

        // Feed the nodes out of order; reconstruction must not care
        let trees = build_trees(vec![b.clone(), root.clone(), a.clone()], conv).unwrap();
        assert_eq!(trees.len(), 1);
        let children: Vec<Uuid> = trees[0].children.iter().map(|c| c.id).collect();

        let mut expected = vec![(a.created_at, a.id), (b.created_at, b.id)];
        expected.sort();
        let expected: Vec<Uuid> = expected.into_iter().map(|(_, id)| id).collect();
        assert_eq!(children, expected);
    }

    #[test]
    fn test_idempotent() {
        let conv = Uuid::new_v4();
        let mut root = MessageNode::root(conv);
        let u = node(conv, Some(root.id), NodeRole::User, "q");
        let mut u_linked = u.clone();
        let a = node(conv, Some(u.id), NodeRole::Assistant, "a");
        root.child_ids = vec![u.id];
        u_linked.child_ids = vec![a.id];

        let nodes = vec![root, u_linked, a];
        let first = build_trees(nodes.clone(), conv).unwrap();
        let second = build_trees(nodes, conv).unwrap();

        assert_eq!(
            serde_json::to_value(&first).unwrap(),
            serde_json::to_value(&second).unwrap()
        );
    }
}
