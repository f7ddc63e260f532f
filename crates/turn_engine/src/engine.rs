//! TurnEngine - the four tree-mutating operations
//!
//! Ordering inside each operation matters: later steps reference ids created
//! by earlier ones. A generation failure after the user node has been written
//! leaves that node in place as a resumable dangling leaf; nothing is rolled
//! back.

use std::sync::Arc;

use chat_core::{ChatError, MessageNode, NodeRole, Result};
use chat_store::{DocumentStorage, TreeStore};
use gemini_client::GenerationGateway;
use tracing::{info, warn};
use uuid::Uuid;

use crate::reconstruct::{self, MessageTree};

/// Result of append_turn and respond_continuation.
#[derive(Clone, Debug)]
pub struct TurnOutcome {
    pub user_node: MessageNode,
    pub assistant_node: MessageNode,
}

/// Result of edit_branch.
#[derive(Clone, Debug)]
pub struct EditOutcome {
    pub original_id: Uuid,
    pub edited_node: MessageNode,
    pub assistant_node: MessageNode,
}

/// Result of regenerate_branch.
#[derive(Clone, Debug)]
pub struct RegenerateOutcome {
    pub original_id: Uuid,
    pub assistant_node: MessageNode,
}

pub struct TurnEngine<S: DocumentStorage> {
    store: Arc<TreeStore<S>>,
    gateway: Arc<dyn GenerationGateway>,
}

impl<S: DocumentStorage> TurnEngine<S> {
    pub fn new(store: Arc<TreeStore<S>>, gateway: Arc<dyn GenerationGateway>) -> Self {
        Self { store, gateway }
    }

    pub fn store(&self) -> &Arc<TreeStore<S>> {
        &self.store
    }

    /// New question in an existing conversation: user node under the root,
    /// assistant node under the user node.
    pub async fn append_turn(&self, conversation_id: Uuid, question: &str) -> Result<TurnOutcome> {
        let question = non_empty(question, "question")?;
        let conversation = self.store.get_conversation(conversation_id).await?;

        let user_node = self
            .store
            .append_node(conversation.root_node_id, NodeRole::User, question, 1)
            .await?;

        let answer = self.generate(question, user_node.id).await?;
        let assistant_node = self
            .store
            .append_node(user_node.id, NodeRole::Assistant, &answer, 1)
            .await?;

        info!(
            "appended turn in conversation {conversation_id}: user {} -> assistant {}",
            user_node.id, assistant_node.id
        );
        Ok(TurnOutcome {
            user_node,
            assistant_node,
        })
    }

    /// Edit an existing user node: the edited question becomes a new child of
    /// the original with a bumped version, so the original branch survives as
    /// an alternate continuation.
    pub async fn edit_branch(&self, node_id: Uuid, new_content: &str) -> Result<EditOutcome> {
        let new_content = non_empty(new_content, "new_content")?;
        let original = self.store.get_node(node_id).await?;
        expect_role(&original, NodeRole::User)?;

        let edited_node = self
            .store
            .append_node(
                original.id,
                NodeRole::User,
                new_content,
                original.version + 1,
            )
            .await?;
        self.store.mark_edited(original.id).await?;

        let answer = self.generate(new_content, edited_node.id).await?;
        let assistant_node = self
            .store
            .append_node(edited_node.id, NodeRole::Assistant, &answer, 1)
            .await?;

        info!(
            "edited node {node_id}: new branch {} (v{}) -> assistant {}",
            edited_node.id, edited_node.version, assistant_node.id
        );
        Ok(EditOutcome {
            original_id: original.id,
            edited_node,
            assistant_node,
        })
    }

    /// Regenerate an assistant answer. The replacement is appended as a child
    /// of the original answer, one level deeper, not as a sibling.
    pub async fn regenerate_branch(&self, node_id: Uuid) -> Result<RegenerateOutcome> {
        let original = self.store.get_node(node_id).await?;
        expect_role(&original, NodeRole::Assistant)?;

        // Gateway first: a failed regeneration writes nothing.
        let answer = self
            .gateway
            .regenerate(&original.content)
            .await
            .map_err(|e| ChatError::Upstream(e.to_string()))?;

        let assistant_node = self
            .store
            .append_node(
                original.id,
                NodeRole::Assistant,
                &answer,
                original.version + 1,
            )
            .await?;
        self.store.mark_regenerated(original.id).await?;

        info!(
            "regenerated node {node_id}: replacement {} (v{})",
            assistant_node.id, assistant_node.version
        );
        Ok(RegenerateOutcome {
            original_id: original.id,
            assistant_node,
        })
    }

    /// Continue any branch: user node under an existing assistant node,
    /// assistant node under the new user node. Same shape as append_turn but
    /// anchored at an arbitrary point in the tree.
    pub async fn respond_continuation(
        &self,
        node_id: Uuid,
        new_question: &str,
    ) -> Result<TurnOutcome> {
        let new_question = non_empty(new_question, "new_question")?;
        let previous = self.store.get_node(node_id).await?;
        expect_role(&previous, NodeRole::Assistant)?;

        let user_node = self
            .store
            .append_node(previous.id, NodeRole::User, new_question, 1)
            .await?;

        let answer = self.generate(new_question, user_node.id).await?;
        let assistant_node = self
            .store
            .append_node(user_node.id, NodeRole::Assistant, &answer, 1)
            .await?;

        info!(
            "continued branch at {node_id}: user {} -> assistant {}",
            user_node.id, assistant_node.id
        );
        Ok(TurnOutcome {
            user_node,
            assistant_node,
        })
    }

    /// Rebuild a conversation's tree for client consumption.
    pub async fn reconstruct(&self, conversation_id: Uuid) -> Result<Vec<MessageTree>> {
        let nodes = self.store.get_conversation_nodes(conversation_id).await?;
        reconstruct::build_trees(nodes, conversation_id)
    }

    async fn generate(&self, prompt: &str, pending_user_node: Uuid) -> Result<String> {
        self.gateway.generate(prompt).await.map_err(|e| {
            // The user node stays behind as a dangling leaf the client can
            // retry against; see the failure policy above.
            warn!("generation failed after user node {pending_user_node} was written: {e}");
            ChatError::Upstream(e.to_string())
        })
    }
}

fn non_empty<'a>(value: &'a str, field: &str) -> Result<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ChatError::validation(format!("{field} must not be empty")));
    }
    Ok(value)
}

fn expect_role(node: &MessageNode, expected: NodeRole) -> Result<()> {
    if node.role != expected {
        return Err(ChatError::InvalidRole {
            expected,
            found: node.role,
        });
    }
    Ok(())
}
