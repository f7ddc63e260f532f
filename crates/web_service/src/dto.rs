//! DTO layer between HTTP and the engine

use chat_core::Conversation;
use serde::{Deserialize, Serialize};
use turn_engine::{EditOutcome, RegenerateOutcome, TurnOutcome};
use uuid::Uuid;

/// Request: create a conversation
#[derive(Debug, Deserialize)]
pub struct CreateChatRequest {
    #[serde(default)]
    pub title: Option<String>,
}

/// Request: append a turn to a conversation
#[derive(Debug, Deserialize)]
pub struct AppendTurnRequest {
    pub question: String,
}

/// Request: edit a user message
#[derive(Debug, Deserialize)]
pub struct EditRequest {
    pub new_content: String,
}

/// Request: continue a branch from an assistant message
#[derive(Debug, Deserialize)]
pub struct RespondRequest {
    pub new_question: String,
}

/// Response: conversation metadata
#[derive(Debug, Serialize)]
pub struct ConversationDTO {
    pub id: Uuid,
    pub owner: String,
    pub title: String,
    pub root_node_id: Uuid,
    pub last_message_time: String,
    pub created_at: String,
}

impl From<Conversation> for ConversationDTO {
    fn from(conversation: Conversation) -> Self {
        Self {
            id: conversation.id,
            owner: conversation.owner,
            title: conversation.title,
            root_node_id: conversation.root_node_id,
            last_message_time: conversation.last_message_time.to_rfc3339(),
            created_at: conversation.created_at.to_rfc3339(),
        }
    }
}

/// Response: a created node pair (append turn / respond continuation)
#[derive(Debug, Serialize)]
pub struct TurnResponse {
    pub user_node_id: Uuid,
    pub assistant_node_id: Uuid,
    pub answer: String,
}

impl From<TurnOutcome> for TurnResponse {
    fn from(outcome: TurnOutcome) -> Self {
        Self {
            user_node_id: outcome.user_node.id,
            assistant_node_id: outcome.assistant_node.id,
            answer: outcome.assistant_node.content,
        }
    }
}

/// Response: an edit branch
#[derive(Debug, Serialize)]
pub struct EditResponse {
    pub original_id: Uuid,
    pub edited_node_id: Uuid,
    pub version: u32,
    pub assistant_node_id: Uuid,
    pub answer: String,
}

impl From<EditOutcome> for EditResponse {
    fn from(outcome: EditOutcome) -> Self {
        Self {
            original_id: outcome.original_id,
            edited_node_id: outcome.edited_node.id,
            version: outcome.edited_node.version,
            assistant_node_id: outcome.assistant_node.id,
            answer: outcome.assistant_node.content,
        }
    }
}

/// Response: a regenerated answer
#[derive(Debug, Serialize)]
pub struct RegenerateResponse {
    pub original_id: Uuid,
    pub new_node_id: Uuid,
    pub version: u32,
    pub answer: String,
}

impl From<RegenerateOutcome> for RegenerateResponse {
    fn from(outcome: RegenerateOutcome) -> Self {
        Self {
            original_id: outcome.original_id,
            new_node_id: outcome.assistant_node.id,
            version: outcome.assistant_node.version,
            answer: outcome.assistant_node.content,
        }
    }
}
