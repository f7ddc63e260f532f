//! chat_core - Core types and errors for the branching chat system
//!
//! Conversations are stored as message trees: every turn is a `MessageNode`
//! that points at its parent and lists its children, so an edited question or
//! a regenerated answer becomes a new branch instead of overwriting history.
//!
//! - `conversation` - Conversation metadata (owner, title, root pointer)
//! - `node` - MessageNode and NodeRole
//! - `error` - ChatError taxonomy shared by store, engine and transport

pub mod conversation;
pub mod error;
pub mod node;

// Re-export commonly used types
pub use conversation::Conversation;
pub use error::{ChatError, Result};
pub use node::{MessageNode, NodeRole};
