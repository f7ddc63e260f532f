//! chat_store - Persistence for conversations and their message trees
//!
//! A conversation and its nodes are kept together in one `ChatDocument`, so
//! every mutation (insert a node, push its id onto the parent's child list)
//! commits as a single document write. The store - not any in-memory object
//! graph - is the source of truth for the tree.

pub mod document;
pub mod storage;
pub mod store;

// Re-exports
pub use document::ChatDocument;
pub use storage::{DocumentStorage, FileDocumentStorage, MemoryDocumentStorage};
pub use store::TreeStore;
