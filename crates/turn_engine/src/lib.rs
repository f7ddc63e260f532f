//! turn_engine - Mutation operations over conversation trees
//!
//! The four operations (append turn, edit branch, regenerate branch, respond
//! continuation) each perform a short sequence of dependent writes against
//! the tree store, with at most one generation call in the middle. The
//! reconstructor turns a conversation's flat node set back into a tree.

pub mod engine;
pub mod reconstruct;

// Re-exports
pub use engine::{EditOutcome, RegenerateOutcome, TurnEngine, TurnOutcome};
pub use reconstruct::{build_trees, MessageTree};
