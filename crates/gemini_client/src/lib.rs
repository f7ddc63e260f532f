//! gemini_client - Text-generation gateway
//!
//! The rest of the system only sees the `GenerationGateway` trait: hand it a
//! prompt, get a completion back or an upstream error. `GeminiClient` is the
//! real implementation over the generateContent REST API; `CannedGateway`
//! answers with a fixed string for tests and offline use.

pub mod client;
pub mod config;
pub mod error;
pub mod gateway;
pub mod protocol;

// Re-exports
pub use client::GeminiClient;
pub use config::GeminiConfig;
pub use error::GatewayError;
pub use gateway::{CannedGateway, GenerationGateway};
