//! web_service - HTTP transport for the branching chat backend
//!
//! Thin glue: every route verifies the bearer token, translates DTOs, and
//! hands off to the turn engine or the store. The interesting behavior lives
//! in `turn_engine` and `chat_store`.

pub mod auth;
pub mod controllers;
pub mod dto;
pub mod error;
pub mod server;

pub use auth::{Claims, JwtVerifier};
pub use error::{AppError, Result};
pub use server::{app_config, run, AppState};
