//! Gateway error type

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Error generating response from Gemini API: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Gemini API returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Gemini response does not contain valid data")]
    EmptyResponse,

    #[error("Gateway configuration error: {0}")]
    Config(String),
}
