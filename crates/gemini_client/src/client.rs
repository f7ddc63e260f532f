//! GeminiClient - reqwest implementation of the gateway

use async_trait::async_trait;
use tracing::{debug, error};

use crate::config::GeminiConfig;
use crate::error::GatewayError;
use crate::gateway::GenerationGateway;
use crate::protocol::{GeminiRequest, GeminiResponse};

pub struct GeminiClient {
    config: GeminiConfig,
    client: reqwest::Client,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    pub fn from_env() -> Result<Self, GatewayError> {
        Ok(Self::new(GeminiConfig::from_env()?))
    }
}

#[async_trait]
impl GenerationGateway for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, GatewayError> {
        let request = GeminiRequest::from_prompt(prompt);

        debug!("calling generateContent, prompt length {}", prompt.len());
        let response = self
            .client
            .post(self.config.endpoint())
            .query(&[("key", self.config.api_key.as_str())])
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("generateContent failed with status {status}");
            return Err(GatewayError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let payload: GeminiResponse = response.json().await?;
        let text = payload
            .first_text()
            .ok_or(GatewayError::EmptyResponse)?
            .to_string();

        debug!("generateContent returned {} chars", text.len());
        Ok(text)
    }
}
