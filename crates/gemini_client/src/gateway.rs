//! GenerationGateway - the seam between the turn engine and the provider

use async_trait::async_trait;

use crate::error::GatewayError;

/// A text-generation provider: prompt in, completion out.
///
/// Prompting strategy is a gateway concern. `regenerate` composes its own
/// prompt around the previous answer, so callers never need to know how the
/// provider is asked for an improved response.
#[async_trait]
pub trait GenerationGateway: Send + Sync {
    /// Generate a completion for a prompt.
    async fn generate(&self, prompt: &str) -> Result<String, GatewayError>;

    /// Produce an alternative to a previous answer.
    async fn regenerate(&self, previous_answer: &str) -> Result<String, GatewayError> {
        let prompt = format!(
            "Improve or rephrase the following answer while keeping it accurate:\n\n{previous_answer}"
        );
        self.generate(&prompt).await
    }
}

/// Gateway that returns a fixed string for any prompt. Used in tests and as
/// an offline stand-in for the provider.
#[derive(Clone, Debug)]
pub struct CannedGateway {
    response: String,
}

impl CannedGateway {
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
        }
    }
}

impl Default for CannedGateway {
    fn default() -> Self {
        Self::new("This is a constant response for any question.")
    }
}

#[async_trait]
impl GenerationGateway for CannedGateway {
    async fn generate(&self, _prompt: &str) -> Result<String, GatewayError> {
        Ok(self.response.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_canned_gateway_ignores_prompt() {
        let gateway = CannedGateway::new("fixed");
        assert_eq!(gateway.generate("anything").await.unwrap(), "fixed");
        assert_eq!(gateway.regenerate("previous").await.unwrap(), "fixed");
    }
}
