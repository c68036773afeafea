// ============================================================
// NARRATION STEP
// ============================================================
// Turn a statistics table into prose via the chat-completion model

use crate::domain::error::Result;
use crate::domain::llm_config::LLMConfig;
use crate::infrastructure::llm_clients::LLMClient;
use crate::infrastructure::response::clean_llm_response;
use std::sync::Arc;

const SYSTEM_PROMPT: &str = "You are a data analysis assistant. Your task is to interpret the provided CSV descriptive statistics and give a concise, easy-to-understand textual summary. Highlight key features, distributions, potential outliers, or interesting insights.";

/// Sends the raw statistics table to the LLM and returns its narration
pub struct NarrateUseCase {
    llm_client: Arc<dyn LLMClient + Send + Sync>,
}

impl NarrateUseCase {
    pub fn new(llm_client: Arc<dyn LLMClient + Send + Sync>) -> Self {
        Self { llm_client }
    }

    /// One call per upload: fixed two-message prompt, no retry, no timeout
    /// override. Transport and API errors propagate to the caller.
    pub async fn execute(&self, config: &LLMConfig, statistics: &str) -> Result<String> {
        let user_prompt = format!(
            "Here are the descriptive statistics of a CSV file:\n\n{}\n\nPlease provide a clear, concise textual summary of this data.",
            statistics
        );

        let raw_result = self
            .llm_client
            .generate(config, SYSTEM_PROMPT, &user_prompt)
            .await?;

        Ok(clean_llm_response(&raw_result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::AppError;
    use async_trait::async_trait;

    struct EchoClient;

    #[async_trait]
    impl LLMClient for EchoClient {
        async fn generate(
            &self,
            _config: &LLMConfig,
            _system: &str,
            user: &str,
        ) -> Result<String> {
            Ok(format!("<think>hmm</think>Narration for: {}", user))
        }
    }

    struct FailingClient;

    #[async_trait]
    impl LLMClient for FailingClient {
        async fn generate(
            &self,
            _config: &LLMConfig,
            _system: &str,
            _user: &str,
        ) -> Result<String> {
            Err(AppError::LLMError("connection refused".to_string()))
        }
    }

    #[tokio::test]
    async fn test_narration_includes_statistics_and_is_cleaned() {
        let use_case = NarrateUseCase::new(Arc::new(EchoClient));
        let narration = use_case
            .execute(&LLMConfig::default(), "count  3")
            .await
            .expect("narrate");
        assert!(narration.starts_with("Narration for:"));
        assert!(narration.contains("count  3"));
        assert!(!narration.contains("<think>"));
    }

    #[tokio::test]
    async fn test_llm_failure_propagates() {
        let use_case = NarrateUseCase::new(Arc::new(FailingClient));
        let err = use_case
            .execute(&LLMConfig::default(), "count  3")
            .await
            .expect_err("should fail");
        assert!(matches!(err, AppError::LLMError(_)));
    }
}
