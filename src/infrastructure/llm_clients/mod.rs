pub mod openai;

use crate::domain::error::Result;
use crate::domain::llm_config::LLMConfig;
use async_trait::async_trait;

pub use openai::OpenAIClient;

/// Chat-completion client seam. The narration step talks to this trait so
/// tests can substitute a stub.
#[async_trait]
pub trait LLMClient {
    async fn generate(&self, config: &LLMConfig, system: &str, user: &str) -> Result<String>;
}
