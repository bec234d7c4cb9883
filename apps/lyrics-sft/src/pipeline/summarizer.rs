//! Condenses lyrics into a short topic summary.
//!
//! `Summarizer` is the request/response seam the orchestrator depends on.
//! `LyricsSummarizer` is the production backend over `LlmClient`; tests swap
//! in scripted implementations.

use async_trait::async_trait;

use crate::llm_client::prompts::{LYRICS_ANALYST_SYSTEM, LYRICS_USER_TEMPLATE};
use crate::llm_client::{ChatMessage, LlmClient, LlmError};

#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Returns a summary of at most four sentences. Empty model output is `Ok("")`.
    async fn summarize(&self, lyrics: &str) -> Result<String, LlmError>;
}

pub struct LyricsSummarizer {
    llm: LlmClient,
}

impl LyricsSummarizer {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl Summarizer for LyricsSummarizer {
    async fn summarize(&self, lyrics: &str) -> Result<String, LlmError> {
        let user = LYRICS_USER_TEMPLATE.replace("{lyrics}", lyrics);
        let messages = [
            ChatMessage::system(LYRICS_ANALYST_SYSTEM),
            ChatMessage::user(&user),
        ];

        let response = self.llm.call(&messages).await?;
        Ok(response.text().trim().to_string())
    }
}
