use crate::domain::{errors::DomainError, Message};
use async_trait::async_trait;

/// Chat-style generation. Takes the fully assembled message sequence
/// (system instructions, prior turns, current question) and a sampling
/// temperature; returns the generated text.
#[async_trait]
pub trait LlmService: Send + Sync {
    async fn chat(&self, messages: &[Message], temperature: f64) -> Result<String, DomainError>;
}
