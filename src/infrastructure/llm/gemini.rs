use async_trait::async_trait;
use rig::client::{CompletionClient, ProviderClient};
use rig::completion::Chat;
use rig::providers::gemini;

use crate::domain::{ports::LlmService, DomainError, Message, MessageRole};

/// Chat completion via the hosted Gemini generation API.
pub struct GeminiLlm {
    model: String,
}

impl GeminiLlm {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
        }
    }

    pub fn default_model() -> Self {
        Self::new("gemini-2.0-flash")
    }
}

#[async_trait]
impl LlmService for GeminiLlm {
    async fn chat(&self, messages: &[Message], temperature: f64) -> Result<String, DomainError> {
        // Leading system message becomes the agent preamble; the final user
        // message is the prompt; everything between is chat history.
        let (system, rest) = match messages.split_first() {
            Some((first, rest)) if first.role == MessageRole::System => {
                (Some(first.content.as_str()), rest)
            }
            _ => (None, messages),
        };

        let (question, history) = rest
            .split_last()
            .ok_or_else(|| DomainError::validation("Empty message sequence"))?;

        let client = gemini::Client::from_env();
        let mut builder = client.agent(&self.model).temperature(temperature);
        if let Some(system) = system {
            builder = builder.preamble(system);
        }
        let agent = builder.build();

        let history: Vec<rig::completion::Message> =
            history.iter().map(to_provider_message).collect();

        agent
            .chat(question.content.as_str(), history)
            .await
            .map_err(|e| DomainError::external(e.to_string()))
    }
}

fn to_provider_message(message: &Message) -> rig::completion::Message {
    match message.role {
        MessageRole::Assistant => rig::completion::Message::assistant(message.content.clone()),
        _ => rig::completion::Message::user(message.content.clone()),
    }
}
