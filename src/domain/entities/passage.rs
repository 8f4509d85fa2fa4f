use serde::{Deserialize, Serialize};

/// A slide-deck excerpt returned by the vector store for one query.
/// Ephemeral: produced per question, folded into the system prompt, dropped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievedPassage {
    pub text: String,
    pub score: f32,
}

impl RetrievedPassage {
    pub fn new(text: impl Into<String>, score: f32) -> Self {
        Self {
            text: text.into(),
            score,
        }
    }
}
