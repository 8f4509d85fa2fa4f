use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opening assistant turn for every new or reset conversation.
pub const GREETING: &str = "Hello Impeccabillem Warrior, I'm your CoMUI Pharmacology MB2 Assistant. How can I assist you today?";

/// A session-scoped dialogue. Turns are append-only and kept in strict
/// chronological order; the whole sequence lives in process memory and is
/// discarded with the session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    pub id: Uuid,
    pub turns: Vec<ConversationTurn>,
    /// Set while a submitted question is being answered; overlapping
    /// submissions for the same session are rejected until it clears.
    pub busy: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Conversation {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            turns: vec![ConversationTurn::new(MessageRole::Assistant, GREETING)],
            busy: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn push_user(&mut self, content: impl Into<String>) {
        self.push_turn(MessageRole::User, content);
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.push_turn(MessageRole::Assistant, content);
    }

    fn push_turn(&mut self, role: MessageRole, content: impl Into<String>) {
        self.turns.push(ConversationTurn::new(role, content));
        self.updated_at = Utc::now();
    }

    /// Drops all turns and restores the fixed greeting.
    pub fn reset(&mut self) {
        self.turns = vec![ConversationTurn::new(MessageRole::Assistant, GREETING)];
        self.busy = false;
        self.updated_at = Utc::now();
    }

    pub fn last_assistant_message(&self) -> Option<&str> {
        self.turns
            .iter()
            .rev()
            .find(|t| matches!(t.role, MessageRole::Assistant))
            .map(|t| t.content.as_str())
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

/// One recorded dialogue entry. Only `User` and `Assistant` roles are ever
/// stored; system instructions are rebuilt per question and never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: MessageRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl ConversationTurn {
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Element of a composed prompt sent to the generation API. Built fresh per
/// question, never cached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

impl Message {
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

impl From<&ConversationTurn> for Message {
    fn from(turn: &ConversationTurn) -> Self {
        Self::new(turn.role, turn.content.clone())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

impl MessageRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}
