mod conversation;
mod embedding;
mod passage;

pub use conversation::{Conversation, ConversationTurn, Message, MessageRole, GREETING};
pub use embedding::Embedding;
pub use passage::RetrievedPassage;
