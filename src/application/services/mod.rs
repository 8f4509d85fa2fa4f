pub mod chat;
pub mod prompt;
pub mod retrieval;

pub use chat::ChatService;
pub use retrieval::RetrievalService;
