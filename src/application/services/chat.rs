use std::sync::Arc;
use tracing::{error, instrument};

use crate::application::services::prompt::assemble_messages;
use crate::application::RetrievalService;
use crate::domain::{ports::LlmService, ConversationTurn, DomainError};

/// Sampling temperature for every generation call. Low, favoring
/// deterministic answers.
pub const TEMPERATURE: f64 = 0.17;

/// Runs one full question/answer turn: retrieve passages, assemble the
/// prompt, call the generation API.
pub struct ChatService {
    retrieval: Arc<RetrievalService>,
    llm: Arc<dyn LlmService>,
}

impl ChatService {
    pub fn new(retrieval: Arc<RetrievalService>, llm: Arc<dyn LlmService>) -> Self {
        Self { retrieval, llm }
    }

    #[instrument(skip(self, question, history), fields(history_len = history.len()))]
    pub async fn answer(
        &self,
        question: &str,
        history: &[ConversationTurn],
    ) -> Result<String, DomainError> {
        let passages = self.retrieval.retrieve(question).await?;
        let messages = assemble_messages(question, history, &passages);
        self.llm.chat(&messages, TEMPERATURE).await
    }

    /// Like [`answer`](Self::answer), but any failure becomes a visible reply
    /// so the conversation is never left without a paired assistant turn. No
    /// retry is attempted.
    pub async fn answer_or_report(&self, question: &str, history: &[ConversationTurn]) -> String {
        match self.answer(question, history).await {
            Ok(reply) => reply,
            Err(e) => {
                error!(error = %e, "Failed to generate response");
                format!("Error generating response. See logs. {e}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        ports::{EmbeddingService, VectorStore},
        Embedding, Message, MessageRole, RetrievedPassage,
    };
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct StubEmbedding;

    #[async_trait]
    impl EmbeddingService for StubEmbedding {
        async fn embed(&self, _text: &str) -> Result<Embedding, DomainError> {
            Ok(Embedding::new(vec![0.5, 0.5]))
        }

        fn dimension(&self) -> usize {
            2
        }
    }

    struct StubStore {
        passages: Vec<RetrievedPassage>,
    }

    #[async_trait]
    impl VectorStore for StubStore {
        async fn search(
            &self,
            _query: &Embedding,
            _top_k: usize,
        ) -> Result<Vec<RetrievedPassage>, DomainError> {
            Ok(self.passages.clone())
        }
    }

    struct RecordingLlm {
        seen: Mutex<Vec<Message>>,
        reply: String,
    }

    #[async_trait]
    impl crate::domain::ports::LlmService for RecordingLlm {
        async fn chat(
            &self,
            messages: &[Message],
            temperature: f64,
        ) -> Result<String, DomainError> {
            assert!((temperature - TEMPERATURE).abs() < f64::EPSILON);
            *self.seen.lock().unwrap() = messages.to_vec();
            Ok(self.reply.clone())
        }
    }

    struct FailingLlm;

    #[async_trait]
    impl crate::domain::ports::LlmService for FailingLlm {
        async fn chat(
            &self,
            _messages: &[Message],
            _temperature: f64,
        ) -> Result<String, DomainError> {
            Err(DomainError::external("generation API returned 500"))
        }
    }

    fn retrieval(passages: Vec<RetrievedPassage>) -> Arc<RetrievalService> {
        Arc::new(RetrievalService::new(
            Arc::new(StubEmbedding),
            Arc::new(StubStore { passages }),
        ))
    }

    fn history(pairs: usize) -> Vec<ConversationTurn> {
        let mut turns = vec![ConversationTurn::new(MessageRole::Assistant, "greeting")];
        for i in 0..pairs {
            turns.push(ConversationTurn::new(MessageRole::User, format!("q{i}")));
            turns.push(ConversationTurn::new(MessageRole::Assistant, format!("a{i}")));
        }
        turns
    }

    #[tokio::test]
    async fn sends_system_history_question_to_llm() {
        let llm = Arc::new(RecordingLlm {
            seen: Mutex::new(Vec::new()),
            reply: "it inhibits protein synthesis".into(),
        });
        let service = ChatService::new(
            retrieval(vec![RetrievedPassage::new("gentamicin binds 30S", 0.9)]),
            llm.clone(),
        );
        let history = history(2);

        let reply = service.answer("mechanism?", &history).await.unwrap();

        assert_eq!(reply, "it inhibits protein synthesis");
        let seen = llm.seen.lock().unwrap();
        assert_eq!(seen.len(), history.len() + 2);
        assert_eq!(seen[0].role, MessageRole::System);
        assert!(seen[0].content.contains("gentamicin binds 30S"));
        assert_eq!(seen.last().unwrap().content, "mechanism?");
    }

    #[tokio::test]
    async fn generation_failure_becomes_visible_reply() {
        let service = ChatService::new(retrieval(Vec::new()), Arc::new(FailingLlm));

        let reply = service.answer_or_report("q", &[]).await;

        assert!(reply.starts_with("Error generating response."));
        assert!(reply.contains("generation API returned 500"));
    }

    #[tokio::test]
    async fn successful_turn_passes_reply_through() {
        let llm = Arc::new(RecordingLlm {
            seen: Mutex::new(Vec::new()),
            reply: "answer".into(),
        });
        let service = ChatService::new(retrieval(Vec::new()), llm);

        assert_eq!(service.answer_or_report("q", &[]).await, "answer");
    }
}
