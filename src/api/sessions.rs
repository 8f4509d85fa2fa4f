use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use thiserror::Error;
use uuid::Uuid;

use crate::domain::{Conversation, ConversationTurn};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Session not found")]
    NotFound,

    #[error("A submission is already being processed for this session")]
    Busy,

    #[error("Session store error: {0}")]
    Internal(String),
}

/// Per-session conversation contexts, owned by the serving layer. Sessions
/// are isolated; nothing here is shared across them but the map itself.
/// The lock is never held across an await point.
#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, Conversation>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&self) -> Result<Conversation, SessionError> {
        let conversation = Conversation::new();
        let mut sessions = self.write()?;
        sessions.insert(conversation.id, conversation.clone());
        Ok(conversation)
    }

    pub fn get(&self, id: Uuid) -> Result<Conversation, SessionError> {
        let sessions = self.read()?;
        sessions.get(&id).cloned().ok_or(SessionError::NotFound)
    }

    /// Starts a turn: rejects the submission if one is already in flight,
    /// marks the session busy, appends the user's question, and returns a
    /// snapshot of the turns that preceded it (prompt context).
    pub fn begin_turn(
        &self,
        id: Uuid,
        question: &str,
    ) -> Result<Vec<ConversationTurn>, SessionError> {
        let mut sessions = self.write()?;
        let conversation = sessions.get_mut(&id).ok_or(SessionError::NotFound)?;

        if conversation.busy {
            return Err(SessionError::Busy);
        }

        conversation.busy = true;
        let history = conversation.turns.clone();
        conversation.push_user(question);
        Ok(history)
    }

    /// Finishes a turn: appends the assistant's reply (answer or visible
    /// error string) and clears the busy flag. The user's turn is never
    /// rolled back.
    pub fn complete_turn(&self, id: Uuid, reply: &str) -> Result<Conversation, SessionError> {
        let mut sessions = self.write()?;
        let conversation = sessions.get_mut(&id).ok_or(SessionError::NotFound)?;

        conversation.push_assistant(reply);
        conversation.busy = false;
        Ok(conversation.clone())
    }

    /// Clears history back to the fixed greeting.
    pub fn reset(&self, id: Uuid) -> Result<Conversation, SessionError> {
        let mut sessions = self.write()?;
        let conversation = sessions.get_mut(&id).ok_or(SessionError::NotFound)?;

        conversation.reset();
        Ok(conversation.clone())
    }

    fn read(
        &self,
    ) -> Result<std::sync::RwLockReadGuard<'_, HashMap<Uuid, Conversation>>, SessionError> {
        self.sessions
            .read()
            .map_err(|e| SessionError::Internal(e.to_string()))
    }

    fn write(
        &self,
    ) -> Result<std::sync::RwLockWriteGuard<'_, HashMap<Uuid, Conversation>>, SessionError> {
        self.sessions
            .write()
            .map_err(|e| SessionError::Internal(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MessageRole, GREETING};

    #[test]
    fn created_session_is_retrievable_with_greeting() {
        let store = SessionStore::new();
        let created = store.create().unwrap();

        let fetched = store.get(created.id).unwrap();
        assert_eq!(fetched.turns.len(), 1);
        assert_eq!(fetched.turns[0].content, GREETING);
    }

    #[test]
    fn unknown_session_is_not_found() {
        let store = SessionStore::new();
        assert!(matches!(
            store.get(Uuid::new_v4()),
            Err(SessionError::NotFound)
        ));
    }

    #[test]
    fn begin_turn_snapshots_history_before_the_question() {
        let store = SessionStore::new();
        let session = store.create().unwrap();

        let history = store.begin_turn(session.id, "what is gentamicin?").unwrap();

        // Snapshot holds the greeting only; the stored conversation already
        // carries the user's turn.
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].content, GREETING);

        let stored = store.get(session.id).unwrap();
        assert_eq!(stored.turns.len(), 2);
        assert_eq!(stored.turns[1].role, MessageRole::User);
        assert!(stored.busy);
    }

    #[test]
    fn overlapping_submissions_are_rejected() {
        let store = SessionStore::new();
        let session = store.create().unwrap();

        store.begin_turn(session.id, "first").unwrap();
        assert!(matches!(
            store.begin_turn(session.id, "second"),
            Err(SessionError::Busy)
        ));

        store.complete_turn(session.id, "answer").unwrap();
        assert!(store.begin_turn(session.id, "second").is_ok());
    }

    #[test]
    fn turn_lifecycle_yields_pairs_after_greeting() {
        let store = SessionStore::new();
        let session = store.create().unwrap();

        for i in 0..3 {
            store.begin_turn(session.id, format!("q{i}").as_str()).unwrap();
            let conv = store.complete_turn(session.id, &format!("a{i}")).unwrap();
            assert!(!conv.busy);
        }

        let conv = store.get(session.id).unwrap();
        assert_eq!(conv.turns.len(), 7); // greeting + 3 pairs
    }

    #[test]
    fn error_reply_pairs_without_rolling_back_user_turn() {
        let store = SessionStore::new();
        let session = store.create().unwrap();

        store.begin_turn(session.id, "what dose?").unwrap();
        let conv = store
            .complete_turn(session.id, "Error generating response. See logs. timeout")
            .unwrap();

        assert_eq!(conv.turns[1].content, "what dose?");
        assert_eq!(
            conv.turns[2].content,
            "Error generating response. See logs. timeout"
        );
        assert!(!conv.busy);
    }

    #[test]
    fn reset_returns_to_greeting() {
        let store = SessionStore::new();
        let session = store.create().unwrap();
        store.begin_turn(session.id, "q").unwrap();
        store.complete_turn(session.id, "a").unwrap();

        let conv = store.reset(session.id).unwrap();
        assert_eq!(conv.turns.len(), 1);
        assert_eq!(conv.turns[0].content, GREETING);
    }
}
