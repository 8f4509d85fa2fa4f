use std::sync::Arc;

use crate::api::sessions::SessionStore;
use crate::application::ChatService;
use crate::infrastructure::Config;

#[derive(Clone)]
pub struct AppState {
    pub chat_service: Arc<ChatService>,
    pub sessions: SessionStore,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(chat_service: Arc<ChatService>, config: Config) -> Self {
        Self {
            chat_service,
            sessions: SessionStore::new(),
            config: Arc::new(config),
        }
    }
}
