use serde::Deserialize;

use crate::domain::{DomainError, Result};

/// Generation and embedding calls authenticate with this variable (read by
/// the provider client itself); startup only verifies it is present.
pub const GEMINI_API_KEY: &str = "GEMINI_API_KEY";
pub const QDRANT_API_KEY: &str = "QDRANT_API_KEY";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub llm: LlmConfig,
    pub embedding: EmbeddingConfig,
    pub vector_store: VectorStoreConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    pub model: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddingConfig {
    pub model: String,
    pub dimension: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VectorStoreConfig {
    pub url: String,
    pub collection: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
            },
            llm: LlmConfig {
                model: "gemini-2.0-flash".to_string(),
            },
            embedding: EmbeddingConfig {
                model: "embedding-001".to_string(),
                dimension: 768,
            },
            vector_store: VectorStoreConfig {
                url: "http://localhost:6334".to_string(),
                collection: "pharm".to_string(),
            },
        }
    }
}

impl Config {
    /// Builds the configuration from the process environment. Both API-key
    /// secrets must be set; a missing one halts startup, there is no
    /// partial-degradation mode.
    pub fn from_env() -> Result<Self> {
        require_secret(GEMINI_API_KEY)?;
        require_secret(QDRANT_API_KEY)?;

        let mut config = Self::default();

        if let Ok(host) = std::env::var("SERVER_HOST") {
            config.server.host = host;
        }
        if let Ok(port) = std::env::var("SERVER_PORT") {
            config.server.port = port
                .parse()
                .map_err(|_| DomainError::configuration(format!("Invalid SERVER_PORT: {port}")))?;
        }
        if let Ok(url) = std::env::var("QDRANT_URL") {
            config.vector_store.url = url;
        }
        if let Ok(collection) = std::env::var("QDRANT_COLLECTION") {
            config.vector_store.collection = collection;
        }
        if let Ok(model) = std::env::var("LLM_MODEL") {
            config.llm.model = model;
        }
        if let Ok(model) = std::env::var("EMBEDDING_MODEL") {
            config.embedding.model = model;
        }

        Ok(config)
    }
}

fn require_secret(name: &str) -> Result<()> {
    match std::env::var(name) {
        Ok(value) if !value.is_empty() => Ok(()),
        _ => Err(DomainError::configuration(format!(
            "{name} is missing. Please set it in your .env file."
        ))),
    }
}
