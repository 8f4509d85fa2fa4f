use std::net::SocketAddr;
use std::sync::Arc;

use pharm_assistant::api::{create_router, AppState};
use pharm_assistant::application::{ChatService, RetrievalService};
use pharm_assistant::infrastructure::{
    config, Config, GeminiEmbedding, GeminiLlm, QdrantVectorStore,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=debug,pharm_assistant=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenvy::dotenv().ok();

    // Missing secrets halt startup here; there is no partial-degradation mode.
    let config = Config::from_env()?;

    let embedding = Arc::new(GeminiEmbedding::from_config(&config.embedding));

    let qdrant_api_key = std::env::var(config::QDRANT_API_KEY).ok();
    let vector_store = Arc::new(
        QdrantVectorStore::new(
            &config.vector_store.url,
            qdrant_api_key.as_deref(),
            &config.vector_store.collection,
            config.embedding.dimension,
        )
        .await?,
    );
    info!(collection = %config.vector_store.collection, "Vector store ready");

    let retrieval = Arc::new(RetrievalService::new(embedding, vector_store));
    let llm = Arc::new(GeminiLlm::new(config.llm.model.clone()));
    let chat_service = Arc::new(ChatService::new(retrieval, llm));

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);
    let state = AppState::new(chat_service, config);
    let app = create_router(state);

    info!("API server listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
