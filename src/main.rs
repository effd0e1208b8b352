use std::sync::Arc;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use klinik_assistant::AppConfig;
use klinik_assistant::routes;
use klinik_assistant::services::{
    chat_model::OpenAiChatClient, chatbot::ChatService, knowledge_store::KnowledgeStore,
    prompt_builder::PromptTemplate,
};
use klinik_assistant::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;

    let knowledge = match &config.knowledge_path {
        Some(path) => KnowledgeStore::load(path)?,
        None => KnowledgeStore::builtin(),
    };
    tracing::info!(entries = knowledge.len(), locale = ?config.locale, "knowledge base ready");

    let model = OpenAiChatClient::new(&config.model).context("failed to build model client")?;
    let chat = ChatService::new(
        Arc::new(knowledge),
        PromptTemplate::for_locale(config.locale),
        Arc::new(model),
    );
    let state = Arc::new(AppState::new(chat));

    let app = routes::create_router().with_state(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("klinik assistant listening on http://{}", config.bind_addr);
    axum::serve(listener, app).await?;
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
