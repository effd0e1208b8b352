// src/services/chatbot.rs
use std::sync::Arc;

use tracing::Instrument;
use uuid::Uuid;

use super::{
    chat_model::{ChatModel, ChatTurn},
    knowledge_store::KnowledgeStore,
    prompt_builder::{PromptTemplate, build_context},
};
use crate::error::AppError;

/// Turns one user message into one model reply using the shared knowledge base.
#[derive(Clone)]
pub struct ChatService {
    knowledge: Arc<KnowledgeStore>,
    template: PromptTemplate,
    model: Arc<dyn ChatModel>,
}

impl ChatService {
    pub fn new(
        knowledge: Arc<KnowledgeStore>,
        template: PromptTemplate,
        model: Arc<dyn ChatModel>,
    ) -> Self {
        Self { knowledge, template, model }
    }

    pub fn knowledge(&self) -> &KnowledgeStore {
        &self.knowledge
    }

    /// System turn followed by the user's text, exactly as received.
    pub fn build_turns(&self, user_input: &str) -> Vec<ChatTurn> {
        let context = build_context(&self.template, self.knowledge.get_all());
        vec![ChatTurn::system(context), ChatTurn::user(user_input)]
    }

    pub async fn generate_reply(&self, user_input: &str) -> Result<String, AppError> {
        if user_input.trim().is_empty() {
            return Err(AppError::MissingInput);
        }

        let request_id = Uuid::new_v4();
        let span = tracing::info_span!("chat", %request_id);

        async {
            let turns = self.build_turns(user_input);
            tracing::debug!(input_chars = user_input.chars().count(), "sending turns to model");

            match self.model.send(&turns).await {
                Ok(reply) => {
                    tracing::info!(reply_chars = reply.text.chars().count(), "model replied");
                    Ok(reply.text)
                }
                Err(e) => {
                    tracing::error!(error = %e, "model call failed");
                    Err(AppError::from(e))
                }
            }
        }
        .instrument(span)
        .await
    }
}

impl std::fmt::Debug for ChatService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatService")
            .field("entries", &self.knowledge.len())
            .finish()
    }
}
