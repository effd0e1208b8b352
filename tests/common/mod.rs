#![allow(dead_code)]

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};
use std::time::Duration;

use async_trait::async_trait;
use klinik_assistant::services::{
    chat_model::{ChatModel, ChatTurn, ModelError, ModelReply, Role},
    chatbot::ChatService,
    knowledge_store::KnowledgeStore,
    prompt_builder::PromptTemplate,
};

/// Echoes the user turn back after a short delay and records every conversation.
#[derive(Default)]
pub struct EchoModel {
    pub calls: AtomicUsize,
    pub seen: Mutex<Vec<Vec<ChatTurn>>>,
    pub delay: Duration,
}

impl EchoModel {
    pub fn with_delay(delay: Duration) -> Self {
        Self { delay, ..Default::default() }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChatModel for EchoModel {
    async fn send(&self, turns: &[ChatTurn]) -> Result<ModelReply, ModelError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push(turns.to_vec());
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        let user = turns
            .iter()
            .find(|t| t.role == Role::User)
            .map(|t| t.text.clone())
            .unwrap_or_default();
        Ok(ModelReply { text: format!("echo: {user}") })
    }
}

pub enum Failure {
    Timeout,
    Unavailable,
}

/// Always fails; counts how often it was asked.
pub struct FailingModel {
    pub failure: Failure,
    pub calls: AtomicUsize,
}

impl FailingModel {
    pub fn new(failure: Failure) -> Self {
        Self { failure, calls: AtomicUsize::new(0) }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChatModel for FailingModel {
    async fn send(&self, _turns: &[ChatTurn]) -> Result<ModelReply, ModelError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.failure {
            Failure::Timeout => Err(ModelError::Timeout),
            Failure::Unavailable => Err(ModelError::Unavailable("503 Service Unavailable: overloaded".into())),
        }
    }
}

pub fn service(model: Arc<dyn ChatModel>) -> ChatService {
    ChatService::new(
        Arc::new(KnowledgeStore::builtin()),
        PromptTemplate::turkish(),
        model,
    )
}
