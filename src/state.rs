// src/state.rs
use std::sync::Arc;

use crate::services::chatbot::ChatService;

pub type SharedState = Arc<AppState>;

#[derive(Debug)]
pub struct AppState {
    pub chat: ChatService,
}

impl AppState {
    pub fn new(chat: ChatService) -> Self {
        Self { chat }
    }
}
