use axum::{Json, extract::State};

use crate::{error::AppError, message::ChatRequest, state::SharedState};

/// Replies with the model's text as a plain-text body.
pub async fn chat_handler(
    State(state): State<SharedState>,
    Json(payload): Json<ChatRequest>,
) -> Result<String, AppError> {
    let input = payload.user_input.ok_or(AppError::MissingInput)?;
    state.chat.generate_reply(&input).await
}
