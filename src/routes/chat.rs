use axum::{Json, body::Bytes, extract::State};
use serde_json::Value;
use tracing::error;

use crate::{
    error::{AppError, INVALID_BODY, MESSAGE_REQUIRED},
    message::{ChatRequest, ChatResponse},
    services::metrics_manager::ChatOutcome,
    state::SharedState,
};

pub async fn chat_handler(
    State(state): State<SharedState>,
    body: Bytes,
) -> Result<Json<ChatResponse>, AppError> {
    let request = match parse_chat_request(&body) {
        Ok(request) => request,
        Err(err) => {
            state.metrics.record(ChatOutcome::Rejected).await;
            return Err(err);
        }
    };

    // Provider failures are already folded into a fallback reply; only a
    // panicked or cancelled generation task lands in the 502 branch.
    // The task outlives a disconnected client, so it records its own outcome.
    let chat = state.chat.clone();
    let metrics = state.metrics.clone();
    let generation = tokio::spawn(async move {
        let reply = chat.generate_response(&request.message).await;
        metrics.record(reply.outcome).await;
        reply
    });

    match generation.await {
        Ok(reply) => Ok(Json(ChatResponse { response: reply.text })),
        Err(err) => {
            error!(error = %err, "chat API error");
            state.metrics.record(ChatOutcome::GenerationFailed).await;
            Err(AppError::UpstreamUnavailable(err.to_string()))
        }
    }
}

/// Validate a raw chat body and return the trimmed message.
pub fn parse_chat_request(body: &[u8]) -> Result<ChatRequest, AppError> {
    let value: Value =
        serde_json::from_slice(body).map_err(|_| AppError::InvalidRequest(INVALID_BODY))?;

    if !(value.is_object() || value.is_array()) {
        return Err(AppError::InvalidRequest(INVALID_BODY));
    }

    let message = value
        .get("message")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .ok_or(AppError::InvalidRequest(MESSAGE_REQUIRED))?;

    Ok(ChatRequest { message: message.to_string() })
}
