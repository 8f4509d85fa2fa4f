use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::sessions::SessionError;
use crate::api::state::AppState;
use crate::domain::ConversationTurn;

#[derive(Debug, Deserialize)]
pub struct MessageRequest {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub session_id: Uuid,
    pub turns: Vec<ConversationTurn>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub reply: String,
    pub turns: Vec<ConversationTurn>,
}

pub async fn create_session(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<SessionResponse>), StatusCode> {
    let conversation = state.sessions.create().map_err(session_error_status)?;

    Ok((
        StatusCode::CREATED,
        Json(SessionResponse {
            session_id: conversation.id,
            turns: conversation.turns,
        }),
    ))
}

pub async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SessionResponse>, StatusCode> {
    let conversation = state.sessions.get(session_id).map_err(session_error_status)?;

    Ok(Json(SessionResponse {
        session_id: conversation.id,
        turns: conversation.turns,
    }))
}

/// Submits a question and blocks until the paired assistant reply (answer or
/// visible error string) has been appended.
pub async fn post_message(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<MessageRequest>,
) -> Result<Json<MessageResponse>, StatusCode> {
    if request.message.trim().is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }

    let history = state
        .sessions
        .begin_turn(session_id, &request.message)
        .map_err(session_error_status)?;

    let reply = state
        .chat_service
        .answer_or_report(&request.message, &history)
        .await;

    let conversation = state
        .sessions
        .complete_turn(session_id, &reply)
        .map_err(session_error_status)?;

    Ok(Json(MessageResponse {
        reply,
        turns: conversation.turns,
    }))
}

pub async fn reset_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SessionResponse>, StatusCode> {
    let conversation = state.sessions.reset(session_id).map_err(session_error_status)?;

    Ok(Json(SessionResponse {
        session_id: conversation.id,
        turns: conversation.turns,
    }))
}

fn session_error_status(err: SessionError) -> StatusCode {
    match err {
        SessionError::NotFound => StatusCode::NOT_FOUND,
        SessionError::Busy => StatusCode::CONFLICT,
        SessionError::Internal(e) => {
            tracing::error!(error = %e, "Session store failure");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}
