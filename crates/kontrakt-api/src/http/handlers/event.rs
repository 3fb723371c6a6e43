//! Webhook event handler.
//!
//! Endpoint:
//! - POST /api/v1/sessions/{conversation_id}/events - apply one session event

use std::time::Instant;

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use kontrakt_types::event::SessionEvent;
use kontrakt_types::reply::Reply;

use crate::http::error::AppError;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// POST /api/v1/sessions/{conversation_id}/events
///
/// The messaging transport delivers each user event here and renders the
/// returned reply (prompt text plus inline choices, or the completed
/// contract reference).
pub async fn post_event(
    State(state): State<AppState>,
    Path(conversation_id): Path<String>,
    Json(event): Json<SessionEvent>,
) -> Result<Json<ApiResponse<Reply>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    if conversation_id.trim().is_empty() {
        return Err(AppError::Validation("empty conversation id".to_string()));
    }

    let reply = state.intake.handle_event(&conversation_id, event).await;

    let elapsed = start.elapsed().as_millis() as u64;
    let resp = ApiResponse::success(reply, request_id, elapsed).with_link(
        "self",
        &format!("/api/v1/sessions/{conversation_id}/events"),
    );
    Ok(Json(resp))
}
