//! `POST /functions/v1/send-notification`.

#[cfg(test)]
#[path = "notify_test.rs"]
mod notify_test;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use messaging::notify::NotificationRequest;
use serde::Serialize;

use crate::services::notification::{self, NotifyError};
use crate::state::AppState;

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct NotifyResponse {
    pub ok: bool,
    pub skipped: bool,
}

/// Deliver one notification. Malformed bodies are rejected by the `Json`
/// extractor before this runs.
pub async fn send_notification(
    State(state): State<AppState>,
    Json(request): Json<NotificationRequest>,
) -> Result<Json<NotifyResponse>, StatusCode> {
    let delivery = notification::handle(&state, &request)
        .await
        .map_err(notify_error_to_status)?;
    Ok(Json(NotifyResponse { ok: true, skipped: delivery.skipped }))
}

pub(crate) fn notify_error_to_status(err: NotifyError) -> StatusCode {
    match err {
        NotifyError::InvalidEmail => StatusCode::BAD_REQUEST,
        NotifyError::Mail(_) => StatusCode::BAD_GATEWAY,
    }
}
