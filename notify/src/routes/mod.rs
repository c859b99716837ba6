//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser calls the notification function directly, so CORS is open.
//! The path mirrors the hosted platform's function route so the client can
//! point at either without changes.

pub mod notify;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub const NOTIFY_PATH: &str = "/functions/v1/send-notification";

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(NOTIFY_PATH, post(notify::send_notification))
        .route("/healthz", get(healthz))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
