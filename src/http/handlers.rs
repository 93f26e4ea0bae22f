use super::state::AppState;
use crate::error::ControllerError;
use crate::hotkeys::{HotkeySlot, TriggerMode};
use crate::RecognitionMode;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::{Deserialize, Serialize};
use tracing::info;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct CommandResponse {
    pub status: String,
    pub status_text: String,
}

#[derive(Debug, Deserialize)]
pub struct SetModeRequest {
    pub mode: String,
}

#[derive(Debug, Deserialize)]
pub struct ConnectionRequest {
    pub app_id: String,
    pub access_token: String,
    pub use_gzip: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateRowRequest {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct HotkeyRequest {
    pub mode: Option<String>,
    pub enabled: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct CaptureInputRequest {
    pub combo: String,
}

#[derive(Debug, Serialize)]
pub struct CaptureInputResponse {
    pub committed: bool,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn controller_error(e: ControllerError) -> (StatusCode, Json<ErrorResponse>) {
    let code = match e {
        ControllerError::RowOutOfRange { .. } => StatusCode::NOT_FOUND,
        ControllerError::Busy | ControllerError::SessionActive => StatusCode::CONFLICT,
        ControllerError::MissingCredentials(_)
        | ControllerError::InvalidMode(_)
        | ControllerError::InvalidSlot(_) => StatusCode::BAD_REQUEST,
        ControllerError::Engine(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (
        code,
        Json(ErrorResponse {
            error: e.to_string(),
        }),
    )
}

async fn command_response(state: &AppState) -> Json<CommandResponse> {
    let snapshot = state.controller.snapshot().await;
    Json(CommandResponse {
        status: snapshot.status.as_str().to_string(),
        status_text: snapshot.status_text,
    })
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /state
/// Full state snapshot, used to hydrate a freshly attached view
pub async fn get_state(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.controller.snapshot().await)
}

/// POST /session/toggle
/// Start recognition when idle, request a graceful stop when active
pub async fn toggle_session(State(state): State<AppState>) -> impl IntoResponse {
    match state.controller.toggle_recognition().await {
        Ok(()) => command_response(&state).await.into_response(),
        Err(e) => controller_error(e).into_response(),
    }
}

/// POST /session/start
pub async fn start_session(State(state): State<AppState>) -> impl IntoResponse {
    match state.controller.start_recognition().await {
        Ok(()) => command_response(&state).await.into_response(),
        Err(e) => controller_error(e).into_response(),
    }
}

/// POST /session/stop
pub async fn stop_session(State(state): State<AppState>) -> impl IntoResponse {
    match state.controller.stop_recognition().await {
        Ok(()) => command_response(&state).await.into_response(),
        Err(e) => controller_error(e).into_response(),
    }
}

/// PUT /settings/mode
/// Only effective while idle; rejected with 409 mid-session
pub async fn set_mode(
    State(state): State<AppState>,
    Json(req): Json<SetModeRequest>,
) -> impl IntoResponse {
    let mode = match RecognitionMode::parse(&req.mode) {
        Ok(mode) => mode,
        Err(e) => return controller_error(e).into_response(),
    };
    match state.controller.set_mode(mode).await {
        Ok(()) => {
            info!("Streaming mode set to {}", mode.as_str());
            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) => controller_error(e).into_response(),
    }
}

/// PUT /settings/connection
/// Credentials and transport options; take effect on the next session start
pub async fn set_connection(
    State(state): State<AppState>,
    Json(req): Json<ConnectionRequest>,
) -> impl IntoResponse {
    state
        .controller
        .set_credentials(&req.app_id, &req.access_token)
        .await;
    if let Some(use_gzip) = req.use_gzip {
        state.controller.set_use_gzip(use_gzip).await;
    }
    StatusCode::NO_CONTENT
}

/// GET /history
pub async fn get_history(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.controller.history_snapshot().await)
}

/// PUT /history/:row
/// Edit a row's text in place; 404 on an out-of-range index
pub async fn update_history_row(
    State(state): State<AppState>,
    Path(row): Path<usize>,
    Json(req): Json<UpdateRowRequest>,
) -> impl IntoResponse {
    match state.controller.update_history_text(row, &req.text).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => controller_error(e).into_response(),
    }
}

/// DELETE /history/:row
pub async fn remove_history_row(
    State(state): State<AppState>,
    Path(row): Path<usize>,
) -> impl IntoResponse {
    match state.controller.remove_history_row(row).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => controller_error(e).into_response(),
    }
}

/// DELETE /history
/// Empty the transcript and reset statistics
pub async fn clear_history(State(state): State<AppState>) -> impl IntoResponse {
    state.controller.clear_history().await;
    StatusCode::NO_CONTENT
}

/// POST /hotkeys/:slot/capture
/// Arm one-shot capture for a binding slot
pub async fn start_capture(
    State(state): State<AppState>,
    Path(slot): Path<String>,
) -> impl IntoResponse {
    let slot = match HotkeySlot::parse(&slot) {
        Ok(slot) => slot,
        Err(e) => return controller_error(e).into_response(),
    };
    state.controller.start_hotkey_capture(slot).await;
    StatusCode::NO_CONTENT.into_response()
}

/// DELETE /hotkeys/capture
pub async fn cancel_capture(State(state): State<AppState>) -> impl IntoResponse {
    state.controller.cancel_hotkey_capture().await;
    StatusCode::NO_CONTENT
}

/// POST /hotkeys/input
/// Input-boundary delivery of an observed key combination
pub async fn capture_input(
    State(state): State<AppState>,
    Json(req): Json<CaptureInputRequest>,
) -> impl IntoResponse {
    let committed = state.controller.capture_input(&req.combo).await;
    Json(CaptureInputResponse { committed })
}

/// PUT /hotkeys/:slot
/// Change a binding's trigger mode and/or enabled flag
pub async fn set_hotkey(
    State(state): State<AppState>,
    Path(slot): Path<String>,
    Json(req): Json<HotkeyRequest>,
) -> impl IntoResponse {
    let slot = match HotkeySlot::parse(&slot) {
        Ok(slot) => slot,
        Err(e) => return controller_error(e).into_response(),
    };
    if let Some(mode) = req.mode {
        match TriggerMode::parse(&mode) {
            Ok(mode) => state.controller.set_hotkey_mode(slot, mode).await,
            Err(e) => return controller_error(e).into_response(),
        }
    }
    if let Some(enabled) = req.enabled {
        state.controller.set_hotkey_enabled(slot, enabled).await;
    }
    StatusCode::NO_CONTENT.into_response()
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
