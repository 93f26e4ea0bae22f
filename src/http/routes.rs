use super::handlers;
use super::state::AppState;
use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::trace::TraceLayer;

/// Create the HTTP router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // State snapshot
        .route("/state", get(handlers::get_state))
        // Session control
        .route("/session/toggle", post(handlers::toggle_session))
        .route("/session/start", post(handlers::start_session))
        .route("/session/stop", post(handlers::stop_session))
        // Settings
        .route("/settings/mode", put(handlers::set_mode))
        .route("/settings/connection", put(handlers::set_connection))
        // Transcript history
        .route(
            "/history",
            get(handlers::get_history).delete(handlers::clear_history),
        )
        .route(
            "/history/:row",
            put(handlers::update_history_row).delete(handlers::remove_history_row),
        )
        // Hotkey bindings and capture flow
        .route("/hotkeys/:slot", put(handlers::set_hotkey))
        .route("/hotkeys/:slot/capture", post(handlers::start_capture))
        .route("/hotkeys/capture", delete(handlers::cancel_capture))
        .route("/hotkeys/input", post(handlers::capture_input))
        // Add tracing middleware for request logging
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
