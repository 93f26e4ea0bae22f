//! HTTP API server for the settings page / presentation layer
//!
//! This module provides a REST API mirroring the controller's command
//! surface:
//! - GET /state - Full state snapshot
//! - POST /session/toggle|start|stop - Session control
//! - PUT /settings/mode, /settings/connection - Configuration
//! - GET/DELETE /history, PUT/DELETE /history/:row - Transcript history
//! - PUT /hotkeys/:slot, POST /hotkeys/:slot/capture, POST /hotkeys/input -
//!   Bindings and the capture flow
//! - GET /health - Health check

mod handlers;
mod routes;
mod state;

pub use routes::create_router;
pub use state::AppState;
