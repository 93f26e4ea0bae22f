//! Session controller / view-model
//!
//! This module provides the `AsrController` abstraction that owns:
//! - The connection/session state machine
//! - Recognition mode, credentials, and transport options
//! - Hotkey bindings and the one-shot capture flow
//! - The transcript history and live statistics
//! - The tagged change-event stream observed by the presentation layer

mod controller;
mod events;
mod state;
mod stats;

pub use controller::AsrController;
pub use events::{StateEvent, EVENT_CHANNEL_CAPACITY};
pub use state::{ConnectionStatus, ControllerSnapshot, Credentials, RecognitionMode};
pub use stats::SessionStats;
