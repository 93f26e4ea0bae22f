pub mod config;
pub mod controller;
pub mod engine;
pub mod error;
pub mod history;
pub mod hotkeys;
pub mod http;
pub mod settings;

pub use config::Config;
pub use controller::{
    AsrController, ConnectionStatus, ControllerSnapshot, Credentials, RecognitionMode,
    SessionStats, StateEvent,
};
pub use engine::{EngineEvent, NullEngine, RecognitionEngine, RetryPolicy, SessionRequest};
pub use error::ControllerError;
pub use history::{HistoryEntry, HistoryLog};
pub use hotkeys::{HotkeyBinding, HotkeySettings, HotkeySlot, TriggerMode, TutorialTexts};
pub use http::{create_router, AppState};
pub use settings::{ConnectionSettings, SettingsStore, StoredSettings};
