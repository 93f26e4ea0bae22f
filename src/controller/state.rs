use crate::error::ControllerError;
use crate::history::HistoryEntry;
use crate::hotkeys::{HotkeySettings, HotkeySlot, TutorialTexts};
use serde::{Deserialize, Serialize};

use super::stats::SessionStats;

/// Connection/session state machine.
///
/// `Idle -> Connecting -> Connected -> Sending -> Idle`, with `Disconnected`
/// reachable from any non-idle state on failure. `Connecting` counts as busy:
/// commands that would start or stop a session are rejected until the backend
/// acknowledges (or the in-flight connect is explicitly cancelled).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionStatus {
    Idle,
    Connecting,
    Connected,
    Sending,
    Disconnected,
}

impl ConnectionStatus {
    /// A session is in progress (including the connect handshake).
    pub fn is_active(self) -> bool {
        matches!(self, Self::Connecting | Self::Connected | Self::Sending)
    }

    /// The backend connection is established.
    pub fn is_connected(self) -> bool {
        matches!(self, Self::Connected | Self::Sending)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Connecting => "connecting",
            Self::Connected => "connected",
            Self::Sending => "sending",
            Self::Disconnected => "disconnected",
        }
    }
}

/// Streaming mode requested from the ASR backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecognitionMode {
    /// Unidirectional streaming: audio up, one final result back
    #[serde(rename = "nostream")]
    NoStream,
    /// Bidirectional streaming with per-utterance results
    #[serde(rename = "bidi")]
    Bidirectional,
    /// Async-bidirectional streaming with rolling partial results
    #[serde(rename = "bidi_async")]
    BidirectionalAsync,
}

impl Default for RecognitionMode {
    fn default() -> Self {
        Self::NoStream
    }
}

impl RecognitionMode {
    pub fn parse(name: &str) -> Result<Self, ControllerError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "nostream" => Ok(Self::NoStream),
            "bidi" => Ok(Self::Bidirectional),
            "bidi_async" => Ok(Self::BidirectionalAsync),
            other => Err(ControllerError::InvalidMode(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoStream => "nostream",
            Self::Bidirectional => "bidi",
            Self::BidirectionalAsync => "bidi_async",
        }
    }
}

/// Backend credentials. Both fields must be non-empty to start a session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub app_id: String,
    pub access_token: String,
}

impl Credentials {
    pub fn validate(&self) -> Result<(), ControllerError> {
        if self.app_id.trim().is_empty() {
            return Err(ControllerError::MissingCredentials("app id"));
        }
        if self.access_token.trim().is_empty() {
            return Err(ControllerError::MissingCredentials("access token"));
        }
        Ok(())
    }
}

/// Point-in-time copy of every state field the presentation layer observes.
/// Used to hydrate a freshly attached view before it starts consuming events.
#[derive(Debug, Clone, Serialize)]
pub struct ControllerSnapshot {
    pub status: ConnectionStatus,
    pub status_text: String,
    pub mode: RecognitionMode,
    pub app_id: String,
    pub access_token: String,
    pub use_gzip: bool,
    pub hotkeys: HotkeySettings,
    pub tutorial: TutorialTexts,
    /// Which binding slot is armed for capture, if any
    pub capture_armed: Option<HotkeySlot>,
    pub stats: SessionStats,
    pub history: Vec<HistoryEntry>,
}
