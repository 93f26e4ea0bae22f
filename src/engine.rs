use crate::controller::{Credentials, RecognitionMode};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// Asynchronous event from the recognition backend.
///
/// Events are delivered through the channel returned by
/// [`RecognitionEngine::start`] and serialized into controller state
/// transitions by a single consumer task, so two overlapping results can
/// never interleave a read-modify-write on the history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// The backend acknowledged the session
    Connected,
    /// Interim transcription of the in-progress utterance
    Partial { text: String },
    /// Finalized transcription of one utterance
    Final { text: String },
    /// The connection ended, gracefully or not
    Disconnected { reason: Option<String> },
}

/// Reconnect behavior after a backend drop.
///
/// Interpreted by engine implementations only; the controller never retries
/// on its own, and a drop that the engine gives up on is a terminal
/// `Disconnected` for that session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    pub auto_reconnect: bool,
    pub max_attempts: u32,
    pub backoff_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            auto_reconnect: false,
            max_attempts: 0,
            backoff_ms: 0,
        }
    }
}

/// Everything an engine needs to open one recognition session
#[derive(Debug, Clone)]
pub struct SessionRequest {
    /// Unique connect id for request tracing
    pub session_id: String,
    pub mode: RecognitionMode,
    pub credentials: Credentials,
    /// Whether payloads should be gzip-compressed on the wire
    pub use_gzip: bool,
    pub retry: RetryPolicy,
}

/// Recognition engine boundary.
///
/// Implementations own the transport to the ASR backend (WebSocket framing,
/// gzip negotiation, audio capture hand-off). The controller only starts and
/// stops sessions and reacts to the event stream.
#[async_trait::async_trait]
pub trait RecognitionEngine: Send + Sync {
    /// Open a session and return the event stream for it.
    async fn start(&mut self, request: SessionRequest) -> Result<mpsc::Receiver<EngineEvent>>;

    /// Request a graceful stop. The engine flushes pending results and then
    /// emits `Disconnected` on the session's event stream.
    async fn stop(&mut self) -> Result<()>;

    /// Engine name for logging
    fn name(&self) -> &str;
}

/// Placeholder engine used until a transport client is wired in.
///
/// Starting a session always fails, which the controller surfaces as a
/// descriptive status string with the state machine left in `Disconnected`.
#[derive(Debug, Default)]
pub struct NullEngine;

#[async_trait::async_trait]
impl RecognitionEngine for NullEngine {
    async fn start(&mut self, request: SessionRequest) -> Result<mpsc::Receiver<EngineEvent>> {
        anyhow::bail!(
            "no recognition backend configured (session {}, mode {})",
            request.session_id,
            request.mode.as_str()
        )
    }

    async fn stop(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "null"
    }
}
