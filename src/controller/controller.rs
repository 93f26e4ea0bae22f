use crate::engine::{EngineEvent, RecognitionEngine, RetryPolicy, SessionRequest};
use crate::error::ControllerError;
use crate::history::{HistoryEntry, HistoryLog};
use crate::hotkeys::{self, HotkeySettings, HotkeySlot, TriggerMode};
use crate::settings::{ConnectionSettings, SettingsStore, StoredSettings};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{broadcast, mpsc, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::events::{StateEvent, EVENT_CHANNEL_CAPACITY};
use super::state::{ConnectionStatus, ControllerSnapshot, Credentials, RecognitionMode};
use super::stats::SessionStats;

const STATUS_IDLE: &str = "not connected";
const STATUS_CONNECTING: &str = "connecting...";
const STATUS_CONNECTED: &str = "connected";
const STATUS_SENDING: &str = "recognizing (microphone)";

/// Grace period between a stop request and forcing the session closed when
/// the backend never confirms the disconnect.
const PENDING_CLOSE_TIMEOUT: Duration = Duration::from_millis(1500);

/// Single authoritative holder of session/UI state.
///
/// Constructed once at startup and passed by handle to the presentation
/// adapter; cloning is cheap (shared inner state behind a mutex). All
/// mutations — user commands and backend events alike — are serialized
/// through that single lock, so overlapping partial-result callbacks can
/// never interleave a history read-modify-write.
pub struct AsrController {
    inner: Arc<Mutex<Inner>>,
    events: broadcast::Sender<StateEvent>,
}

impl Clone for AsrController {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            events: self.events.clone(),
        }
    }
}

struct Inner {
    status: ConnectionStatus,
    status_text: String,
    /// A graceful stop is pending; counts as busy
    stopping: bool,

    mode: RecognitionMode,
    credentials: Credentials,
    use_gzip: bool,
    retry: RetryPolicy,

    hotkeys: HotkeySettings,
    /// Which binding slot the next captured input commits to
    capture_target: Option<HotkeySlot>,

    history: HistoryLog,
    /// Finalized utterance lines of the in-progress session
    committed_text: String,
    /// Interim tail of the in-progress utterance
    session_partial: String,
    /// Row index of the in-progress session's history entry
    current_row: Option<usize>,
    session_started_at: Option<Instant>,
    /// Recording seconds folded in from completed sessions
    total_seconds: f64,

    engine: Box<dyn RecognitionEngine>,
    pump: Option<JoinHandle<()>>,
    store: Option<SettingsStore>,
    events: broadcast::Sender<StateEvent>,
}

impl AsrController {
    /// Create a controller from persisted settings and an engine client.
    /// When a store is supplied, every configuration mutation is saved back.
    pub fn new(
        settings: StoredSettings,
        engine: Box<dyn RecognitionEngine>,
        store: Option<SettingsStore>,
    ) -> Self {
        info!("Creating session controller (engine: {})", engine.name());

        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        let inner = Inner {
            status: ConnectionStatus::Idle,
            status_text: STATUS_IDLE.to_string(),
            stopping: false,
            mode: settings.connection.mode,
            credentials: settings.connection.credentials(),
            use_gzip: settings.connection.use_gzip,
            retry: RetryPolicy::default(),
            hotkeys: settings.hotkeys,
            capture_target: None,
            history: HistoryLog::new(),
            committed_text: String::new(),
            session_partial: String::new(),
            current_row: None,
            session_started_at: None,
            total_seconds: 0.0,
            engine,
            pump: None,
            store,
            events: events.clone(),
        };

        Self {
            inner: Arc::new(Mutex::new(inner)),
            events,
        }
    }

    /// Subscribe to the change-event stream. A lagging receiver should
    /// re-hydrate from [`snapshot`](Self::snapshot).
    pub fn subscribe(&self) -> broadcast::Receiver<StateEvent> {
        self.events.subscribe()
    }

    /// Point-in-time copy of every observable state field.
    pub async fn snapshot(&self) -> ControllerSnapshot {
        let inner = self.inner.lock().await;
        ControllerSnapshot {
            status: inner.status,
            status_text: inner.status_text.clone(),
            mode: inner.mode,
            app_id: inner.credentials.app_id.clone(),
            access_token: inner.credentials.access_token.clone(),
            use_gzip: inner.use_gzip,
            hotkeys: inner.hotkeys.clone(),
            tutorial: hotkeys::tutorial_texts(&inner.hotkeys),
            capture_armed: inner.capture_target,
            stats: inner.current_stats(),
            history: inner.history.snapshot(),
        }
    }

    /// Full current history, newest rows first.
    pub async fn history_snapshot(&self) -> Vec<HistoryEntry> {
        self.inner.lock().await.history.snapshot()
    }

    /// Current live statistics.
    pub async fn stats(&self) -> SessionStats {
        self.inner.lock().await.current_stats()
    }

    // ------------------------------------------------------------------
    // Session commands
    // ------------------------------------------------------------------

    /// Start a session when idle, request a graceful stop when active.
    /// Rejected with [`ControllerError::Busy`] while a transition is already
    /// in flight, so two presses in quick succession produce exactly one
    /// transition.
    pub async fn toggle_recognition(&self) -> Result<(), ControllerError> {
        let mut inner = self.inner.lock().await;
        if inner.stopping || inner.status == ConnectionStatus::Connecting {
            return Err(ControllerError::Busy);
        }
        if inner.status.is_connected() {
            self.stop_locked(&mut inner).await
        } else {
            self.start_locked(&mut inner).await
        }
    }

    /// Begin a session. Busy or already-active controllers reject the call.
    pub async fn start_recognition(&self) -> Result<(), ControllerError> {
        let mut inner = self.inner.lock().await;
        if inner.stopping || inner.status.is_active() {
            return Err(ControllerError::Busy);
        }
        self.start_locked(&mut inner).await
    }

    /// Request a graceful stop. A no-op when idle; cancels an in-flight
    /// connect.
    pub async fn stop_recognition(&self) -> Result<(), ControllerError> {
        let mut inner = self.inner.lock().await;
        if inner.stopping || !inner.status.is_active() {
            return Ok(());
        }
        self.stop_locked(&mut inner).await
    }

    async fn start_locked(&self, inner: &mut Inner) -> Result<(), ControllerError> {
        if let Err(e) = inner.credentials.validate() {
            let text = format!("session start refused: {e}");
            warn!("{text}");
            inner.status_text = text.clone();
            inner.emit(StateEvent::Status {
                status: inner.status,
                text,
            });
            return Err(e);
        }

        let session_id = uuid::Uuid::new_v4().to_string();
        info!(
            "Starting recognition session {} (mode: {})",
            session_id,
            inner.mode.as_str()
        );

        inner.set_status(ConnectionStatus::Connecting, STATUS_CONNECTING.to_string());
        inner.begin_session();

        let request = SessionRequest {
            session_id,
            mode: inner.mode,
            credentials: inner.credentials.clone(),
            use_gzip: inner.use_gzip,
            retry: inner.retry,
        };

        match inner.engine.start(request).await {
            Ok(rx) => {
                inner.pump = Some(self.spawn_pump(rx));
                Ok(())
            }
            Err(e) => {
                warn!("Engine failed to start: {e:#}");
                inner.finalize_session(true);
                inner.set_status(
                    ConnectionStatus::Disconnected,
                    format!("disconnected: {e}"),
                );
                Err(ControllerError::Engine(e.to_string()))
            }
        }
    }

    async fn stop_locked(&self, inner: &mut Inner) -> Result<(), ControllerError> {
        match inner.status {
            ConnectionStatus::Connecting => {
                info!("Cancelling in-flight connect");
                if let Err(e) = inner.engine.stop().await {
                    warn!("Engine stop failed: {e:#}");
                }
                inner.abort_pump();
                inner.finalize_session(true);
                inner.set_status(ConnectionStatus::Idle, STATUS_IDLE.to_string());
                Ok(())
            }
            ConnectionStatus::Connected | ConnectionStatus::Sending => {
                info!("Stopping recognition session");
                inner.stopping = true;
                if let Err(e) = inner.engine.stop().await {
                    warn!("Engine stop failed: {e:#}");
                }
                inner.finalize_session(false);
                inner.set_status(ConnectionStatus::Connected, STATUS_CONNECTED.to_string());

                let controller = self.clone();
                tokio::spawn(async move {
                    tokio::time::sleep(PENDING_CLOSE_TIMEOUT).await;
                    controller.force_close().await;
                });
                Ok(())
            }
            _ => Ok(()),
        }
    }

    /// Called by the pending-close timer when the backend never confirms the
    /// disconnect after a graceful stop.
    async fn force_close(&self) {
        let mut inner = self.inner.lock().await;
        if inner.stopping {
            warn!("Backend never confirmed the disconnect; forcing the session closed");
            inner.stopping = false;
            inner.abort_pump();
            inner.set_status(ConnectionStatus::Idle, STATUS_IDLE.to_string());
        }
    }

    fn spawn_pump(&self, mut rx: mpsc::Receiver<EngineEvent>) -> JoinHandle<()> {
        let controller = self.clone();
        tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                controller.handle_engine_event(event).await;
            }
            debug!("Engine event stream closed");
        })
    }

    async fn handle_engine_event(&self, event: EngineEvent) {
        let mut inner = self.inner.lock().await;
        match event {
            EngineEvent::Connected => {
                if inner.status != ConnectionStatus::Connecting {
                    debug!("Ignoring connect ack while {:?}", inner.status);
                    return;
                }
                // Capture starts streaming as soon as the backend acknowledges.
                inner.set_status(ConnectionStatus::Sending, STATUS_SENDING.to_string());
            }
            EngineEvent::Partial { text } => {
                if inner.stopping || !inner.status.is_connected() {
                    return;
                }
                inner.set_partial(&text);
            }
            EngineEvent::Final { text } => {
                if inner.stopping || !inner.status.is_connected() {
                    return;
                }
                inner.append_committed(&text);
            }
            EngineEvent::Disconnected { reason } => {
                if inner.stopping {
                    inner.stopping = false;
                    inner.pump = None;
                    inner.set_status(ConnectionStatus::Idle, STATUS_IDLE.to_string());
                } else if inner.status.is_active() {
                    let text = match &reason {
                        Some(r) => format!("disconnected: {r}"),
                        None => "disconnected".to_string(),
                    };
                    warn!("Backend dropped mid-session: {text}");
                    inner.finalize_session(false);
                    inner.pump = None;
                    inner.set_status(ConnectionStatus::Disconnected, text);
                } else {
                    debug!("Ignoring disconnect while {:?}", inner.status);
                }
            }
        }
    }

    // ------------------------------------------------------------------
    // Configuration commands
    // ------------------------------------------------------------------

    /// Change the streaming mode. Only effective while idle; a mid-session
    /// change is rejected rather than queued.
    pub async fn set_mode(&self, mode: RecognitionMode) -> Result<(), ControllerError> {
        let mut inner = self.inner.lock().await;
        if inner.stopping || inner.status.is_active() {
            return Err(ControllerError::SessionActive);
        }
        if inner.mode != mode {
            inner.mode = mode;
            inner.emit(StateEvent::Mode { mode });
            inner.persist();
        }
        Ok(())
    }

    /// Update credentials; takes effect on the next session start.
    pub async fn set_credentials(&self, app_id: &str, access_token: &str) {
        let mut inner = self.inner.lock().await;
        let credentials = Credentials {
            app_id: app_id.trim().to_string(),
            access_token: access_token.trim().to_string(),
        };
        if inner.credentials != credentials {
            inner.credentials = credentials;
            inner.emit(StateEvent::Credentials {
                app_id: inner.credentials.app_id.clone(),
            });
            inner.persist();
        }
    }

    /// Toggle payload compression; takes effect on the next session start.
    pub async fn set_use_gzip(&self, enabled: bool) {
        let mut inner = self.inner.lock().await;
        if inner.use_gzip != enabled {
            inner.use_gzip = enabled;
            inner.emit(StateEvent::UseGzip { enabled });
            inner.persist();
        }
    }

    /// Configure the reconnect policy handed to the engine on session start.
    pub async fn set_retry_policy(&self, retry: RetryPolicy) {
        self.inner.lock().await.retry = retry;
    }

    // ------------------------------------------------------------------
    // Hotkey commands
    // ------------------------------------------------------------------

    /// Arm capture: the next combination delivered through
    /// [`capture_input`](Self::capture_input) is committed to `slot`.
    /// Re-arming switches the target slot.
    pub async fn start_hotkey_capture(&self, slot: HotkeySlot) {
        let mut inner = self.inner.lock().await;
        debug!("Arming hotkey capture for slot {}", slot.as_str());
        inner.capture_target = Some(slot);
    }

    pub async fn cancel_hotkey_capture(&self) {
        self.inner.lock().await.capture_target = None;
    }

    /// Input-boundary delivery of an observed combination. Ignored unless a
    /// capture is armed; returns whether the combination was committed.
    pub async fn capture_input(&self, combo: &str) -> bool {
        let mut inner = self.inner.lock().await;
        let Some(slot) = inner.capture_target else {
            debug!("Ignoring input combination; capture not armed");
            return false;
        };
        let keys = hotkeys::parse_combo(combo);
        if keys.is_empty() {
            return false;
        }
        inner.capture_target = None;
        inner.hotkeys.binding_mut(slot).keys = keys;
        let binding = inner.hotkeys.binding(slot).clone();
        info!(
            "Captured combination for slot {}: {}",
            slot.as_str(),
            binding.display()
        );
        inner.emit(StateEvent::HotkeyCaptured {
            slot,
            combo: binding.display(),
        });
        inner.emit(StateEvent::Hotkey { slot, binding });
        inner.emit_tutorial();
        inner.persist();
        true
    }

    pub async fn set_hotkey_mode(&self, slot: HotkeySlot, mode: TriggerMode) {
        let mut inner = self.inner.lock().await;
        if inner.hotkeys.binding(slot).mode == mode {
            return;
        }
        inner.hotkeys.binding_mut(slot).mode = mode;
        let binding = inner.hotkeys.binding(slot).clone();
        inner.emit(StateEvent::Hotkey { slot, binding });
        inner.emit_tutorial();
        inner.persist();
    }

    pub async fn set_hotkey_enabled(&self, slot: HotkeySlot, enabled: bool) {
        let mut inner = self.inner.lock().await;
        if inner.hotkeys.binding(slot).enabled == enabled {
            return;
        }
        inner.hotkeys.binding_mut(slot).enabled = enabled;
        let binding = inner.hotkeys.binding(slot).clone();
        inner.emit(StateEvent::Hotkey { slot, binding });
        inner.emit_tutorial();
        inner.persist();
    }

    // ------------------------------------------------------------------
    // History commands
    // ------------------------------------------------------------------

    /// Overwrite the text of an existing row. Out-of-range rows fail loudly.
    pub async fn update_history_text(
        &self,
        row: usize,
        text: &str,
    ) -> Result<(), ControllerError> {
        let mut inner = self.inner.lock().await;
        let changed = inner.history.update_text(row, text)?;
        if changed {
            if let Some(entry) = inner.history.get(row).cloned() {
                inner.emit(StateEvent::HistoryUpdated { row, entry });
            }
            inner.emit_stats();
        }
        Ok(())
    }

    /// Remove a row, shifting subsequent rows down by one.
    pub async fn remove_history_row(&self, row: usize) -> Result<(), ControllerError> {
        let mut inner = self.inner.lock().await;
        inner.history.remove(row)?;
        if let Some(current) = inner.current_row {
            if current == row {
                inner.current_row = None;
            } else if current > row {
                inner.current_row = Some(current - 1);
            }
        }
        inner.emit(StateEvent::HistoryRemoved { row });
        inner.emit_stats();
        Ok(())
    }

    /// Empty the transcript log and reset statistics to zero.
    pub async fn clear_history(&self) {
        let mut inner = self.inner.lock().await;
        inner.history.clear();
        inner.current_row = None;
        inner.committed_text.clear();
        inner.session_partial.clear();
        inner.total_seconds = 0.0;
        // An active session keeps recording, but its clock restarts with the
        // statistics.
        if inner.session_started_at.is_some() {
            inner.session_started_at = Some(Instant::now());
        }
        inner.emit(StateEvent::HistoryReset { items: Vec::new() });
        inner.emit_stats();
    }
}

impl Inner {
    fn emit(&self, event: StateEvent) {
        // No receivers is fine; the presentation layer may not be attached.
        let _ = self.events.send(event);
    }

    fn set_status(&mut self, status: ConnectionStatus, text: String) {
        if self.status == status && self.status_text == text {
            return;
        }
        self.status = status;
        self.status_text = text.clone();
        self.emit(StateEvent::Status { status, text });
    }

    fn live_seconds(&self) -> f64 {
        let live = self
            .session_started_at
            .map(|t| t.elapsed().as_secs_f64())
            .unwrap_or(0.0);
        self.total_seconds + live
    }

    fn current_stats(&self) -> SessionStats {
        SessionStats::compute(self.live_seconds(), self.history.char_count())
    }

    fn emit_stats(&self) {
        self.emit(StateEvent::Stats {
            stats: self.current_stats(),
        });
    }

    fn emit_tutorial(&self) {
        self.emit(StateEvent::Tutorial {
            texts: hotkeys::tutorial_texts(&self.hotkeys),
        });
    }

    fn persist(&self) {
        let Some(store) = &self.store else { return };
        let settings = StoredSettings {
            connection: ConnectionSettings {
                app_id: self.credentials.app_id.clone(),
                access_token: self.credentials.access_token.clone(),
                use_gzip: self.use_gzip,
                mode: self.mode,
            },
            hotkeys: self.hotkeys.clone(),
        };
        if let Err(e) = store.save(&settings) {
            warn!("Failed to persist settings: {e:#}");
        }
    }

    fn now_label() -> String {
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
    }

    /// Insert the session's interim row at the top of the history and start
    /// the session clock.
    fn begin_session(&mut self) {
        self.committed_text.clear();
        self.session_partial.clear();
        let entry = HistoryEntry::new(Self::now_label(), "", true);
        if self.history.insert(0, entry.clone()).is_ok() {
            self.current_row = Some(0);
            self.emit(StateEvent::HistoryInserted { row: 0, entry });
        }
        self.session_started_at = Some(Instant::now());
        self.emit_stats();
    }

    /// Close out the in-progress session: finalize or drop its row, fold the
    /// elapsed time into the totals, reset the per-session buffers.
    fn finalize_session(&mut self, cancelled: bool) {
        self.session_partial.clear();
        let elapsed = self
            .session_started_at
            .take()
            .map(|t| t.elapsed().as_secs_f64())
            .unwrap_or(0.0);

        if let Some(row) = self.current_row.take() {
            let content = self.committed_text.trim().to_string();
            if content.is_empty() {
                if self.history.remove(row).is_ok() {
                    self.emit(StateEvent::HistoryRemoved { row });
                }
            } else {
                if self
                    .history
                    .update(row, Some(&content), Some(false), None)
                    .is_ok()
                {
                    if let Some(entry) = self.history.get(row).cloned() {
                        self.emit(StateEvent::HistoryUpdated { row, entry });
                    }
                }
                if !cancelled {
                    self.total_seconds += elapsed;
                }
            }
        }

        self.committed_text.clear();
        self.emit_stats();
    }

    /// Text of the in-progress session as shown in its history row.
    fn current_session_text(&self, include_partial: bool) -> String {
        let committed = self.committed_text.trim();
        let partial = self.session_partial.trim();
        if include_partial && !partial.is_empty() {
            if committed.is_empty() {
                partial.to_string()
            } else {
                format!("{committed}\n{partial}")
            }
        } else {
            committed.to_string()
        }
    }

    fn update_current_row(&mut self) {
        let Some(row) = self.current_row else { return };
        let text = self.current_session_text(true);
        let partial = self.status.is_connected() || !self.session_partial.is_empty();
        match self.history.update(row, Some(&text), Some(partial), None) {
            Ok(true) => {
                if let Some(entry) = self.history.get(row).cloned() {
                    self.emit(StateEvent::HistoryUpdated { row, entry });
                }
            }
            Ok(false) => {}
            Err(e) => warn!("Lost track of the in-progress history row: {e}"),
        }
    }

    /// Append one finalized utterance line to the in-progress session.
    fn append_committed(&mut self, text: &str) {
        let text = text.trim();
        if text.is_empty() {
            return;
        }
        if self.committed_text.is_empty() {
            self.committed_text = text.to_string();
        } else {
            self.committed_text = format!("{}\n{}", self.committed_text.trim_end(), text);
        }
        self.session_partial.clear();
        self.update_current_row();
        self.emit_stats();
    }

    /// Replace the interim tail of the in-progress utterance.
    fn set_partial(&mut self, text: &str) {
        self.session_partial = text.trim().to_string();
        self.update_current_row();
        self.emit_stats();
    }

    fn abort_pump(&mut self) {
        if let Some(handle) = self.pump.take() {
            handle.abort();
        }
    }
}
