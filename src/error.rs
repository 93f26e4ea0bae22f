use thiserror::Error;

/// Failures surfaced by the session controller and history log.
///
/// Everything here is recoverable: a failed command leaves the controller in
/// a consistent state, and connection-level failures are additionally
/// reflected through the status event channel.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ControllerError {
    /// A history operation addressed a row outside `[0, len)`.
    #[error("history row {row} is out of range (len {len})")]
    RowOutOfRange { row: usize, len: usize },

    /// A session transition is already in flight; the command was ignored.
    #[error("a session transition is already in flight")]
    Busy,

    /// The command requires an idle session (e.g. changing the streaming
    /// mode while connected).
    #[error("operation requires an idle session")]
    SessionActive,

    /// Session start refused because a credential field is empty.
    #[error("missing credentials: {0}")]
    MissingCredentials(&'static str),

    /// An unrecognized streaming mode name at the presentation boundary.
    #[error("unknown recognition mode: {0}")]
    InvalidMode(String),

    /// An unrecognized hotkey slot name at the presentation boundary.
    #[error("unknown hotkey slot: {0}")]
    InvalidSlot(String),

    /// The recognition engine failed to start or stop a session.
    #[error("recognition engine failure: {0}")]
    Engine(String),
}
