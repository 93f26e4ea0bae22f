use crate::history::HistoryEntry;
use crate::hotkeys::{HotkeyBinding, HotkeySlot, TutorialTexts};
use serde::Serialize;

use super::state::{ConnectionStatus, RecognitionMode};
use super::stats::SessionStats;

/// Capacity of the broadcast channel carrying [`StateEvent`]s. A lagging
/// subscriber loses the oldest events and should re-hydrate from a snapshot.
pub const EVENT_CHANNEL_CAPACITY: usize = 256;

/// One change notification from the controller.
///
/// This is the replacement for the original per-property signal fan-out: a
/// single stream tagged by change kind. Subscribers filter on the variants
/// they care about; the payload always carries the new value so observers
/// never need to read controller state mid-stream.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StateEvent {
    /// Connection state and status line changed
    Status {
        status: ConnectionStatus,
        text: String,
    },
    /// Streaming mode changed
    Mode { mode: RecognitionMode },
    /// Credentials changed (token deliberately not echoed into the stream)
    Credentials { app_id: String },
    /// Payload compression toggled
    UseGzip { enabled: bool },
    /// A binding slot changed (keys, trigger mode, or enabled flag)
    Hotkey {
        slot: HotkeySlot,
        binding: HotkeyBinding,
    },
    /// A capture flow committed a combination into a slot
    HotkeyCaptured { slot: HotkeySlot, combo: String },
    /// Tutorial lines were re-derived from the bindings
    Tutorial { texts: TutorialTexts },
    /// Live statistics changed
    Stats { stats: SessionStats },
    /// Whole-list replacement; consumers re-render and re-subscribe per row
    HistoryReset { items: Vec<HistoryEntry> },
    /// Row inserted; rows at `row` and above shifted up by one
    HistoryInserted { row: usize, entry: HistoryEntry },
    /// Row edited in place; no other row moved
    HistoryUpdated { row: usize, entry: HistoryEntry },
    /// Row removed; subsequent rows shifted down by one
    HistoryRemoved { row: usize },
}
