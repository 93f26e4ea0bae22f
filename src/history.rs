use crate::error::ControllerError;
use serde::{Deserialize, Serialize};

/// A single transcript row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Human-readable timestamp label ("2024-01-01 10:00:00")
    pub timestamp: String,

    /// Recognized text
    pub text: String,

    /// Whether this is a partial (interim) result
    pub partial: bool,
}

impl HistoryEntry {
    pub fn new(timestamp: impl Into<String>, text: impl Into<String>, partial: bool) -> Self {
        Self {
            timestamp: timestamp.into(),
            text: text.into(),
            partial,
        }
    }
}

/// Ordered transcript buffer with stable positional addressing.
///
/// Rows are addressed by index. Edits in place never shift other rows;
/// removal shifts subsequent rows down by one. Operations on an index
/// outside `[0, len)` fail with [`ControllerError::RowOutOfRange`] rather
/// than being clamped, so callers rendering stale indices are detectable.
#[derive(Debug, Default)]
pub struct HistoryLog {
    items: Vec<HistoryEntry>,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, row: usize) -> Option<&HistoryEntry> {
        self.items.get(row)
    }

    fn check(&self, row: usize) -> Result<(), ControllerError> {
        if row >= self.items.len() {
            return Err(ControllerError::RowOutOfRange {
                row,
                len: self.items.len(),
            });
        }
        Ok(())
    }

    /// Insert an entry at `row`, shifting rows at `row` and above up by one.
    /// `row == len` appends.
    pub fn insert(&mut self, row: usize, entry: HistoryEntry) -> Result<(), ControllerError> {
        if row > self.items.len() {
            return Err(ControllerError::RowOutOfRange {
                row,
                len: self.items.len(),
            });
        }
        self.items.insert(row, entry);
        Ok(())
    }

    /// Overwrite the text of an existing row. Returns whether the text
    /// actually changed.
    pub fn update_text(&mut self, row: usize, text: &str) -> Result<bool, ControllerError> {
        self.check(row)?;
        let item = &mut self.items[row];
        if item.text == text {
            return Ok(false);
        }
        item.text = text.to_string();
        Ok(true)
    }

    /// Patch any subset of a row's fields. Returns whether anything changed.
    pub fn update(
        &mut self,
        row: usize,
        text: Option<&str>,
        partial: Option<bool>,
        timestamp: Option<&str>,
    ) -> Result<bool, ControllerError> {
        self.check(row)?;
        let item = &mut self.items[row];
        let mut changed = false;
        if let Some(text) = text {
            if item.text != text {
                item.text = text.to_string();
                changed = true;
            }
        }
        if let Some(partial) = partial {
            if item.partial != partial {
                item.partial = partial;
                changed = true;
            }
        }
        if let Some(timestamp) = timestamp {
            if item.timestamp != timestamp {
                item.timestamp = timestamp.to_string();
                changed = true;
            }
        }
        Ok(changed)
    }

    /// Remove a row, shifting subsequent rows down by one.
    pub fn remove(&mut self, row: usize) -> Result<HistoryEntry, ControllerError> {
        self.check(row)?;
        Ok(self.items.remove(row))
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Point-in-time copy of the full history, newest rows first.
    pub fn snapshot(&self) -> Vec<HistoryEntry> {
        self.items.clone()
    }

    /// Total character count across all rows (feeds the live statistics).
    pub fn char_count(&self) -> u64 {
        self.items.iter().map(|e| e.text.chars().count() as u64).sum()
    }
}
