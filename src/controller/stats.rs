use serde::{Deserialize, Serialize};

/// Live statistics shown next to the transcript.
///
/// Derived values: the character count comes from the history log, the
/// duration from accumulated recording time (live session time included),
/// and the speed from the two combined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionStats {
    /// Cumulative recording duration in seconds
    pub total_seconds: f64,

    /// Total characters across all transcript rows
    pub chars: u64,

    /// Recognition speed in characters per minute of recorded time
    pub speed: u64,

    /// Duration rendered as MM:SS
    pub duration_text: String,
}

impl Default for SessionStats {
    fn default() -> Self {
        Self::compute(0.0, 0)
    }
}

impl SessionStats {
    /// Recompute the derived fields from raw duration and character count.
    pub fn compute(total_seconds: f64, chars: u64) -> Self {
        let whole = total_seconds.max(0.0) as u64;
        let duration_text = format!("{:02}:{:02}", whole / 60, whole % 60);
        let speed = if total_seconds > 0.0 {
            (chars as f64 / (total_seconds / 60.0)).round() as u64
        } else {
            0
        };
        Self {
            total_seconds,
            chars,
            speed,
            duration_text,
        }
    }
}
