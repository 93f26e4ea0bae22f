use crate::error::ControllerError;
use serde::{Deserialize, Serialize};

/// The three binding slots exposed to the settings page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HotkeySlot {
    /// Primary combo (push-to-talk)
    Primary,
    /// Free-form toggle combo
    Freehand,
    /// Mouse-button trigger (middle button)
    Mouse,
}

impl HotkeySlot {
    pub fn parse(name: &str) -> Result<Self, ControllerError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "primary" => Ok(Self::Primary),
            "freehand" => Ok(Self::Freehand),
            "mouse" | "middle_button" => Ok(Self::Mouse),
            other => Err(ControllerError::InvalidSlot(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Freehand => "freehand",
            Self::Mouse => "mouse",
        }
    }
}

/// How a binding drives recognition: active while held, or flipped per press
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriggerMode {
    Hold,
    Toggle,
}

impl TriggerMode {
    pub fn parse(name: &str) -> Result<Self, ControllerError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "hold" => Ok(Self::Hold),
            "toggle" => Ok(Self::Toggle),
            other => Err(ControllerError::InvalidMode(other.to_string())),
        }
    }
}

/// One binding slot: normalized key names, trigger mode, enabled flag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HotkeyBinding {
    pub keys: Vec<String>,
    pub mode: TriggerMode,
    pub enabled: bool,
}

impl HotkeyBinding {
    /// Display label for the settings page ("Ctrl + Super")
    pub fn display(&self) -> String {
        format_keys(&self.keys)
    }
}

/// The full persisted binding set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HotkeySettings {
    pub primary: HotkeyBinding,
    pub freehand: HotkeyBinding,
    pub mouse: HotkeyBinding,
}

impl Default for HotkeySettings {
    fn default() -> Self {
        Self {
            primary: HotkeyBinding {
                keys: vec!["ctrl".to_string(), "super".to_string()],
                mode: TriggerMode::Hold,
                enabled: true,
            },
            freehand: HotkeyBinding {
                keys: vec!["alt".to_string(), "super".to_string()],
                mode: TriggerMode::Toggle,
                enabled: true,
            },
            mouse: HotkeyBinding {
                keys: vec!["middle".to_string()],
                mode: TriggerMode::Hold,
                enabled: false,
            },
        }
    }
}

impl HotkeySettings {
    pub fn binding(&self, slot: HotkeySlot) -> &HotkeyBinding {
        match slot {
            HotkeySlot::Primary => &self.primary,
            HotkeySlot::Freehand => &self.freehand,
            HotkeySlot::Mouse => &self.mouse,
        }
    }

    pub fn binding_mut(&mut self, slot: HotkeySlot) -> &mut HotkeyBinding {
        match slot {
            HotkeySlot::Primary => &mut self.primary,
            HotkeySlot::Freehand => &mut self.freehand,
            HotkeySlot::Mouse => &mut self.mouse,
        }
    }
}

/// Parse a free-form combo string into normalized key names.
///
/// Accepts "+", "," or whitespace as separators, canonicalizes modifier
/// aliases (ctl/control -> ctrl, win/cmd -> super, option -> alt) and keeps
/// "right_" prefixes; "left_" is the default and is stripped. Duplicates are
/// dropped while preserving order.
pub fn parse_combo(text: &str) -> Vec<String> {
    // Collapse "right ctrl" / "left shift" into the underscore form before
    // splitting, then treat "+", "," and whitespace as separators.
    let normalized = text
        .to_ascii_lowercase()
        .replace(['+', ','], " ")
        .replace("right ", "right_")
        .replace("left ", "left_");
    let mut out: Vec<String> = Vec::new();
    for raw in normalized.split_whitespace() {
        let mut part = raw.trim().replace('-', "_");
        if part == "right_" || part == "left_" {
            continue;
        }
        if let Some(rest) = part.strip_prefix("left_") {
            part = rest.to_string();
        }
        let canonical = match part.as_str() {
            "ctrl" | "control" | "ctl" => "ctrl".to_string(),
            "alt" | "option" => "alt".to_string(),
            "shift" => "shift".to_string(),
            "win" | "windows" | "super" | "cmd" | "command" => "super".to_string(),
            other => {
                if let Some(base) = other.strip_prefix("right_") {
                    match base {
                        "ctrl" | "control" | "ctl" => "right_ctrl".to_string(),
                        "alt" | "option" => "right_alt".to_string(),
                        "shift" => "right_shift".to_string(),
                        "win" | "windows" | "super" | "cmd" | "command" => {
                            "right_super".to_string()
                        }
                        _ => other.to_string(),
                    }
                } else {
                    other.to_string()
                }
            }
        };
        if !canonical.is_empty() && !out.contains(&canonical) {
            out.push(canonical);
        }
    }
    out
}

/// Join normalized key names into a display label ("Ctrl + Super").
pub fn format_keys(keys: &[String]) -> String {
    keys.iter()
        .filter(|k| !k.is_empty())
        .map(|k| format_key_label(k))
        .collect::<Vec<_>>()
        .join(" + ")
}

fn format_key_label(key: &str) -> String {
    let key = key.trim().to_ascii_lowercase();
    let (prefix, base) = if let Some(rest) = key.strip_prefix("right_") {
        ("Right ", rest)
    } else if let Some(rest) = key.strip_prefix("left_") {
        ("Left ", rest)
    } else {
        ("", key.as_str())
    };

    let label = match base {
        "ctrl" | "control" => "Ctrl".to_string(),
        "alt" | "option" => "Alt".to_string(),
        "shift" => "Shift".to_string(),
        "super" | "win" | "cmd" | "command" => "Super".to_string(),
        other => {
            // Title-case anything else ("page_up" -> "Page Up")
            other
                .split('_')
                .map(|w| {
                    let mut chars = w.chars();
                    match chars.next() {
                        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                        None => String::new(),
                    }
                })
                .collect::<Vec<_>>()
                .join(" ")
        }
    };

    format!("{prefix}{label}")
}

/// Derived tutorial lines shown on the settings page, one per slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TutorialTexts {
    pub hold: String,
    pub toggle: String,
    pub mouse: String,
}

/// Re-derive the tutorial lines from the current bindings.
pub fn tutorial_texts(settings: &HotkeySettings) -> TutorialTexts {
    let primary_keys = settings.primary.display();
    let freehand_keys = settings.freehand.display();

    let hold = if primary_keys.is_empty() {
        "Push-to-talk: not set".to_string()
    } else {
        match settings.primary.mode {
            TriggerMode::Hold => format!(
                "Push-to-talk: hold {primary_keys} to speak, release to submit"
            ),
            TriggerMode::Toggle => {
                format!("Push-to-talk: press {primary_keys} to start/stop")
            }
        }
    };

    let toggle = if freehand_keys.is_empty() {
        "Freehand: not set".to_string()
    } else {
        match settings.freehand.mode {
            TriggerMode::Toggle => format!("Freehand: press {freehand_keys} to start/stop"),
            TriggerMode::Hold => format!("Freehand: hold {freehand_keys} to speak"),
        }
    };

    let mouse = if !settings.mouse.enabled {
        "Mouse mode: off".to_string()
    } else {
        match settings.mouse.mode {
            TriggerMode::Toggle => {
                "Mouse mode: click the middle button to start/stop recording".to_string()
            }
            TriggerMode::Hold => "Mouse mode: hold the middle button to record".to_string(),
        }
    };

    TutorialTexts { hold, toggle, mouse }
}
