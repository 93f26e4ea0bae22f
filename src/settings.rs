use crate::controller::{Credentials, RecognitionMode};
use crate::hotkeys::HotkeySettings;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Connection fields persisted across restarts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionSettings {
    pub app_id: String,
    pub access_token: String,
    pub use_gzip: bool,
    pub mode: RecognitionMode,
}

impl ConnectionSettings {
    pub fn credentials(&self) -> Credentials {
        Credentials {
            app_id: self.app_id.clone(),
            access_token: self.access_token.clone(),
        }
    }
}

/// Everything the controller persists: connection fields plus the three
/// hotkey bindings. History and live statistics are deliberately not stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoredSettings {
    pub connection: ConnectionSettings,
    pub hotkeys: HotkeySettings,
}

/// JSON-file settings store.
///
/// Loading never fails: a missing or unreadable file yields defaults, a
/// corrupt file is logged and replaced by defaults on the next save. Saves
/// write to a sibling temp file and rename over the target.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load settings, falling back to defaults when the file is missing or
    /// cannot be parsed.
    pub fn load(&self) -> StoredSettings {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(_) => return StoredSettings::default(),
        };
        match serde_json::from_str(&raw) {
            Ok(settings) => settings,
            Err(e) => {
                warn!(
                    "Failed to parse settings at {}: {}. Using defaults.",
                    self.path.display(),
                    e
                );
                StoredSettings::default()
            }
        }
    }

    /// Persist settings atomically (write temp file, then rename).
    pub fn save(&self, settings: &StoredSettings) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
        }
        let json = serde_json::to_string_pretty(settings)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).with_context(|| format!("Failed to write {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("Failed to replace {}", self.path.display()))?;
        Ok(())
    }

    /// Reset to defaults and persist them.
    pub fn reset(&self) -> Result<StoredSettings> {
        let settings = StoredSettings::default();
        self.save(&settings)?;
        Ok(settings)
    }
}
