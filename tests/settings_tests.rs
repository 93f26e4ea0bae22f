use just_talk_core::{RecognitionMode, SettingsStore, StoredSettings, TriggerMode};
use std::fs;
use tempfile::TempDir;

fn store_in(dir: &TempDir) -> SettingsStore {
    SettingsStore::new(dir.path().join("settings.json"))
}

#[test]
fn test_save_and_load_roundtrip() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    let mut settings = StoredSettings::default();
    settings.connection.app_id = "app-123".to_string();
    settings.connection.access_token = "token-abc".to_string();
    settings.connection.use_gzip = true;
    settings.connection.mode = RecognitionMode::Bidirectional;
    settings.hotkeys.primary.keys = vec!["right_ctrl".to_string()];
    settings.hotkeys.freehand.mode = TriggerMode::Hold;
    settings.hotkeys.mouse.enabled = true;

    store.save(&settings).unwrap();
    assert_eq!(store.load(), settings);
}

#[test]
fn test_missing_file_yields_defaults() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    assert_eq!(store.load(), StoredSettings::default());
    // Loading never creates the file
    assert!(!store.path().exists());
}

#[test]
fn test_corrupt_file_yields_defaults() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    fs::write(store.path(), "{ not json at all").unwrap();
    assert_eq!(store.load(), StoredSettings::default());
}

#[test]
fn test_partial_file_fills_missing_fields() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    // A file from an older version that only knows the connection block
    fs::write(
        store.path(),
        r#"{"connection": {"app_id": "app-123", "access_token": "t", "use_gzip": false, "mode": "bidi"}}"#,
    )
    .unwrap();

    let settings = store.load();
    assert_eq!(settings.connection.app_id, "app-123");
    assert_eq!(settings.connection.mode, RecognitionMode::Bidirectional);
    assert_eq!(settings.hotkeys, StoredSettings::default().hotkeys);
}

#[test]
fn test_save_creates_parent_directories() {
    let dir = TempDir::new().unwrap();
    let store = SettingsStore::new(dir.path().join("nested").join("deep").join("settings.json"));

    store.save(&StoredSettings::default()).unwrap();
    assert!(store.path().exists());
}

#[test]
fn test_reset_persists_defaults() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    let mut settings = StoredSettings::default();
    settings.connection.app_id = "app-123".to_string();
    store.save(&settings).unwrap();

    let reset = store.reset().unwrap();
    assert_eq!(reset, StoredSettings::default());
    assert_eq!(store.load(), StoredSettings::default());
}

#[test]
fn test_mode_serialized_as_wire_name() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    let mut settings = StoredSettings::default();
    settings.connection.mode = RecognitionMode::BidirectionalAsync;
    store.save(&settings).unwrap();

    let raw = fs::read_to_string(store.path()).unwrap();
    assert!(raw.contains("\"bidi_async\""));
}
