use just_talk_core::hotkeys::{
    format_keys, parse_combo, tutorial_texts, HotkeySettings, HotkeySlot, TriggerMode,
};
use just_talk_core::ControllerError;

fn keys(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_parse_combo_separators() {
    assert_eq!(parse_combo("ctrl+super"), keys(&["ctrl", "super"]));
    assert_eq!(parse_combo("ctrl, super"), keys(&["ctrl", "super"]));
    assert_eq!(parse_combo("Ctrl Super"), keys(&["ctrl", "super"]));
    assert_eq!(parse_combo("  alt +  f9 "), keys(&["alt", "f9"]));
}

#[test]
fn test_parse_combo_canonicalizes_aliases() {
    assert_eq!(parse_combo("Control+Win"), keys(&["ctrl", "super"]));
    assert_eq!(parse_combo("ctl+cmd"), keys(&["ctrl", "super"]));
    assert_eq!(parse_combo("Option+Command"), keys(&["alt", "super"]));
    assert_eq!(parse_combo("windows"), keys(&["super"]));
}

#[test]
fn test_parse_combo_side_prefixes() {
    // Right-side keys are distinct; left is the default and is stripped
    assert_eq!(parse_combo("Right Ctrl"), keys(&["right_ctrl"]));
    assert_eq!(parse_combo("right_alt + f1"), keys(&["right_alt", "f1"]));
    assert_eq!(parse_combo("Left Shift + A"), keys(&["shift", "a"]));
    assert_eq!(parse_combo("right win"), keys(&["right_super"]));
}

#[test]
fn test_parse_combo_dedups_preserving_order() {
    assert_eq!(parse_combo("ctrl+control+super"), keys(&["ctrl", "super"]));
    assert_eq!(parse_combo("super+ctrl+super"), keys(&["super", "ctrl"]));
}

#[test]
fn test_parse_combo_empty_input() {
    assert!(parse_combo("").is_empty());
    assert!(parse_combo("  + , ").is_empty());
}

#[test]
fn test_format_keys_labels() {
    assert_eq!(format_keys(&keys(&["ctrl", "super"])), "Ctrl + Super");
    assert_eq!(format_keys(&keys(&["right_ctrl"])), "Right Ctrl");
    assert_eq!(format_keys(&keys(&["alt", "f9"])), "Alt + F9");
    assert_eq!(format_keys(&keys(&["page_up"])), "Page Up");
    assert_eq!(format_keys(&[]), "");
}

#[test]
fn test_default_bindings() {
    let settings = HotkeySettings::default();

    assert_eq!(settings.primary.keys, keys(&["ctrl", "super"]));
    assert_eq!(settings.primary.mode, TriggerMode::Hold);
    assert!(settings.primary.enabled);

    assert_eq!(settings.freehand.keys, keys(&["alt", "super"]));
    assert_eq!(settings.freehand.mode, TriggerMode::Toggle);
    assert!(settings.freehand.enabled);

    assert_eq!(settings.mouse.keys, keys(&["middle"]));
    assert_eq!(settings.mouse.mode, TriggerMode::Hold);
    assert!(!settings.mouse.enabled);
}

#[test]
fn test_slot_parse() {
    assert_eq!(HotkeySlot::parse("primary"), Ok(HotkeySlot::Primary));
    assert_eq!(HotkeySlot::parse("Freehand"), Ok(HotkeySlot::Freehand));
    assert_eq!(HotkeySlot::parse("mouse"), Ok(HotkeySlot::Mouse));
    assert_eq!(HotkeySlot::parse("middle_button"), Ok(HotkeySlot::Mouse));
    assert_eq!(
        HotkeySlot::parse("pedal"),
        Err(ControllerError::InvalidSlot("pedal".to_string()))
    );
}

#[test]
fn test_tutorial_texts_defaults() {
    let texts = tutorial_texts(&HotkeySettings::default());
    assert_eq!(
        texts.hold,
        "Push-to-talk: hold Ctrl + Super to speak, release to submit"
    );
    assert_eq!(texts.toggle, "Freehand: press Alt + Super to start/stop");
    assert_eq!(texts.mouse, "Mouse mode: off");
}

#[test]
fn test_tutorial_texts_follow_trigger_mode() {
    let mut settings = HotkeySettings::default();
    settings.primary.mode = TriggerMode::Toggle;
    settings.freehand.mode = TriggerMode::Hold;
    settings.mouse.enabled = true;
    settings.mouse.mode = TriggerMode::Toggle;

    let texts = tutorial_texts(&settings);
    assert_eq!(
        texts.hold,
        "Push-to-talk: press Ctrl + Super to start/stop"
    );
    assert_eq!(texts.toggle, "Freehand: hold Alt + Super to speak");
    assert_eq!(
        texts.mouse,
        "Mouse mode: click the middle button to start/stop recording"
    );
}

#[test]
fn test_tutorial_texts_unset_bindings() {
    let mut settings = HotkeySettings::default();
    settings.primary.keys.clear();
    settings.freehand.keys.clear();

    let texts = tutorial_texts(&settings);
    assert_eq!(texts.hold, "Push-to-talk: not set");
    assert_eq!(texts.toggle, "Freehand: not set");
}
