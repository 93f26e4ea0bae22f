use just_talk_core::{ControllerError, HistoryEntry, HistoryLog, SessionStats};

fn entry(text: &str, partial: bool) -> HistoryEntry {
    HistoryEntry::new("2024-01-01 10:00:00", text, partial)
}

#[test]
fn test_insert_update_remove_matches_reference_model() {
    // Model-based check: the log must behave exactly like a plain Vec
    // executing the same operations.
    let mut log = HistoryLog::new();
    let mut reference: Vec<HistoryEntry> = Vec::new();

    // Deterministic pseudo-random op sequence (LCG)
    let mut seed: u64 = 0x2545_f491_4f6c_dd1d;
    let mut next = || {
        seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        (seed >> 33) as usize
    };

    for i in 0..500 {
        let op = next() % 4;
        match op {
            0 => {
                let row = if reference.is_empty() { 0 } else { next() % (reference.len() + 1) };
                let e = entry(&format!("utterance {i}"), i % 3 == 0);
                log.insert(row, e.clone()).unwrap();
                reference.insert(row, e);
            }
            1 if !reference.is_empty() => {
                let row = next() % reference.len();
                let text = format!("edited {i}");
                log.update_text(row, &text).unwrap();
                reference[row].text = text;
            }
            2 if !reference.is_empty() => {
                let row = next() % reference.len();
                let removed = log.remove(row).unwrap();
                let expected = reference.remove(row);
                assert_eq!(removed, expected);
            }
            _ => {
                assert_eq!(log.len(), reference.len());
            }
        }
        assert_eq!(log.snapshot(), reference);
    }
}

#[test]
fn test_update_text_never_changes_length_or_order() {
    let mut log = HistoryLog::new();
    for i in 0..5 {
        log.insert(i, entry(&format!("row {i}"), false)).unwrap();
    }
    let before: Vec<String> = log.snapshot().iter().map(|e| e.timestamp.clone()).collect();

    log.update_text(2, "rewritten").unwrap();

    assert_eq!(log.len(), 5);
    let after: Vec<String> = log.snapshot().iter().map(|e| e.timestamp.clone()).collect();
    assert_eq!(before, after);
    assert_eq!(log.get(2).unwrap().text, "rewritten");
    assert_eq!(log.get(1).unwrap().text, "row 1");
    assert_eq!(log.get(3).unwrap().text, "row 3");
}

#[test]
fn test_remove_shifts_higher_rows_down_by_one() {
    let mut log = HistoryLog::new();
    for i in 0..5 {
        log.insert(i, entry(&format!("row {i}"), false)).unwrap();
    }

    log.remove(2).unwrap();

    assert_eq!(log.len(), 4);
    // Rows below the removed index are untouched
    assert_eq!(log.get(0).unwrap().text, "row 0");
    assert_eq!(log.get(1).unwrap().text, "row 1");
    // Rows above shifted down by exactly one
    assert_eq!(log.get(2).unwrap().text, "row 3");
    assert_eq!(log.get(3).unwrap().text, "row 4");
}

#[test]
fn test_out_of_range_rows_fail_loudly() {
    let mut log = HistoryLog::new();
    log.insert(0, entry("only", false)).unwrap();

    assert_eq!(
        log.update_text(1, "nope"),
        Err(ControllerError::RowOutOfRange { row: 1, len: 1 })
    );
    assert_eq!(
        log.remove(7),
        Err(ControllerError::RowOutOfRange { row: 7, len: 1 })
    );
    assert_eq!(
        log.insert(3, entry("nope", false)),
        Err(ControllerError::RowOutOfRange { row: 3, len: 1 })
    );
    // Nothing was clamped or applied
    assert_eq!(log.len(), 1);
    assert_eq!(log.get(0).unwrap().text, "only");
}

#[test]
fn test_partial_row_finalized_in_place() {
    // Interim-result replacement: insert a partial row, then finalize it.
    let mut log = HistoryLog::new();
    log.insert(0, HistoryEntry::new("2024-01-01 10:00:00", "hello", true))
        .unwrap();

    let changed = log.update(0, Some("hello world"), Some(false), None).unwrap();
    assert!(changed);

    let snapshot = log.snapshot();
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].text, "hello world");
    assert!(!snapshot[0].partial);
    assert_eq!(snapshot[0].timestamp, "2024-01-01 10:00:00");

    assert_eq!(log.char_count(), 11);
    let stats = SessionStats::compute(0.0, log.char_count());
    assert_eq!(stats.chars, 11);
}

#[test]
fn test_clear_empties_log() {
    let mut log = HistoryLog::new();
    for i in 0..3 {
        log.insert(i, entry("x", false)).unwrap();
    }
    log.clear();
    assert!(log.is_empty());
    assert_eq!(log.char_count(), 0);
    // Row 0 is out of range again
    assert_eq!(
        log.update_text(0, "y"),
        Err(ControllerError::RowOutOfRange { row: 0, len: 0 })
    );
}

#[test]
fn test_stats_compute() {
    let stats = SessionStats::compute(0.0, 0);
    assert_eq!(stats.chars, 0);
    assert_eq!(stats.speed, 0);
    assert_eq!(stats.duration_text, "00:00");

    let stats = SessionStats::compute(90.0, 300);
    assert_eq!(stats.duration_text, "01:30");
    assert_eq!(stats.speed, 200); // 300 chars in 1.5 minutes

    let stats = SessionStats::compute(0.0, 42);
    assert_eq!(stats.speed, 0); // no recorded time yet
}
