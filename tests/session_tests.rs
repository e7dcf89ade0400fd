//! Session scenarios: counters, frequency tables, eviction, lifecycle and the
//! saved-file round trip.

use input_tracker::event::{EventData, EventKind};
use input_tracker::session::persist::{load_document, save_document};
use input_tracker::session::report::summarize;
use input_tracker::session::{Session, SessionState};
use test_helpers::*;

#[test]
fn repeated_keys_count_per_symbol() {
    let mut s = tracking_session(100);
    press(&mut s, 0.1, "a");
    press(&mut s, 0.2, "b");
    press(&mut s, 0.3, "a");

    assert_eq!(s.counters().total_keypresses, 3);
    let freq: Vec<_> = s.key_frequencies().iter().collect();
    assert_eq!(freq, vec![("a", 2), ("b", 1)]);
    assert_eq!(s.event_log().len(), 3);
}

#[test]
fn eviction_keeps_newest_but_counts_everything() {
    let mut s = tracking_session(2);
    press(&mut s, 1.0, "x");
    press(&mut s, 2.0, "y");
    press(&mut s, 3.0, "z");

    let kept: Vec<_> = s
        .event_log()
        .iter()
        .map(|e| e.data.key_symbol().to_string())
        .collect();
    assert_eq!(kept, vec!["y", "z"]);
    assert_eq!(s.counters().total_keypresses, 3);
    assert_eq!(s.key_frequencies().get("x"), 1);
}

#[test]
fn releases_and_moves_update_their_counters() {
    let mut s = tracking_session(100);
    click(&mut s, 0.5, "left");
    s.record_at(T0 + 0.6, EventKind::MouseRelease, EventData::button(0, 0, "left", false));
    move_to(&mut s, 0.7, 10, 10);
    s.record_at(T0 + 0.8, EventKind::KeyRelease, EventData::key_release("a"));
    s.record_at(T0 + 0.9, EventKind::MouseScroll, EventData::scroll(10, 10, 0, -1));

    let c = s.counters();
    assert_eq!(c.total_mouse_clicks, 2);
    assert_eq!(c.total_mouse_moves, 1);
    assert_eq!(c.total_keypresses, 0);
    assert_eq!(s.click_frequencies().get("left"), 2);
    assert_eq!(s.event_log().len(), 5);
}

#[test]
fn missing_symbols_are_unknown() {
    let mut s = tracking_session(10);
    s.record_at(T0 + 1.0, EventKind::KeyPress, EventData::default());
    s.record_at(T0 + 1.1, EventKind::MouseClick, EventData::default());
    assert_eq!(s.key_frequencies().get("unknown"), 1);
    assert_eq!(s.click_frequencies().get("unknown"), 1);
}

#[test]
fn stop_is_idempotent() {
    let mut s = tracking_session(10);
    press(&mut s, 1.0, "a");
    assert!(s.stop_at(T0 + 5.0));
    assert!(!s.stop_at(T0 + 9.0));
    assert_eq!(s.state(), SessionState::Stopped);
    assert_eq!(s.duration_at(T0 + 100.0), 5.0);
    assert!(!press(&mut s, 6.0, "b"));
    assert_eq!(s.counters().total_keypresses, 1);
}

#[test]
fn snapshot_of_empty_session_is_zero() {
    let s = tracking_session(10);
    let snap = s.snapshot_at(T0 + 3.0);
    assert_eq!(snap.clicks_per_second, 0.0);
    assert_eq!(snap.keys_per_second, 0.0);
    assert_eq!(snap.avg_key_interval_ms, 0.0);
    assert_eq!(snap.total_events, 0);
    assert_eq!(snap.session_duration, 3.0);
}

#[test]
fn rates_follow_trailing_window() {
    let mut s = tracking_session(100);
    for i in 0..20 {
        press(&mut s, 10.0 + i as f64 * 0.5, "w");
    }
    // Presses at 10.0..=19.5; at t=20 all 20 sit inside the 10 s window.
    let snap = s.snapshot_at(T0 + 20.0);
    assert!((snap.keys_per_second - 2.0).abs() < 1e-9, "{snap:?}");
    assert!((snap.avg_key_interval_ms - 500.0).abs() < 1e-6);
}

#[test]
fn empty_session_saves_and_reports_zero() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.json");
    let mut s = tracking_session(10);
    s.stop_at(T0 + 1.0);
    s.save(&path).unwrap();

    let doc = load_document(&path).unwrap();
    assert!(doc.events.is_empty());
    let text = summarize(&doc);
    assert!(text.contains("Total Keypresses: 0"));
    assert!(text.contains("Total Mouse Clicks: 0"));
    assert!(!text.contains("MOST USED KEYS"));
    assert!(!text.contains("MOUSE BUTTON USAGE"));
}

#[test]
fn saved_file_reloads_same_document() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    let mut s = tracking_session(100);
    press(&mut s, 0.25, "a");
    click(&mut s, 0.5, "right");
    move_to(&mut s, 0.75, -3, 40);
    s.stop_at(T0 + 2.0);

    let doc = s.to_document_at(T0 + 2.0);
    save_document(&doc, &path).unwrap();
    let loaded = load_document(&path).unwrap();
    assert_eq!(loaded, doc);

    let raw: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(raw["events"][0]["type"], "keypress");
    assert_eq!(raw["events"][1]["data"]["button"], "right");
    assert_eq!(raw["statistics"]["click_frequencies"]["right"], 1);
    assert!(raw["performance"]["cps"].is_number());
}

#[test]
fn fresh_session_is_idle() {
    let s = Session::default();
    assert_eq!(s.state(), SessionState::Idle);
    assert!(s.event_log().is_empty());
}
