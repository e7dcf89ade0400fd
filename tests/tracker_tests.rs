//! End-to-end runs of the tracker over in-memory capture sources.

use input_tracker::capture::CaptureSource;
use input_tracker::config::Config;
use input_tracker::logger::{LogMessage, StopReason};
use input_tracker::tracker::Tracker;
use input_tracker::SessionState;
use std::io::{self, Cursor, Read};
use std::time::Duration;

use test_helpers::*;

fn config() -> Config {
    Config {
        output: None,
        live_interval: Duration::ZERO,
        ..Config::default()
    }
}

fn source(label: &str, events: &[input_linux_sys::input_event]) -> CaptureSource {
    CaptureSource::new(label, Cursor::new(events_to_bytes(events)))
}

/// A reader that never returns, like an idle device node.
struct Idle;

impl Read for Idle {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        std::thread::sleep(Duration::from_secs(3600));
        Ok(0)
    }
}

/// Fails after the bytes it was given.
struct Broken(Cursor<Vec<u8>>);

impl Read for Broken {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.0.read(buf)? {
            0 => Err(io::Error::new(io::ErrorKind::Other, "device unplugged")),
            n => Ok(n),
        }
    }
}

#[test]
fn merges_keyboard_and_mouse_sources() {
    let mut keyboard = tap(0, KEY_A);
    keyboard.extend(tap(50_000, KEY_B));
    let mouse = vec![
        key_ev(0, BTN_RIGHT, 1),
        syn_ev(0),
        key_ev(10_000, BTN_RIGHT, 0),
        syn_ev(10_000),
        rel_ev(20_000, REL_WHEEL, -1),
        syn_ev(20_000),
    ];

    let outcome = Tracker::new(config())
        .run(vec![source("kbd", &keyboard), source("mouse", &mouse)])
        .unwrap();
    assert_eq!(outcome.reason, StopReason::SourcesClosed);

    let session = outcome.session;
    assert_eq!(session.state(), SessionState::Stopped);
    assert_eq!(session.counters().total_keypresses, 2);
    assert_eq!(session.counters().total_mouse_clicks, 2);
    assert_eq!(session.click_frequencies().get("right"), 2);
    assert_eq!(session.event_log().len(), 7);
}

#[test]
fn read_error_closes_only_that_source() {
    let broken = Broken(Cursor::new(events_to_bytes(&tap(0, KEY_C))));
    let outcome = Tracker::new(config())
        .run(vec![
            CaptureSource::new("broken", broken),
            source("kbd", &tap(0, KEY_A)),
        ])
        .unwrap();
    assert_eq!(outcome.reason, StopReason::SourcesClosed);
    assert_eq!(outcome.session.counters().total_keypresses, 2);
}

#[test]
fn shutdown_stops_with_idle_source() {
    let tracker = Tracker::new(config());
    let sender = tracker.sender();
    let stopper = std::thread::spawn(move || {
        std::thread::sleep(Duration::from_millis(50));
        sender.send(LogMessage::Shutdown).unwrap();
    });
    let outcome = tracker
        .run(vec![CaptureSource::new("idle", Idle)])
        .unwrap();
    stopper.join().unwrap();
    assert_eq!(outcome.reason, StopReason::Shutdown);
    assert!(outcome.session.event_log().is_empty());
}

#[test]
fn stop_key_wins_over_remaining_input() {
    let mut events = tap(0, KEY_A);
    events.extend(tap(1_000, KEY_ESC));
    for i in 0..50 {
        events.extend(tap(10_000 + i * 2_000, KEY_B));
    }
    let outcome = Tracker::new(config()).run(vec![source("kbd", &events)]).unwrap();
    assert_eq!(outcome.reason, StopReason::StopKey);
    assert_eq!(outcome.session.key_frequencies().get("b"), 0);
}

#[test]
fn absolute_pointer_and_throttle() {
    let events = vec![
        abs_ev(0, ABS_X, 100),
        abs_ev(0, ABS_Y, 50),
        syn_ev(0),
        abs_ev(20_000, ABS_X, 110),
        syn_ev(20_000),
        abs_ev(200_000, ABS_X, 120),
        syn_ev(200_000),
    ];
    let outcome = Tracker::new(config()).run(vec![source("tablet", &events)]).unwrap();
    let moves: Vec<_> = outcome
        .session
        .event_log()
        .iter()
        .map(|e| (e.data.x, e.data.y))
        .collect();
    assert_eq!(moves, vec![(Some(100), Some(50)), (Some(120), Some(50))]);
    assert_eq!(outcome.session.counters().total_mouse_moves, 2);
}

#[test]
fn concurrent_sources_log_in_time_order() {
    for _ in 0..5 {
        let mut keyboard = Vec::new();
        let mut mouse = Vec::new();
        for i in 0..2_000u64 {
            keyboard.extend(tap(i * 2_000, KEY_A));
            mouse.push(key_ev(i * 2_000, BTN_LEFT, 1));
            mouse.push(key_ev(i * 2_000 + 500, BTN_LEFT, 0));
        }
        let outcome = Tracker::new(Config {
            limits: input_tracker::SessionLimits {
                max_events: 16_000,
                ..Default::default()
            },
            ..config()
        })
        .run(vec![source("kbd", &keyboard), source("mouse", &mouse)])
        .unwrap();

        let times: Vec<f64> = outcome.session.event_log().iter().map(|e| e.timestamp).collect();
        assert_eq!(times.len(), 8_000);
        let inversions = times.windows(2).filter(|w| w[1] < w[0]).count();
        assert_eq!(inversions, 0, "event log is not chronological");
    }
}
