//! Common helper functions for tests and benchmarks.
use input_linux_sys::{input_event, timeval, EV_ABS, EV_KEY, EV_REL, EV_SYN};
use input_tracker::event::{EventData, EventKind};
use input_tracker::session::{Session, SessionLimits};
use std::mem::size_of;

// --- Constants ---
pub const KEY_ESC: u16 = 1;
pub const KEY_A: u16 = 30;
pub const KEY_B: u16 = 48;
pub const KEY_C: u16 = 46;
pub const KEY_W: u16 = 17;
pub const BTN_LEFT: u16 = 0x110;
pub const BTN_RIGHT: u16 = 0x111;
pub const REL_X: u16 = 0x00;
pub const REL_Y: u16 = 0x01;
pub const REL_WHEEL: u16 = 0x08;
pub const ABS_X: u16 = 0x00;
pub const ABS_Y: u16 = 0x01;

/// Session start used by the fixed-clock helpers below.
pub const T0: f64 = 1_700_000_000.0;

// --- Event Creation Helpers ---

fn raw_ev(ts_us: u64, type_: i32, code: u16, value: i32) -> input_event {
    input_event {
        time: timeval {
            tv_sec: (ts_us / 1_000_000) as _,
            tv_usec: (ts_us % 1_000_000) as _,
        },
        type_: type_ as u16,
        code,
        value,
    }
}

/// Creates an EV_KEY input_event (value 1 press, 0 release, 2 repeat).
pub fn key_ev(ts_us: u64, code: u16, value: i32) -> input_event {
    raw_ev(ts_us, EV_KEY, code, value)
}

/// Creates an EV_REL input_event.
pub fn rel_ev(ts_us: u64, code: u16, value: i32) -> input_event {
    raw_ev(ts_us, EV_REL, code, value)
}

/// Creates an EV_ABS input_event.
pub fn abs_ev(ts_us: u64, code: u16, value: i32) -> input_event {
    raw_ev(ts_us, EV_ABS, code, value)
}

/// Creates a SYN_REPORT input_event.
pub fn syn_ev(ts_us: u64) -> input_event {
    raw_ev(ts_us, EV_SYN, 0, 0)
}

/// A full key tap: press, report, release, report.
pub fn tap(ts_us: u64, code: u16) -> Vec<input_event> {
    vec![
        key_ev(ts_us, code, 1),
        syn_ev(ts_us),
        key_ev(ts_us + 1_000, code, 0),
        syn_ev(ts_us + 1_000),
    ]
}

/// Serializes events into the byte stream a device node or pipe delivers.
pub fn events_to_bytes(events: &[input_event]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(events.len() * size_of::<input_event>());
    for ev in events {
        // SAFETY: input_event is plain old data.
        let raw = unsafe {
            std::slice::from_raw_parts(ev as *const input_event as *const u8, size_of::<input_event>())
        };
        bytes.extend_from_slice(raw);
    }
    bytes
}

// --- Session Helpers ---

/// A session started at [`T0`].
pub fn tracking_session(max_events: usize) -> Session {
    let mut session = Session::new(SessionLimits {
        max_events,
        ..SessionLimits::default()
    });
    session.start_at(T0);
    session
}

/// Records a key press `offset` seconds after [`T0`].
pub fn press(session: &mut Session, offset: f64, key: &str) -> bool {
    session.record_at(T0 + offset, EventKind::KeyPress, EventData::key_press(key))
}

/// Records a button click `offset` seconds after [`T0`].
pub fn click(session: &mut Session, offset: f64, button: &str) -> bool {
    session.record_at(T0 + offset, EventKind::MouseClick, EventData::button(0, 0, button, true))
}

/// Records a pointer move `offset` seconds after [`T0`].
pub fn move_to(session: &mut Session, offset: f64, x: i32, y: i32) -> bool {
    session.record_at(T0 + offset, EventKind::MouseMove, EventData::position(x, y))
}
