// Event Capture Adapter: reads raw evdev `input_event` records, decodes them
// into input notifications, and normalizes those into session event records.

pub mod keynames;

use crate::event::{EventData, EventKind};
use input_linux_sys::{input_event, EV_ABS, EV_KEY, EV_REL, EV_SYN};
use keynames::{button_name, key_symbol, BTN_MISC};
use std::fs::{self, File};
use std::io::{self, Read};
use std::mem::size_of;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

const SYN_REPORT: u16 = 0;
const REL_X: u16 = 0x00;
const REL_Y: u16 = 0x01;
const REL_HWHEEL: u16 = 0x06;
const REL_WHEEL: u16 = 0x08;
const ABS_X: u16 = 0x00;
const ABS_Y: u16 = 0x01;

/// Directory of stable per-device symlinks maintained by udev.
pub const BY_ID_DIR: &str = "/dev/input/by-id";

#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("cannot open input device {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("no keyboard or mouse devices found under {BY_ID_DIR}")]
    NoDevices,
}

/// What an input source reports, before it becomes a session event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputNotification {
    KeyDown { key: String },
    KeyUp { key: String },
    MouseMove { x: i32, y: i32 },
    MouseButton { x: i32, y: i32, button: String, pressed: bool },
    MouseScroll { x: i32, y: i32, dx: i32, dy: i32 },
}

impl InputNotification {
    /// Maps the notification onto the uniform event record.
    pub fn normalize(self) -> (EventKind, EventData) {
        match self {
            InputNotification::KeyDown { key } => (EventKind::KeyPress, EventData::key_press(key)),
            InputNotification::KeyUp { key } => (EventKind::KeyRelease, EventData::key_release(key)),
            InputNotification::MouseMove { x, y } => (EventKind::MouseMove, EventData::position(x, y)),
            InputNotification::MouseButton { x, y, button, pressed } => {
                let kind = if pressed {
                    EventKind::MouseClick
                } else {
                    EventKind::MouseRelease
                };
                (kind, EventData::button(x, y, button, pressed))
            }
            InputNotification::MouseScroll { x, y, dx, dy } => {
                (EventKind::MouseScroll, EventData::scroll(x, y, dx, dy))
            }
        }
    }

    /// True for the release of `key`, the cancel signal.
    pub fn is_release_of(&self, key: &str) -> bool {
        matches!(self, InputNotification::KeyUp { key: k } if k == key)
    }
}

/// Reads a single `input_event` from the reader. Returns Ok(None) on EOF.
pub fn read_event(reader: &mut impl Read) -> io::Result<Option<input_event>> {
    let mut buf = [0u8; size_of::<input_event>()];
    match reader.read_exact(&mut buf) {
        Ok(()) => {
            // SAFETY: input_event is plain old data and buf holds exactly one.
            let event: input_event = unsafe { std::ptr::read_unaligned(buf.as_ptr() as *const _) };
            Ok(Some(event))
        }
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(None),
        Err(e) => Err(e),
    }
}

/// Calculates the event timestamp in microseconds from its timeval.
#[inline]
pub fn event_microseconds(event: &input_event) -> u64 {
    (event.time.tv_sec.max(0) as u64) * 1_000_000 + (event.time.tv_usec.max(0) as u64)
}

/// Turns a raw evdev stream into [`InputNotification`]s.
///
/// Pointer position is accumulated from relative motion, or taken from
/// absolute axes when the device reports them. Moves and scrolls are emitted
/// once per `SYN_REPORT` frame; buttons and keys immediately.
#[derive(Debug, Clone)]
pub struct EvdevDecoder {
    x: i32,
    y: i32,
    moved: bool,
    scroll_dx: i32,
    scroll_dy: i32,
    last_move_us: Option<u64>,
    move_throttle_us: u64,
    ignore_repeats: bool,
}

impl EvdevDecoder {
    #[must_use]
    pub fn new(move_throttle: Duration, ignore_repeats: bool) -> Self {
        EvdevDecoder {
            x: 0,
            y: 0,
            moved: false,
            scroll_dx: 0,
            scroll_dy: 0,
            last_move_us: None,
            move_throttle_us: move_throttle.as_micros() as u64,
            ignore_repeats,
        }
    }

    pub fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    /// Feeds one raw event, calling `emit` for each notification it completes.
    pub fn feed(&mut self, event: &input_event, mut emit: impl FnMut(InputNotification)) {
        match i32::from(event.type_) {
            EV_KEY => self.feed_key(event.code, event.value, &mut emit),
            EV_REL => match event.code {
                REL_X => self.nudge(event.value, 0),
                REL_Y => self.nudge(0, event.value),
                REL_WHEEL => self.scroll_dy = self.scroll_dy.saturating_add(event.value),
                REL_HWHEEL => self.scroll_dx = self.scroll_dx.saturating_add(event.value),
                _ => {}
            },
            EV_ABS => match event.code {
                ABS_X if self.x != event.value => {
                    self.x = event.value;
                    self.moved = true;
                }
                ABS_Y if self.y != event.value => {
                    self.y = event.value;
                    self.moved = true;
                }
                _ => {}
            },
            EV_SYN if event.code == SYN_REPORT => self.end_frame(event_microseconds(event), &mut emit),
            _ => {}
        }
    }

    fn feed_key(&mut self, code: u16, value: i32, emit: &mut impl FnMut(InputNotification)) {
        if code < BTN_MISC {
            let key = key_symbol(code).to_string();
            match value {
                1 => emit(InputNotification::KeyDown { key }),
                0 => emit(InputNotification::KeyUp { key }),
                2 if !self.ignore_repeats => emit(InputNotification::KeyDown { key }),
                _ => {}
            }
        } else if let Some(button) = button_name(code) {
            if value == 0 || value == 1 {
                emit(InputNotification::MouseButton {
                    x: self.x,
                    y: self.y,
                    button: button.to_string(),
                    pressed: value == 1,
                });
            }
        }
        // Remaining BTN_* codes (touch tools, gamepads) are not keyboard or mouse input.
    }

    fn nudge(&mut self, dx: i32, dy: i32) {
        if dx == 0 && dy == 0 {
            return;
        }
        self.x = self.x.saturating_add(dx);
        self.y = self.y.saturating_add(dy);
        self.moved = true;
    }

    fn end_frame(&mut self, ts_us: u64, emit: &mut impl FnMut(InputNotification)) {
        if self.scroll_dx != 0 || self.scroll_dy != 0 {
            emit(InputNotification::MouseScroll {
                x: self.x,
                y: self.y,
                dx: self.scroll_dx,
                dy: self.scroll_dy,
            });
            self.scroll_dx = 0;
            self.scroll_dy = 0;
        }
        if self.moved {
            // A clock step backwards lets the move through.
            let due = match self.last_move_us {
                None => true,
                Some(last) => ts_us.checked_sub(last).map_or(true, |d| d >= self.move_throttle_us),
            };
            if due {
                emit(InputNotification::MouseMove { x: self.x, y: self.y });
                self.last_move_us = Some(ts_us);
                self.moved = false;
            }
        }
    }
}

/// A named byte stream of raw `input_event` records.
pub struct CaptureSource {
    pub label: String,
    pub reader: Box<dyn Read + Send>,
}

impl CaptureSource {
    pub fn new(label: impl Into<String>, reader: impl Read + Send + 'static) -> Self {
        CaptureSource {
            label: label.into(),
            reader: Box::new(reader),
        }
    }

    pub fn stdin() -> Self {
        CaptureSource::new("stdin", io::stdin())
    }

    pub fn open(path: &Path) -> Result<Self, CaptureError> {
        let file = File::open(path).map_err(|source| CaptureError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(CaptureSource::new(path.display().to_string(), file))
    }
}

impl std::fmt::Debug for CaptureSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaptureSource").field("label", &self.label).finish_non_exhaustive()
    }
}

/// Keyboard and mouse event nodes under `/dev/input/by-id`, sorted by path.
pub fn discover_devices() -> Vec<PathBuf> {
    discover_devices_in(Path::new(BY_ID_DIR))
}

pub fn discover_devices_in(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut found: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|e| e.path())
        .filter(|p| {
            p.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.ends_with("-event-kbd") || n.ends_with("-event-mouse"))
        })
        .collect();
    found.sort();
    found
}

/// Human-readable device name from sysfs, if available.
pub fn device_name(path: &Path) -> Option<String> {
    let node = fs::canonicalize(path).ok()?;
    let event = node.file_name()?.to_str()?;
    let name = fs::read_to_string(format!("/sys/class/input/{event}/device/name")).ok()?;
    Some(name.trim().to_string())
}

/// Opens every path, failing on the first that cannot be read.
pub fn open_all(paths: &[PathBuf]) -> Result<Vec<CaptureSource>, CaptureError> {
    if paths.is_empty() {
        return Err(CaptureError::NoDevices);
    }
    paths.iter().map(|p| CaptureSource::open(p)).collect()
}
