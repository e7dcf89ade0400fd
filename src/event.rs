//! The normalized event record stored in the session log.

use crate::util;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Symbol used whenever a payload lacks the field a table is keyed by.
pub const UNKNOWN_SYMBOL: &str = "unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    #[serde(rename = "keypress")]
    KeyPress,
    #[serde(rename = "keyrelease")]
    KeyRelease,
    #[serde(rename = "mouse_click")]
    MouseClick,
    #[serde(rename = "mouse_release")]
    MouseRelease,
    #[serde(rename = "mouse_move")]
    MouseMove,
    #[serde(rename = "mouse_scroll")]
    MouseScroll,
}

impl EventKind {
    pub const ALL: [EventKind; 6] = [
        EventKind::KeyPress,
        EventKind::KeyRelease,
        EventKind::MouseClick,
        EventKind::MouseRelease,
        EventKind::MouseMove,
        EventKind::MouseScroll,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::KeyPress => "keypress",
            EventKind::KeyRelease => "keyrelease",
            EventKind::MouseClick => "mouse_click",
            EventKind::MouseRelease => "mouse_release",
            EventKind::MouseMove => "mouse_move",
            EventKind::MouseScroll => "mouse_scroll",
        }
    }

    #[inline]
    pub fn is_click(self) -> bool {
        matches!(self, EventKind::MouseClick | EventKind::MouseRelease)
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Type-specific payload. Which fields are present depends on the event kind;
/// absent fields are simply omitted from the JSON object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub button: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient_coord")]
    pub x: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient_coord")]
    pub y: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient_coord")]
    pub dx: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient_coord")]
    pub dy: Option<i32>,
}

/// Accepts integer or float coordinates; floats are rounded and every value
/// saturates to the `i32` range.
fn lenient_coord<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Coord {
        Int(i64),
        Float(f64),
    }

    Ok(Option::<Coord>::deserialize(deserializer)?.map(|c| match c {
        Coord::Int(i) => i.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32,
        // `as` saturates, and maps NaN to zero.
        Coord::Float(f) => f.round() as i32,
    }))
}

impl EventData {
    pub fn key_press(key: impl Into<String>) -> Self {
        EventData {
            key: Some(key.into()),
            action: Some("press".to_string()),
            ..EventData::default()
        }
    }

    pub fn key_release(key: impl Into<String>) -> Self {
        EventData {
            key: Some(key.into()),
            action: Some("release".to_string()),
            ..EventData::default()
        }
    }

    pub fn button(x: i32, y: i32, button: impl Into<String>, pressed: bool) -> Self {
        EventData {
            button: Some(button.into()),
            action: Some(if pressed { "click" } else { "release" }.to_string()),
            x: Some(x),
            y: Some(y),
            ..EventData::default()
        }
    }

    pub fn position(x: i32, y: i32) -> Self {
        EventData {
            x: Some(x),
            y: Some(y),
            ..EventData::default()
        }
    }

    pub fn scroll(x: i32, y: i32, dx: i32, dy: i32) -> Self {
        EventData {
            x: Some(x),
            y: Some(y),
            dx: Some(dx),
            dy: Some(dy),
            ..EventData::default()
        }
    }

    /// Key symbol, or `"unknown"` when missing.
    pub fn key_symbol(&self) -> &str {
        self.key.as_deref().unwrap_or(UNKNOWN_SYMBOL)
    }

    /// Button identifier, or `"unknown"` when missing.
    pub fn button_symbol(&self) -> &str {
        self.button.as_deref().unwrap_or(UNKNOWN_SYMBOL)
    }
}

/// One captured input event. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Seconds since the Unix epoch.
    pub timestamp: f64,
    /// Seconds since the owning session started.
    pub relative_time: f64,
    /// Local ISO-8601 rendering of `timestamp`.
    pub datetime: String,
    #[serde(rename = "type")]
    pub kind: EventKind,
    #[serde(default)]
    pub data: EventData,
}

impl Event {
    pub fn new(timestamp: f64, session_start: f64, kind: EventKind, data: EventData) -> Self {
        Event {
            timestamp,
            relative_time: timestamp - session_start,
            datetime: util::iso_datetime(timestamp),
            kind,
            data,
        }
    }
}
