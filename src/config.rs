use crate::capture::keynames;
use crate::cli::{TrackArgs, DEFAULT_STOP_KEY};
use crate::session::persist::DEFAULT_LOG_FILE;
use crate::session::stats::WindowLimits;
use crate::session::SessionLimits;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_MOVE_THROTTLE: Duration = Duration::from_millis(100);
pub const DEFAULT_LIVE_INTERVAL: Duration = Duration::from_secs(1);

/// Settings for one tracking session.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Device nodes to read. Empty means stdin.
    pub devices: Vec<PathBuf>,
    /// Where the session is saved when tracking stops, if anywhere.
    pub output: Option<PathBuf>,
    pub limits: SessionLimits,
    pub move_throttle: Duration,
    /// Zero disables the live line.
    pub live_interval: Duration,
    /// Key symbol whose release ends the session.
    pub stop_key: String,
    pub ignore_repeats: bool,
    pub json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            devices: Vec::new(),
            output: Some(PathBuf::from(DEFAULT_LOG_FILE)),
            limits: SessionLimits::default(),
            move_throttle: DEFAULT_MOVE_THROTTLE,
            live_interval: DEFAULT_LIVE_INTERVAL,
            stop_key: DEFAULT_STOP_KEY.to_string(),
            ignore_repeats: false,
            json: false,
        }
    }
}

impl Config {
    pub fn live_enabled(&self) -> bool {
        !self.live_interval.is_zero()
    }
}

impl From<&TrackArgs> for Config {
    fn from(a: &TrackArgs) -> Self {
        // Unrecognised names are kept verbatim; they simply never match.
        let stop_key = keynames::resolve_key_symbol(&a.stop_key)
            .map(str::to_string)
            .unwrap_or_else(|| a.stop_key.to_ascii_lowercase());
        Self {
            devices: a.device.clone(),
            output: (!a.no_save).then(|| a.output.clone()),
            limits: SessionLimits {
                max_events: a.max_events,
                windows: WindowLimits {
                    capacity: a.window_capacity,
                    rate_window: *a.rate_window,
                },
            },
            move_throttle: *a.move_throttle,
            live_interval: *a.live_interval,
            stop_key,
            ignore_repeats: a.ignore_repeats,
            json: a.json,
        }
    }
}
