// This module defines the tracking Session: its lifecycle, the bounded event
// log, the rolling statistics, and conversion to the persisted document.

pub mod event_log;
pub mod frequency;
pub mod persist;
pub mod report;
pub mod ring;
pub mod stats;

use crate::event::{Event, EventData, EventKind};
use crate::util;
use event_log::{Counters, EventLog, DEFAULT_MAX_EVENTS};
use frequency::FrequencyTable;
use persist::{PersistError, SessionDocument, SessionInfo, Statistics};
use stats::{PerformanceSnapshot, RollingStats, WindowLimits};
use std::path::Path;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Tracking,
    Stopped,
}

/// Buffer sizes and the rate window for one session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionLimits {
    pub max_events: usize,
    pub windows: WindowLimits,
}

impl Default for SessionLimits {
    fn default() -> Self {
        SessionLimits {
            max_events: DEFAULT_MAX_EVENTS,
            windows: WindowLimits::default(),
        }
    }
}

/// One tracking session.
///
/// Idle until [`Session::start`], recording while Tracking, and frozen once
/// Stopped. A stopped session never restarts; build a new one instead.
#[derive(Debug, Clone)]
pub struct Session {
    state: SessionState,
    start_time: f64,
    stopped_at: Option<f64>,
    log: EventLog,
    rolling: RollingStats,
}

impl Default for Session {
    fn default() -> Self {
        Session::new(SessionLimits::default())
    }
}

impl Session {
    #[must_use]
    pub fn new(limits: SessionLimits) -> Self {
        Session {
            state: SessionState::Idle,
            start_time: util::now_secs(),
            stopped_at: None,
            log: EventLog::with_capacity(limits.max_events),
            rolling: RollingStats::new(limits.windows),
        }
    }

    pub fn start(&mut self) -> bool {
        self.start_at(util::now_secs())
    }

    /// Idle → Tracking, resetting the start time to `now`.
    pub fn start_at(&mut self, now: f64) -> bool {
        match self.state {
            SessionState::Idle => {
                self.state = SessionState::Tracking;
                self.start_time = now;
                info!(start = %util::iso_datetime(now), "Tracking started");
                true
            }
            SessionState::Tracking => {
                warn!("Tracker is already running");
                false
            }
            SessionState::Stopped => {
                warn!("Session already stopped; start a new session instead");
                false
            }
        }
    }

    pub fn stop(&mut self) -> bool {
        self.stop_at(util::now_secs())
    }

    /// Tracking → Stopped, freezing the duration. No-op in any other state.
    pub fn stop_at(&mut self, now: f64) -> bool {
        if self.state != SessionState::Tracking {
            return false;
        }
        self.state = SessionState::Stopped;
        self.stopped_at = Some(now);
        info!(
            duration = %util::format_duration(std::time::Duration::from_secs_f64(self.duration_at(now).max(0.0))),
            events = self.log.len(),
            "Tracking stopped"
        );
        true
    }

    pub fn record(&mut self, kind: EventKind, data: EventData) -> bool {
        self.record_at(util::now_secs(), kind, data)
    }

    /// Records an event stamped `timestamp`. Ignored unless Tracking.
    pub fn record_at(&mut self, timestamp: f64, kind: EventKind, data: EventData) -> bool {
        if self.state != SessionState::Tracking {
            debug!(%kind, state = ?self.state, "Event ignored outside tracking");
            return false;
        }
        match kind {
            EventKind::KeyPress => self.rolling.record_key(timestamp),
            k if k.is_click() => self.rolling.record_click(timestamp),
            _ => {}
        }
        self.log.push(Event::new(timestamp, self.start_time, kind, data));
        true
    }

    pub fn snapshot(&self) -> PerformanceSnapshot {
        self.snapshot_at(util::now_secs())
    }

    /// Full-precision performance metrics as of `now`.
    pub fn snapshot_at(&self, now: f64) -> PerformanceSnapshot {
        self.rolling.snapshot_at(now, self.start_time, self.log.len())
    }

    /// Elapsed time while Tracking, the frozen length once Stopped, zero when Idle.
    pub fn duration_at(&self, now: f64) -> f64 {
        match (self.state, self.stopped_at) {
            (SessionState::Idle, _) => 0.0,
            (SessionState::Stopped, Some(end)) => end - self.start_time,
            _ => now - self.start_time,
        }
    }

    pub fn duration(&self) -> f64 {
        self.duration_at(util::now_secs())
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_tracking(&self) -> bool {
        self.state == SessionState::Tracking
    }

    pub fn start_time(&self) -> f64 {
        self.start_time
    }

    pub fn event_log(&self) -> &EventLog {
        &self.log
    }

    pub fn events(&self) -> Vec<Event> {
        self.log.to_vec()
    }

    pub fn counters(&self) -> Counters {
        self.log.counters()
    }

    pub fn key_frequencies(&self) -> &FrequencyTable {
        self.log.key_frequencies()
    }

    pub fn click_frequencies(&self) -> &FrequencyTable {
        self.log.click_frequencies()
    }

    /// Builds the persisted form as of `now`.
    pub fn to_document_at(&self, now: f64) -> SessionDocument {
        let counters = self.counters();
        let duration = self.duration_at(now);
        SessionDocument {
            session_info: Some(SessionInfo {
                start_time: util::iso_datetime(self.start_time),
                duration,
                total_events: self.log.len(),
            }),
            statistics: Some(Statistics {
                total_keypresses: counters.total_keypresses,
                total_mouse_clicks: counters.total_mouse_clicks,
                total_mouse_moves: counters.total_mouse_moves,
                session_duration: duration,
                key_frequencies: self.key_frequencies().clone(),
                click_frequencies: self.click_frequencies().clone(),
            }),
            performance: Some(self.snapshot_at(now).rounded()),
            events: self.events(),
        }
    }

    pub fn to_document(&self) -> SessionDocument {
        self.to_document_at(util::now_secs())
    }

    /// Saves to `path`. A failure is logged and returned; the session itself
    /// is untouched either way.
    pub fn save(&self, path: &Path) -> Result<(), PersistError> {
        persist::save_document(&self.to_document(), path)
    }

    /// Analysis text for the live session.
    pub fn summary(&self) -> String {
        report::summarize(&self.to_document())
    }
}
