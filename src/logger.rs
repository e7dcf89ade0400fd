// This module defines the Logger thread, the single owner of the tracking
// Session. Reader threads send it input notifications; it applies them in
// arrival order, prints the live statistics line, and hands the finished
// session back when tracking stops.

use crate::capture::InputNotification;
use crate::session::stats::PerformanceSnapshot;
use crate::session::Session;
use crate::util;
use colored::*;
use crossbeam_channel::{Receiver, RecvTimeoutError};
use std::io::{self, Write};
use std::time::{Duration, Instant};
use tracing::{debug, info, trace, warn};

/// A message sent from a reader thread (or the signal handler) to the logger.
#[derive(Debug)]
pub enum LogMessage {
    /// One decoded notification. The logger stamps it on receipt.
    Input { notification: InputNotification },
    /// A capture source hit EOF or a read error.
    SourceClosed { label: String },
    /// Stop requested from outside, e.g. SIGINT.
    Shutdown,
}

/// Why the logger loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    StopKey,
    Shutdown,
    SourcesClosed,
    Disconnected,
}

/// Settings the logger needs from the session config.
#[derive(Debug, Clone)]
pub struct LoggerOptions {
    pub stop_key: String,
    /// Zero disables the live line.
    pub live_interval: Duration,
    pub sources: usize,
}

pub struct Logger {
    receiver: Receiver<LogMessage>,
    session: Session,
    stop_key: String,
    live_interval: Duration,
    open_sources: usize,
    last_live: Instant,
    live_shown: bool,
    last_stamp: f64,
}

impl Logger {
    /// Creates a logger around `session`, which is started here if still Idle.
    pub fn new(receiver: Receiver<LogMessage>, mut session: Session, options: LoggerOptions) -> Self {
        if !session.is_tracking() {
            session.start();
        }
        Logger {
            receiver,
            session,
            stop_key: options.stop_key,
            live_interval: options.live_interval,
            open_sources: options.sources,
            last_live: Instant::now(),
            live_shown: false,
            last_stamp: f64::NEG_INFINITY,
        }
    }

    /// Runs until a stop trigger arrives, then stops the session and returns it.
    pub fn run(mut self) -> (Session, StopReason) {
        let reason = self.receive_loop();
        if self.live_shown {
            // Leave the carriage-returned live line intact.
            eprintln!();
        }
        self.session.stop();
        info!(?reason, events = self.session.event_log().len(), "Logger finished");
        (self.session, reason)
    }

    fn receive_loop(&mut self) -> StopReason {
        // Wake at least this often to keep the live line on schedule.
        let tick = if self.live_interval.is_zero() {
            Duration::from_millis(250)
        } else {
            self.live_interval.min(Duration::from_millis(250))
        };

        loop {
            if !self.live_interval.is_zero() && self.last_live.elapsed() >= self.live_interval {
                self.print_live();
                self.last_live = Instant::now();
            }

            match self.receiver.recv_timeout(tick) {
                Ok(msg) => {
                    if let Some(reason) = self.process_message(msg) {
                        return reason;
                    }
                }
                Err(RecvTimeoutError::Timeout) => continue,
                Err(RecvTimeoutError::Disconnected) => {
                    debug!("Logger channel disconnected");
                    return StopReason::Disconnected;
                }
            }
        }
    }

    /// Applies one message. Returns a reason when it ends the session.
    fn process_message(&mut self, msg: LogMessage) -> Option<StopReason> {
        match msg {
            LogMessage::Input { notification } => {
                let stop = notification.is_release_of(&self.stop_key);
                let (kind, data) = notification.normalize();
                trace!(%kind, ?data, "Input");
                let timestamp = self.stamp(util::now_secs());
                self.session.record_at(timestamp, kind, data);
                if stop {
                    info!(key = %self.stop_key, "Stop key released");
                    return Some(StopReason::StopKey);
                }
                None
            }
            LogMessage::SourceClosed { label } => {
                self.open_sources = self.open_sources.saturating_sub(1);
                info!(source = %label, remaining = self.open_sources, "Capture source closed");
                (self.open_sources == 0).then_some(StopReason::SourcesClosed)
            }
            LogMessage::Shutdown => Some(StopReason::Shutdown),
        }
    }

    /// Arrival-order timestamps, held non-decreasing across wall-clock steps.
    fn stamp(&mut self, now: f64) -> f64 {
        self.last_stamp = self.last_stamp.max(now);
        self.last_stamp
    }

    fn print_live(&mut self) {
        let line = live_line(&self.session.snapshot());
        let mut stderr = io::stderr().lock();
        if write!(stderr, "\r{}", line).and_then(|()| stderr.flush()).is_err() {
            warn!("Failed to write live statistics");
        }
        self.live_shown = true;
    }
}

/// The one-line live statistics display.
pub fn live_line(perf: &PerformanceSnapshot) -> String {
    format!(
        "{} CPS: {:5.1} | KPS: {:5.1} | Avg Interval: {:6.1}ms | Events: {:5} | Time: {:6.1}s",
        "Live Stats:".bright_cyan().bold(),
        perf.clicks_per_second,
        perf.keys_per_second,
        perf.avg_key_interval_ms,
        perf.total_events,
        perf.session_duration,
    )
}
