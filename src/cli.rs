use crate::session::event_log::DEFAULT_MAX_EVENTS;
use crate::session::persist::DEFAULT_LOG_FILE;
use crate::session::stats::DEFAULT_WINDOW_CAPACITY;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub const DEFAULT_STOP_KEY: &str = "esc";

/// Keyboard and mouse activity tracker.
///
/// Records key presses, clicks, pointer movement and scrolling from evdev
/// input, keeps live rate statistics, and saves the session as JSON for later
/// analysis. Run without a subcommand for the interactive menu.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Tracing filter directives. RUST_LOG takes precedence when set.
    #[arg(long, global = true, default_value = "input_tracker=info", value_name = "FILTER")]
    pub log_filter: String,

    /// Emit diagnostic logs as JSON lines.
    #[arg(long, global = true, action = clap::ArgAction::SetTrue)]
    pub log_json: bool,

    /// Include module targets in diagnostic logs.
    #[arg(short, long, global = true, action = clap::ArgAction::SetTrue)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Record a session until the stop key is released or a signal arrives.
    Track(TrackArgs),
    /// Print the analysis of a saved session file.
    Analyze(AnalyzeArgs),
    /// List keyboard and mouse devices found under /dev/input/by-id.
    ListDevices,
}

#[derive(clap::Args, Debug, Clone)]
pub struct TrackArgs {
    /// Input device node to read (repeatable). Reads input_event records from
    /// stdin when omitted.
    #[arg(long, value_name = "PATH")]
    pub device: Vec<PathBuf>,

    /// File the session is saved to on stop.
    #[arg(short, long, default_value = DEFAULT_LOG_FILE, value_name = "FILE")]
    pub output: PathBuf,

    /// Most recent events kept in the session buffer.
    #[arg(long, default_value_t = DEFAULT_MAX_EVENTS, value_name = "N")]
    pub max_events: usize,

    /// Timestamps kept per rate window (clicks, keys).
    #[arg(long, default_value_t = DEFAULT_WINDOW_CAPACITY, value_name = "N")]
    pub window_capacity: usize,

    /// Trailing window for clicks/sec and keys/sec.
    #[arg(long, default_value = "10s", value_name = "DURATION")]
    pub rate_window: humantime::Duration,

    /// Minimum spacing between recorded pointer moves.
    #[arg(long, default_value = "100ms", value_name = "DURATION")]
    pub move_throttle: humantime::Duration,

    /// How often the live statistics line is printed (0 disables it).
    #[arg(long, default_value = "1s", value_name = "DURATION")]
    pub live_interval: humantime::Duration,

    /// Key whose release stops the session (symbol, KEY_ name or code).
    #[arg(long, default_value = DEFAULT_STOP_KEY, value_name = "KEY")]
    pub stop_key: String,

    /// Do not count key auto-repeat as key presses.
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub ignore_repeats: bool,

    /// Do not write the session file.
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub no_save: bool,

    /// Print the final summary as JSON on stdout.
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub json: bool,
}

#[derive(clap::Args, Debug, Clone)]
pub struct AnalyzeArgs {
    /// Session file to analyze.
    #[arg(value_name = "FILE", default_value = DEFAULT_LOG_FILE)]
    pub file: PathBuf,

    /// Print the summary as JSON instead of text.
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub json: bool,
}

/// Parses command line arguments using clap.
pub fn parse_args() -> Args {
    Args::parse()
}
