// Main application entry point.
// Dispatches the subcommands, runs the interactive menu, installs signal
// handling for tracking sessions, and prints the final report.

use colored::*;
use input_tracker::capture::{self, CaptureSource};
use input_tracker::cli::{self, Command};
use input_tracker::config::Config;
use input_tracker::logger::{LogMessage, StopReason};
use input_tracker::session::persist::{self, PersistError, DEFAULT_LOG_FILE};
use input_tracker::session::report;
use input_tracker::telemetry::{self, LogSettings};
use input_tracker::tracker::Tracker;
use signal_hook::consts::signal::{SIGINT, SIGTERM};
use signal_hook::iterator::Signals;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{info, warn};

/// Exit status when no capture source can be opened.
const EXIT_NO_SOURCE: u8 = 2;

fn main() -> ExitCode {
    let args = cli::parse_args();
    telemetry::init_tracing(&LogSettings::from(&args));

    match args.command {
        None => menu(),
        Some(Command::Track(track)) => run_track(Config::from(&track)),
        Some(Command::Analyze(a)) => {
            analyze(&a.file, a.json);
            ExitCode::SUCCESS
        }
        Some(Command::ListDevices) => list_devices(),
    }
}

/// Opens the configured devices, or stdin when none are given.
fn open_sources(cfg: &Config) -> Result<Vec<CaptureSource>, capture::CaptureError> {
    if cfg.devices.is_empty() {
        Ok(vec![CaptureSource::stdin()])
    } else {
        capture::open_all(&cfg.devices)
    }
}

fn run_track(cfg: Config) -> ExitCode {
    telemetry::log_config(&cfg);

    let sources = match open_sources(&cfg) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{} {}", "Error:".on_bright_black().red().bold(), e);
            eprintln!(
                "{}",
                "Note: reading /dev/input/event* typically requires root or membership in the 'input' group."
                    .on_bright_black()
                    .yellow()
            );
            return ExitCode::from(EXIT_NO_SOURCE);
        }
    };

    let tracker = Tracker::new(cfg.clone());
    install_signal_handler(tracker.sender());

    eprintln!("{}", "Input tracking started!".green().bold());
    eprintln!("Release {} to stop tracking", cfg.stop_key.bright_yellow().bold());
    eprintln!("{}", "=".repeat(50));

    let outcome = match tracker.run(sources) {
        Ok(o) => o,
        Err(e) => {
            eprintln!("{} {}", "Error:".on_bright_black().red().bold(), e);
            return ExitCode::FAILURE;
        }
    };
    let stop_note = match outcome.reason {
        StopReason::StopKey => format!("{} released", cfg.stop_key),
        StopReason::Shutdown => "signal received".to_string(),
        StopReason::SourcesClosed | StopReason::Disconnected => "input closed".to_string(),
    };
    eprintln!("\n{} ({stop_note})", "Input tracking stopped!".yellow().bold());

    let doc = outcome.session.to_document();
    if let Some(path) = &cfg.output {
        match persist::save_document(&doc, path) {
            Ok(()) => eprintln!("{} {}", "Session saved to".green(), path.display()),
            Err(e) => eprintln!("{} {}", "Error saving session:".on_bright_black().red().bold(), e),
        }
    }
    print_report(&doc, cfg.json);
    ExitCode::SUCCESS
}

/// Sends `Shutdown` to the logger on SIGINT/SIGTERM.
fn install_signal_handler(sender: crossbeam_channel::Sender<LogMessage>) {
    let mut signals = match Signals::new([SIGINT, SIGTERM]) {
        Ok(s) => s,
        Err(e) => {
            warn!(error = %e, "Failed to install signal handler");
            return;
        }
    };
    let spawned = std::thread::Builder::new()
        .name("signals".to_string())
        .spawn(move || {
            if let Some(sig) = signals.forever().next() {
                info!(signal = sig, "Received signal, stopping");
                let _ = sender.send(LogMessage::Shutdown);
            }
        });
    if let Err(e) = spawned {
        warn!(error = %e, "Failed to spawn signal thread");
    }
}

fn print_report(doc: &persist::SessionDocument, json: bool) {
    let mut stdout = io::stdout().lock();
    let result = if json {
        report::write_json(doc, &mut stdout)
            .map_err(io::Error::from)
            .and_then(|()| writeln!(stdout))
    } else {
        write!(stdout, "\n{}", report::summarize(doc))
    };
    if let Err(e) = result.and_then(|()| stdout.flush()) {
        warn!(error = %e, "Failed to write report");
    }
}

/// Loads and reports a saved session. Load failures are reported, not fatal.
fn analyze(path: &Path, json: bool) {
    match persist::load_document(path) {
        Ok(doc) => {
            eprintln!("{} {}", "Loaded session from".green(), path.display());
            print_report(&doc, json);
        }
        Err(PersistError::NotFound { .. }) => {
            eprintln!("{} {}", "File not found:".on_bright_black().red().bold(), path.display());
        }
        Err(e) => {
            eprintln!("{} {}", "Error loading session:".on_bright_black().red().bold(), e);
        }
    }
}

fn list_devices() -> ExitCode {
    eprintln!(
        "{}",
        format!("Scanning {} ...", capture::BY_ID_DIR)
            .on_bright_black()
            .bold()
            .bright_cyan()
    );
    let devices = capture::discover_devices();
    if devices.is_empty() {
        eprintln!("{} {}", "Error:".on_bright_black().red().bold(), capture::CaptureError::NoDevices);
        return ExitCode::from(EXIT_NO_SOURCE);
    }
    for path in devices {
        let name = capture::device_name(&path).unwrap_or_else(|| "unknown device".to_string());
        println!("{}  {}", path.display().to_string().bright_green(), name);
    }
    ExitCode::SUCCESS
}

/// Reads one trimmed line from stdin after printing `message`. EOF reads as empty.
fn prompt(message: &str) -> String {
    print!("{message}");
    let _ = io::stdout().flush();
    let mut line = String::new();
    if let Err(e) = io::stdin().lock().read_line(&mut line) {
        warn!(error = %e, "Failed to read from stdin");
    }
    line.trim().to_string()
}

fn menu() -> ExitCode {
    println!("{}", "Input Tracker".bright_cyan().bold());
    println!("{}", "=".repeat(30));

    let mut log_file = prompt(&format!("Enter log file name (default: {DEFAULT_LOG_FILE}): "));
    if log_file.is_empty() {
        log_file = DEFAULT_LOG_FILE.to_string();
    }

    println!("\nChoose an option:");
    println!("1. Start new tracking session");
    println!("2. Analyze existing log file");
    println!("3. Exit");

    match prompt("\nEnter choice (1-3): ").as_str() {
        "1" => {
            let devices = capture::discover_devices();
            if devices.is_empty() {
                eprintln!("{} {}", "Error:".on_bright_black().red().bold(), capture::CaptureError::NoDevices);
                return ExitCode::from(EXIT_NO_SOURCE);
            }
            println!("\nStarting tracking session...");
            println!("Tip: Keep this window visible to see live stats!");
            prompt("Press Enter to begin tracking...");
            run_track(Config {
                devices,
                output: Some(PathBuf::from(log_file)),
                ..Config::default()
            })
        }
        "2" => {
            let answer = prompt(&format!("Enter path to log file (default: {log_file}): "));
            let path = if answer.is_empty() { log_file } else { answer };
            analyze(Path::new(&path), false);
            ExitCode::SUCCESS
        }
        "3" => {
            println!("Goodbye!");
            ExitCode::SUCCESS
        }
        _ => {
            println!("Invalid choice!");
            ExitCode::SUCCESS
        }
    }
}
