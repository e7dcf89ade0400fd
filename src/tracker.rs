// Wires capture sources, one reader thread per source, and the logger thread
// together for a single tracking session.

use crate::capture::{read_event, CaptureSource, EvdevDecoder};
use crate::config::Config;
use crate::logger::{LogMessage, Logger, LoggerOptions, StopReason};
use crate::session::Session;
use crossbeam_channel::{bounded, Receiver, Sender};
use std::thread;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Bounded so a stalled logger applies backpressure to readers.
pub const CHANNEL_CAPACITY: usize = 1024;

#[derive(Debug, Error)]
pub enum TrackError {
    #[error("failed to spawn {name} thread: {source}")]
    Spawn {
        name: &'static str,
        #[source]
        source: std::io::Error,
    },
    #[error("logger thread panicked")]
    LoggerPanicked,
}

/// The result of one tracking run.
#[derive(Debug)]
pub struct TrackOutcome {
    pub session: Session,
    pub reason: StopReason,
}

pub struct Tracker {
    config: Config,
    sender: Sender<LogMessage>,
    receiver: Receiver<LogMessage>,
}

impl Tracker {
    pub fn new(config: Config) -> Self {
        let (sender, receiver) = bounded(CHANNEL_CAPACITY);
        Tracker {
            config,
            sender,
            receiver,
        }
    }

    /// A handle for injecting messages, e.g. `Shutdown` from a signal handler.
    pub fn sender(&self) -> Sender<LogMessage> {
        self.sender.clone()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Tracks until a stop trigger fires and returns the stopped session.
    ///
    /// Reader threads still blocked on a device read are left detached; they
    /// exit on their next send once the logger is gone.
    pub fn run(self, sources: Vec<CaptureSource>) -> Result<TrackOutcome, TrackError> {
        let Tracker {
            config,
            sender,
            receiver,
        } = self;

        let mut session = Session::new(config.limits);
        session.start();
        let options = LoggerOptions {
            stop_key: config.stop_key.clone(),
            live_interval: config.live_interval,
            sources: sources.len(),
        };
        let logger = Logger::new(receiver, session, options);
        let logger_handle = thread::Builder::new()
            .name("logger".to_string())
            .spawn(move || logger.run())
            .map_err(|source| TrackError::Spawn { name: "logger", source })?;

        for source in sources {
            let decoder = EvdevDecoder::new(config.move_throttle, config.ignore_repeats);
            let tx = sender.clone();
            let label = source.label.clone();
            if let Err(e) = thread::Builder::new()
                .name(format!("reader:{label}"))
                .spawn(move || read_source(source, decoder, tx))
            {
                warn!(source = %label, error = %e, "Failed to spawn reader thread");
                let _ = sender.send(LogMessage::SourceClosed { label });
            }
        }
        // The logger sees a disconnect only once every reader is gone.
        drop(sender);

        let (session, reason) = logger_handle.join().map_err(|_| TrackError::LoggerPanicked)?;
        info!(?reason, "Tracking run complete");
        Ok(TrackOutcome { session, reason })
    }
}

/// Reader thread body: decode until EOF or error, then report the close.
fn read_source(mut source: CaptureSource, mut decoder: EvdevDecoder, sender: Sender<LogMessage>) {
    debug!(source = %source.label, "Reader started");
    let mut logger_gone = false;
    loop {
        match read_event(&mut source.reader) {
            Ok(Some(ev)) => {
                decoder.feed(&ev, |notification| {
                    if logger_gone {
                        return;
                    }
                    logger_gone = sender.send(LogMessage::Input { notification }).is_err();
                });
                if logger_gone {
                    debug!(source = %source.label, "Logger gone, reader exiting");
                    return;
                }
            }
            Ok(None) => {
                debug!(source = %source.label, "End of input");
                break;
            }
            Err(e) => {
                warn!(source = %source.label, error = %e, "Error reading input event");
                break;
            }
        }
    }
    let _ = sender.send(LogMessage::SourceClosed {
        label: source.label,
    });
}
