//! JSON session files.

use crate::event::Event;
use crate::session::event_log::Counters;
use crate::session::frequency::FrequencyTable;
use crate::session::stats::PerformanceSnapshot;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{error, info, warn};

pub const DEFAULT_LOG_FILE: &str = "input_log.json";

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("session file not found: {}", path.display())]
    NotFound { path: PathBuf },
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed session file {}: {source}", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to serialize session for {}: {source}", path.display())]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionInfo {
    /// Local ISO-8601 time the session started.
    pub start_time: String,
    /// Seconds, fixed at stop.
    pub duration: f64,
    /// Events held in the buffer when saved.
    pub total_events: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Statistics {
    pub total_keypresses: u64,
    pub total_mouse_clicks: u64,
    pub total_mouse_moves: u64,
    pub session_duration: f64,
    pub key_frequencies: FrequencyTable,
    pub click_frequencies: FrequencyTable,
}

impl Statistics {
    pub fn counters(&self) -> Counters {
        Counters {
            total_keypresses: self.total_keypresses,
            total_mouse_clicks: self.total_mouse_clicks,
            total_mouse_moves: self.total_mouse_moves,
        }
    }
}

/// On-disk layout of one session. Every section may be missing when loading
/// files written by other tools or older versions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_info: Option<SessionInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statistics: Option<Statistics>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub performance: Option<PerformanceSnapshot>,
    #[serde(default)]
    pub events: Vec<Event>,
}

/// Writes `doc` to `path` as pretty-printed JSON.
///
/// Failures are logged here and returned; callers are free to keep going.
pub fn save_document(doc: &SessionDocument, path: &Path) -> Result<(), PersistError> {
    let result = write_document(doc, path);
    match &result {
        Ok(()) => info!(path = %path.display(), events = doc.events.len(), "Session saved"),
        Err(e) => error!(error = %e, "Failed to save session"),
    }
    result
}

fn write_document(doc: &SessionDocument, path: &Path) -> Result<(), PersistError> {
    let io_err = |source| PersistError::Io {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(io_err)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, doc).map_err(|source| {
        if source.is_io() {
            PersistError::Io {
                path: path.to_path_buf(),
                source: io::Error::from(source),
            }
        } else {
            PersistError::Serialize {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;
    writer.write_all(b"\n").map_err(io_err)?;
    writer.flush().map_err(io_err)
}

/// Reads a session file written by [`save_document`] (or anything shaped like it).
pub fn load_document(path: &Path) -> Result<SessionDocument, PersistError> {
    let result = read_document(path);
    match &result {
        Ok(doc) => info!(path = %path.display(), events = doc.events.len(), "Session loaded"),
        Err(e) => warn!(error = %e, "Failed to load session"),
    }
    result
}

fn read_document(path: &Path) -> Result<SessionDocument, PersistError> {
    let file = File::open(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            PersistError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            PersistError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| {
        if source.is_io() {
            PersistError::Io {
                path: path.to_path_buf(),
                source: io::Error::from(source),
            }
        } else {
            PersistError::Malformed {
                path: path.to_path_buf(),
                source,
            }
        }
    })
}
