// Module declarations for the library crate.

pub mod capture;
pub mod cli;
pub mod config;
pub mod event;
pub mod logger;
pub mod session;
pub mod telemetry;
pub mod tracker;
pub mod util;

// Re-export the session types for convenience, e.g. for tests and benches.
pub use session::{Session, SessionLimits, SessionState};
