//! wapanel - a terminal control panel for WhatsApp messaging
//!
//! This library wraps a WAHA-compatible WhatsApp gateway and a small
//! favorites/history backend, and provides the bulk send queue, session
//! poller and notification surface used by the `wapanel-tui` binary.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod backend;
pub mod config;
pub mod favorites;
pub mod gateway;
pub(crate) mod http;
pub mod messaging;
pub mod phone;
pub mod poller;
pub mod queue;
pub mod templates;
pub mod toast;
pub mod tui;


use config::Settings;

/// Result type alias for wapanel operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for wapanel operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Required input missing or malformed, detected before any request
    #[error("Validation error: {0}")]
    Validation(String),

    /// Resource already exists (HTTP 409)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Non-2xx response from the gateway or backend
    #[error("HTTP {status} from {endpoint}")]
    Status {
        /// Response status code
        status: u16,
        /// Request path that failed
        endpoint: String,
    },

    /// Network or decoding failure from the HTTP client
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid configuration
    #[error("Config error: {0}")]
    Config(String),

    /// General I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    JsonSerialization(#[from] serde_json::Error),
}

impl Error {
    /// HTTP status code carried by this error, if any
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::Conflict(_) => Some(409),
            Error::Status { status, .. } => Some(*status),
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether this error is a duplicate-resource conflict
    pub fn is_conflict(&self) -> bool {
        self.status_code() == Some(409)
    }
}

/// Initialize logging to the configured log file
///
/// The terminal is owned by the TUI, so log output goes to `settings.log_file`.
pub fn init_logging(settings: &Settings) -> Result<()> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&settings.log_file)?;

    tracing_subscriber::fmt()
        .with_max_level(settings.log_level())
        .with_ansi(false)
        .with_writer(std::sync::Mutex::new(file))
        .try_init()
        .map_err(|e| Error::Config(format!("Failed to install logger: {}", e)))?;

    Ok(())
}
