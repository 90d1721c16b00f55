use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

/// Shown when a request fails without a usable message of its own.
pub const GENERIC_ANALYSIS_FAILURE: &str = "Failed to analyze video. Please try again.";

/// Shown when the server rejects a request but sends no `detail`.
pub const GENERIC_API_FAILURE: &str = "Failed to analyze video";

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter a YouTube URL")]
    MissingUrl,

    #[error("Please enter a valid YouTube URL")]
    InvalidUrl,
}

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Server returned {status}: {}", .detail.as_deref().unwrap_or(GENERIC_API_FAILURE))]
    Api {
        status: StatusCode,
        detail: Option<String>,
    },

    #[error("Malformed response: {0}")]
    MalformedResponse(#[source] reqwest::Error),

    #[error("Request aborted: {0}")]
    Aborted(String),
}

impl AnalysisError {
    /// The text that goes into the error region.
    ///
    /// Server-provided `detail` is surfaced verbatim. Everything else falls
    /// back to a generic message, since transport and parse errors carry
    /// nothing a user can act on.
    pub fn user_message(&self) -> String {
        match self {
            AnalysisError::Api { detail, .. } => match detail.as_deref() {
                Some(detail) if !detail.trim().is_empty() => detail.to_string(),
                _ => GENERIC_API_FAILURE.to_string(),
            },
            AnalysisError::Transport(_)
            | AnalysisError::MalformedResponse(_)
            | AnalysisError::Aborted(_) => GENERIC_ANALYSIS_FAILURE.to_string(),
        }
    }
}

#[derive(Error, Debug)]
pub enum ClipboardError {
    #[error("Clipboard unavailable: {0}")]
    Unavailable(String),

    #[error("Clipboard write failed: {0}")]
    WriteFailed(String),

    #[error("No clipboard command found on PATH")]
    NoCommand,

    #[error("Clipboard command {program} failed: {reason}")]
    CommandFailed { program: String, reason: String },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid request_timeout_secs in {path}: must be greater than 0")]
    ZeroTimeout { path: PathBuf },

    #[error("Invalid API URL {url}: {reason}")]
    InvalidApiUrl { url: String, reason: String },

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

pub type Result<T, E = AnalysisError> = std::result::Result<T, E>;
