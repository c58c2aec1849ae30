//! Application-level errors
//!
//! Failures here happen outside the UI loop (startup, terminal handling or
//! logging) and end the program. Lookup failures are [`crate::api::SearchError`]
//! and are shown on screen instead.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("failed to initialise logging: {0}")]
    Logging(String),
}

pub type Result<T> = std::result::Result<T, Error>;
