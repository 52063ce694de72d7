//! Error types for the property finder.
//!
//! This module defines a hierarchical error taxonomy using `thiserror`. Errors
//! compose via `?` and `From` conversions.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level application error
//!   - [`FetchError`] - Listings API failures (transport, HTTP status, malformed body)
//!   - [`LocationError`] - Geolocation failures
//!   - `std::io::Error` - Terminal/TUI rendering failures
//!
//! # Error Recovery Strategy
//!
//! Fetch and location errors are **non-fatal**: the search form clears its
//! loading flag and shows a status message, and the user may retry. Only
//! terminal errors abort the application.

use thiserror::Error;

/// Top-level application error.
#[derive(Debug, Error)]
pub enum AppError {
    /// A listings request failed.
    ///
    /// Non-fatal: surfaced on the search form as a status message.
    #[error("Listings request failed: {0}")]
    Fetch(#[from] FetchError),

    /// The device location could not be obtained.
    ///
    /// Non-fatal: surfaced on the search form as a status message.
    #[error("Location unavailable: {0}")]
    Location(#[from] LocationError),

    /// Terminal or TUI rendering error.
    ///
    /// Fatal: the terminal is restored and the error is written to stderr.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

/// Failures while fetching listings.
///
/// Carries strings rather than the underlying `reqwest`/`serde_json` errors so
/// the value can be cloned into UI state and sent across threads cheaply.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Connection, DNS, TLS or timeout failure.
    #[error("network error: {0}")]
    Transport(String),

    /// The server answered with a non-success HTTP status.
    #[error("HTTP status {0}")]
    Status(u16),

    /// The body was not valid JSON or did not match the response schema.
    ///
    /// # Examples
    ///
    /// ```
    /// use propfinder::model::error::FetchError;
    ///
    /// let err = FetchError::Parse("expected value at line 1 column 1".to_string());
    /// assert!(err.to_string().contains("line 1 column 1"));
    /// ```
    #[error("malformed response: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Parse(err.to_string())
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return FetchError::Status(status.as_u16());
        }
        if err.is_decode() {
            return FetchError::Parse(err.to_string());
        }
        FetchError::Transport(err.to_string())
    }
}

/// Failures while obtaining the device position.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LocationError {
    /// No location source is configured.
    #[error("location services are not configured")]
    Unavailable,

    /// A coordinate string could not be parsed.
    #[error("invalid coordinates {input:?}: {reason}")]
    InvalidCoordinates {
        /// The rejected input.
        input: String,
        /// Why it was rejected.
        reason: String,
    },
}
