//! Failure taxonomy for backend fetches.
//!
//! Every variant is recoverable: callers downgrade it to an empty or
//! placeholder result for the affected panel.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The request never produced a response.
    #[error("request to {path} failed: {message}")]
    Network { path: String, message: String },

    /// The backend answered with a non-2xx status.
    #[error("request to {path} returned HTTP {status}")]
    Status { path: String, status: u16 },

    /// The request exceeded the configured timeout.
    #[error("request to {path} timed out")]
    Timeout { path: String },

    /// The body was not JSON, or not the expected shape.
    #[error("could not parse response from {path}: {message}")]
    Parse { path: String, message: String },

    #[error("invalid backend url {url}: {message}")]
    InvalidUrl { url: String, message: String },

    /// The selection is missing a level the request needs.
    #[error("selection is incomplete: {0} is not set")]
    Incomplete(&'static str),
}

impl FetchError {
    pub fn network(path: impl Into<String>, message: impl ToString) -> Self {
        FetchError::Network {
            path: path.into(),
            message: message.to_string(),
        }
    }

    pub fn parse(path: impl Into<String>, message: impl ToString) -> Self {
        FetchError::Parse {
            path: path.into(),
            message: message.to_string(),
        }
    }
}

pub type FetchResult<T> = Result<T, FetchError>;
