//! Admin API error definitions.

use thiserror::Error;

use crate::route::EncodeError;

/// Errors that can occur while talking to the admin API.
#[derive(Debug, Error)]
pub enum AdminError {
    /// No response was received: connection refused, DNS failure, timeout,
    /// or the body could not be read.
    #[error("Transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// The admin API answered with a status other than 200. `body` is the
    /// server's own error text, verbatim.
    #[error("Admin API returned status {status}: {body}")]
    Remote { status: u16, body: String },

    /// A route could not be written into the JSON template.
    #[error("Encoding error: {0}")]
    Encoding(#[from] EncodeError),

    /// Host or port do not form a valid admin URL.
    #[error("Invalid admin URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// An admin path contains `.` or `..` segments.
    #[error("Invalid admin path '{0}': '.' and '..' segments are not allowed")]
    InvalidPath(String),

    /// The largest route ID is already `i64::MAX`; no next ID exists.
    #[error("No route ID left after {0}")]
    IdExhausted(i64),
}

impl AdminError {
    /// Status code reported by the remote server, if it answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            AdminError::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, AdminError::Transport(_))
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, AdminError::Transport(e) if e.is_timeout())
    }
}

/// Result type for admin API operations.
pub type AdminResult<T> = Result<T, AdminError>;
