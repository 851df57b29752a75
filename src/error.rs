//! Error types for shellfm-remote
//!
//! Every failure the client can hit is described here. The public command
//! operations never hand these to the caller directly: they are logged and
//! folded into a `bool` or `Option` at the boundary. The `try_*`/`send`/`query`
//! variants return them for callers that want to know why.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::endpoint::Endpoint;

/// Main error type for shellfm-remote operations
#[derive(Error, Debug)]
pub enum RemoteError {
    /// The rc file is missing or could not be read
    #[error("Failed to read config file {path:?}: {source}")]
    ConfigUnreadable {
        /// Path that was consulted
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The rc file names neither a `bind` host nor a `unix` socket
    #[error("Incomplete configuration: {0}")]
    ConfigIncomplete(String),

    /// The client was built with an argument count other than 0, 1 or 2
    #[error("Cannot build an endpoint from {0} arguments")]
    AmbiguousConstruction(usize),

    /// No endpoint could be determined for this client
    #[error("No endpoint could be resolved")]
    Unresolved,

    /// Opening the transport failed
    #[error("Failed to connect to {endpoint}: {source}")]
    Connect {
        /// Target of the failed connection
        endpoint: Endpoint,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Writing the command line failed
    #[error("Write failed: {0}")]
    Write(#[source] io::Error),

    /// Reading the reply line failed
    #[error("Read failed: {0}")]
    Read(#[source] io::Error),

    /// The daemon closed the connection without replying
    #[error("No reply from daemon")]
    NoReply,

    /// Input validation errors
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias using RemoteError
pub type Result<T> = std::result::Result<T, RemoteError>;

impl RemoteError {
    /// Whether the failure happened before any connection was attempted
    pub fn is_resolution_error(&self) -> bool {
        matches!(
            self,
            RemoteError::ConfigUnreadable { .. }
                | RemoteError::ConfigIncomplete(_)
                | RemoteError::AmbiguousConstruction(_)
                | RemoteError::Unresolved
        )
    }
}
