//! shellfm-remote: remote control for the shell-fm daemon
//!
//! shell-fm listens for one-line text commands on a UNIX-domain socket or a
//! TCP port. This library finds that socket (from explicit arguments or from
//! `$HOME/.shell-fm/shell-fm.rc`), opens a connection per command, writes the
//! command line and, for queries, reads one line back.
//!
//! # Modules
//!
//! - `config`: rc file parsing and input validation
//! - `endpoint`: connection targets and the argument-count rule
//! - `protocol`: verbs, command framing and reply handling
//! - `transport`: socket connections
//! - `client`: the remote-control client
//! - `error`: Error types and handling
//!
//! # Example
//!
//! ```no_run
//! use shellfm_remote::RemoteClient;
//!
//! let client = RemoteClient::new();
//! client.play("lastfm://globaltags/post-rock");
//! if let Some(now_playing) = client.format("%a - %t") {
//!     println!("{}", now_playing);
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod client;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod protocol;
pub mod transport;

// Re-export commonly used types
pub use client::{RemoteClient, ResolutionState};
pub use config::{RcConfig, DEFAULT_PORT};
pub use endpoint::{Endpoint, Target};
pub use error::{RemoteError, Result};
pub use protocol::{Command, Verb};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
