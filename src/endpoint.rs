//! Connection targets
//!
//! An [`Endpoint`] is where commands go. A [`Target`] records how a client
//! obtains its endpoint: either fixed at construction time from explicit
//! arguments, or read from the rc file the first time a command is sent.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::{self, RcConfig};
use crate::error::{RemoteError, Result};

/// A resolved connection target
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Endpoint {
    /// UNIX-domain socket at a filesystem path
    Unix {
        /// Socket path
        path: PathBuf,
    },
    /// TCP stream socket
    Tcp {
        /// Host name or address
        host: String,
        /// Port number (1-65535)
        port: u16,
    },
    /// No endpoint could be determined; every command fails without connecting
    Unresolved,
}

impl Endpoint {
    /// Build a UNIX-domain endpoint
    pub fn unix(path: impl Into<PathBuf>) -> Self {
        Endpoint::Unix { path: path.into() }
    }

    /// Build a TCP endpoint
    pub fn tcp(host: impl Into<String>, port: u16) -> Self {
        Endpoint::Tcp {
            host: host.into(),
            port,
        }
    }

    /// Build an endpoint from positional arguments.
    ///
    /// One argument is a socket path, two are a host and a port. Any other
    /// count is an error; zero arguments mean "use the rc file" and are
    /// handled by [`Target::from_args`] before this is reached.
    pub fn from_args<S: AsRef<str>>(args: &[S]) -> Result<Self> {
        match args {
            [path] => {
                let path = path.as_ref();
                config::validation::validate_socket_path(path)?;
                Ok(Endpoint::unix(path))
            }
            [host, port] => {
                let host = host.as_ref();
                config::validation::validate_host(host)?;
                let port = config::validation::parse_port(port.as_ref())?;
                Ok(Endpoint::tcp(host, port))
            }
            other => Err(RemoteError::AmbiguousConstruction(other.len())),
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Unix { path } => write!(f, "unix:{}", path.display()),
            Endpoint::Tcp { host, port } => write!(f, "tcp://{}:{}", host, port),
            Endpoint::Unresolved => write!(f, "unresolved"),
        }
    }
}

/// How a client obtains its endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// Read the rc file on first use; `None` means the default path
    Config(Option<PathBuf>),
    /// Decided at construction time
    Fixed(Endpoint),
}

impl Target {
    /// Apply the arity rule to positional arguments.
    ///
    /// Zero arguments defer to the rc file. Anything that cannot be turned
    /// into an endpoint becomes `Fixed(Endpoint::Unresolved)` for good.
    pub fn from_args<S: AsRef<str>>(args: &[S]) -> Self {
        if args.is_empty() {
            return Target::Config(None);
        }

        match Endpoint::from_args(args) {
            Ok(endpoint) => Target::Fixed(endpoint),
            Err(e) => {
                warn!("Ignoring endpoint arguments: {}", e);
                Target::Fixed(Endpoint::Unresolved)
            }
        }
    }

    /// Produce the endpoint, reading the rc file if needed.
    ///
    /// Never fails: problems are logged and yield `Endpoint::Unresolved`.
    pub fn resolve(&self) -> Endpoint {
        match self.try_resolve() {
            Ok(endpoint) => {
                debug!("Resolved endpoint {}", endpoint);
                endpoint
            }
            Err(e) => {
                warn!("Endpoint resolution failed: {}", e);
                Endpoint::Unresolved
            }
        }
    }

    /// Like [`Target::resolve`] but keeps the reason for a failure
    pub fn try_resolve(&self) -> Result<Endpoint> {
        match self {
            Target::Fixed(Endpoint::Unresolved) => Err(RemoteError::Unresolved),
            Target::Fixed(endpoint) => Ok(endpoint.clone()),
            Target::Config(Some(path)) => resolve_from_file(path),
            Target::Config(None) => {
                let path = RcConfig::default_path().ok_or_else(|| {
                    RemoteError::ConfigIncomplete("HOME is not set".to_string())
                })?;
                resolve_from_file(&path)
            }
        }
    }
}

impl Default for Target {
    fn default() -> Self {
        Target::Config(None)
    }
}

fn resolve_from_file(path: &Path) -> Result<Endpoint> {
    debug!("Reading endpoint from {:?}", path);
    RcConfig::from_file(path)?.endpoint()
}
