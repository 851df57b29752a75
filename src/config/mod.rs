//! Configuration management
//!
//! This module reads the shell-fm rc file and turns it into an [`Endpoint`].
//! Only three keys matter to the remote client: `bind` (TCP host), `port`
//! (TCP port, default 54311) and `unix` (socket path). Everything else in
//! the file belongs to the player and is carried along untouched.

mod rc_parser;
pub(crate) mod validation;

pub(crate) use validation::{parse_port, validate_argument};

use crate::endpoint::Endpoint;
use crate::error::{RemoteError, Result};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Port the daemon listens on when the rc file does not name one
pub const DEFAULT_PORT: u16 = 54311;

/// Directory under `$HOME` holding the rc file
pub const RC_DIR: &str = ".shell-fm";

/// File name of the rc file
pub const RC_FILE: &str = "shell-fm.rc";

/// Key naming the TCP host
pub const KEY_BIND: &str = "bind";

/// Key naming the TCP port
pub const KEY_PORT: &str = "port";

/// Key naming the UNIX socket path
pub const KEY_UNIX: &str = "unix";

/// Parsed contents of a shell-fm rc file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RcConfig {
    values: HashMap<String, String>,
}

impl RcConfig {
    /// Create an empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// `$HOME/.shell-fm/shell-fm.rc`, or `None` when `HOME` is unset
    pub fn default_path() -> Option<PathBuf> {
        let home = std::env::var_os("HOME").filter(|h| !h.is_empty())?;
        Some(PathBuf::from(home).join(RC_DIR).join(RC_FILE))
    }

    /// Load configuration from an rc file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|e| RemoteError::ConfigUnreadable {
            path: path.to_path_buf(),
            source: e,
        })?;

        // Player settings may hold Latin-1 text; only our keys need to be readable
        let config = Self::parse(&String::from_utf8_lossy(&bytes));
        debug!("Loaded {} keys from {:?}", config.values.len(), path);
        Ok(config)
    }

    /// Parse configuration from rc file contents
    pub fn parse(contents: &str) -> Self {
        Self {
            values: rc_parser::parse(contents),
        }
    }

    /// Raw value of a key, empty values included
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Value of a key, treating an empty value as absent
    fn non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|v| !v.is_empty())
    }

    /// TCP host the daemon is bound to
    pub fn bind(&self) -> Option<&str> {
        self.non_empty(KEY_BIND)
    }

    /// UNIX socket path the daemon listens on
    pub fn unix(&self) -> Option<&str> {
        self.non_empty(KEY_UNIX)
    }

    /// TCP port, falling back to [`DEFAULT_PORT`] when absent or unusable
    pub fn port(&self) -> u16 {
        match self.non_empty(KEY_PORT) {
            None => DEFAULT_PORT,
            Some(raw) => parse_port(raw).unwrap_or_else(|_| {
                warn!(
                    "Ignoring invalid port '{}' in rc file, using {}",
                    raw, DEFAULT_PORT
                );
                DEFAULT_PORT
            }),
        }
    }

    /// Decide the endpoint this configuration describes.
    ///
    /// A non-empty `bind` wins over `unix`.
    pub fn endpoint(&self) -> Result<Endpoint> {
        if let Some(host) = self.bind() {
            return Ok(Endpoint::tcp(host, self.port()));
        }

        if let Some(path) = self.unix() {
            return Ok(Endpoint::unix(path));
        }

        Err(RemoteError::ConfigIncomplete(
            "neither 'bind' nor 'unix' is set".to_string(),
        ))
    }

    /// Number of keys present
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no keys are present
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_bind_and_port() {
        let config = RcConfig::parse("bind = 10.0.0.5\nport = 9999\n");
        assert_eq!(config.endpoint().unwrap(), Endpoint::tcp("10.0.0.5", 9999));
    }

    #[test]
    fn test_unix_only() {
        let config = RcConfig::parse("unix = /tmp/shell-fm.sock\n");
        assert_eq!(
            config.endpoint().unwrap(),
            Endpoint::unix("/tmp/shell-fm.sock")
        );
    }

    #[test]
    fn test_port_without_bind_is_incomplete() {
        let config = RcConfig::parse("port = 9999\n");
        assert!(matches!(
            config.endpoint(),
            Err(RemoteError::ConfigIncomplete(_))
        ));
    }

    #[test]
    fn test_empty_file_is_incomplete() {
        assert!(RcConfig::new().endpoint().is_err());
    }

    #[test]
    fn test_default_port() {
        let config = RcConfig::parse("bind = localhost\n");
        assert_eq!(config.port(), DEFAULT_PORT);
        assert_eq!(config.endpoint().unwrap(), Endpoint::tcp("localhost", 54311));

        let config = RcConfig::parse("bind = localhost\nport =\n");
        assert_eq!(config.port(), DEFAULT_PORT);
    }

    #[test]
    fn test_invalid_port_falls_back() {
        for raw in ["abc", "0", "70000", "-5"] {
            let config = RcConfig::parse(&format!("{} = localhost\n{} = {}\n", KEY_BIND, KEY_PORT, raw));
            assert_eq!(config.port(), DEFAULT_PORT, "port value {:?}", raw);
        }
    }

    #[test]
    fn test_bind_wins_over_unix() {
        let config = RcConfig::parse("unix = /tmp/shell-fm.sock\nbind = 127.0.0.1\n");
        assert_eq!(config.endpoint().unwrap(), Endpoint::tcp("127.0.0.1", 54311));
    }

    #[test]
    fn test_empty_bind_is_absent() {
        let config = RcConfig::parse("bind =\nunix = /tmp/shell-fm.sock\n");
        assert_eq!(config.bind(), None);
        assert_eq!(config.get(KEY_BIND), Some(""));
        assert_eq!(
            config.endpoint().unwrap(),
            Endpoint::unix("/tmp/shell-fm.sock")
        );
    }

    #[test]
    fn test_from_file() {
        let tmp_dir = TempDir::new().unwrap();
        let path = tmp_dir.path().join(RC_FILE);
        fs::write(&path, "bind = 10.0.0.5\nport = 9999\n").unwrap();

        let config = RcConfig::from_file(&path).unwrap();
        assert_eq!(config.len(), 2);
        assert_eq!(config.bind(), Some("10.0.0.5"));
        assert_eq!(config.port(), 9999);
    }

    #[test]
    fn test_from_file_with_latin1_lines() {
        let tmp_dir = TempDir::new().unwrap();
        let path = tmp_dir.path().join(RC_FILE);
        fs::write(&path, b"password = s\xe9cret\nbind = 127.0.0.1\nport = 9999\n").unwrap();

        let config = RcConfig::from_file(&path).unwrap();
        assert_eq!(config.endpoint().unwrap(), Endpoint::tcp("127.0.0.1", 9999));
        assert_eq!(
            crate::endpoint::Target::Config(Some(path)).try_resolve().unwrap(),
            Endpoint::tcp("127.0.0.1", 9999)
        );
    }

    #[test]
    fn test_from_missing_file() {
        let tmp_dir = TempDir::new().unwrap();
        let result = RcConfig::from_file(tmp_dir.path().join("missing.rc"));
        assert!(matches!(result, Err(RemoteError::ConfigUnreadable { .. })));
    }
}
