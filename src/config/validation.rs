//! Validation of endpoint and command inputs
//!
//! Explicit endpoint arguments and command arguments are checked here
//! before anything touches a socket.

use crate::error::{RemoteError, Result};

/// Validate a UNIX socket path given on the command line
pub fn validate_socket_path(path: &str) -> Result<()> {
    if path.trim().is_empty() {
        return Err(RemoteError::Validation(
            "Socket path cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// Validate a TCP host name or address
pub fn validate_host(host: &str) -> Result<()> {
    if host.is_empty() {
        return Err(RemoteError::Validation(
            "Host cannot be empty".to_string(),
        ));
    }

    if host.contains(char::is_whitespace) {
        return Err(RemoteError::Validation(format!(
            "Host '{}' contains whitespace",
            host
        )));
    }

    Ok(())
}

/// Parse a TCP port (1-65535)
pub fn parse_port(port: &str) -> Result<u16> {
    match port.trim().parse::<u16>() {
        Ok(0) | Err(_) => Err(RemoteError::Validation(format!(
            "Port '{}' is out of valid range (1-65535)",
            port
        ))),
        Ok(port) => Ok(port),
    }
}

/// Validate a command argument; it must fit on a single protocol line
pub fn validate_argument(arg: &str) -> Result<()> {
    if arg.contains(['\n', '\r']) {
        return Err(RemoteError::Validation(format!(
            "Argument {:?} contains a line break",
            arg
        )));
    }
    Ok(())
}
