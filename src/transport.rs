//! Transport connections
//!
//! A [`Connector`] opens one blocking stream per command. The stream is
//! owned by the calling operation and dropped (closing the socket) when
//! that operation returns, whichever way it returns.

use std::io::{self, Read, Write};
use std::net::TcpStream;

use tracing::debug;

use crate::endpoint::Endpoint;

/// A bidirectional byte stream to the daemon
pub trait Transport: Read + Write + Send {}

impl<T: Read + Write + Send> Transport for T {}

/// Opens transports to endpoints
#[cfg_attr(test, mockall::automock)]
pub trait Connector: Send + Sync {
    /// Open a fresh connection to `endpoint`
    fn connect(&self, endpoint: &Endpoint) -> io::Result<Box<dyn Transport>>;
}

/// Connector backed by real UNIX-domain and TCP sockets
#[derive(Debug, Clone, Copy, Default)]
pub struct SocketConnector;

impl Connector for SocketConnector {
    fn connect(&self, endpoint: &Endpoint) -> io::Result<Box<dyn Transport>> {
        match endpoint {
            Endpoint::Unix { path } => {
                debug!("Connecting to UNIX socket {:?}", path);
                connect_unix(path)
            }
            Endpoint::Tcp { host, port } => {
                debug!("Connecting to {}:{}", host, port);
                let stream = TcpStream::connect((host.as_str(), *port))?;
                Ok(Box::new(stream))
            }
            Endpoint::Unresolved => Err(io::Error::new(
                io::ErrorKind::NotConnected,
                "endpoint is unresolved",
            )),
        }
    }
}

#[cfg(unix)]
fn connect_unix(path: &std::path::Path) -> io::Result<Box<dyn Transport>> {
    let stream = std::os::unix::net::UnixStream::connect(path)?;
    Ok(Box::new(stream))
}

#[cfg(not(unix))]
fn connect_unix(_path: &std::path::Path) -> io::Result<Box<dyn Transport>> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "UNIX-domain sockets are not available on this platform",
    ))
}
