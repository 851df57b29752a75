//! Remote-control client
//!
//! [`RemoteClient`] resolves its endpoint once, on the first command, and
//! then opens a fresh connection for every command it sends. The operations
//! named after protocol verbs never fail loudly: they return `bool` for
//! fire-and-forget commands and `Option<String>` for queries, logging the
//! reason for any failure. [`RemoteClient::send`] and [`RemoteClient::query`]
//! expose the same paths with the error kept.

use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;
use std::sync::OnceLock;

use tracing::{debug, warn};

use crate::endpoint::{Endpoint, Target};
use crate::error::{RemoteError, Result};
use crate::protocol::{join_tags, strip_reply, Command, Verb};
use crate::transport::{Connector, SocketConnector, Transport};

/// Where a client stands in resolving its endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionState<'a> {
    /// No command has been sent yet
    Pending,
    /// Resolved to a usable endpoint
    Resolved(&'a Endpoint),
    /// Resolution failed; every command reports failure
    Unresolved,
}

/// Client for a running shell-fm daemon
pub struct RemoteClient<C = SocketConnector> {
    target: Target,
    endpoint: OnceLock<Endpoint>,
    connector: C,
}

impl RemoteClient<SocketConnector> {
    /// Client that reads its endpoint from `$HOME/.shell-fm/shell-fm.rc`
    pub fn new() -> Self {
        Self::with_target(Target::default())
    }

    /// Client built from positional endpoint arguments.
    ///
    /// No arguments defer to the rc file, one is a socket path, two are a
    /// host and a port. Any other count leaves the client unresolved.
    pub fn from_args<S: AsRef<str>>(args: &[S]) -> Self {
        Self::with_target(Target::from_args(args))
    }

    /// Client for a UNIX-domain socket
    pub fn unix(path: impl Into<PathBuf>) -> Self {
        Self::with_target(Target::Fixed(Endpoint::unix(path)))
    }

    /// Client for a TCP socket
    pub fn tcp(host: impl Into<String>, port: u16) -> Self {
        Self::with_target(Target::Fixed(Endpoint::tcp(host, port)))
    }

    /// Client that reads its endpoint from the rc file at `path`
    pub fn with_config_path(path: impl Into<PathBuf>) -> Self {
        Self::with_target(Target::Config(Some(path.into())))
    }

    /// Client for an arbitrary target
    pub fn with_target(target: Target) -> Self {
        Self::with_connector(target, SocketConnector)
    }
}

impl Default for RemoteClient<SocketConnector> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Connector> RemoteClient<C> {
    /// Client using a custom connector
    pub fn with_connector(target: Target, connector: C) -> Self {
        Self {
            target,
            endpoint: OnceLock::new(),
            connector,
        }
    }

    /// How this client obtains its endpoint
    pub fn target(&self) -> &Target {
        &self.target
    }

    /// The endpoint, resolving it on first call.
    ///
    /// Concurrent first calls block on a single resolution and all observe
    /// the same value.
    pub fn endpoint(&self) -> &Endpoint {
        self.endpoint.get_or_init(|| self.target.resolve())
    }

    /// The endpoint, or `Unresolved` if none could be determined.
    ///
    /// Uses the cached resolution; the rc file is read at most once.
    pub fn try_endpoint(&self) -> Result<&Endpoint> {
        match self.endpoint() {
            Endpoint::Unresolved => Err(RemoteError::Unresolved),
            endpoint => Ok(endpoint),
        }
    }

    /// Current resolution state, without triggering resolution
    pub fn state(&self) -> ResolutionState<'_> {
        match self.endpoint.get() {
            None => ResolutionState::Pending,
            Some(Endpoint::Unresolved) => ResolutionState::Unresolved,
            Some(endpoint) => ResolutionState::Resolved(endpoint),
        }
    }

    /// Send a fire-and-forget command
    pub fn send(&self, command: &Command) -> Result<()> {
        let mut transport = self.open()?;
        write_command(transport.as_mut(), command)
    }

    /// Send a command and read one reply line, terminator stripped
    pub fn query(&self, command: &Command) -> Result<String> {
        let mut transport = self.open()?;
        write_command(transport.as_mut(), command)?;

        // Track metadata is not guaranteed to be UTF-8
        let mut reader = BufReader::new(transport);
        let mut raw = Vec::new();
        let read = reader
            .read_until(b'\n', &mut raw)
            .map_err(RemoteError::Read)?;
        if read == 0 {
            return Err(RemoteError::NoReply);
        }

        let line = String::from_utf8_lossy(&raw);
        debug!("Reply to '{}': {:?}", command.verb(), line);
        Ok(strip_reply(&line).to_string())
    }

    /// Send `verb` with an optional argument; `true` if the line was written
    pub fn send_command(&self, verb: Verb, arg: Option<&str>) -> bool {
        let result = Command::build(verb, arg).and_then(|command| self.send(&command));
        match result {
            Ok(()) => true,
            Err(e) => {
                warn!("Command '{}' failed: {}", verb, e);
                false
            }
        }
    }

    /// Send `verb` and return the reply line, or `None` on any failure
    pub fn send_command_with_reply(&self, verb: Verb, arg: Option<&str>) -> Option<String> {
        let result = Command::build(verb, arg).and_then(|command| self.query(&command));
        match result {
            Ok(reply) => Some(reply),
            Err(e) => {
                warn!("Query '{}' failed: {}", verb, e);
                None
            }
        }
    }

    /// Tune to a station URI, e.g. `lastfm://user/name/personal`
    pub fn play(&self, station: &str) -> bool {
        self.send_command(Verb::Play, Some(station))
    }

    /// Love the current track
    pub fn love(&self) -> bool {
        self.send_command(Verb::Love, None)
    }

    /// Ban the current track
    pub fn ban(&self) -> bool {
        self.send_command(Verb::Ban, None)
    }

    /// Skip the current track
    pub fn skip(&self) -> bool {
        self.send_command(Verb::Skip, None)
    }

    /// Same as [`RemoteClient::skip`]
    #[allow(clippy::should_implement_trait)]
    pub fn next(&self) -> bool {
        self.skip()
    }

    /// Shut the daemon down
    pub fn quit(&self) -> bool {
        self.send_command(Verb::Quit, None)
    }

    /// Toggle pause
    pub fn pause(&self) -> bool {
        self.send_command(Verb::Pause, None)
    }

    /// Toggle discovery mode
    pub fn discovery(&self) -> bool {
        self.send_command(Verb::Discovery, None)
    }

    /// Stop playback
    pub fn stop(&self) -> bool {
        self.send_command(Verb::Stop, None)
    }

    /// Tag the current artist
    pub fn tag_artist<I, S>(&self, tags: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.tag(Verb::TagArtist, tags)
    }

    /// Tag the current album
    pub fn tag_album<I, S>(&self, tags: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.tag(Verb::TagAlbum, tags)
    }

    /// Tag the current track
    pub fn tag_track<I, S>(&self, tags: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.tag(Verb::TagTrack, tags)
    }

    /// Tags of the current artist, as the daemon's comma list
    pub fn artist_tags(&self) -> Option<String> {
        self.send_command_with_reply(Verb::ArtistTags, None)
    }

    /// Tags of the current album
    pub fn album_tags(&self) -> Option<String> {
        self.send_command_with_reply(Verb::AlbumTags, None)
    }

    /// Tags of the current track
    pub fn track_tags(&self) -> Option<String> {
        self.send_command_with_reply(Verb::TrackTags, None)
    }

    /// Now-playing information rendered through a shell-fm format string
    pub fn format(&self, pattern: &str) -> Option<String> {
        self.send_command_with_reply(Verb::Info, Some(pattern))
    }

    fn tag<I, S>(&self, verb: Verb, tags: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        match join_tags(tags) {
            Ok(list) => self.send_command(verb, Some(&list)),
            Err(e) => {
                warn!("Command '{}' failed: {}", verb, e);
                false
            }
        }
    }

    fn open(&self) -> Result<Box<dyn Transport>> {
        let endpoint = self.try_endpoint()?;
        self.connector
            .connect(endpoint)
            .map_err(|source| RemoteError::Connect {
                endpoint: endpoint.clone(),
                source,
            })
    }
}

fn write_command<W: Write + ?Sized>(writer: &mut W, command: &Command) -> Result<()> {
    debug!("Sending '{}'", command);
    writer
        .write_all(command.line().as_bytes())
        .map_err(RemoteError::Write)?;
    writer.flush().map_err(RemoteError::Write)
}
