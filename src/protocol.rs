//! Wire protocol
//!
//! Every request is a single line: a verb, optionally followed by a space and
//! a free-form argument, terminated by `\n`. Query verbs get exactly one line
//! back; all other verbs are fire-and-forget.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::validate_argument;
use crate::error::{RemoteError, Result};

/// Protocol verbs understood by the daemon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Verb {
    /// Tune to a station URI
    Play,
    /// Love the current track
    Love,
    /// Ban the current track
    Ban,
    /// Skip to the next track
    Skip,
    /// Shut the daemon down
    Quit,
    /// Toggle pause
    Pause,
    /// Toggle discovery mode
    Discovery,
    /// Stop playback
    Stop,
    /// Tag the current artist
    TagArtist,
    /// Tag the current album
    TagAlbum,
    /// Tag the current track
    TagTrack,
    /// Ask for the current artist's tags
    ArtistTags,
    /// Ask for the current album's tags
    AlbumTags,
    /// Ask for the current track's tags
    TrackTags,
    /// Ask for now-playing information rendered through a format string
    Info,
}

impl Verb {
    /// All verbs, in protocol table order
    pub const ALL: [Verb; 15] = [
        Verb::Play,
        Verb::Love,
        Verb::Ban,
        Verb::Skip,
        Verb::Quit,
        Verb::Pause,
        Verb::Discovery,
        Verb::Stop,
        Verb::TagArtist,
        Verb::TagAlbum,
        Verb::TagTrack,
        Verb::ArtistTags,
        Verb::AlbumTags,
        Verb::TrackTags,
        Verb::Info,
    ];

    /// The verb as written on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Verb::Play => "play",
            Verb::Love => "love",
            Verb::Ban => "ban",
            Verb::Skip => "skip",
            Verb::Quit => "quit",
            Verb::Pause => "pause",
            Verb::Discovery => "discovery",
            Verb::Stop => "stop",
            Verb::TagArtist => "tag-artist",
            Verb::TagAlbum => "tag-album",
            Verb::TagTrack => "tag-track",
            Verb::ArtistTags => "artist-tags",
            Verb::AlbumTags => "album-tags",
            Verb::TrackTags => "track-tags",
            Verb::Info => "info",
        }
    }

    /// Whether the daemon answers this verb with a reply line
    pub fn expects_reply(&self) -> bool {
        matches!(
            self,
            Verb::ArtistTags | Verb::AlbumTags | Verb::TrackTags | Verb::Info
        )
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Verb {
    type Err = RemoteError;

    fn from_str(s: &str) -> Result<Self> {
        if s == "next" {
            return Ok(Verb::Skip);
        }

        Verb::ALL
            .iter()
            .copied()
            .find(|verb| verb.as_str() == s)
            .ok_or_else(|| RemoteError::Validation(format!("Unknown verb '{}'", s)))
    }
}

/// A single outbound protocol line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    verb: Verb,
    arg: Option<String>,
}

impl Command {
    /// A command without an argument
    pub fn new(verb: Verb) -> Self {
        Self { verb, arg: None }
    }

    /// A command with an argument; fails if the argument spans lines
    pub fn with_arg(verb: Verb, arg: impl Into<String>) -> Result<Self> {
        let arg = arg.into();
        validate_argument(&arg)?;
        Ok(Self {
            verb,
            arg: Some(arg),
        })
    }

    /// Build from an optional argument
    pub fn build(verb: Verb, arg: Option<&str>) -> Result<Self> {
        match arg {
            Some(arg) => Self::with_arg(verb, arg),
            None => Ok(Self::new(verb)),
        }
    }

    /// The command's verb
    pub fn verb(&self) -> Verb {
        self.verb
    }

    /// The command's argument, if any
    pub fn arg(&self) -> Option<&str> {
        self.arg.as_deref()
    }

    /// The exact bytes sent to the daemon, trailing newline included
    pub fn line(&self) -> String {
        match &self.arg {
            Some(arg) => format!("{} {}\n", self.verb, arg),
            None => format!("{}\n", self.verb),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.line().trim_end_matches('\n'))
    }
}

/// Strip the line terminator from a raw reply line
pub fn strip_reply(raw: &str) -> &str {
    let line = raw.strip_suffix('\n').unwrap_or(raw);
    line.strip_suffix('\r').unwrap_or(line)
}

/// Join tags into the comma list the tagging verbs expect.
///
/// Tags are trimmed and empty ones dropped. An empty result is an error.
pub fn join_tags<I, S>(tags: I) -> Result<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let joined = tags
        .into_iter()
        .map(|tag| tag.as_ref().trim().to_string())
        .filter(|tag| !tag.is_empty())
        .collect::<Vec<_>>()
        .join(",");

    if joined.is_empty() {
        return Err(RemoteError::Validation("No tags given".to_string()));
    }

    Ok(joined)
}

/// Split a `*-tags` reply into individual tags
pub fn split_tags(reply: &str) -> Vec<String> {
    reply
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(String::from)
        .collect()
}
