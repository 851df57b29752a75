//! shellfm-remote main entry point
//!
//! This binary sends a single command to a running shell-fm daemon.
//! It handles CLI parsing, logging setup, and endpoint selection.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{debug, error};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use shellfm_remote::protocol::{join_tags, split_tags};
use shellfm_remote::{Command, RemoteClient, Target, Verb, APP_NAME, VERSION};

/// Remote control for the shell-fm daemon
#[derive(Parser, Debug)]
#[command(name = APP_NAME, version = VERSION, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// rc file to read the endpoint from (default: ~/.shell-fm/shell-fm.rc)
    #[arg(short, long, global = true, conflicts_with = "targets")]
    config: Option<PathBuf>,

    /// Endpoint argument; give once for a socket path, twice for host and port
    #[arg(short, long = "target", global = true, value_name = "ARG")]
    targets: Vec<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Tune to a station URI
    Play {
        /// Station URI, e.g. lastfm://user/NAME/personal
        station: String,
    },

    /// Love the current track
    Love,

    /// Ban the current track
    Ban,

    /// Skip the current track
    #[command(alias = "next")]
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
    TagArtist {
        /// Tags to apply
        #[arg(required = true)]
        tags: Vec<String>,
    },

    /// Tag the current album
    TagAlbum {
        /// Tags to apply
        #[arg(required = true)]
        tags: Vec<String>,
    },

    /// Tag the current track
    TagTrack {
        /// Tags to apply
        #[arg(required = true)]
        tags: Vec<String>,
    },

    /// Print the current artist's tags
    ArtistTags {
        /// One tag per line
        #[arg(long)]
        list: bool,
    },

    /// Print the current album's tags
    AlbumTags {
        /// One tag per line
        #[arg(long)]
        list: bool,
    },

    /// Print the current track's tags
    TrackTags {
        /// One tag per line
        #[arg(long)]
        list: bool,
    },

    /// Print now-playing information using a shell-fm format string
    Info {
        /// Format string, e.g. "%a - %t"
        format: String,
    },

    /// Send any protocol verb, e.g. `send next` or `send info "%a"`
    Send {
        /// Protocol verb
        verb: Verb,

        /// Argument sent after the verb
        arg: Option<String>,
    },

    /// Show which endpoint commands would be sent to
    Endpoint {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show version information
    Version,
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        error!("Error: {:#}", e);
        std::process::exit(1);
    }
}

/// Initialize structured logging with tracing; stdout is reserved for replies
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Pick the client target from `--target` values and `--config`
fn build_client(cli: &Cli) -> RemoteClient {
    match (&cli.config, cli.targets.is_empty()) {
        (Some(path), true) => RemoteClient::with_config_path(path),
        _ => RemoteClient::with_target(Target::from_args(cli.targets.as_slice())),
    }
}

/// Run the CLI command
fn run(cli: Cli) -> anyhow::Result<()> {
    let client = build_client(&cli);
    let mut list = false;

    let command = match cli.command {
        Commands::Play { station } => Command::with_arg(Verb::Play, station)?,
        Commands::Love => Command::new(Verb::Love),
        Commands::Ban => Command::new(Verb::Ban),
        Commands::Skip => Command::new(Verb::Skip),
        Commands::Quit => Command::new(Verb::Quit),
        Commands::Pause => Command::new(Verb::Pause),
        Commands::Discovery => Command::new(Verb::Discovery),
        Commands::Stop => Command::new(Verb::Stop),
        Commands::TagArtist { tags } => Command::with_arg(Verb::TagArtist, join_tags(&tags)?)?,
        Commands::TagAlbum { tags } => Command::with_arg(Verb::TagAlbum, join_tags(&tags)?)?,
        Commands::TagTrack { tags } => Command::with_arg(Verb::TagTrack, join_tags(&tags)?)?,
        Commands::ArtistTags { list: l } => {
            list = l;
            Command::new(Verb::ArtistTags)
        }
        Commands::AlbumTags { list: l } => {
            list = l;
            Command::new(Verb::AlbumTags)
        }
        Commands::TrackTags { list: l } => {
            list = l;
            Command::new(Verb::TrackTags)
        }
        Commands::Info { format } => Command::with_arg(Verb::Info, format)?,
        Commands::Send { verb, arg } => Command::build(verb, arg.as_deref())?,
        Commands::Endpoint { json } => {
            let endpoint = client.try_endpoint()?;
            if json {
                println!("{}", serde_json::to_string_pretty(endpoint)?);
            } else {
                println!("{}", endpoint);
            }
            return Ok(());
        }
        Commands::Version => {
            println!("{} v{}", APP_NAME, VERSION);
            return Ok(());
        }
    };

    debug!("Target: {:?}", client.target());

    if command.verb().expects_reply() {
        let reply = client
            .query(&command)
            .with_context(|| format!("'{}' got no reply", command.verb()))?;
        for line in reply_lines(&reply, list) {
            println!("{}", line);
        }
    } else {
        client
            .send(&command)
            .with_context(|| format!("Failed to send '{}'", command.verb()))?;
    }

    Ok(())
}

/// Lines to print for a reply; with `list`, one tag per line
fn reply_lines(reply: &str, list: bool) -> Vec<String> {
    if list {
        split_tags(reply)
    } else {
        vec![reply.to_string()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_and_target_conflict() {
        let result = Cli::try_parse_from([
            "shellfm-remote",
            "--config",
            "/tmp/shell-fm.rc",
            "--target",
            "/tmp/shell-fm.sock",
            "love",
        ]);
        assert_eq!(
            result.unwrap_err().kind(),
            clap::error::ErrorKind::ArgumentConflict
        );
    }

    #[test]
    fn test_config_alone_reads_rc_path() {
        let cli = Cli::try_parse_from(["shellfm-remote", "-c", "/tmp/shell-fm.rc", "love"]).unwrap();
        assert_eq!(
            build_client(&cli).target(),
            &Target::Config(Some(PathBuf::from("/tmp/shell-fm.rc")))
        );
    }

    #[test]
    fn test_targets_build_tcp() {
        let cli = Cli::try_parse_from(["shellfm-remote", "-t", "10.0.0.5", "-t", "9999", "pause"])
            .unwrap();
        assert_eq!(
            build_client(&cli).target(),
            &Target::Fixed(shellfm_remote::Endpoint::tcp("10.0.0.5", 9999))
        );
    }

    #[test]
    fn test_send_parses_verb() {
        let cli = Cli::try_parse_from(["shellfm-remote", "send", "next"]).unwrap();
        assert!(matches!(cli.command, Commands::Send { verb: Verb::Skip, arg: None }));

        let cli = Cli::try_parse_from(["shellfm-remote", "send", "info", "%a - %t"]).unwrap();
        match cli.command {
            Commands::Send { verb, arg } => {
                assert_eq!(verb, Verb::Info);
                assert_eq!(arg.as_deref(), Some("%a - %t"));
            }
            other => panic!("Wrong command: {:?}", other),
        }

        assert!(Cli::try_parse_from(["shellfm-remote", "send", "rewind"]).is_err());
    }

    #[test]
    fn test_tag_list_output() {
        assert_eq!(
            reply_lines("post-rock, instrumental", true),
            vec!["post-rock", "instrumental"]
        );
        assert_eq!(
            reply_lines("post-rock, instrumental", false),
            vec!["post-rock, instrumental"]
        );

        let cli = Cli::try_parse_from(["shellfm-remote", "track-tags", "--list"]).unwrap();
        assert!(matches!(cli.command, Commands::TrackTags { list: true }));
    }
}
