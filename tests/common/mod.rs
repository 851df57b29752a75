//! In-process stand-in for the shell-fm daemon
//!
//! Accepts connections on a UNIX socket or a TCP port, records the first
//! line of every connection and answers according to [`Reply`]. A
//! connection counts as closed once the client side hangs up.

#![allow(dead_code)]

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, UnixListener};
use tokio::task::JoinHandle;

/// How the fake daemon answers a command
#[derive(Debug, Clone, Copy)]
pub enum Reply {
    /// Say nothing and wait for the client to hang up
    Silent,
    /// Send one line back, then wait for the client to hang up
    Line(&'static str),
    /// Close the connection right after reading the command
    Hangup,
}

#[derive(Default)]
struct State {
    lines: Mutex<Vec<String>>,
    accepted: AtomicUsize,
    closed: AtomicUsize,
}

/// Handle to a running fake daemon
pub struct FakeDaemon {
    state: Arc<State>,
    task: JoinHandle<()>,
}

impl FakeDaemon {
    /// Listen on a UNIX socket at `path`
    pub fn unix(path: &Path, reply: Reply) -> Self {
        let listener = UnixListener::bind(path).expect("Failed to bind UNIX socket");
        let state = Arc::new(State::default());
        let task_state = state.clone();

        let task = tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                task_state.accepted.fetch_add(1, Ordering::SeqCst);
                tokio::spawn(serve(stream, reply, task_state.clone()));
            }
        });

        Self { state, task }
    }

    /// Listen on an ephemeral localhost TCP port; returns the daemon and the port
    pub async fn tcp(reply: Reply) -> (Self, u16) {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind TCP listener");
        let port = listener.local_addr().expect("No local address").port();
        let state = Arc::new(State::default());
        let task_state = state.clone();

        let task = tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                task_state.accepted.fetch_add(1, Ordering::SeqCst);
                tokio::spawn(serve(stream, reply, task_state.clone()));
            }
        });

        (Self { state, task }, port)
    }

    /// Command lines received so far, terminators included
    pub fn lines(&self) -> Vec<String> {
        self.state.lines.lock().unwrap().clone()
    }

    /// Connections accepted so far
    pub fn accepted(&self) -> usize {
        self.state.accepted.load(Ordering::SeqCst)
    }

    /// Wait until `count` connections have been closed by the client
    pub async fn wait_closed(&self, count: usize) -> bool {
        for _ in 0..200 {
            if self.state.closed.load(Ordering::SeqCst) >= count {
                return true;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        false
    }
}

impl Drop for FakeDaemon {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn serve<S>(stream: S, reply: Reply, state: Arc<State>)
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let (reader, mut writer) = tokio::io::split(stream);
    let mut reader = BufReader::new(reader);
    let mut line = String::new();

    if reader.read_line(&mut line).await.unwrap_or(0) > 0 {
        state.lines.lock().unwrap().push(line);

        match reply {
            Reply::Silent => {}
            Reply::Line(text) => {
                let _ = writer.write_all(text.as_bytes()).await;
                let _ = writer.flush().await;
            }
            Reply::Hangup => {
                state.closed.fetch_add(1, Ordering::SeqCst);
                return;
            }
        }

        let mut rest = Vec::new();
        let _ = reader.read_to_end(&mut rest).await;
    }

    state.closed.fetch_add(1, Ordering::SeqCst);
}
