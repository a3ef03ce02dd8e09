//! Shared integration-test harness for running the `pacer` binary as a
//! child process and reading its JSON event stream.

#![allow(dead_code)]

use std::path::PathBuf;
use std::process::{Output, Stdio};
use std::time::Duration;

use serde_json::Value;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::process::{Child, Command};

/// Default timeout for reading a single event.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// A running `pacer run --format json` process.
///
/// The child process is killed on drop via `kill_on_drop(true)`.
#[allow(clippy::missing_panics_doc)]
pub struct PacerProcess {
    child: Child,
    stdin: Option<tokio::process::ChildStdin>,
    reader: BufReader<tokio::process::ChildStdout>,
}

impl PacerProcess {
    /// Spawns `pacer run --format json` with fast ticks plus `extra` args.
    #[allow(clippy::missing_panics_doc)]
    pub fn spawn_run(extra: &[&str]) -> Self {
        let mut child = Command::new(env!("CARGO_BIN_EXE_pacer"))
            .args(["--quiet", "run", "--format", "json"])
            .args(extra)
            .env_remove("PACER_CONFIG")
            .env_remove("PACER_CYCLES")
            .env_remove("PACER_LOCALE")
            .env_remove("PACER_TICK")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .expect("failed to spawn pacer");

        let stdin = child.stdin.take().expect("stdin not captured");
        let stdout = child.stdout.take().expect("stdout not captured");

        Self {
            child,
            stdin: Some(stdin),
            reader: BufReader::new(stdout),
        }
    }

    /// Reads the next JSON event.
    ///
    /// Panics on EOF, I/O error, or if nothing arrives within `timeout`.
    #[allow(clippy::missing_panics_doc)]
    pub async fn read_event(&mut self, timeout: Duration) -> Value {
        let mut line = String::new();
        let result = tokio::time::timeout(timeout, async {
            loop {
                line.clear();
                let n = self
                    .reader
                    .read_line(&mut line)
                    .await
                    .expect("read_line I/O error");
                assert!(n > 0, "unexpected EOF from pacer");
                let trimmed = line.trim();
                if !trimmed.is_empty() {
                    return serde_json::from_str::<Value>(trimmed)
                        .unwrap_or_else(|e| panic!("invalid JSON from pacer: {e}\nline: {line}"));
                }
            }
        })
        .await;
        result.expect("timed out waiting for event from pacer")
    }

    /// Reads events until one of type `kind` arrives and returns it.
    #[allow(clippy::missing_panics_doc)]
    pub async fn expect_event(&mut self, kind: &str) -> Value {
        loop {
            let event = self.read_event(DEFAULT_TIMEOUT).await;
            if event["type"] == kind {
                return event;
            }
        }
    }

    /// Writes one control line to stdin.
    #[allow(clippy::missing_panics_doc)]
    pub async fn send(&mut self, line: &str) {
        let stdin = self.stdin.as_mut().expect("stdin already closed");
        stdin
            .write_all(format!("{line}\n").as_bytes())
            .await
            .expect("failed to write to stdin");
        stdin.flush().await.expect("failed to flush stdin");
    }

    /// Sends signal `name` (e.g. `TERM`) to the process with `kill`.
    #[allow(clippy::missing_panics_doc)]
    pub fn signal(&self, name: &str) {
        let pid = self.child.id().expect("pacer already exited");
        let status = std::process::Command::new("kill")
            .arg(format!("-{name}"))
            .arg(pid.to_string())
            .status()
            .expect("failed to run kill");
        assert!(status.success(), "kill -{name} {pid} failed");
    }

    /// Closes stdin.
    pub fn close_stdin(&mut self) {
        self.stdin = None;
    }

    /// Reads every remaining event until stdout closes.
    #[allow(clippy::missing_panics_doc)]
    pub async fn read_to_end(&mut self) -> Vec<Value> {
        let mut events = Vec::new();
        let mut lines = (&mut self.reader).lines();
        let read = tokio::time::timeout(DEFAULT_TIMEOUT, async {
            while let Some(line) = lines.next_line().await.expect("read I/O error") {
                if !line.trim().is_empty() {
                    events.push(serde_json::from_str(&line).expect("invalid JSON from pacer"));
                }
            }
        })
        .await;
        read.expect("timed out waiting for pacer to finish");
        events
    }

    /// Waits for the process to exit and returns its exit code.
    #[allow(clippy::missing_panics_doc)]
    pub async fn wait(mut self) -> Option<i32> {
        self.stdin = None;
        let status = tokio::time::timeout(DEFAULT_TIMEOUT, self.child.wait())
            .await
            .expect("timed out waiting for pacer to exit")
            .expect("failed to wait for pacer");
        status.code()
    }
}

/// Runs `pacer` with `args` to completion with stdin closed.
#[allow(clippy::missing_panics_doc)]
pub fn spawn_command(args: &[&str]) -> Output {
    std::process::Command::new(env!("CARGO_BIN_EXE_pacer"))
        .args(args)
        .env_remove("PACER_CONFIG")
        .env_remove("PACER_CYCLES")
        .env_remove("PACER_LOCALE")
        .env_remove("PACER_TICK")
        .stdin(Stdio::null())
        .output()
        .expect("failed to run pacer")
}

/// Returns the path to a test fixture.
#[must_use]
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}
