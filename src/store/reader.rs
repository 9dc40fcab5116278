//! Entry decryption through the `pass` command.
//!
//! Each entry is read by running `<command> <entry>` and capturing stdout.
//! The child is given `GPG_TTY` so pinentry can still prompt on the
//! user's terminal when gpg-agent has no cached passphrase, and it is
//! killed if it does not finish within the configured timeout.

use std::io::Read;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use zeroize::Zeroizing;

use crate::errors::{MigrateError, Result};

/// How often a running child is polled for exit.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Anything that can turn an entry identifier into decrypted text.
pub trait EntryReader {
    /// Decrypted content of `entry`, trimmed.
    ///
    /// Every failure is reported as `MigrateError::EntryUnreadable`.
    fn read(&self, entry: &str) -> Result<Zeroizing<String>>;
}

/// Reads entries by shelling out to `pass` (or a compatible command).
#[derive(Debug, Clone)]
pub struct PassReader {
    command: String,
    timeout: Duration,
    tty: Option<String>,
}

impl PassReader {
    /// Build a reader for `command`, detecting the current terminal once.
    pub fn new(command: impl Into<String>, timeout: Duration) -> Self {
        Self {
            command: command.into(),
            timeout,
            tty: detect_tty(),
        }
    }

    /// Override the terminal passed as `GPG_TTY`.
    pub fn with_tty(mut self, tty: Option<String>) -> Self {
        self.tty = tty;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl EntryReader for PassReader {
    fn read(&self, entry: &str) -> Result<Zeroizing<String>> {
        let mut cmd = Command::new(&self.command);
        cmd.arg(entry)
            .stdin(Stdio::inherit())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        if let Some(tty) = &self.tty {
            cmd.env("GPG_TTY", tty);
        }

        let mut child = cmd.spawn().map_err(|e| {
            MigrateError::unreadable(entry, format!("failed to run '{}': {e}", self.command))
        })?;

        let deadline = Instant::now() + self.timeout;
        let timed_out = || {
            MigrateError::unreadable(
                entry,
                format!("timed out after {}s", self.timeout.as_secs_f32()),
            )
        };

        // Drain both pipes on helper threads so a chatty child never
        // blocks on a full pipe while we wait for it.
        let stdout = spawn_drain(child.stdout.take());
        let stderr = spawn_drain(child.stderr.take());

        let status = match wait_until(&mut child, deadline) {
            Ok(Some(status)) => status,
            Ok(None) => {
                let _ = child.kill();
                let _ = child.wait();
                // The drain threads are left detached: a grandchild (gpg)
                // may still hold the pipes open.
                return Err(timed_out());
            }
            Err(e) => {
                let _ = child.kill();
                return Err(MigrateError::unreadable(entry, e.to_string()));
            }
        };

        // The child has exited, but anything it spawned may keep the pipes
        // open; collecting the output shares the same deadline.
        let out = Zeroizing::new(collect(&stdout, deadline).ok_or_else(timed_out)?);
        let err = collect(&stderr, deadline).ok_or_else(timed_out)?;

        if !status.success() {
            let diag = String::from_utf8_lossy(&err).trim().to_string();
            let reason = if diag.is_empty() {
                format!("'{}' exited with {status}", self.command)
            } else {
                diag
            };
            return Err(MigrateError::unreadable(entry, reason));
        }

        let text = String::from_utf8_lossy(&out);
        Ok(Zeroizing::new(text.trim().to_string()))
    }
}

/// Wait for `child` to exit, giving up at `deadline`.
///
/// Returns `Ok(None)` when the deadline passed with the child still running.
fn wait_until(child: &mut Child, deadline: Instant) -> std::io::Result<Option<ExitStatus>> {
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Some(status));
        }
        let now = Instant::now();
        if now >= deadline {
            return Ok(None);
        }
        thread::sleep(POLL_INTERVAL.min(deadline - now));
    }
}

/// Read `pipe` to the end on a helper thread; the buffer arrives on the
/// returned channel.
fn spawn_drain<R: Read + Send + 'static>(pipe: Option<R>) -> Receiver<Vec<u8>> {
    let (tx, rx) = mpsc::channel();
    match pipe {
        Some(mut pipe) => {
            thread::spawn(move || {
                let mut buf = Vec::new();
                let _ = pipe.read_to_end(&mut buf);
                let _ = tx.send(buf);
            });
        }
        None => {
            let _ = tx.send(Vec::new());
        }
    }
    rx
}

/// Output of a drain thread, or `None` if it is not done by `deadline`.
fn collect(rx: &Receiver<Vec<u8>>, deadline: Instant) -> Option<Vec<u8>> {
    match rx.recv_timeout(deadline.saturating_duration_since(Instant::now())) {
        Ok(buf) => Some(buf),
        Err(RecvTimeoutError::Timeout) => None,
        // The drain thread died; treat the stream as empty.
        Err(RecvTimeoutError::Disconnected) => Some(Vec::new()),
    }
}

/// Name of the controlling terminal, as printed by `tty`.
///
/// Returns `None` when stdin is not a terminal (e.g. under CI).
pub fn detect_tty() -> Option<String> {
    let output = Command::new("tty")
        .stdin(Stdio::inherit())
        .stderr(Stdio::null())
        .output()
        .ok()?;

    if !output.status.success() {
        return None;
    }

    let name = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}
