//! Selector backed by an external picker process such as `fzf`.
//!
//! Candidates are streamed into the child's stdin from a spawned task while
//! the caller drains its stdout, so neither side can stall on a full pipe.

use crate::{LauncherError, Selector};
use std::io::ErrorKind;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct CommandSelector {
    program: String,
    args: Vec<String>,
    timeout: Option<Duration>,
}

impl CommandSelector {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            timeout: None,
        }
    }

    /// `None` waits for the user indefinitely.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    fn io_error(&self, source: std::io::Error) -> LauncherError {
        LauncherError::Io {
            program: self.program.clone(),
            source,
        }
    }
}

#[async_trait::async_trait]
impl Selector for CommandSelector {
    async fn select(&self, candidates: Vec<String>) -> Result<Option<String>, LauncherError> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| LauncherError::Unavailable {
                program: self.program.clone(),
                source,
            })?;

        let mut stdin = child.stdin.take().ok_or_else(|| {
            self.io_error(std::io::Error::new(
                ErrorKind::BrokenPipe,
                "stdin was not captured",
            ))
        })?;
        let count = candidates.len();
        let writer = tokio::spawn(async move {
            for line in candidates {
                stdin.write_all(line.as_bytes()).await?;
                stdin.write_all(b"\n").await?;
            }
            // Closing stdin tells the picker the list is complete.
            stdin.shutdown().await
        });

        let waited = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, child.wait_with_output()).await {
                Ok(result) => result,
                Err(_) => {
                    // The child went down with the dropped future.
                    writer.abort();
                    return Err(LauncherError::TimedOut {
                        program: self.program.clone(),
                        limit,
                    });
                }
            },
            None => child.wait_with_output().await,
        };
        let output = waited.map_err(|e| self.io_error(e))?;

        let written = writer
            .await
            .unwrap_or_else(|e| Err(std::io::Error::new(ErrorKind::Other, e)));

        debug!(
            "{} exited with {} after {} candidate(s)",
            self.program, output.status, count
        );
        Ok(settle(&self.program, &output.stdout, written))
    }
}

/// The pick the child printed wins over any trouble feeding it candidates.
fn settle(program: &str, stdout: &[u8], written: std::io::Result<()>) -> Option<String> {
    match written {
        Ok(()) => {}
        Err(e) if e.kind() == ErrorKind::BrokenPipe => {
            debug!("{} stopped reading before all candidates were sent", program);
        }
        Err(e) => warn!("sending candidates to {} failed: {}", program, e),
    }
    String::from_utf8_lossy(stdout)
        .lines()
        .map(str::trim_end)
        .find(|l| !l.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn printed_pick_survives_a_failed_write() {
        let written = Err(std::io::Error::new(ErrorKind::Other, "disk on fire"));
        assert_eq!(
            settle("fzf", b"\n1.00\thttps://example.com\t[]\t1\n", written).as_deref(),
            Some("1.00\thttps://example.com\t[]\t1")
        );
    }

    #[test]
    fn broken_pipe_with_no_output_is_an_abort() {
        let written = Err(std::io::Error::new(ErrorKind::BrokenPipe, "closed"));
        assert_eq!(settle("fzf", b"  \n", written), None);
    }
}
