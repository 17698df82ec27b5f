//! External collaborators: the interactive selector and the URL opener.

use std::time::Duration;
use thiserror::Error;

pub mod command;
pub mod lines;
pub mod noop;
pub mod opener;

pub use command::CommandSelector;
pub use lines::{parse_selection, Candidate, Selection};
pub use opener::SystemOpener;

#[derive(Debug, Error)]
pub enum LauncherError {
    #[error("{program} is not available: {source}")]
    Unavailable {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("talking to {program} failed: {source}")]
    Io {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{program} gave no answer within {limit:?}")]
    TimedOut { program: String, limit: Duration },
}

#[async_trait::async_trait]
pub trait Selector: Send + Sync {
    /// Offers `candidates` to the user. Returns the chosen line, or `None`
    /// when the user aborted.
    async fn select(&self, candidates: Vec<String>) -> Result<Option<String>, LauncherError>;
}

pub trait Opener: Send + Sync {
    /// Hands `url` to the platform without waiting for the result.
    fn open(&self, url: &str) -> Result<(), LauncherError>;
}
