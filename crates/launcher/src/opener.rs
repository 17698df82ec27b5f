use crate::{LauncherError, Opener};
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use tracing::debug;

/// Launches the platform URL handler and forgets about it.
#[derive(Debug, Clone)]
pub struct SystemOpener {
    program: String,
}

impl SystemOpener {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// `open` if it is on `PATH`, otherwise `xdg-open`.
    pub fn detect() -> Self {
        Self::detect_in(std::env::var_os("PATH"))
    }

    /// Same as [`SystemOpener::detect`] against an explicit search path.
    pub fn detect_in(paths: Option<OsString>) -> Self {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        let program = match which::which_in("open", paths, cwd) {
            Ok(found) => {
                debug!("using {} as the opener", found.display());
                "open"
            }
            Err(_) => "xdg-open",
        };
        Self::new(program)
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Opener for SystemOpener {
    fn open(&self, url: &str) -> Result<(), LauncherError> {
        let child = Command::new(&self.program)
            .arg(url)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| LauncherError::Unavailable {
                program: self.program.clone(),
                source,
            })?;
        debug!("started {} (pid {}) for {}", self.program, child.id(), url);
        Ok(())
    }
}
