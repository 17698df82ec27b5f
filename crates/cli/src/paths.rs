use anyhow::{Context, Result};
use linker_core::config::StoreConfig;
use std::path::PathBuf;

/// The index lives next to the invocation, not in the home directory.
pub fn links_path(cfg: &StoreConfig) -> Result<PathBuf> {
    let cwd = std::env::current_dir().context("resolving working directory")?;
    Ok(cfg.links_path(&cwd))
}
