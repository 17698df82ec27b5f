use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Directory, relative to a search root, that holds the index and its config.
pub const INDEX_DIR: &str = ".linker";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub weights: Weights,
    #[serde(default)]
    pub selector: SelectorConfig,
    #[serde(default)]
    pub opener: OpenerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_store_dir")]
    pub dir: String,
    #[serde(default = "default_store_file")]
    pub file: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            dir: default_store_dir(),
            file: default_store_file(),
        }
    }
}

impl StoreConfig {
    /// Snapshot location. A relative `dir` is resolved against `base`.
    pub fn links_path(&self, base: &Path) -> PathBuf {
        base.join(&self.dir).join(&self.file)
    }
}

fn default_store_dir() -> String {
    INDEX_DIR.to_string()
}

fn default_store_file() -> String {
    "links.json".to_string()
}

/// Coefficients for each ranking signal.
///
/// There is deliberately no per-field default: a weights section that is
/// present must name all six coefficients or loading fails. Negative values
/// are accepted and act as penalties.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Weights {
    pub tag: f64,
    pub label: f64,
    pub title: f64,
    pub comment: f64,
    pub popularity: f64,
    pub recency: f64,
}

impl Weights {
    pub const fn new(
        tag: f64,
        label: f64,
        title: f64,
        comment: f64,
        popularity: f64,
        recency: f64,
    ) -> Self {
        Self {
            tag,
            label,
            title,
            comment,
            popularity,
            recency,
        }
    }
}

impl Default for Weights {
    fn default() -> Self {
        Self::new(2.0, 1.5, 3.0, 1.0, 0.05, 0.02)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectorConfig {
    #[serde(default = "default_selector_command")]
    pub command: String,
    #[serde(default = "default_selector_args")]
    pub args: Vec<String>,
    /// Seconds to wait for a pick; 0 waits forever.
    #[serde(default = "default_selector_timeout")]
    pub timeout_secs: u64,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            command: default_selector_command(),
            args: default_selector_args(),
            timeout_secs: default_selector_timeout(),
        }
    }
}

fn default_selector_command() -> String {
    "fzf".to_string()
}

fn default_selector_args() -> Vec<String> {
    // Candidate lines are score, url, tags, id; show only url and tags.
    vec!["--delimiter=\t".to_string(), "--with-nth=2..3".to_string()]
}

fn default_selector_timeout() -> u64 {
    600
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OpenerConfig {
    /// Program that receives the URL. Detected from `PATH` when unset.
    #[serde(default)]
    pub command: Option<String>,
}

/// Loads the layered configuration.
///
/// With an explicit `path` only that file is read (and it must exist).
/// Otherwise `$HOME/.linker/config.*` then `./.linker/config.*` are read if
/// present. `LINKER__SECTION__KEY` environment variables override both.
pub fn load(path: Option<&str>) -> anyhow::Result<AppConfig> {
    let mut roots = Vec::new();
    if let Some(home) = std::env::var_os("HOME") {
        roots.push(PathBuf::from(home));
    }
    roots.push(std::env::current_dir()?);

    let settings = file_sources(path, &roots).add_source(
        config::Environment::with_prefix("LINKER")
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true),
    );
    let cfg = settings.build()?;
    Ok(cfg.try_deserialize()?)
}

/// Same as [`load`] without the environment layer.
pub fn load_from(path: Option<&str>, roots: &[PathBuf]) -> anyhow::Result<AppConfig> {
    let cfg = file_sources(path, roots).build()?;
    Ok(cfg.try_deserialize()?)
}

fn file_sources(
    path: Option<&str>,
    roots: &[PathBuf],
) -> config::ConfigBuilder<config::builder::DefaultState> {
    let mut settings = config::Config::builder();
    if let Some(p) = path {
        settings = settings.add_source(config::File::with_name(p));
    } else {
        for root in roots {
            let name = root.join(INDEX_DIR).join("config");
            settings = settings
                .add_source(config::File::with_name(&name.to_string_lossy()).required(false));
        }
    }
    settings
}
