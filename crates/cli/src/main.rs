use anyhow::Result;
use clap::Parser;
use cli::args::{Cli, Commands};
use cli::pick::{Collaborators, OutputMode};
use cli::{add, paths, pick};
use launcher::{CommandSelector, SystemOpener};
use linker_core::clock::SystemClock;
use linker_core::config;
use std::time::Duration;
use storage::JsonFileStore;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let cfg = config::load(cli.config.as_deref())?;
    let store = JsonFileStore::new(paths::links_path(&cfg.store)?);
    let clock = SystemClock;
    let mut stdout = std::io::stdout().lock();

    match cli.command {
        Some(Commands::Add(args)) => {
            add::run_add(&store, &clock, args.into(), &mut stdout)?;
        }
        None => {
            let mode = if cli.search.json {
                OutputMode::Json
            } else if cli.search.print {
                OutputMode::Lines
            } else {
                OutputMode::Interactive
            };
            let timeout = match cfg.selector.timeout_secs {
                0 => None,
                secs => Some(Duration::from_secs(secs)),
            };
            let selector = CommandSelector::new(
                cfg.selector.command.clone(),
                cfg.selector.args.clone(),
            )
            .with_timeout(timeout);
            let opener = cfg
                .opener
                .command
                .clone()
                .map(SystemOpener::new)
                .unwrap_or_else(SystemOpener::detect);
            let deps = Collaborators {
                store: &store,
                clock: &clock,
                selector: &selector,
                opener: &opener,
            };
            pick::run_search(&deps, &cli.search.terms, &cfg.weights, mode, &mut stdout).await?;
        }
    }
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("LINKER_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
