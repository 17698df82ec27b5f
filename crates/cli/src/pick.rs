//! Search mode: rank, hand the list to the picker, open the choice.

use anyhow::Result;
use launcher::{parse_selection, Candidate, LauncherError, Opener, Selector};
use linker_core::clock::Clock;
use linker_core::config::Weights;
use linker_core::indexer::Indexer;
use linker_core::models::ScoredLink;
use linker_core::search;
use std::io::Write;
use storage::LinkStore;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    #[default]
    Interactive,
    Lines,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    NoMatches,
    Printed(usize),
    Aborted,
    Opened(String),
    OpenFailed(String),
}

pub struct Collaborators<'a> {
    pub store: &'a dyn LinkStore,
    pub clock: &'a dyn Clock,
    pub selector: &'a dyn Selector,
    pub opener: &'a dyn Opener,
}

pub async fn run_search(
    deps: &Collaborators<'_>,
    terms: &[String],
    weights: &Weights,
    mode: OutputMode,
    out: &mut dyn Write,
) -> Result<Outcome> {
    let snapshot = deps.store.load();
    let ranked = search::rank(snapshot.links(), terms, weights, deps.clock);
    if ranked.is_empty() {
        writeln!(out, "no matches")?;
        return Ok(Outcome::NoMatches);
    }

    let lines: Vec<String> = ranked.iter().map(candidate_line).collect();
    match mode {
        OutputMode::Json => {
            serde_json::to_writer_pretty(&mut *out, &ranked)?;
            writeln!(out)?;
            return Ok(Outcome::Printed(ranked.len()));
        }
        OutputMode::Lines => return print_lines(&lines, out),
        OutputMode::Interactive => {}
    }

    let picked = match deps.selector.select(lines.clone()).await {
        Ok(picked) => picked,
        Err(e @ LauncherError::TimedOut { .. }) => {
            warn!("{}", e);
            None
        }
        Err(e) => {
            warn!("picker failed, listing matches instead: {}", e);
            return print_lines(&lines, out);
        }
    };
    let Some(line) = picked else {
        return Ok(Outcome::Aborted);
    };
    let Some(selection) = parse_selection(&line) else {
        warn!("could not read picked line {:?}", line);
        return Ok(Outcome::Aborted);
    };

    // The rendered line flattens control characters, so prefer the stored URL.
    let url = selection
        .id
        .as_deref()
        .and_then(|id| ranked.iter().find(|s| s.link.id == id))
        .map(|s| s.link.url.clone())
        .unwrap_or_else(|| selection.url.clone());

    if let Err(e) = deps.opener.open(&url) {
        warn!("could not open {}: {}", url, e);
        return Ok(Outcome::OpenFailed(url));
    }

    let indexer = Indexer::new(deps.store, deps.clock);
    if let Err(e) = indexer.record_open(selection.id.as_deref(), &url) {
        warn!("opened {} but could not record it: {:#}", url, e);
    }
    Ok(Outcome::Opened(url))
}

pub fn candidate_line(scored: &ScoredLink<'_>) -> String {
    Candidate {
        score: scored.score,
        url: &scored.link.url,
        tags: &scored.link.tags,
        id: &scored.link.id,
    }
    .to_line()
}

fn print_lines(lines: &[String], out: &mut dyn Write) -> Result<Outcome> {
    for line in lines {
        writeln!(out, "{line}")?;
    }
    Ok(Outcome::Printed(lines.len()))
}
