use anyhow::Result;
use linker_core::clock::Clock;
use linker_core::indexer::Indexer;
use linker_core::models::LinkDraft;
use std::io::Write;
use storage::{Link, LinkStore};

pub fn run_add(
    store: &dyn LinkStore,
    clock: &dyn Clock,
    draft: LinkDraft,
    out: &mut dyn Write,
) -> Result<Link> {
    let link = Indexer::new(store, clock).add(draft)?;
    writeln!(out, "added: {}", link.url)?;
    Ok(link)
}
