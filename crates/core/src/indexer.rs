//! Store mutations: adding links and recording opens.

use crate::clock::Clock;
use crate::models::LinkDraft;
use anyhow::Context;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use storage::{Link, LinkStore, Store};
use tracing::{info, warn};

pub struct Indexer<'a> {
    store: &'a dyn LinkStore,
    clock: &'a dyn Clock,
}

impl<'a> Indexer<'a> {
    pub fn new(store: &'a dyn LinkStore, clock: &'a dyn Clock) -> Self {
        Self { store, clock }
    }

    /// Appends a new link and rewrites the whole store.
    pub fn add(&self, draft: LinkDraft) -> anyhow::Result<Link> {
        let mut snapshot = self.store.load();
        let link = build_link(draft, &snapshot, self.clock.now());
        snapshot.append(link.clone());
        self.store
            .persist(&snapshot)
            .with_context(|| format!("saving link store after adding {}", link.url))?;
        info!("added link {} ({})", link.id, link.url);
        Ok(link)
    }

    /// Bumps usage stats for the opened link. Looks up `id` first and falls
    /// back to the first link with `url`. Returns the updated link, or `None`
    /// if nothing matched.
    pub fn record_open(&self, id: Option<&str>, url: &str) -> anyhow::Result<Option<Link>> {
        let mut snapshot = self.store.load();
        let target = id
            .filter(|id| snapshot.contains_id(id))
            .map(str::to_string)
            .or_else(|| {
                snapshot
                    .links()
                    .iter()
                    .find(|l| l.url == url)
                    .map(|l| l.id.clone())
            });
        let Some(target) = target else {
            warn!("opened url {} is not in the store", url);
            return Ok(None);
        };

        let Some(updated) = snapshot.record_open(&target, self.clock.now()).cloned() else {
            return Ok(None);
        };
        self.store
            .persist(&snapshot)
            .context("saving link store after recording an open")?;
        Ok(Some(updated))
    }
}

/// Normalizes a draft into a link with a fresh id.
pub fn build_link(draft: LinkDraft, existing: &Store, now: DateTime<Utc>) -> Link {
    let mut link = Link::new(unique_id(existing, now), draft.url);
    link.title = draft.title;
    link.comment = draft.comment;
    link.tags = parse_tags(&draft.tags);
    link.labels = parse_labels(&draft.labels);
    link
}

/// Nanosecond creation timestamp, bumped until it is unused in `existing`.
fn unique_id(existing: &Store, now: DateTime<Utc>) -> String {
    let mut nanos = now
        .timestamp_nanos_opt()
        .unwrap_or_else(|| now.timestamp_millis().saturating_mul(1_000_000));
    let mut id = nanos.to_string();
    while existing.contains_id(&id) {
        nanos = nanos.saturating_add(1);
        id = nanos.to_string();
    }
    id
}

/// Splits comma-separated entries, trims, lowercases, drops empties and
/// duplicates. First occurrence keeps its position.
pub fn parse_tags(raw: &[String]) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for tag in raw.iter().flat_map(|entry| entry.split(',')) {
        let tag = tag.trim().to_lowercase();
        if !tag.is_empty() && !tags.contains(&tag) {
            tags.push(tag);
        }
    }
    tags
}

/// Parses `key=value` entries, splitting at the first `=`. Entries without
/// `=` are skipped; a repeated key keeps the last value.
pub fn parse_labels(raw: &[String]) -> BTreeMap<String, String> {
    let mut labels = BTreeMap::new();
    for entry in raw {
        match entry.split_once('=') {
            Some((key, value)) => {
                labels.insert(key.to_string(), value.to_string());
            }
            None => warn!("ignoring label without '=': {}", entry),
        }
    }
    labels
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use chrono::{Duration, TimeZone};
    use storage::MemoryStore;

    fn clock() -> FixedClock {
        FixedClock(Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap())
    }

    fn strings(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn tags_are_split_normalized_and_deduplicated() {
        let tags = parse_tags(&strings(&["Go, CLI", "go", " ", "tools,,cli"]));
        assert_eq!(tags, strings(&["go", "cli", "tools"]));
    }

    #[test]
    fn labels_split_at_first_equals() {
        let labels = parse_labels(&strings(&["env=prod", "query=a=b", "broken", "env=dev", "empty="]));
        assert_eq!(labels.get("env").map(String::as_str), Some("dev"));
        assert_eq!(labels.get("query").map(String::as_str), Some("a=b"));
        assert_eq!(labels.get("empty").map(String::as_str), Some(""));
        assert!(!labels.contains_key("broken"));
        assert_eq!(labels.len(), 3);
    }

    #[test]
    fn add_appends_and_persists() {
        let store = MemoryStore::default();
        let clock = clock();
        let indexer = Indexer::new(&store, &clock);

        let link = indexer
            .add(LinkDraft {
                url: "https://go.dev/blog".to_string(),
                title: "Go Blog".to_string(),
                tags: strings(&["Go,cli"]),
                labels: strings(&["lang=go"]),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(link.id, clock.0.timestamp_nanos_opt().unwrap().to_string());
        assert_eq!(link.tags, strings(&["go", "cli"]));
        assert_eq!(link.open_count, 0);
        assert!(link.last_opened.is_none());
        assert_eq!(store.snapshot().links(), &[link]);
    }

    #[test]
    fn ids_stay_unique_under_a_frozen_clock() {
        let store = MemoryStore::default();
        let clock = clock();
        let indexer = Indexer::new(&store, &clock);
        let first = indexer.add(LinkDraft { url: "a".into(), ..Default::default() }).unwrap();
        let second = indexer.add(LinkDraft { url: "b".into(), ..Default::default() }).unwrap();
        assert_ne!(first.id, second.id);
        assert_eq!(store.snapshot().len(), 2);
    }

    #[test]
    fn add_reports_write_failures() {
        let store = MemoryStore::failing(Store::default());
        let clock = clock();
        let indexer = Indexer::new(&store, &clock);
        let err = indexer
            .add(LinkDraft { url: "https://example.com".into(), ..Default::default() })
            .unwrap_err();
        assert!(err.to_string().contains("https://example.com"));
        assert!(store.snapshot().is_empty());
    }

    #[test]
    fn record_open_prefers_id_then_url() {
        let mut a = Link::new("a", "https://same.example");
        a.last_opened = Some(clock().0 - Duration::days(3));
        let b = Link::new("b", "https://same.example");
        let store = MemoryStore::new(Store::new(vec![a, b]));
        let clock = clock();
        let indexer = Indexer::new(&store, &clock);

        let updated = indexer.record_open(Some("b"), "https://same.example").unwrap().unwrap();
        assert_eq!(updated.id, "b");
        assert_eq!(updated.open_count, 1);
        assert_eq!(updated.last_opened, Some(clock.0));

        let updated = indexer.record_open(None, "https://same.example").unwrap().unwrap();
        assert_eq!(updated.id, "a");
        assert_eq!(updated.last_opened, Some(clock.0));

        assert!(indexer.record_open(Some("zzz"), "https://other").unwrap().is_none());
        let snapshot = store.snapshot();
        assert_eq!(snapshot.links()[0].open_count, 1);
        assert_eq!(snapshot.links()[1].open_count, 1);
    }

    #[test]
    fn record_open_with_stale_id_uses_the_url() {
        let store = MemoryStore::new(Store::new(vec![Link::new("a", "https://a.example")]));
        let clock = clock();
        let indexer = Indexer::new(&store, &clock);
        let updated = indexer.record_open(Some("gone"), "https://a.example").unwrap().unwrap();
        assert_eq!(updated.id, "a");
        assert_eq!(store.snapshot().links()[0].open_count, 1);
    }

    #[test]
    fn record_open_reports_write_failures() {
        let store = MemoryStore::failing(Store::new(vec![Link::new("a", "https://a.example")]));
        let clock = clock();
        let indexer = Indexer::new(&store, &clock);
        assert!(indexer.record_open(Some("a"), "https://a.example").is_err());
        assert_eq!(store.snapshot().links()[0].open_count, 0);
    }
}
