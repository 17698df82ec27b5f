use serde::Serialize;
use storage::Link;

/// A link paired with its score for one query. Never persisted.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ScoredLink<'a> {
    pub score: f64,
    pub link: &'a Link,
}

/// Raw user input for a new link, before normalization.
#[derive(Debug, Clone, Default)]
pub struct LinkDraft {
    pub url: String,
    pub title: String,
    pub comment: String,
    /// Each entry may hold several comma-separated tags.
    pub tags: Vec<String>,
    /// `key=value` pairs.
    pub labels: Vec<String>,
}
