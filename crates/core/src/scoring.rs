//! Per-link relevance score.
//!
//! A score is the sum of independent signals: for every term, exact tag and
//! label hits plus title/comment substring hits, then a popularity term from
//! the open count and a recency term that decays with days since last open.

use crate::config::Weights;
use chrono::{DateTime, Utc};
use storage::Link;

const MILLIS_PER_DAY: f64 = 24.0 * 60.0 * 60.0 * 1000.0;

/// Scores one link against raw (not yet lowercased) terms.
pub fn score_link(link: &Link, terms: &[String], weights: &Weights, now: DateTime<Utc>) -> f64 {
    let lowered: Vec<String> = terms.iter().map(|t| t.to_lowercase()).collect();
    score_lowered(link, &lowered, weights, now)
}

/// Same as [`score_link`] but `terms` must already be lowercase.
pub(crate) fn score_lowered(
    link: &Link,
    terms: &[String],
    weights: &Weights,
    now: DateTime<Utc>,
) -> f64 {
    let title = link.title.to_lowercase();
    let comment = link.comment.to_lowercase();
    let mut score = 0.0;

    for t in terms {
        if link.tags.iter().any(|tag| tag.to_lowercase() == *t) {
            score += weights.tag;
        }

        // Label text is compared as stored. Each satisfying pair counts.
        for (key, value) in &link.labels {
            if t == key || t == value || is_key_value(t, key, value) {
                score += weights.label;
            }
        }

        if title.contains(t.as_str()) {
            score += weights.title;
        }
        if comment.contains(t.as_str()) {
            score += weights.comment;
        }
    }

    score += link.open_count as f64 * weights.popularity;
    score += recency_boost(link.last_opened, weights.recency, now);
    score
}

/// `weight / (days + 1)`, or 0 for a link never opened. Days are fractional
/// and go negative when `last_opened` lies in the future.
pub fn recency_boost(last_opened: Option<DateTime<Utc>>, weight: f64, now: DateTime<Utc>) -> f64 {
    match last_opened {
        Some(at) => {
            let days = (now - at).num_milliseconds() as f64 / MILLIS_PER_DAY;
            weight / (days + 1.0)
        }
        None => 0.0,
    }
}

fn is_key_value(term: &str, key: &str, value: &str) -> bool {
    term.strip_prefix(key)
        .and_then(|rest| rest.strip_prefix('='))
        .map(|rest| rest == value)
        .unwrap_or(false)
}
