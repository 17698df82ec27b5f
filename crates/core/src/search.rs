use crate::clock::Clock;
use crate::config::Weights;
use crate::models::ScoredLink;
use crate::scoring;
use storage::Link;
use tracing::debug;

/// Ranks `links` against `terms`.
///
/// With no terms every link is returned (browse mode). Otherwise only links
/// scoring strictly above zero are kept. Results are ordered by descending
/// score; equal scores keep their order in `links`.
pub fn rank<'a>(
    links: &'a [Link],
    terms: &[String],
    weights: &Weights,
    clock: &dyn Clock,
) -> Vec<ScoredLink<'a>> {
    let now = clock.now();
    let lowered: Vec<String> = terms.iter().map(|t| t.to_lowercase()).collect();
    let browse = lowered.is_empty();

    let mut results: Vec<ScoredLink<'a>> = links
        .iter()
        .map(|link| ScoredLink {
            score: scoring::score_lowered(link, &lowered, weights, now),
            link,
        })
        .filter(|s| browse || s.score > 0.0)
        .collect();

    // `sort_by` is stable, which gives the tie-break.
    results.sort_by(|a, b| b.score.total_cmp(&a.score));

    debug!(
        "ranked {} of {} link(s) for {} term(s)",
        results.len(),
        links.len(),
        lowered.len()
    );
    results
}
