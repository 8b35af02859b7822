use anyhow::Result;
use tracing::info;

use crate::models::Article;
use crate::storage::WatermarkStore;

/// Result of one filtering pass.
pub struct FilterOutcome {
    /// Articles newer than the watermark whose title matched a keyword.
    pub kept: Vec<Article>,
    /// Newest time seen across all articles, never below the input
    /// watermark.
    pub max_time: i64,
}

/// Keep articles newer than `last_seen` whose title contains at least one
/// keyword (case-sensitive substring). Every newer article advances
/// `max_time`, matching or not, so skipped items are never retried on a
/// later run.
pub fn filter_new(articles: Vec<Article>, keywords: &[String], last_seen: i64) -> FilterOutcome {
    let mut max_time = last_seen;
    let mut kept = Vec::new();

    for article in articles {
        if article.time <= last_seen {
            continue;
        }

        if article.time > max_time {
            max_time = article.time;
        }

        if keywords.iter().any(|key| article.title.contains(key.as_str())) {
            kept.push(article);
        }
    }

    FilterOutcome { kept, max_time }
}

/// Run the filter against the persisted watermark and advance it. The new
/// watermark is written even when nothing matched.
pub fn apply(
    articles: Vec<Article>,
    keywords: &[String],
    store: &WatermarkStore,
) -> Result<Vec<Article>> {
    let last_seen = store.load()?;
    let outcome = filter_new(articles, keywords, last_seen);
    store.store(outcome.max_time)?;

    info!(
        "{} of the fetched articles are new and match a keyword",
        outcome.kept.len()
    );
    Ok(outcome.kept)
}
