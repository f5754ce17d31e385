//! Built-in sample items.
//!
//! Used whenever no live endpoint is configured, so the report can be built
//! end to end without any external dependency. Each item carries a synthetic
//! heat score, descending from the first item, which feeds the platform
//! comparison chart.

use crate::models::NewsItem;

const HEAT_BASE: u32 = 80;
const HEAT_STEP: u32 = 10;

/// Return the fixed sample set, first item hottest.
pub fn trending_items() -> Vec<NewsItem> {
    let raw: [(&str, &str, &str, &str); 4] = [
        (
            "Hacker News",
            "LLM tooling moves into everyday engineering work",
            "More teams wire AI assistants into code review, docs, and reporting pipelines.",
            "https://www.example.com/llm-tooling",
        ),
        (
            "GitHub Trending",
            "Rust 1.80: faster builds and a leaner standard library",
            "The release notes highlight compile-time wins and long-requested stabilizations.",
            "https://www.example.com/rust-release",
        ),
        (
            "Reddit r/technology",
            "Platform layoffs continue as budgets shift toward AI",
            "Several large platforms announced reorgs that move headcount into model teams.",
            "https://www.example.com/reorg",
        ),
        (
            "Product Hunt",
            "Short-video commerce keeps growing under tighter rules",
            "Marketplaces tighten moderation while creators chase longer-lived formats.",
            "https://www.example.com/shortvideo",
        ),
    ];

    raw.into_iter()
        .enumerate()
        .map(|(i, (source, title, summary, url))| NewsItem {
            title: title.to_string(),
            summary: summary.to_string(),
            source: source.to_string(),
            url: url.to_string(),
            score: Some(HEAT_BASE - HEAT_STEP * i as u32),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_items_nonempty_titles() {
        let items = trending_items();
        assert!(!items.is_empty());
        assert!(items.iter().all(|item| !item.title.trim().is_empty()));
    }

    #[test]
    fn test_sample_scores_descend_from_first() {
        let items = trending_items();
        let scores: Vec<u32> = items.iter().map(|item| item.score.unwrap()).collect();
        assert_eq!(scores[0], HEAT_BASE);
        assert!(scores.windows(2).all(|pair| pair[0] > pair[1]));
    }

    #[test]
    fn test_sample_items_are_stable() {
        assert_eq!(trending_items(), trending_items());
    }
}
