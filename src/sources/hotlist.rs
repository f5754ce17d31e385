//! Live trending-list fetch.
//!
//! Issues a single paginated GET against a news-aggregation endpoint and
//! maps its JSON envelope to [`NewsItem`]s. The expected body shape is:
//!
//! ```json
//! {"data": {"list": [{"title": "...", "source": "...", "abstract": "...", "url": "..."}]}}
//! ```
//!
//! Missing fields pass through as empty strings. Live entries carry no heat
//! score; the renderer decides what that means for the chart.

use crate::models::NewsItem;
use crate::utils::REQUEST_TIMEOUT;
use itertools::Itertools;
use serde::Deserialize;
use std::error::Error;
use tracing::{info, instrument, warn};
use url::Url;

#[derive(Debug, Deserialize)]
struct HotListEnvelope {
    data: HotListData,
}

#[derive(Debug, Deserialize)]
struct HotListData {
    #[serde(default)]
    list: Vec<RawTrendingEntry>,
}

/// One raw entry as the aggregation endpoint reports it. Every field is
/// optional on the wire; absent fields default to empty.
#[derive(Debug, Deserialize)]
struct RawTrendingEntry {
    #[serde(default)]
    title: String,
    #[serde(default)]
    source: String,
    #[serde(rename = "abstract", default)]
    summary: String,
    #[serde(default)]
    url: String,
}

/// Fetch the current trending list from `endpoint`.
///
/// Performs one GET with `offset`/`limit` query parameters, bounded by
/// [`REQUEST_TIMEOUT`]. Any transport failure, non-2xx status, or malformed
/// body is returned as an error; the pipeline aborts the run in that case.
#[instrument(level = "info")]
pub async fn fetch_trending(
    endpoint: &str,
    offset: u32,
    limit: u32,
) -> Result<Vec<NewsItem>, Box<dyn Error>> {
    let mut url = Url::parse(endpoint)?;
    url.query_pairs_mut()
        .append_pair("offset", &offset.to_string())
        .append_pair("limit", &limit.to_string());

    let body = reqwest::Client::new()
        .get(url)
        .timeout(REQUEST_TIMEOUT)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;

    let items = parse_trending(&body, limit)?;
    info!(count = items.len(), "Fetched live trending items");
    Ok(items)
}

/// Parse an aggregation envelope into display-ready items.
///
/// Entries with a blank title are skipped (the report contract requires a
/// non-empty headline), duplicate titles keep their first occurrence, and
/// the list is truncated to `limit` in case the server ignores pagination.
pub fn parse_trending(body: &str, limit: u32) -> Result<Vec<NewsItem>, Box<dyn Error>> {
    let envelope: HotListEnvelope = serde_json::from_str(body)?;

    let items: Vec<NewsItem> = envelope
        .data
        .list
        .into_iter()
        .filter(|entry| {
            let keep = !entry.title.trim().is_empty();
            if !keep {
                warn!(source = %entry.source, "Skipping entry with blank title");
            }
            keep
        })
        .unique_by(|entry| entry.title.clone())
        .take(limit as usize)
        .map(|entry| NewsItem {
            title: entry.title,
            summary: entry.summary,
            source: entry.source,
            url: entry.url,
            score: None,
        })
        .collect();

    Ok(items)
}
