//! Data models for trending items and the rendered report.
//!
//! This module defines the core data structures used throughout the
//! application:
//! - [`NewsItem`]: one trending topic as acquired from a news source
//! - [`TrendNarrative`]: the AI-generated analysis, or the tagged reason it
//!   could not be generated
//! - [`TrendReport`]: everything one pipeline run renders and persists
//!
//! The narrative is deliberately a two-armed enum rather than a bare string:
//! summarization failures are absorbed into [`NarrativeFailure`] and only
//! collapsed to display text at the render boundary.

use std::borrow::Cow;
use std::fmt;

/// A single trending topic.
///
/// # Fields
///
/// * `title` - The headline. Always non-empty; sources guarantee this.
/// * `summary` - Free-text abstract, may be empty.
/// * `source` - Label of the originating platform or feed.
/// * `url` - Absolute URL to the original content, empty when unavailable.
/// * `score` - Synthetic heat score. Present for sample items, absent for
///   live-fetched items.
///
/// Sequence order is display order and chart category order.
#[derive(Debug, Clone, PartialEq)]
pub struct NewsItem {
    pub title: String,
    pub summary: String,
    pub source: String,
    pub url: String,
    pub score: Option<u32>,
}

/// Why no AI narrative was generated for this run.
#[derive(Debug, Clone, PartialEq)]
pub enum NarrativeFailure {
    /// No credential configured; the generator made no network call.
    MissingApiKey,
    /// Transport-level failure (connect, timeout, body read).
    Transport(String),
    /// The service answered with a non-2xx status.
    BadStatus(u16),
    /// The response body did not match the expected shape.
    MalformedResponse(String),
}

impl fmt::Display for NarrativeFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NarrativeFailure::MissingApiKey => write!(f, "DEEPSEEK_API_KEY is not set"),
            NarrativeFailure::Transport(reason) => write!(f, "request failed: {reason}"),
            NarrativeFailure::BadStatus(status) => {
                write!(f, "service responded with status {status}")
            }
            NarrativeFailure::MalformedResponse(reason) => {
                write!(f, "unexpected response shape: {reason}")
            }
        }
    }
}

/// The trend narrative for one report: generated prose, or the reason the
/// generation was skipped.
#[derive(Debug, Clone, PartialEq)]
pub enum TrendNarrative {
    Generated(String),
    Unavailable(NarrativeFailure),
}

impl TrendNarrative {
    /// Text shown in the narrative panel. Failures collapse to a
    /// deterministic placeholder embedding the reason.
    pub fn display_text(&self) -> Cow<'_, str> {
        match self {
            TrendNarrative::Generated(text) => Cow::Borrowed(text),
            TrendNarrative::Unavailable(reason) => {
                Cow::Owned(format!("AI trend narrative unavailable: {reason}."))
            }
        }
    }
}

/// The artifact of one pipeline run. Built once, written once.
///
/// `generated_at` is local time at minute precision (`YYYY-MM-DD HH:MM`);
/// keeping it a preformatted string is what makes
/// [`crate::outputs::html::render`] a pure function of the report.
#[derive(Debug)]
pub struct TrendReport {
    pub generated_at: String,
    pub items: Vec<NewsItem>,
    pub narrative: TrendNarrative,
}
