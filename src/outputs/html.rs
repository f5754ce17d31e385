//! HTML rendering of the trend report.
//!
//! [`render`] is a pure function: given the same report it produces the same
//! document, byte for byte. The page is self-contained apart from the
//! Chart.js CDN reference and holds four panels: the trending items, the AI
//! narrative, a platform heat bar chart, and a small weighted tag cloud.
//!
//! Chart policy: the chart section is emitted only when every item carries a
//! heat score. Live-fetched items carry none, so live reports simply have no
//! chart; a partially filled or padded series is never produced.
//!
//! No item can break the document: all text is HTML-escaped and URLs are
//! attribute-escaped before interpolation.

use crate::models::{NewsItem, TrendReport};
use html_escape::{encode_double_quoted_attribute, encode_text};
use std::fmt::Write;

/// Bar colors, cycled across however many items the report has.
const CHART_PALETTE: [&str; 3] = ["#38bdf8", "#a855f7", "#f97316"];

/// Character cap for a tag-cloud fragment.
const TAG_FRAGMENT_MAX_CHARS: usize = 12;

/// Smallest tag-cloud font size; earlier items grow from here in
/// `TAG_SIZE_STEP_PX` increments.
const TAG_SIZE_BASE_PX: usize = 20;
const TAG_SIZE_STEP_PX: usize = 4;

const PAGE_HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8" />
    <title>Trend Radar - Daily Trends</title>
    <script src="https://cdn.jsdelivr.net/npm/chart.js"></script>
    <style>
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', system-ui;
            margin: 0;
            padding: 20px;
            background: #0f172a;
            color: #e5e7eb;
        }
        h1, h2 { margin-bottom: 10px; }
        a { color: #38bdf8; text-decoration: none; }
        a:hover { text-decoration: underline; }
        .grid {
            display: grid;
            grid-template-columns: 2fr 1.5fr;
            gap: 20px;
        }
        .card {
            background: rgba(15,23,42,0.9);
            border-radius: 16px;
            padding: 20px;
            box-shadow: 0 10px 30px rgba(0,0,0,0.4);
        }
        .tag {
            display: inline-block;
            padding: 2px 8px;
            border-radius: 999px;
            font-size: 12px;
            background: #1e293b;
            margin-right: 6px;
        }
        .news-item + .news-item {
            margin-top: 12px;
            padding-top: 12px;
            border-top: 1px solid #1f2937;
        }
        .abstract { margin-top: 4px; font-size: 14px; color: #9ca3af; }
        .narrative { font-size: 14px; line-height: 1.7; white-space: pre-wrap; }
        .cloud-tag { margin-right: 10px; color: #bfdbfe; }
    </style>
</head>
<body>
"#;

/// Render the full report document.
pub fn render(report: &TrendReport) -> String {
    let mut page = String::from(PAGE_HEAD);

    writeln!(page, "    <h1>Trend Radar - Daily Trends</h1>").unwrap();
    writeln!(
        page,
        "    <p>Last updated: {}</p>",
        encode_text(&report.generated_at)
    )
    .unwrap();

    page.push_str("\n    <div class=\"grid\">\n        <div class=\"card\">\n");
    page.push_str("            <h2>Trending Now</h2>\n");
    for item in &report.items {
        writeln!(page, "            {}", news_item_block(item)).unwrap();
    }
    page.push_str("        </div>\n\n        <div class=\"card\">\n");
    page.push_str("            <h2>AI Trend Narrative</h2>\n");
    writeln!(
        page,
        "            <div class=\"narrative\">{}</div>",
        encode_text(report.narrative.display_text().as_ref())
    )
    .unwrap();
    page.push_str("        </div>\n    </div>\n");

    let series = chart_series(&report.items);

    page.push_str("\n    <div class=\"grid\" style=\"margin-top:20px;\">\n");
    if series.is_some() {
        page.push_str("        <div class=\"card\">\n");
        page.push_str("            <h2>Platform Heat</h2>\n");
        page.push_str("            <canvas id=\"heatChart\" height=\"120\"></canvas>\n");
        page.push_str("        </div>\n");
    }
    page.push_str("        <div class=\"card\">\n");
    page.push_str("            <h2>Tag Cloud</h2>\n            ");
    let item_count = report.items.len();
    for (i, item) in report.items.iter().enumerate() {
        let size = TAG_SIZE_BASE_PX + TAG_SIZE_STEP_PX * (item_count - 1 - i);
        write!(
            page,
            "<span class=\"cloud-tag\" style=\"font-size:{}px;\">{}</span>",
            size,
            encode_text(&tag_fragment(&item.title))
        )
        .unwrap();
    }
    page.push_str("\n        </div>\n    </div>\n");

    if let Some((labels, values)) = series {
        page.push_str(&chart_script(&labels, &values));
    }

    page.push_str("</body>\n</html>\n");
    page
}

fn news_item_block(item: &NewsItem) -> String {
    let title = encode_text(&item.title);
    let headline = if item.url.is_empty() {
        format!("<strong>{title}</strong>")
    } else {
        format!(
            "<strong><a href=\"{}\" target=\"_blank\" rel=\"noopener\">{title}</a></strong>",
            encode_double_quoted_attribute(&item.url)
        )
    };
    format!(
        "<div class=\"news-item\"><div><span class=\"tag\">{}</span>{}</div>\
         <div class=\"abstract\">{}</div></div>",
        encode_text(&item.source),
        headline,
        encode_text(&item.summary)
    )
}

/// Chart labels and values, in item order. `None` when the report has no
/// items or any item lacks a score; the chart is all-or-nothing.
fn chart_series(items: &[NewsItem]) -> Option<(Vec<&str>, Vec<u32>)> {
    if items.is_empty() {
        return None;
    }
    let values = items
        .iter()
        .map(|item| item.score)
        .collect::<Option<Vec<u32>>>()?;
    let labels = items.iter().map(|item| item.source.as_str()).collect();
    Some((labels, values))
}

fn chart_script(labels: &[&str], values: &[u32]) -> String {
    let colors: Vec<&str> = CHART_PALETTE
        .iter()
        .copied()
        .cycle()
        .take(values.len())
        .collect();

    let mut script = String::from("\n    <script>\n");
    script.push_str("        const ctx = document.getElementById('heatChart').getContext('2d');\n");
    script.push_str("        new Chart(ctx, {\n");
    script.push_str("            type: 'bar',\n");
    script.push_str("            data: {\n");
    writeln!(
        script,
        "                labels: {},",
        serde_json::json!(labels)
    )
    .unwrap();
    script.push_str("                datasets: [{\n");
    script.push_str("                    label: 'Heat score',\n");
    writeln!(script, "                    data: {},", serde_json::json!(values)).unwrap();
    writeln!(
        script,
        "                    backgroundColor: {},",
        serde_json::json!(colors)
    )
    .unwrap();
    script.push_str("                }]\n");
    script.push_str("            },\n");
    script.push_str(
        "            options: {
                responsive: true,
                plugins: { legend: { labels: { color: '#e5e7eb' } } },
                scales: {
                    x: { ticks: { color: '#e5e7eb' } },
                    y: { ticks: { color: '#e5e7eb' } }
                }
            }
        });
    </script>
",
    );
    script
}

/// Short display fragment for the tag cloud: the part of the title after the
/// last source-separator colon (fullwidth or ASCII), the whole title when
/// there is none, capped to [`TAG_FRAGMENT_MAX_CHARS`] characters.
fn tag_fragment(title: &str) -> String {
    let tail = title.rsplit(['：', ':']).next().unwrap_or(title).trim();
    tail.chars().take(TAG_FRAGMENT_MAX_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NarrativeFailure, TrendNarrative};

    fn scored_item(source: &str, title: &str, score: u32) -> NewsItem {
        NewsItem {
            title: title.to_string(),
            summary: format!("{title} abstract"),
            source: source.to_string(),
            url: format!("https://example.com/{score}"),
            score: Some(score),
        }
    }

    fn fixture_report() -> TrendReport {
        TrendReport {
            generated_at: "2026-08-06 09:00".to_string(),
            items: vec![
                scored_item("A", "T1", 80),
                scored_item("B", "T2", 70),
                scored_item("C", "T3", 60),
            ],
            narrative: TrendNarrative::Generated("N".to_string()),
        }
    }

    #[test]
    fn test_render_contains_every_title_in_order() {
        let page = render(&fixture_report());

        let p1 = page.find("T1").unwrap();
        let p2 = page.find("T2").unwrap();
        let p3 = page.find("T3").unwrap();
        assert!(p1 < p2 && p2 < p3);
    }

    #[test]
    fn test_render_chart_series_matches_fixture() {
        let page = render(&fixture_report());

        assert!(page.contains(r#"labels: ["A","B","C"],"#));
        assert!(page.contains("data: [80,70,60],"));
    }

    #[test]
    fn test_render_shows_timestamp_and_narrative() {
        let page = render(&fixture_report());

        assert!(page.contains("Last updated: 2026-08-06 09:00"));
        assert!(page.contains("<div class=\"narrative\">N</div>"));
    }

    #[test]
    fn test_render_multiline_narrative_verbatim() {
        let mut report = fixture_report();
        report.narrative =
            TrendNarrative::Generated("1) First point\n2) Second point".to_string());

        let page = render(&report);
        assert!(page.contains("1) First point\n2) Second point"));
    }

    #[test]
    fn test_render_placeholder_narrative_reaches_page() {
        let mut report = fixture_report();
        report.narrative = TrendNarrative::Unavailable(NarrativeFailure::MissingApiKey);

        let page = render(&report);
        assert!(page.contains("AI trend narrative unavailable: DEEPSEEK_API_KEY is not set."));
    }

    #[test]
    fn test_render_is_deterministic() {
        let report = fixture_report();
        assert_eq!(render(&report), render(&report));
    }

    #[test]
    fn test_chart_omitted_when_any_score_missing() {
        let mut report = fixture_report();
        report.items[1].score = None;

        let page = render(&report);
        assert!(!page.contains("heatChart"));
        assert!(!page.contains("new Chart"));
        // The rest of the page still renders
        assert!(page.contains("T2"));
        assert!(page.contains("Tag Cloud"));
    }

    #[test]
    fn test_chart_omitted_for_empty_item_list() {
        let report = TrendReport {
            generated_at: "2026-08-06 09:00".to_string(),
            items: vec![],
            narrative: TrendNarrative::Generated("N".to_string()),
        };
        assert!(!render(&report).contains("heatChart"));
    }

    #[test]
    fn test_item_text_is_escaped() {
        let mut report = fixture_report();
        report.items[0].title = "<script>alert(1)</script>".to_string();
        report.items[0].summary = "a & b < c".to_string();

        let page = render(&report);
        assert!(!page.contains("<script>alert(1)</script>"));
        assert!(page.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(page.contains("a &amp; b &lt; c"));
    }

    #[test]
    fn test_empty_url_renders_without_link() {
        let mut report = fixture_report();
        report.items[0].url = String::new();

        let page = render(&report);
        assert!(page.contains("<strong>T1</strong>"));
        assert!(!page.contains("href=\"\""));
    }

    #[test]
    fn test_tag_fragment_takes_tail_after_separator() {
        assert_eq!(tag_fragment("知乎热榜：大模型应用加速落地"), "大模型应用加速落地");
        assert_eq!(tag_fragment("Release: Rust"), "Rust");
        assert_eq!(tag_fragment("No separator"), "No separator");
    }

    #[test]
    fn test_tag_fragment_caps_length_in_chars() {
        let fragment = tag_fragment("a very long headline without any colon");
        assert_eq!(fragment.chars().count(), TAG_FRAGMENT_MAX_CHARS);

        // Char-based cap, never a byte slice panic on CJK titles
        let cjk = tag_fragment("大模型应用加速落地进入日常工作流程当中");
        assert!(cjk.chars().count() <= TAG_FRAGMENT_MAX_CHARS);
    }

    #[test]
    fn test_tag_cloud_earlier_items_render_larger() {
        let report = TrendReport {
            generated_at: "2026-08-06 09:00".to_string(),
            items: vec![scored_item("A", "First", 80), scored_item("B", "Second", 70)],
            narrative: TrendNarrative::Generated("N".to_string()),
        };

        let page = render(&report);
        let first = page.find("font-size:24px").unwrap();
        let second = page.find("font-size:20px").unwrap();
        assert!(first < second);
    }
}
