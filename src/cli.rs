//! Command-line interface definitions for Trend Radar.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! Secrets and endpoints can be provided via command-line flags or
//! environment variables.

use clap::Parser;

/// Command-line arguments for the Trend Radar application.
///
/// By default the report is built from the built-in sample items. Passing
/// `--source-url` (or setting `TREND_SOURCE_URL`) switches acquisition to a
/// live fetch against that aggregation endpoint.
///
/// # Examples
///
/// ```sh
/// # Sample data, no AI narrative (no key configured)
/// trend_radar -o ./output
///
/// # Live fetch plus AI narrative
/// DEEPSEEK_API_KEY=sk-... trend_radar \
///     --source-url https://hot.example.com/api/list --fetch-limit 20
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Directory the rendered report page is written into
    #[arg(short, long, default_value = "output")]
    pub output_dir: String,

    /// News aggregation endpoint; when set, items are fetched live instead
    /// of using the built-in samples
    #[arg(long, env = "TREND_SOURCE_URL")]
    pub source_url: Option<String>,

    /// Pagination offset passed to the live source
    #[arg(long, default_value_t = 0)]
    pub fetch_offset: u32,

    /// Maximum number of items requested from the live source
    #[arg(long, default_value_t = 30)]
    pub fetch_limit: u32,

    /// DeepSeek API key used to generate the trend narrative
    #[arg(long, env = "DEEPSEEK_API_KEY")]
    pub api_key: Option<String>,

    /// Chat-completions endpoint of the summarization service
    #[arg(
        long,
        env = "DEEPSEEK_API_URL",
        default_value = "https://api.deepseek.com/v1/chat/completions"
    )]
    pub api_url: String,

    /// Model identifier sent to the summarization service
    #[arg(long, default_value = "deepseek-chat")]
    pub model: String,

    /// Sampling temperature for the narrative request
    #[arg(long, default_value_t = 0.7)]
    pub temperature: f32,
}
