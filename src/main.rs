//! # Trend Radar
//!
//! A daily-trends pipeline that gathers trending-news items, asks an LLM for
//! a short narrative analysis of their titles, and renders both into a
//! single static HTML report page with an embedded heat chart.
//!
//! ## Usage
//!
//! ```sh
//! # Sample items, narrative skipped when no key is configured
//! trend_radar -o ./output
//!
//! # Live items plus AI narrative
//! DEEPSEEK_API_KEY=sk-... trend_radar --source-url https://hot.example.com/api/list
//! ```
//!
//! ## Architecture
//!
//! One strictly sequential run per invocation:
//! 1. **Acquire**: sample items, or one paginated GET against the live source
//! 2. **Summarize**: one chat-completion call; failures degrade to a
//!    placeholder narrative instead of failing the run
//! 3. **Render**: pure conversion of the report into HTML
//! 4. **Persist**: write `index.html` into the output directory
//!
//! A failed or empty acquisition and a failed write are fatal (non-zero
//! exit, nothing written); the summarization path never is.

use chrono::Local;
use clap::Parser;
use std::error::Error;
use std::path::Path;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod api;
mod cli;
mod models;
mod outputs;
mod sources;
mod utils;

use api::SummaryGenerator;
use cli::Cli;
use models::TrendReport;
use utils::ensure_writable_dir;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    run(Cli::parse()).await
}

/// One full pipeline run. Only acquisition and persistence failures
/// propagate; everything on the summarization path is absorbed upstream.
async fn run(args: Cli) -> Result<(), Box<dyn Error>> {
    let start_time = std::time::Instant::now();
    info!("trend_radar starting up");

    // Early check: a doomed run should fail before any network call
    if let Err(e) = ensure_writable_dir(&args.output_dir).await {
        error!(
            path = %args.output_dir,
            error = %e,
            "Output directory is not writable (fix perms or choose a different path)"
        );
        return Err(e);
    }

    // ---- Acquire ----
    let items = match args.source_url.as_deref() {
        Some(endpoint) => {
            match sources::hotlist::fetch_trending(endpoint, args.fetch_offset, args.fetch_limit)
                .await
            {
                Ok(items) => items,
                Err(e) => {
                    error!(%endpoint, error = %e, "News source unavailable; aborting run");
                    return Err(e);
                }
            }
        }
        None => sources::sample::trending_items(),
    };

    if items.is_empty() {
        error!("News source returned no items; refusing to write an empty report");
        return Err("no trending items available".into());
    }
    info!(count = items.len(), "Acquired trending items");

    // ---- Summarize ----
    let generator = SummaryGenerator::new(
        args.api_key.clone(),
        args.api_url.clone(),
        args.model.clone(),
        args.temperature,
    );
    let narrative = generator.generate(&items).await;

    // ---- Render ----
    let report = TrendReport {
        generated_at: Local::now().format("%Y-%m-%d %H:%M").to_string(),
        items,
        narrative,
    };
    let page = outputs::html::render(&report);

    // ---- Persist ----
    let output_path = Path::new(&args.output_dir).join("index.html");
    info!(path = %output_path.display(), "Writing report page");
    if let Err(e) = tokio::fs::write(&output_path, page).await {
        error!(path = %output_path.display(), error = %e, "Failed writing report page");
        return Err(e.into());
    }

    let elapsed = start_time.elapsed();
    info!(
        path = %output_path.display(),
        item_count = report.items.len(),
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Report written"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_args(output_dir: &str) -> Cli {
        Cli {
            output_dir: output_dir.to_string(),
            source_url: None,
            fetch_offset: 0,
            fetch_limit: 30,
            api_key: None,
            api_url: "https://api.deepseek.com/v1/chat/completions".to_string(),
            model: "deepseek-chat".to_string(),
            temperature: 0.7,
        }
    }

    fn temp_output_dir(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("trend_radar_{}_{}", name, std::process::id()))
    }

    #[tokio::test]
    async fn test_run_samples_without_key_writes_placeholder_report() {
        let dir = temp_output_dir("sample");
        let args = test_args(&dir.to_string_lossy());

        run(args).await.unwrap();

        let page = std::fs::read_to_string(dir.join("index.html")).unwrap();
        assert!(page.contains("AI trend narrative unavailable: DEEPSEEK_API_KEY is not set."));
        assert!(page.contains("heatChart"));
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn test_run_completes_when_summary_service_is_down() {
        let dir = temp_output_dir("degraded");
        let mut args = test_args(&dir.to_string_lossy());
        args.api_key = Some("test-key".to_string());
        // Refused loopback port: transport failure, absorbed into the page
        args.api_url = "http://127.0.0.1:9/v1/chat/completions".to_string();

        run(args).await.unwrap();

        let page = std::fs::read_to_string(dir.join("index.html")).unwrap();
        assert!(page.contains("AI trend narrative unavailable"));
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn test_run_aborts_without_report_when_source_fails() {
        let dir = temp_output_dir("source_down");
        let mut args = test_args(&dir.to_string_lossy());
        args.source_url = Some("http://127.0.0.1:9/api/list".to_string());

        assert!(run(args).await.is_err());
        assert!(!dir.join("index.html").exists());
        let _ = std::fs::remove_dir_all(&dir);
    }
}
