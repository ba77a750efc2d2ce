use anyhow::{Context, Result};
use dotenv::dotenv;
use std::sync::Arc;
use tokio::io::AsyncReadExt;
use tracing_subscriber::EnvFilter;

use comment_sentiment::{analyze_envelope, AnalysisRequest, Config, ScrapeEnvelope};

const USAGE: &str = "usage: comment-sentiment [ENVELOPE.json | -] [VIDEO_URL]";

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let source = args.next().unwrap_or_else(|| "-".to_string());
    if source == "-h" || source == "--help" {
        println!("{}", USAGE);
        return Ok(());
    }
    let video_url = args.next();

    let config = Config::from_env();
    config.init_thread_pool()?;
    let scorer = Arc::new(config.build_scorer().context("Failed to build sentiment scorer")?);

    let raw = read_input(&source).await?;
    let envelope = ScrapeEnvelope::from_json_str(&raw)
        .with_context(|| format!("Invalid scrape envelope in {}", source))?;
    tracing::info!(
        "📨 Envelope loaded: {} comments (scraper reported {})",
        envelope.comments.len(),
        envelope.total.map(|t| t.to_string()).unwrap_or_else(|| "?".to_string())
    );

    let request = AnalysisRequest {
        video_url,
        max_comments: config.max_comments,
        batch: config.batch,
    };
    let report = tokio::task::spawn_blocking(move || analyze_envelope(&scorer, envelope, &request))
        .await
        .context("Analysis task failed")??;

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

async fn read_input(source: &str) -> Result<String> {
    if source == "-" {
        let mut buf = String::new();
        tokio::io::stdin()
            .read_to_string(&mut buf)
            .await
            .context("Failed to read envelope from stdin")?;
        return Ok(buf);
    }
    tokio::fs::read_to_string(source)
        .await
        .with_context(|| format!("Failed to read {}", source))
}
