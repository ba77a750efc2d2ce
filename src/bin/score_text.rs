use anyhow::{Context, Result};
use dotenv::dotenv;
use tracing_subscriber::EnvFilter;

use comment_sentiment::Config;

/// Score each argument and print its full breakdown, one JSON line per text.
fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let texts: Vec<String> = std::env::args().skip(1).collect();
    if texts.is_empty() {
        eprintln!("usage: score_text TEXT [TEXT ...]");
        return Ok(());
    }

    let scorer = Config::from_env()
        .build_scorer()
        .context("Failed to build sentiment scorer")?;

    for text in &texts {
        let breakdown = scorer.breakdown(text);
        println!("{}", serde_json::to_string(&breakdown)?);
    }
    Ok(())
}
