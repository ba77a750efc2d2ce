//! Acquisition input envelope and the final analysis report.

use chrono::{SecondsFormat, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::aggregator::{compute_statistics, generate_insights, CommentHighlights, Insight, Statistics};
use crate::batch::{score_comments_with, BatchOptions};
use crate::error::{AnalysisError, Result};
use crate::models::{Comment, ScoredComment};
use crate::scorer::SentimentScorer;

pub const PLATFORM: &str = "youtube";
pub const METHOD: &str = concat!("comment-sentiment lexicon analysis v", env!("CARGO_PKG_VERSION"));

// Keys the report sets itself; the same keys in scraped metadata are dropped
const RESERVED_METADATA_KEYS: [&str; 6] = [
    "platform",
    "videoId",
    "videoUrl",
    "analysisDate",
    "extractedComments",
    "method",
];

static VIDEO_ID_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"youtube\.com/watch\?v=([\w-]+)",
        r"youtu\.be/([\w-]+)",
        r"youtube\.com/embed/([\w-]+)",
        r"youtube\.com/shorts/([\w-]+)",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("static regex"))
    .collect()
});

/// Video id from a watch, short-link, embed or shorts URL; anything else is
/// taken to be a bare id.
pub fn extract_video_id(url: &str) -> String {
    VIDEO_ID_PATTERNS
        .iter()
        .find_map(|re| re.captures(url))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| url.trim().to_string())
}

// ============================================================================
// Input
// ============================================================================

/// Output of the comment scraper.
#[derive(Debug, Clone, Deserialize)]
pub struct ScrapeEnvelope {
    #[serde(default = "default_success")]
    pub success: bool,
    #[serde(default)]
    pub video_id: Option<String>,
    #[serde(default)]
    pub total: Option<usize>,
    #[serde(default)]
    pub comments: Vec<Comment>,
    /// Video details (title, channel, counts, ...) passed through untouched
    #[serde(default)]
    pub metadata: Map<String, Value>,
    #[serde(default)]
    pub error: Option<String>,
}

fn default_success() -> bool {
    true
}

impl ScrapeEnvelope {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Per-run options.
#[derive(Debug, Clone, Default)]
pub struct AnalysisRequest {
    pub video_url: Option<String>,
    pub max_comments: Option<usize>,
    pub batch: BatchOptions,
}

// ============================================================================
// Output
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportMetadata {
    pub platform: String,
    pub video_id: Option<String>,
    #[serde(flatten)]
    pub video: Map<String, Value>,
    pub video_url: Option<String>,
    pub analysis_date: String,
    pub extracted_comments: usize,
    pub method: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub success: bool,
    pub metadata: ReportMetadata,
    pub statistics: Statistics,
    pub insights: Vec<Insight>,
    pub highlights: CommentHighlights,
    pub comments: Vec<ScoredComment>,
}

/// Score every comment in the envelope and assemble the report.
pub fn analyze_envelope(
    scorer: &SentimentScorer,
    envelope: ScrapeEnvelope,
    request: &AnalysisRequest,
) -> Result<AnalysisReport> {
    if !envelope.success {
        let reason = envelope
            .error
            .unwrap_or_else(|| "scraper reported failure".to_string());
        return Err(AnalysisError::Acquisition(reason));
    }

    let mut comments = envelope.comments;
    if let Some(cap) = request.max_comments {
        if comments.len() > cap {
            tracing::info!("✂️ Capping {} comments at {}", comments.len(), cap);
            comments.truncate(cap);
        }
    }
    if comments.is_empty() {
        return Err(AnalysisError::EmptyCorpus);
    }

    let video_id = envelope
        .video_id
        .or_else(|| request.video_url.as_deref().map(extract_video_id));
    tracing::info!(
        "🎯 Analyzing {} comments for video {}",
        comments.len(),
        video_id.as_deref().unwrap_or("unknown")
    );

    let scored = score_comments_with(scorer, &comments, request.batch);

    tracing::info!("📊 Calculating statistics...");
    let statistics = compute_statistics(&scored)?;

    tracing::info!("💡 Generating insights...");
    let insights = generate_insights(&scored, &statistics);
    let highlights = CommentHighlights::from_comments(&scored);

    let mut video = envelope.metadata;
    for key in RESERVED_METADATA_KEYS {
        video.remove(key);
    }

    let metadata = ReportMetadata {
        platform: PLATFORM.to_string(),
        video_id,
        video,
        video_url: request.video_url.clone(),
        analysis_date: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        extracted_comments: scored.len(),
        method: METHOD.to_string(),
    };

    tracing::info!(
        "✅ Analysis complete: {}% positive, {}% negative, {}% neutral",
        statistics.positive_percent,
        statistics.negative_percent,
        statistics.neutral_percent
    );

    Ok(AnalysisReport {
        success: true,
        metadata,
        statistics,
        insights,
        highlights,
        comments: scored,
    })
}
