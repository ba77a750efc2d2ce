//! Rule-based sentiment scoring for video comments, plus the per-video
//! statistics and insights built on top of it.

pub mod aggregator;
pub mod batch;
pub mod config;
pub mod error;
pub mod fallback;
pub mod lexicon;
pub mod models;
pub mod report;
pub mod scorer;
pub mod text;

pub use aggregator::{compute_statistics, generate_insights, CommentHighlights, Insight, Statistics};
pub use batch::{score_comments, score_comments_async, score_comments_with, BatchOptions};
pub use config::Config;
pub use error::{AnalysisError, Result};
pub use lexicon::Lexicon;
pub use models::{Comment, ScoredComment, SentimentLabel, SentimentResult};
pub use report::{analyze_envelope, extract_video_id, AnalysisReport, AnalysisRequest, ScrapeEnvelope};
pub use scorer::SentimentScorer;
