//! Batch scoring. Comments are independent, so the batch is a parallel map
//! whose output keeps input order.

use rayon::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::error::{AnalysisError, Result};
use crate::models::{Comment, ScoredComment};
use crate::scorer::SentimentScorer;
use crate::text::strip_html;

pub const DEFAULT_PARALLEL_THRESHOLD: usize = 256;
pub const PROGRESS_EVERY: usize = 1000;

#[derive(Debug, Clone, Copy)]
pub struct BatchOptions {
    /// Batches smaller than this are scored on the calling thread
    pub parallel_threshold: usize,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

/// Score a batch with default options.
pub fn score_comments(scorer: &SentimentScorer, comments: &[Comment]) -> Vec<ScoredComment> {
    score_comments_with(scorer, comments, BatchOptions::default())
}

/// Score a batch. Row numbers are 1-based input positions.
pub fn score_comments_with(
    scorer: &SentimentScorer,
    comments: &[Comment],
    options: BatchOptions,
) -> Vec<ScoredComment> {
    let total = comments.len();
    let done = AtomicUsize::new(0);

    let score_one = |(index, comment): (usize, &Comment)| {
        let cleaned = Comment {
            text: strip_html(&comment.text),
            ..comment.clone()
        };
        let result = scorer.analyze(&cleaned.text);

        let finished = done.fetch_add(1, Ordering::Relaxed) + 1;
        if finished % PROGRESS_EVERY == 0 {
            tracing::info!("📊 Scored {}/{} comments", finished, total);
        }
        ScoredComment::new(index + 1, &cleaned, result)
    };

    let scored: Vec<ScoredComment> = if total < options.parallel_threshold {
        comments.iter().enumerate().map(score_one).collect()
    } else {
        tracing::debug!("⚡ Scoring {} comments on the rayon pool", total);
        comments.par_iter().enumerate().map(score_one).collect()
    };

    tracing::info!("✅ Sentiment scoring finished for {} comments", total);
    scored
}

/// Run a batch on the blocking pool so async callers keep their reactor free.
/// Dropping the returned future abandons the whole batch.
pub async fn score_comments_async(
    scorer: Arc<SentimentScorer>,
    comments: Vec<Comment>,
    options: BatchOptions,
) -> Result<Vec<ScoredComment>> {
    tokio::task::spawn_blocking(move || score_comments_with(&scorer, &comments, options))
        .await
        .map_err(|e| AnalysisError::Batch(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SentimentLabel;

    fn comment(text: &str, likes: u64) -> Comment {
        Comment {
            author: "viewer".to_string(),
            text: text.to_string(),
            likes,
            ..Default::default()
        }
    }

    fn mixed_batch(n: usize) -> Vec<Comment> {
        let texts = ["I love this, amazing!!", "this is trash, waste of time", "ok I guess", ""];
        (0..n).map(|i| comment(texts[i % texts.len()], i as u64)).collect()
    }

    #[test]
    fn test_parallel_matches_sequential_order() {
        let scorer = SentimentScorer::default();
        let comments = mixed_batch(600);

        let parallel = score_comments_with(&scorer, &comments, BatchOptions { parallel_threshold: 1 });
        let sequential = score_comments_with(
            &scorer,
            &comments,
            BatchOptions {
                parallel_threshold: usize::MAX,
            },
        );

        assert_eq!(parallel.len(), 600);
        for (i, (p, s)) in parallel.iter().zip(sequential.iter()).enumerate() {
            assert_eq!(p.row, i + 1);
            assert_eq!(p.likes, i as u64);
            assert_eq!(p.text, s.text);
            assert_eq!(p.sentiment, s.sentiment);
            assert_eq!(p.polarity, s.polarity);
        }
    }

    #[test]
    fn test_rows_follow_input_and_empty_text_is_neutral() {
        let scorer = SentimentScorer::default();
        let scored = score_comments(&scorer, &mixed_batch(4));
        assert_eq!(scored.iter().map(|c| c.row).collect::<Vec<_>>(), vec![1, 2, 3, 4]);
        assert_eq!(scored[0].sentiment, SentimentLabel::VeryPositive);
        assert_eq!(scored[1].sentiment, SentimentLabel::VeryNegative);
        assert_eq!(scored[3].sentiment, SentimentLabel::Neutral);
        assert_eq!(scored[3].polarity, 0.0);
    }

    #[test]
    fn test_html_is_stripped_before_scoring() {
        let scorer = SentimentScorer::default();
        let scored = score_comments(&scorer, &[comment("<b>amazing</b> video", 0)]);
        assert_eq!(scored[0].text, "amazing video");
        assert!(scored[0].sentiment.is_positive());
    }

    #[test]
    fn test_empty_batch() {
        let scorer = SentimentScorer::default();
        assert!(score_comments(&scorer, &[]).is_empty());
    }

    #[tokio::test]
    async fn test_async_batch_preserves_order() {
        let scorer = Arc::new(SentimentScorer::default());
        let comments = mixed_batch(300);
        let expected = score_comments(&scorer, &comments);

        let scored = score_comments_async(scorer, comments, BatchOptions::default())
            .await
            .unwrap();
        assert_eq!(scored.len(), expected.len());
        assert!(scored
            .iter()
            .zip(expected.iter())
            .all(|(a, b)| a.row == b.row && a.polarity == b.polarity));
    }
}
