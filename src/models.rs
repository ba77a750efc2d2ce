//! Core records passed between the scorer, the batch runner and the aggregator.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Five-bucket sentiment classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SentimentLabel {
    #[serde(rename = "Very Positive")]
    VeryPositive,
    #[serde(rename = "Positive")]
    Positive,
    #[serde(rename = "Neutral")]
    Neutral,
    #[serde(rename = "Negative")]
    Negative,
    #[serde(rename = "Very Negative")]
    VeryNegative,
}

impl SentimentLabel {
    /// All labels, most positive first.
    pub const ALL: [SentimentLabel; 5] = [
        SentimentLabel::VeryPositive,
        SentimentLabel::Positive,
        SentimentLabel::Neutral,
        SentimentLabel::Negative,
        SentimentLabel::VeryNegative,
    ];

    /// Dashboard display text.
    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::VeryPositive => "Very Positive",
            SentimentLabel::Positive => "Positive",
            SentimentLabel::Neutral => "Neutral",
            SentimentLabel::Negative => "Negative",
            SentimentLabel::VeryNegative => "Very Negative",
        }
    }

    pub fn is_positive(&self) -> bool {
        matches!(self, SentimentLabel::VeryPositive | SentimentLabel::Positive)
    }

    pub fn is_negative(&self) -> bool {
        matches!(self, SentimentLabel::VeryNegative | SentimentLabel::Negative)
    }

    pub fn is_neutral(&self) -> bool {
        *self == SentimentLabel::Neutral
    }
}

impl Default for SentimentLabel {
    fn default() -> Self {
        SentimentLabel::Neutral
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of scoring a single comment.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SentimentResult {
    #[serde(rename = "sentiment")]
    pub label: SentimentLabel,
    /// Signed strength in [-1, 1]
    pub polarity: f64,
    /// Share of words (plus emoji) that carried sentiment, in [0, 1]
    pub subjectivity: f64,
    /// Derived certainty in [0, 1]
    pub confidence: f64,
}

impl SentimentResult {
    /// The fixed result for empty or blank input.
    pub fn neutral_zero() -> Self {
        Self::default()
    }
}

/// A comment as supplied by the acquisition side.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default = "unknown_author")]
    pub author: String,
    pub text: String,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub reply_count: u64,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub is_reply: bool,
}

fn unknown_author() -> String {
    "Unknown".to_string()
}

/// One output row: the comment plus its sentiment, numbered by input position.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ScoredComment {
    /// 1-based position in the input batch
    pub row: usize,
    pub author: String,
    pub text: String,
    pub sentiment: SentimentLabel,
    pub polarity: f64,
    pub subjectivity: f64,
    pub confidence: f64,
    pub likes: u64,
    pub reply_count: u64,
    pub posted_time: Option<String>,
    pub timestamp: Option<String>,
    pub is_reply: bool,
}

impl ScoredComment {
    pub fn new(row: usize, comment: &Comment, result: SentimentResult) -> Self {
        Self {
            row,
            author: comment.author.clone(),
            text: comment.text.clone(),
            sentiment: result.label,
            polarity: result.polarity,
            subjectivity: result.subjectivity,
            confidence: result.confidence,
            likes: comment.likes,
            reply_count: comment.reply_count,
            posted_time: comment.published_at.clone(),
            timestamp: comment.published_at.clone(),
            is_reply: comment.is_reply,
        }
    }

    pub fn is_question(&self) -> bool {
        self.text.contains('?')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_serializes_to_display_text() {
        let json = serde_json::to_string(&SentimentLabel::VeryNegative).unwrap();
        assert_eq!(json, "\"Very Negative\"");
        let back: SentimentLabel = serde_json::from_str("\"Very Positive\"").unwrap();
        assert_eq!(back, SentimentLabel::VeryPositive);
    }

    #[test]
    fn test_label_display_matches_serde() {
        for label in SentimentLabel::ALL {
            let json = serde_json::to_string(&label).unwrap();
            assert_eq!(json.trim_matches('"'), label.to_string());
        }
    }

    #[test]
    fn test_label_buckets() {
        assert!(SentimentLabel::VeryPositive.is_positive());
        assert!(SentimentLabel::Negative.is_negative());
        assert!(SentimentLabel::Neutral.is_neutral());
        assert!(!SentimentLabel::Neutral.is_positive());
        assert!(!SentimentLabel::Neutral.is_negative());
    }

    #[test]
    fn test_comment_defaults_from_scraper_json() {
        let comment: Comment = serde_json::from_str(r#"{"text": "nice video"}"#).unwrap();
        assert_eq!(comment.author, "Unknown");
        assert_eq!(comment.likes, 0);
        assert!(comment.published_at.is_none());
    }

    #[test]
    fn test_scored_comment_wire_names() {
        let comment = Comment {
            author: "a".into(),
            text: "why?".into(),
            reply_count: 2,
            published_at: Some("2 days ago".into()),
            ..Default::default()
        };
        let row = ScoredComment::new(1, &comment, SentimentResult::neutral_zero());
        let value = serde_json::to_value(&row).unwrap();
        assert_eq!(value["replyCount"], 2);
        assert_eq!(value["postedTime"], "2 days ago");
        assert_eq!(value["sentiment"], "Neutral");
        assert!(row.is_question());
    }
}
