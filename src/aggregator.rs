//! Corpus-level statistics, rule-based insights and comment highlights.

use once_cell::sync::Lazy;
use serde::{Serialize, Serializer};
use std::cmp::Ordering;

use crate::error::{AnalysisError, Result};
use crate::models::{ScoredComment, SentimentLabel};

/// Entries kept per highlight list.
pub const HIGHLIGHT_LIMIT: usize = 30;

// ============================================================================
// Statistics
// ============================================================================

/// Per-video summary. Percentages and averages keep the rounding they are
/// displayed with and serialize as fixed-decimal strings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub total_comments: usize,
    pub positive_count: usize,
    pub negative_count: usize,
    pub neutral_count: usize,
    pub very_positive_count: usize,
    pub very_negative_count: usize,
    #[serde(serialize_with = "fixed2")]
    pub positive_percent: f64,
    #[serde(serialize_with = "fixed2")]
    pub negative_percent: f64,
    #[serde(serialize_with = "fixed2")]
    pub neutral_percent: f64,
    #[serde(serialize_with = "fixed2")]
    pub very_positive_percent: f64,
    #[serde(serialize_with = "fixed2")]
    pub very_negative_percent: f64,
    #[serde(serialize_with = "fixed4")]
    pub avg_polarity: f64,
    #[serde(serialize_with = "fixed4")]
    pub avg_subjectivity: f64,
    #[serde(serialize_with = "fixed4")]
    pub avg_confidence: f64,
    pub total_likes: u64,
    #[serde(serialize_with = "fixed2")]
    pub avg_likes: f64,
    #[serde(serialize_with = "fixed4")]
    pub max_polarity: f64,
    #[serde(serialize_with = "fixed4")]
    pub min_polarity: f64,
}

fn fixed2<S: Serializer>(value: &f64, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&format!("{:.2}", value))
}

fn fixed4<S: Serializer>(value: &f64, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&format!("{:.4}", value))
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

/// Summarise a scored batch. Zero comments is [`AnalysisError::EmptyCorpus`].
pub fn compute_statistics(comments: &[ScoredComment]) -> Result<Statistics> {
    if comments.is_empty() {
        return Err(AnalysisError::EmptyCorpus);
    }

    let total = comments.len();
    let count = |label: SentimentLabel| comments.iter().filter(|c| c.sentiment == label).count();
    let percent = |n: usize| round_to(n as f64 / total as f64 * 100.0, 2);
    let average = |sum: f64, decimals: i32| round_to(sum / total as f64, decimals);

    let very_positive = count(SentimentLabel::VeryPositive);
    let very_negative = count(SentimentLabel::VeryNegative);
    let positive = very_positive + count(SentimentLabel::Positive);
    let negative = very_negative + count(SentimentLabel::Negative);
    let neutral = count(SentimentLabel::Neutral);

    let total_likes: u64 = comments.iter().map(|c| c.likes).sum();
    let polarity_sum: f64 = comments.iter().map(|c| c.polarity).sum();
    let subjectivity_sum: f64 = comments.iter().map(|c| c.subjectivity).sum();
    let confidence_sum: f64 = comments.iter().map(|c| c.confidence).sum();

    let max_polarity = comments
        .iter()
        .map(|c| c.polarity)
        .fold(f64::NEG_INFINITY, f64::max);
    let min_polarity = comments
        .iter()
        .map(|c| c.polarity)
        .fold(f64::INFINITY, f64::min);

    Ok(Statistics {
        total_comments: total,
        positive_count: positive,
        negative_count: negative,
        neutral_count: neutral,
        very_positive_count: very_positive,
        very_negative_count: very_negative,
        positive_percent: percent(positive),
        negative_percent: percent(negative),
        neutral_percent: percent(neutral),
        very_positive_percent: percent(very_positive),
        very_negative_percent: percent(very_negative),
        avg_polarity: average(polarity_sum, 4),
        avg_subjectivity: average(subjectivity_sum, 4),
        avg_confidence: average(confidence_sum, 4),
        total_likes,
        avg_likes: average(total_likes as f64, 2),
        max_polarity: round_to(max_polarity, 4),
        min_polarity: round_to(min_polarity, 4),
    })
}

// ============================================================================
// Insights
// ============================================================================

/// One observation with a recommended action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Insight {
    pub category: String,
    pub insight: String,
    pub action: String,
}

/// Values the insight rules look at.
#[derive(Debug, Clone, Copy)]
struct InsightFacts {
    total: usize,
    positive_percent: f64,
    negative_percent: f64,
    avg_confidence: f64,
    avg_likes: f64,
    very_positive: usize,
    very_negative: usize,
    questions: usize,
}

impl InsightFacts {
    /// Percentage of all comments, rounded to one decimal with ties away from zero.
    fn share(&self, n: usize) -> f64 {
        round_to(n as f64 / self.total as f64 * 100.0, 1)
    }
}

struct InsightRule {
    category: &'static str,
    applies: fn(&InsightFacts) -> bool,
    observation: fn(&InsightFacts) -> String,
    action: &'static str,
}

/// Ordered groups; within a group the first rule that applies wins.
static INSIGHT_RULES: Lazy<Vec<Vec<InsightRule>>> = Lazy::new(|| {
    vec![
        vec![
            InsightRule {
                category: "Overall Sentiment",
                applies: |f| f.positive_percent > 70.0,
                observation: |f| format!("Exceptional positive reception ({}% positive)", f.positive_percent),
                action: "Audience loves this content - create similar videos",
            },
            InsightRule {
                category: "Overall Sentiment",
                applies: |f| f.positive_percent > 50.0,
                observation: |f| format!("Strong positive reception ({}% positive)", f.positive_percent),
                action: "Content is well-received - maintain this quality",
            },
            InsightRule {
                category: "Overall Sentiment",
                applies: |f| f.positive_percent > 35.0,
                observation: |f| format!("Generally positive ({}% positive)", f.positive_percent),
                action: "Good content with room for improvement",
            },
            InsightRule {
                category: "Overall Sentiment",
                applies: |f| f.negative_percent > f.positive_percent,
                observation: |f| format!("Negative reception ({}% negative)", f.negative_percent),
                action: "Review content strategy and address concerns",
            },
            InsightRule {
                category: "Overall Sentiment",
                applies: |_| true,
                observation: |f| {
                    format!(
                        "Mixed reception ({}% positive, {}% negative)",
                        f.positive_percent, f.negative_percent
                    )
                },
                action: "Analyze both positive and negative feedback",
            },
        ],
        vec![
            InsightRule {
                category: "Sentiment Confidence",
                applies: |f| f.avg_confidence > 0.6,
                observation: |f| {
                    format!(
                        "High confidence in sentiment analysis ({:.0}%)",
                        round_to(f.avg_confidence * 100.0, 0)
                    )
                },
                action: "Comments express clear opinions - reliable data",
            },
            InsightRule {
                category: "Sentiment Confidence",
                applies: |f| f.avg_confidence < 0.4,
                observation: |f| format!(
                        "Lower sentiment confidence ({:.0}%)",
                        round_to(f.avg_confidence * 100.0, 0)
                    ),
                action: "Many neutral or ambiguous comments",
            },
        ],
        vec![
            InsightRule {
                category: "Negative Feedback",
                applies: |f| f.negative_percent > 25.0,
                observation: |f| format!("Significant negative feedback ({}%)", f.negative_percent),
                action: "Urgent: Review negative comments and address issues",
            },
            InsightRule {
                category: "Negative Feedback",
                applies: |f| f.negative_percent > 15.0,
                observation: |f| format!("Moderate negative feedback ({}%)", f.negative_percent),
                action: "Consider improvements based on criticism",
            },
        ],
        vec![
            InsightRule {
                category: "High Engagement",
                applies: |f| f.avg_likes > 5.0,
                observation: |f| {
                    format!(
                        "Exceptional engagement (avg {:.1} likes per comment)",
                        round_to(f.avg_likes, 1)
                    )
                },
                action: "Strong community interaction - keep engaging",
            },
            InsightRule {
                category: "Good Engagement",
                applies: |f| f.avg_likes > 2.0,
                observation: |f| format!(
                        "Strong engagement (avg {:.1} likes per comment)",
                        round_to(f.avg_likes, 1)
                    ),
                action: "Active community participation",
            },
        ],
        vec![InsightRule {
            category: "Highly Praised",
            applies: |f| f.very_positive as f64 > f.total as f64 * 0.3,
            observation: |f| {
                format!(
                    "{} highly positive comments ({:.1}%)",
                    f.very_positive,
                    f.share(f.very_positive)
                )
            },
            action: "Identify what viewers love most",
        }],
        vec![InsightRule {
            category: "Critical Issues",
            applies: |f| f.very_negative as f64 > f.total as f64 * 0.15,
            observation: |f| format!("{} strongly negative comments", f.very_negative),
            action: "Address critical concerns immediately",
        }],
        vec![InsightRule {
            category: "Many Questions",
            applies: |f| f.questions as f64 > f.total as f64 * 0.25,
            observation: |f| {
                format!("{} questions found ({:.1}%)", f.questions, f.share(f.questions))
            },
            action: "Create FAQ video or pin answers",
        }],
    ]
});

/// Evaluate the insight table. "Overall Sentiment" is always the first entry.
pub fn generate_insights(comments: &[ScoredComment], stats: &Statistics) -> Vec<Insight> {
    let facts = InsightFacts {
        total: stats.total_comments.max(1),
        positive_percent: stats.positive_percent,
        negative_percent: stats.negative_percent,
        avg_confidence: stats.avg_confidence,
        avg_likes: stats.avg_likes,
        very_positive: stats.very_positive_count,
        very_negative: stats.very_negative_count,
        questions: comments.iter().filter(|c| c.is_question()).count(),
    };

    INSIGHT_RULES
        .iter()
        .filter_map(|group| group.iter().find(|rule| (rule.applies)(&facts)))
        .map(|rule| Insight {
            category: rule.category.to_string(),
            insight: (rule.observation)(&facts),
            action: rule.action.to_string(),
        })
        .collect()
}

// ============================================================================
// Highlights
// ============================================================================

/// Row numbers of the comments worth surfacing first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentHighlights {
    pub most_positive: Vec<usize>,
    pub most_negative: Vec<usize>,
    pub most_liked: Vec<usize>,
    /// Strong opinion that also drew likes
    pub notable: Vec<usize>,
    pub questions: Vec<usize>,
}

impl CommentHighlights {
    pub fn from_comments(comments: &[ScoredComment]) -> Self {
        let by_polarity = |a: &&ScoredComment, b: &&ScoredComment| {
            a.polarity.partial_cmp(&b.polarity).unwrap_or(Ordering::Equal)
        };
        let rows = |list: Vec<&ScoredComment>| -> Vec<usize> {
            list.into_iter().take(HIGHLIGHT_LIMIT).map(|c| c.row).collect()
        };

        let mut positive: Vec<&ScoredComment> =
            comments.iter().filter(|c| c.sentiment.is_positive()).collect();
        positive.sort_by(|a, b| by_polarity(b, a));

        let mut negative: Vec<&ScoredComment> =
            comments.iter().filter(|c| c.sentiment.is_negative()).collect();
        negative.sort_by(by_polarity);

        let mut liked: Vec<&ScoredComment> = comments.iter().collect();
        liked.sort_by(|a, b| b.likes.cmp(&a.likes));

        let notable = comments
            .iter()
            .filter(|c| c.polarity.abs() > 0.5 && c.likes > 5)
            .collect();
        let questions = comments.iter().filter(|c| c.is_question()).collect();

        Self {
            most_positive: rows(positive),
            most_negative: rows(negative),
            most_liked: rows(liked),
            notable: rows(notable),
            questions: rows(questions),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Comment, SentimentResult};

    fn scored(row: usize, label: SentimentLabel, polarity: f64, likes: u64, text: &str) -> ScoredComment {
        let comment = Comment {
            author: format!("user{}", row),
            text: text.to_string(),
            likes,
            ..Default::default()
        };
        ScoredComment::new(
            row,
            &comment,
            SentimentResult {
                label,
                polarity,
                subjectivity: 0.5,
                confidence: 0.5,
            },
        )
    }

    fn corpus_of_100() -> Vec<ScoredComment> {
        (1..=100)
            .map(|row| match row % 5 {
                0 => scored(row, SentimentLabel::VeryPositive, 0.8, 1, "love it"),
                1 => scored(row, SentimentLabel::Positive, 0.3, 2, "nice"),
                2 => scored(row, SentimentLabel::Neutral, 0.0, 3, "ok?"),
                3 => scored(row, SentimentLabel::Negative, -0.3, 0, "meh"),
                _ => scored(row, SentimentLabel::VeryNegative, -0.7, 4, "awful"),
            })
            .collect()
    }

    #[test]
    fn test_empty_corpus_is_an_error() {
        assert!(matches!(compute_statistics(&[]), Err(AnalysisError::EmptyCorpus)));
    }

    #[test]
    fn test_three_bucket_counts_cover_corpus() {
        let stats = compute_statistics(&corpus_of_100()).unwrap();
        assert_eq!(stats.total_comments, 100);
        assert_eq!(stats.positive_count + stats.negative_count + stats.neutral_count, 100);
        assert_eq!(stats.very_positive_count, 20);
        assert_eq!(stats.positive_count, 40);
        let sum = stats.positive_percent + stats.negative_percent + stats.neutral_percent;
        assert!((sum - 100.0).abs() <= 0.01);
    }

    #[test]
    fn test_averages_and_extremes() {
        let stats = compute_statistics(&corpus_of_100()).unwrap();
        assert_eq!(stats.total_likes, 200);
        assert_eq!(stats.avg_likes, 2.0);
        assert_eq!(stats.max_polarity, 0.8);
        assert_eq!(stats.min_polarity, -0.7);
        assert_eq!(stats.avg_confidence, 0.5);
        assert!((stats.avg_polarity - 0.02).abs() < 1e-9);
    }

    #[test]
    fn test_wire_format_uses_fixed_decimals() {
        let stats = compute_statistics(&corpus_of_100()).unwrap();
        let value = serde_json::to_value(&stats).unwrap();
        assert_eq!(value["totalComments"], 100);
        assert_eq!(value["positivePercent"], "40.00");
        assert_eq!(value["veryNegativePercent"], "20.00");
        assert_eq!(value["avgPolarity"], "0.0200");
        assert_eq!(value["avgLikes"], "2.00");
        assert_eq!(value["totalLikes"], 200);
    }

    #[test]
    fn test_percentages_round_to_two_decimals() {
        let comments = vec![
            scored(1, SentimentLabel::Positive, 0.3, 0, "a"),
            scored(2, SentimentLabel::Negative, -0.3, 0, "b"),
            scored(3, SentimentLabel::Neutral, 0.0, 0, "c"),
        ];
        let stats = compute_statistics(&comments).unwrap();
        assert_eq!(stats.positive_percent, 33.33);
        let sum = stats.positive_percent + stats.negative_percent + stats.neutral_percent;
        assert!((sum - 100.0).abs() <= 0.0100001);
    }

    #[test]
    fn test_overall_sentiment_always_first() {
        let stats = compute_statistics(&corpus_of_100()).unwrap();
        let insights = generate_insights(&corpus_of_100(), &stats);
        assert_eq!(insights[0].category, "Overall Sentiment");
        assert_eq!(insights[0].insight, "Generally positive (40% positive)");
        assert_eq!(
            insights.iter().filter(|i| i.category == "Overall Sentiment").count(),
            1
        );
    }

    #[test]
    fn test_insight_table_rules() {
        let comments = corpus_of_100();
        let stats = compute_statistics(&comments).unwrap();
        let insights = generate_insights(&comments, &stats);
        let categories: Vec<&str> = insights.iter().map(|i| i.category.as_str()).collect();

        // 40% negative, 20% very negative, 20% questions, avg confidence 0.5, avg likes 2.0
        assert!(categories.contains(&"Negative Feedback"));
        assert!(categories.contains(&"Critical Issues"));
        assert!(!categories.contains(&"Sentiment Confidence"));
        assert!(!categories.contains(&"Good Engagement"));
        assert!(!categories.contains(&"Many Questions"));
        assert!(!categories.contains(&"Highly Praised"));

        let negative = insights.iter().find(|i| i.category == "Negative Feedback").unwrap();
        assert_eq!(negative.insight, "Significant negative feedback (40%)");
    }

    #[test]
    fn test_exceptional_reception_and_engagement() {
        let comments: Vec<ScoredComment> = (1..=10)
            .map(|row| scored(row, SentimentLabel::VeryPositive, 0.9, 12, "best video ever?"))
            .collect();
        let stats = compute_statistics(&comments).unwrap();
        let insights = generate_insights(&comments, &stats);
        let categories: Vec<&str> = insights.iter().map(|i| i.category.as_str()).collect();
        assert_eq!(
            categories,
            vec!["Overall Sentiment", "High Engagement", "Highly Praised", "Many Questions"]
        );
        assert_eq!(insights[0].insight, "Exceptional positive reception (100% positive)");
        assert_eq!(insights[1].insight, "Exceptional engagement (avg 12.0 likes per comment)");
        assert_eq!(insights[2].insight, "10 highly positive comments (100.0%)");
    }

    #[test]
    fn test_mixed_and_negative_reception() {
        let negative: Vec<ScoredComment> = (1..=4)
            .map(|row| scored(row, SentimentLabel::Negative, -0.3, 0, "bad"))
            .collect();
        let stats = compute_statistics(&negative).unwrap();
        let insights = generate_insights(&negative, &stats);
        assert_eq!(insights[0].insight, "Negative reception (100% negative)");

        let neutral: Vec<ScoredComment> = (1..=4)
            .map(|row| scored(row, SentimentLabel::Neutral, 0.0, 0, "hm"))
            .collect();
        let stats = compute_statistics(&neutral).unwrap();
        let insights = generate_insights(&neutral, &stats);
        assert_eq!(insights[0].insight, "Mixed reception (0% positive, 0% negative)");
        // confidence 0.5 sits between the two confidence rules
        assert_eq!(insights.len(), 1);
    }

    #[test]
    fn test_insight_copy_rounds_ties_up() {
        // 21 likes over 4 comments is 5.25; confidence 0.625 is 62.5%
        let comments: Vec<ScoredComment> = [6, 5, 5, 5]
            .iter()
            .enumerate()
            .map(|(i, &likes)| {
                let mut c = scored(i + 1, SentimentLabel::Positive, 0.3, likes, "nice");
                c.confidence = 0.625;
                c
            })
            .collect();
        let stats = compute_statistics(&comments).unwrap();
        assert_eq!(stats.avg_likes, 5.25);
        assert_eq!(stats.avg_confidence, 0.625);

        let insights = generate_insights(&comments, &stats);
        let text = |category: &str| {
            insights
                .iter()
                .find(|i| i.category == category)
                .map(|i| i.insight.clone())
                .unwrap()
        };
        assert_eq!(text("Sentiment Confidence"), "High confidence in sentiment analysis (63%)");
        assert_eq!(text("High Engagement"), "Exceptional engagement (avg 5.3 likes per comment)");
    }

    #[test]
    fn test_question_share_rounds_ties_up() {
        // 5 of 16 is 31.25%
        let comments: Vec<ScoredComment> = (1..=16)
            .map(|row| {
                let text = if row <= 5 { "why?" } else { "hm" };
                scored(row, SentimentLabel::Neutral, 0.0, 0, text)
            })
            .collect();
        let stats = compute_statistics(&comments).unwrap();
        let insights = generate_insights(&comments, &stats);
        let questions = insights.iter().find(|i| i.category == "Many Questions").unwrap();
        assert_eq!(questions.insight, "5 questions found (31.3%)");
    }

    #[test]
    fn test_highlights() {
        let comments = vec![
            scored(1, SentimentLabel::Positive, 0.3, 10, "nice"),
            scored(2, SentimentLabel::VeryPositive, 0.9, 1, "amazing"),
            scored(3, SentimentLabel::VeryNegative, -0.8, 7, "awful"),
            scored(4, SentimentLabel::Neutral, 0.0, 0, "how?"),
        ];
        let highlights = CommentHighlights::from_comments(&comments);
        assert_eq!(highlights.most_positive, vec![2, 1]);
        assert_eq!(highlights.most_negative, vec![3]);
        assert_eq!(highlights.most_liked, vec![1, 3, 2, 4]);
        assert_eq!(highlights.notable, vec![3]);
        assert_eq!(highlights.questions, vec![4]);
    }
}
