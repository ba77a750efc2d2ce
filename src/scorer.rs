//! Multi-factor, rule-based comment sentiment scoring.
//!
//! A comment moves through a fixed pipeline: normalize and tokenize, per-token
//! base scores, negation, modifiers, emoji, context phrases, surface signals,
//! a `tanh` squash to polarity, then the label rules (band thresholds,
//! short-comment bucketing, sarcasm flip, emoji dominance). Every pass is a
//! pure function of its inputs and the injected [`Lexicon`], so a scorer can be
//! shared across threads without locking.

use serde::Serialize;

use crate::fallback::{AfinnScorer, WordPolarity};
use crate::lexicon::Lexicon;
use crate::models::{SentimentLabel, SentimentResult};
use crate::text;

/// Tokens searched after a negation word.
pub const NEGATION_WINDOW: usize = 4;
pub const NEGATION_DAMPENING: f64 = 0.9;
/// Tokens searched after a two-word modifier.
pub const BIGRAM_MODIFIER_WINDOW: usize = 2;
/// Tokens searched after a one-word modifier.
pub const UNIGRAM_MODIFIER_WINDOW: usize = 3;
/// Occurrences of one emoji that count towards its score.
pub const EMOJI_REPEAT_CAP: usize = 3;
pub const POSITIVE_CONTEXT_WEIGHT: f64 = 2.0;
pub const NEGATIVE_CONTEXT_WEIGHT: f64 = -3.0;
pub const CAPS_RATIO_THRESHOLD: f64 = 0.6;
pub const CAPS_MULTIPLIER: f64 = 1.2;
pub const TANH_DIVISOR: f64 = 2.5;
/// Tokens (including the anchor) inspected for a contrast word.
pub const SARCASM_WINDOW: usize = 5;
pub const SARCASM_DAMPENING: f64 = 0.7;

/// Emoji contribution of one comment.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct EmojiScore {
    /// Weighted sum with each emoji's repeats capped
    pub score: f64,
    /// Total occurrences, uncapped
    pub count: usize,
}

/// Every intermediate value behind one [`SentimentResult`].
#[derive(Debug, Clone, Serialize)]
pub struct ScoreBreakdown {
    pub tokens: Vec<String>,
    pub token_scores: Vec<f64>,
    pub word_count: usize,
    pub emoji: EmojiScore,
    pub context_score: f64,
    pub caps_ratio: f64,
    pub exclamations: usize,
    pub is_question: bool,
    /// Score after all additive and multiplicative adjustments
    pub raw_score: f64,
    pub sarcastic: bool,
    pub emoji_dominant: bool,
    pub result: SentimentResult,
}

/// Scores comments against an immutable lexicon.
#[derive(Debug)]
pub struct SentimentScorer {
    lexicon: Lexicon,
    fallback: Box<dyn WordPolarity>,
}

impl Default for SentimentScorer {
    fn default() -> Self {
        Self::new(Lexicon::builtin())
    }
}

impl SentimentScorer {
    pub fn new(lexicon: Lexicon) -> Self {
        Self::with_fallback(lexicon, Box::new(AfinnScorer))
    }

    /// Use a different general-purpose scorer for words outside the lexicon.
    pub fn with_fallback(lexicon: Lexicon, fallback: Box<dyn WordPolarity>) -> Self {
        Self { lexicon, fallback }
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Score one comment. Never fails: blank input yields the neutral zero result.
    pub fn analyze(&self, text: &str) -> SentimentResult {
        self.breakdown(text).result
    }

    /// Score one comment and keep the intermediate values.
    pub fn breakdown(&self, original: &str) -> ScoreBreakdown {
        if original.trim().is_empty() {
            return ScoreBreakdown {
                tokens: Vec::new(),
                token_scores: Vec::new(),
                word_count: 0,
                emoji: EmojiScore::default(),
                context_score: 0.0,
                caps_ratio: 0.0,
                exclamations: 0,
                is_question: false,
                raw_score: 0.0,
                sarcastic: false,
                emoji_dominant: false,
                result: SentimentResult::neutral_zero(),
            };
        }

        let normalized = text::normalize(original);
        let tokens = text::tokenize(&normalized);
        let word_count = text::word_count(&tokens);

        let scores = self.base_scores(&tokens);
        let scores = apply_negations(&self.lexicon, &tokens, &scores);
        let scores = apply_modifiers(&self.lexicon, &tokens, &scores);

        let mut raw_score: f64 = scores.iter().sum();
        let emoji = emoji_sentiment(&self.lexicon, original);
        raw_score += emoji.score;
        let context_score = context_score(&self.lexicon, original);
        raw_score += context_score;

        let caps_ratio = text::caps_ratio(original);
        let exclamations = text::exclamation_count(original);
        let is_question = text::is_question(original);

        if caps_ratio > CAPS_RATIO_THRESHOLD && word_count > 3 {
            raw_score *= CAPS_MULTIPLIER;
        }
        if exclamations > 0 {
            raw_score *= 1.0 + (exclamations as f64 * 0.08).min(0.4);
        }
        if is_question && raw_score.abs() < 3.0 {
            raw_score *= 0.6;
        }

        let comparative = raw_score / (word_count as f64).sqrt().max(1.0);
        let mut polarity = (comparative / TANH_DIVISOR).tanh();

        let sentiment_words = scores.iter().filter(|s| **s != 0.0).count();
        let subjectivity =
            ((sentiment_words + emoji.count) as f64 / word_count as f64).min(1.0);

        let base_confidence = (polarity.abs() * subjectivity).min(1.0);
        let exclamation_boost = (exclamations as f64 * 0.05).min(0.2);
        let emoji_boost = (emoji.count as f64 * 0.03).min(0.15);
        let confidence = (base_confidence + exclamation_boost + emoji_boost).min(1.0);

        let mut label = band_label(polarity);
        if word_count <= 3 {
            label = short_comment_label(polarity, label);
        }

        let sarcastic = detect_sarcasm(&self.lexicon, original, polarity);
        if sarcastic {
            polarity = -polarity.abs() * SARCASM_DAMPENING;
            label = if polarity < -0.4 {
                SentimentLabel::Negative
            } else {
                SentimentLabel::Neutral
            };
            tracing::debug!("🙃 Sarcasm override applied (polarity {:.4})", polarity);
        }

        let mut emoji_dominant = false;
        if word_count <= 2 && emoji.count > 0 {
            if let Some((emoji_label, emoji_polarity)) = emoji_dominance(emoji.score) {
                label = emoji_label;
                polarity = emoji_polarity;
                emoji_dominant = true;
            }
        }

        ScoreBreakdown {
            tokens: tokens.iter().map(|t| t.to_string()).collect(),
            token_scores: scores,
            word_count,
            emoji,
            context_score,
            caps_ratio,
            exclamations,
            is_question,
            raw_score,
            sarcastic,
            emoji_dominant,
            result: SentimentResult {
                label,
                polarity: round4(finite_or_zero(polarity).clamp(-1.0, 1.0)),
                subjectivity: round4(finite_or_zero(subjectivity).clamp(0.0, 1.0)),
                confidence: round4(finite_or_zero(confidence).clamp(0.0, 1.0)),
            },
        }
    }

    /// Curated weight on exact match, otherwise the fallback scorer.
    fn base_scores(&self, tokens: &[&str]) -> Vec<f64> {
        tokens
            .iter()
            .map(|token| {
                self.lexicon
                    .word_weight(token)
                    .unwrap_or_else(|| self.fallback.word_score(token))
            })
            .collect()
    }
}

// ============================================================================
// Pipeline passes
// ============================================================================

/// Index of the first nonzero score in `start..start + window`.
fn first_scored(scores: &[f64], start: usize, window: usize) -> Option<usize> {
    let end = (start + window).min(scores.len());
    (start..end).find(|&j| scores[j] != 0.0)
}

/// Each negation word flips and dampens the first scored token within the next four.
pub fn apply_negations(lexicon: &Lexicon, tokens: &[&str], scores: &[f64]) -> Vec<f64> {
    let mut out = scores.to_vec();
    for (i, token) in tokens.iter().enumerate() {
        if !lexicon.is_negation(token) {
            continue;
        }
        if let Some(j) = first_scored(&out, i + 1, NEGATION_WINDOW) {
            out[j] = -out[j] * NEGATION_DAMPENING;
        }
    }
    out
}

/// Two-word modifiers scale the first scored token within the next two positions
/// after the phrase; one-word intensifiers and diminishers scale the first scored
/// token within the next three. Rules hitting the same token compose.
pub fn apply_modifiers(lexicon: &Lexicon, tokens: &[&str], scores: &[f64]) -> Vec<f64> {
    let mut out = scores.to_vec();
    for i in 0..tokens.len().saturating_sub(1) {
        let bigram = format!("{} {}", tokens[i], tokens[i + 1]);
        if let Some(factor) = lexicon.modifier(&bigram) {
            if let Some(j) = first_scored(&out, i + 2, BIGRAM_MODIFIER_WINDOW) {
                out[j] *= factor;
            }
        }

        if let Some(factor) = lexicon.intensifier(tokens[i]) {
            if let Some(j) = first_scored(&out, i + 1, UNIGRAM_MODIFIER_WINDOW) {
                out[j] *= factor;
            }
        }

        if let Some(factor) = lexicon.diminisher(tokens[i]) {
            if let Some(j) = first_scored(&out, i + 1, UNIGRAM_MODIFIER_WINDOW) {
                out[j] *= factor;
            }
        }
    }
    out
}

/// Scan the original text for every emoji in the table.
pub fn emoji_sentiment(lexicon: &Lexicon, original: &str) -> EmojiScore {
    lexicon
        .emoji()
        .iter()
        .fold(EmojiScore::default(), |mut acc, (emoji, weight)| {
            let count = original.matches(emoji.as_str()).count();
            if count > 0 {
                acc.score += weight * count.min(EMOJI_REPEAT_CAP) as f64;
                acc.count += count;
            }
            acc
        })
}

/// Net contribution of the fixed positive and negative phrases.
pub fn context_score(lexicon: &Lexicon, original: &str) -> f64 {
    let lower = original.to_lowercase();
    let hits = |phrases: &[String]| {
        phrases
            .iter()
            .filter(|phrase| lower.contains(phrase.as_str()))
            .count() as f64
    };
    hits(lexicon.positive_contexts()) * POSITIVE_CONTEXT_WEIGHT
        + hits(lexicon.negative_contexts()) * NEGATIVE_CONTEXT_WEIGHT
}

/// A positive reading is treated as ironic when a sarcasm indicator is followed
/// closely by a contrast word.
pub fn detect_sarcasm(lexicon: &Lexicon, original: &str, polarity: f64) -> bool {
    if polarity <= 0.0 {
        return false;
    }

    let lower = original.to_lowercase();
    // Single spaces only: newline-joined words and empty tokens stay as they are
    let words: Vec<&str> = lower.split(' ').collect();

    lexicon
        .sarcasm_indicators()
        .iter()
        .filter(|indicator| lower.contains(indicator.as_str()))
        .any(|indicator| {
            let anchor = match words.iter().position(|w| indicator.contains(w)) {
                Some(anchor) => anchor,
                None => return false,
            };
            let end = (anchor + SARCASM_WINDOW).min(words.len());
            let window = words[anchor..end].join(" ");
            lexicon
                .contrast_words()
                .iter()
                .any(|contrast| window.contains(contrast.as_str()))
        })
}

/// Ordered polarity thresholds; the mid band falls back to the sign.
pub fn band_label(polarity: f64) -> SentimentLabel {
    if polarity >= 0.5 {
        SentimentLabel::VeryPositive
    } else if polarity >= 0.2 {
        SentimentLabel::Positive
    } else if polarity <= -0.5 {
        SentimentLabel::VeryNegative
    } else if polarity <= -0.2 {
        SentimentLabel::Negative
    } else if polarity.abs() < 0.05 {
        SentimentLabel::Neutral
    } else if polarity > 0.0 {
        SentimentLabel::Positive
    } else {
        SentimentLabel::Negative
    }
}

/// Coarser bucketing for comments of three words or fewer.
pub fn short_comment_label(polarity: f64, current: SentimentLabel) -> SentimentLabel {
    if polarity.abs() > 0.4 {
        if polarity > 0.0 {
            if polarity > 0.7 {
                SentimentLabel::VeryPositive
            } else {
                SentimentLabel::Positive
            }
        } else if polarity < -0.7 {
            SentimentLabel::VeryNegative
        } else {
            SentimentLabel::Negative
        }
    } else if polarity.abs() < 0.1 {
        SentimentLabel::Neutral
    } else {
        current
    }
}

/// Label and polarity decided by emoji alone; `None` when the emoji cancel out.
pub fn emoji_dominance(emoji_score: f64) -> Option<(SentimentLabel, f64)> {
    if emoji_score > 3.0 {
        Some((SentimentLabel::VeryPositive, 0.8))
    } else if emoji_score > 0.0 {
        Some((SentimentLabel::Positive, 0.5))
    } else if emoji_score < -3.0 {
        Some((SentimentLabel::VeryNegative, -0.8))
    } else if emoji_score < 0.0 {
        Some((SentimentLabel::Negative, -0.5))
    } else {
        None
    }
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}
