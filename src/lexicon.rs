//! Lexicon & modifier tables.
//!
//! The built-in tables are plain data. A [`Lexicon`] is assembled from them once
//! at start-up (optionally merged with a JSON override file) and then handed to
//! the scorer; it is never mutated afterwards.

use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::path::Path;

use crate::error::{AnalysisError, Result};

/// Largest absolute weight accepted from an override file.
pub const MAX_WEIGHT: f64 = 10.0;

// ============================================================================
// Built-in tables
// ============================================================================

/// Curated word weights for informal video comments.
const CUSTOM_WORDS: &[(&str, i32)] = &[
    // Very positive
    ("awesome", 5), ("amazing", 5), ("excellent", 5), ("perfect", 6), ("outstanding", 6),
    ("fantastic", 5), ("brilliant", 5), ("superb", 5), ("incredible", 5), ("wonderful", 5),
    ("phenomenal", 6), ("masterpiece", 6), ("genius", 6), ("legend", 5), ("goat", 5),
    ("extraordinary", 6), ("exceptional", 6), ("magnificent", 6), ("spectacular", 6),
    ("fabulous", 5), ("marvelous", 5), ("terrific", 5), ("mindblowing", 6),
    // Positive
    ("love", 4), ("loved", 4), ("loving", 4), ("great", 4), ("good", 3), ("nice", 3),
    ("cool", 3), ("thanks", 3), ("thank", 3), ("helpful", 4), ("useful", 4),
    ("informative", 4), ("interesting", 3), ("beautiful", 4), ("best", 5),
    ("better", 3), ("appreciate", 4), ("appreciated", 4), ("liked", 3), ("like", 2),
    ("enjoyed", 4), ("enjoying", 4), ("enjoy", 3), ("recommend", 4), ("recommended", 4),
    ("impressive", 4), ("inspiring", 4), ("inspired", 4), ("motivated", 3),
    ("educational", 3), ("quality", 3), ("valuable", 4), ("worth", 3), ("worthy", 3),
    ("glad", 3), ("happy", 4), ("pleased", 3), ("delighted", 4), ("satisfied", 3),
    // Slightly positive
    ("ok", 1), ("okay", 1), ("fine", 2), ("decent", 2), ("fair", 1), ("alright", 2),
    // Negative
    ("bad", -3), ("worse", -4), ("hate", -4), ("hated", -4), ("hating", -4),
    ("worst", -5), ("terrible", -4), ("awful", -4), ("horrible", -4),
    ("disgusting", -4), ("useless", -4), ("waste", -3), ("wasted", -3),
    ("boring", -3), ("bored", -3), ("annoying", -3), ("annoyed", -3),
    ("stupid", -4), ("dumb", -3), ("poor", -2), ("disappointed", -3),
    ("disappointing", -3), ("dislike", -3), ("disliked", -3), ("sucks", -4),
    ("pathetic", -4), ("trash", -4), ("garbage", -4), ("crap", -3),
    ("lame", -3), ("weak", -2), ("suck", -4), ("fail", -3), ("failed", -3),
    ("wrong", -2), ("problem", -2), ("issue", -2), ("issues", -2),
    // Very negative
    ("disaster", -5), ("nightmare", -5), ("catastrophe", -5), ("abysmal", -6),
    ("appalling", -5), ("atrocious", -6), ("dreadful", -5), ("horrendous", -5),
    // Platform vocabulary
    ("subscribe", 2), ("subscribed", 2), ("subscriber", 1), ("unsubscribe", -3),
    ("unsubscribed", -3), ("clickbait", -4), ("misleading", -3), ("mislead", -3),
    ("fake", -3), ("spam", -4), ("scam", -4), ("copied", -3), ("copy", -2),
    ("stolen", -3), ("steal", -3), ("original", 3), ("unique", 3),
    ("underrated", 3), ("overrated", -2), ("overhyped", -2),
    // Transliterated Hindi
    ("zabardast", 4), ("badhiya", 4), ("bahut", 2), ("accha", 3), ("achha", 3),
    ("bekar", -4), ("bakwas", -3), ("faltu", -3), ("kamaal", 4), ("mast", 3),
    ("badiya", 4), ("khatarnak", 4), ("dhinchak", 3), ("jhakkas", 4),
    ("ghatiya", -4), ("bekaar", -4), ("wahiyat", -3), ("bakvas", -3),
];

const NEGATIONS: &[&str] = &[
    "not", "no", "never", "neither", "nobody", "nothing", "nowhere",
    "cannot", "can't", "won't", "don't", "doesn't", "didn't", "isn't",
    "aren't", "wasn't", "weren't", "hasn't", "haven't", "hadn't",
    "shouldn't", "wouldn't", "couldn't", "hardly", "barely", "scarcely",
    "rarely", "seldom", "without", "lack", "lacking", "lacks",
];

const INTENSIFIERS: &[(&str, f64)] = &[
    ("very", 1.5), ("really", 1.5), ("extremely", 2.0), ("super", 1.8),
    ("absolutely", 2.0), ("totally", 1.5), ("completely", 1.8), ("utterly", 2.0),
    ("highly", 1.5), ("so", 1.3), ("too", 1.3), ("quite", 1.2), ("pretty", 1.2),
    ("incredibly", 1.8), ("amazingly", 1.8), ("exceptionally", 1.8),
    ("extraordinarily", 2.0), ("remarkably", 1.6), ("particularly", 1.4),
    ("especially", 1.4), ("insanely", 2.0), ("ridiculously", 1.8),
];

const DIMINISHERS: &[(&str, f64)] = &[
    ("slightly", 0.5), ("somewhat", 0.5), ("barely", 0.3), ("hardly", 0.3),
    ("little", 0.5), ("bit", 0.5), ("kinda", 0.6), ("kind of", 0.6),
    ("sort of", 0.6), ("almost", 0.7), ("nearly", 0.7), ("fairly", 0.6),
    ("rather", 0.7), ("mildly", 0.5), ("moderately", 0.6),
];

const EMOJI: &[(&str, i32)] = &[
    ("❤️", 4), ("❤", 4), ("😊", 3), ("😂", 3), ("😁", 3), ("😃", 3), ("😄", 3),
    ("👍", 3), ("👍🏻", 3), ("🔥", 4), ("✨", 3), ("💯", 4), ("👏", 4), ("🙌", 3),
    ("😍", 4), ("🥰", 4), ("😘", 4), ("🙏", 3), ("💪", 3), ("🎉", 3), ("🎊", 3),
    ("😢", -2), ("😭", -2), ("😡", -4), ("😠", -4), ("👎", -4), ("👎🏻", -4),
    ("💩", -4), ("🤮", -4), ("😤", -3), ("🤬", -5), ("💔", -3), ("😞", -2),
    ("😔", -2), ("😟", -2), ("😩", -3), ("😫", -3), ("🤢", -3),
];

const SARCASM_INDICATORS: &[&str] = &[
    "yeah right", "sure", "obviously", "clearly", "totally",
    "great job", "nice try", "well done", "brilliant move",
    "genius idea", "love that", "perfect timing",
];

const CONTRAST_WORDS: &[&str] = &["but", "however", "though", "unfortunately"];

const POSITIVE_CONTEXTS: &[&str] = &[
    "thank you", "thanks for", "appreciate", "well done", "keep it up",
    "keep up", "looking forward", "cant wait", "can't wait", "excited",
    "congrats", "congratulations", "proud", "respect", "kudos",
    "love this", "love it", "this is great", "this is amazing",
];

const NEGATIVE_CONTEXTS: &[&str] = &[
    "waste of time", "waste time", "not worth", "dont recommend",
    "don't recommend", "disappointed", "regret", "mistake", "avoid",
    "never again", "stay away", "skip this", "save your", "scam alert",
];

// ============================================================================
// Lexicon
// ============================================================================

/// Immutable scoring tables handed to the scorer at construction.
#[derive(Debug, Clone)]
pub struct Lexicon {
    words: HashMap<String, f64>,
    negations: HashSet<String>,
    intensifiers: HashMap<String, f64>,
    diminishers: HashMap<String, f64>,
    /// Ordered so scans are deterministic
    emoji: Vec<(String, f64)>,
    sarcasm_indicators: Vec<String>,
    contrast_words: Vec<String>,
    positive_contexts: Vec<String>,
    negative_contexts: Vec<String>,
}

/// Optional additions/replacements read from a JSON override file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LexiconOverrides {
    #[serde(default)]
    pub words: HashMap<String, f64>,
    #[serde(default)]
    pub intensifiers: HashMap<String, f64>,
    #[serde(default)]
    pub diminishers: HashMap<String, f64>,
    #[serde(default)]
    pub emoji: HashMap<String, f64>,
    #[serde(default)]
    pub negations: Vec<String>,
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Lexicon {
    /// Lexicon built from the compiled-in tables only.
    pub fn builtin() -> Self {
        fn owned(list: &[&str]) -> Vec<String> {
            list.iter().map(|s| s.to_string()).collect()
        }

        Self {
            words: CUSTOM_WORDS
                .iter()
                .map(|(w, s)| (w.to_string(), *s as f64))
                .collect(),
            negations: NEGATIONS.iter().map(|w| w.to_string()).collect(),
            intensifiers: INTENSIFIERS.iter().map(|(w, m)| (w.to_string(), *m)).collect(),
            diminishers: DIMINISHERS.iter().map(|(w, m)| (w.to_string(), *m)).collect(),
            emoji: EMOJI.iter().map(|(e, s)| (e.to_string(), *s as f64)).collect(),
            sarcasm_indicators: owned(SARCASM_INDICATORS),
            contrast_words: owned(CONTRAST_WORDS),
            positive_contexts: owned(POSITIVE_CONTEXTS),
            negative_contexts: owned(NEGATIVE_CONTEXTS),
        }
    }

    /// Built-in tables merged with the overrides stored at `path`.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            AnalysisError::LexiconLoad(format!("cannot read {}: {}", path.display(), e))
        })?;
        let lexicon = Self::from_json_str(&content)?;
        tracing::info!(
            "📚 Lexicon overrides loaded from {} ({} words)",
            path.display(),
            lexicon.words.len()
        );
        Ok(lexicon)
    }

    /// Built-in tables merged with overrides given as a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let overrides: LexiconOverrides = serde_json::from_str(json)
            .map_err(|e| AnalysisError::LexiconLoad(format!("malformed overrides: {}", e)))?;
        Self::builtin().with_overrides(overrides)
    }

    /// Apply overrides, rejecting values the scorer cannot use.
    pub fn with_overrides(mut self, overrides: LexiconOverrides) -> Result<Self> {
        for (word, weight) in overrides.words {
            check_weight("word", &word, weight)?;
            self.words.insert(word.to_lowercase(), weight);
        }
        for (word, factor) in overrides.intensifiers {
            check_factor("intensifier", &word, factor)?;
            self.intensifiers.insert(word.to_lowercase(), factor);
        }
        for (word, factor) in overrides.diminishers {
            check_factor("diminisher", &word, factor)?;
            self.diminishers.insert(word.to_lowercase(), factor);
        }
        for (emoji, weight) in overrides.emoji {
            check_weight("emoji", &emoji, weight)?;
            match self.emoji.iter_mut().find(|(e, _)| *e == emoji) {
                Some(entry) => entry.1 = weight,
                None => self.emoji.push((emoji, weight)),
            }
        }
        for word in overrides.negations {
            if word.trim().is_empty() {
                return Err(AnalysisError::LexiconLoad("empty negation entry".to_string()));
            }
            self.negations.insert(word.trim().to_lowercase());
        }
        Ok(self)
    }

    /// Curated weight for an already lower-cased token.
    pub fn word_weight(&self, word: &str) -> Option<f64> {
        self.words.get(word).copied()
    }

    pub fn is_negation(&self, word: &str) -> bool {
        self.negations.contains(word)
    }

    pub fn intensifier(&self, key: &str) -> Option<f64> {
        self.intensifiers.get(key).copied()
    }

    pub fn diminisher(&self, key: &str) -> Option<f64> {
        self.diminishers.get(key).copied()
    }

    /// Intensifier or diminisher factor for `key`, intensifiers first.
    pub fn modifier(&self, key: &str) -> Option<f64> {
        self.intensifier(key).or_else(|| self.diminisher(key))
    }

    pub fn emoji(&self) -> &[(String, f64)] {
        &self.emoji
    }

    pub fn sarcasm_indicators(&self) -> &[String] {
        &self.sarcasm_indicators
    }

    pub fn contrast_words(&self) -> &[String] {
        &self.contrast_words
    }

    pub fn positive_contexts(&self) -> &[String] {
        &self.positive_contexts
    }

    pub fn negative_contexts(&self) -> &[String] {
        &self.negative_contexts
    }

    pub fn word_count(&self) -> usize {
        self.words.len()
    }
}

fn check_weight(kind: &str, key: &str, weight: f64) -> Result<()> {
    if key.is_empty() || !weight.is_finite() || weight.abs() > MAX_WEIGHT {
        return Err(AnalysisError::LexiconLoad(format!(
            "invalid {} entry {:?}: {}",
            kind, key, weight
        )));
    }
    Ok(())
}

fn check_factor(kind: &str, key: &str, factor: f64) -> Result<()> {
    if key.is_empty() || !factor.is_finite() || factor <= 0.0 {
        return Err(AnalysisError::LexiconLoad(format!(
            "invalid {} factor {:?}: {}",
            kind, key, factor
        )));
    }
    Ok(())
}
