//! Text normalization and surface signals.
//!
//! Normalization destroys emoji, case and most punctuation, so the surface
//! helpers here always take the original comment text.

use once_cell::sync::Lazy;
use regex::Regex;

static URL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"https?://\S+").expect("static regex"));

// Word characters are ASCII only; anything else (emoji, accents, other scripts) becomes a space
static NON_WORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9_\s!?.'-]").expect("static regex"));

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("static regex"));

static HTML_TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("static regex"));

// Prefix match, no word boundary
static QUESTION_START_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(who|what|when|where|why|how|which|whose|whom|can|could|would|should|is|are|do|does|did)")
        .expect("static regex")
});

/// Lower-case, drop URLs, blank out non-word characters and collapse whitespace.
pub fn normalize(text: &str) -> String {
    let lower = text.to_lowercase();
    let without_urls = URL_RE.replace_all(&lower, "");
    let cleaned = NON_WORD_RE.replace_all(&without_urls, " ");
    WHITESPACE_RE.replace_all(&cleaned, " ").trim().to_string()
}

/// Whitespace tokens of already-normalized text.
pub fn tokenize(normalized: &str) -> Vec<&str> {
    normalized.split_whitespace().collect()
}

/// Word count used for normalization; an empty token list still counts as one word.
pub fn word_count(tokens: &[&str]) -> usize {
    tokens.len().max(1)
}

/// Share of ASCII letters that are upper-case; 0 when there are no letters.
pub fn caps_ratio(text: &str) -> f64 {
    let (letters, caps) = text
        .chars()
        .filter(char::is_ascii_alphabetic)
        .fold((0usize, 0usize), |(letters, caps), c| {
            (letters + 1, caps + c.is_ascii_uppercase() as usize)
        });
    if letters == 0 {
        return 0.0;
    }
    caps as f64 / letters as f64
}

pub fn exclamation_count(text: &str) -> usize {
    text.matches('!').count()
}

/// Contains a `?` or opens with an interrogative/auxiliary word.
pub fn is_question(text: &str) -> bool {
    text.contains('?') || QUESTION_START_RE.is_match(text)
}

/// Remove markup left in comment text by the acquisition side.
pub fn strip_html(text: &str) -> String {
    HTML_TAG_RE.replace_all(text, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_urls_and_symbols() {
        assert_eq!(
            normalize("LOVE it!! see https://youtu.be/abc   😍😍 #1"),
            "love it!! see 1"
        );
    }

    #[test]
    fn test_normalize_keeps_apostrophes_and_hyphens() {
        assert_eq!(normalize("Can't   stop, re-watching..."), "can't stop re-watching...");
    }

    #[test]
    fn test_emoji_only_normalizes_to_empty() {
        let normalized = normalize("🔥🔥");
        assert_eq!(normalized, "");
        let tokens = tokenize(&normalized);
        assert!(tokens.is_empty());
        assert_eq!(word_count(&tokens), 1);
    }

    #[test]
    fn test_non_latin_text_is_blanked() {
        assert_eq!(normalize("бесподобно"), "");
    }

    #[test]
    fn test_caps_ratio() {
        assert_eq!(caps_ratio("ABC def"), 0.5);
        assert_eq!(caps_ratio("🔥 123"), 0.0);
        assert!(caps_ratio("THIS IS SO GOOD") > 0.99);
    }

    #[test]
    fn test_exclamations() {
        assert_eq!(exclamation_count("wow!! nice!"), 3);
        assert_eq!(exclamation_count("calm"), 0);
    }

    #[test]
    fn test_question_detection() {
        assert!(is_question("is this real"));
        assert!(is_question("How did you do that"));
        assert!(is_question("nice video?"));
        assert!(!is_question("nice video"));
    }

    #[test]
    fn test_strip_html() {
        assert_eq!(strip_html("<b>great</b> video<br>"), "great video");
    }
}
