//! Runtime configuration, read from the environment (and `.env` via dotenv
//! in the binaries).

use std::path::PathBuf;
use std::str::FromStr;

use crate::batch::{BatchOptions, DEFAULT_PARALLEL_THRESHOLD};
use crate::error::{AnalysisError, Result};
use crate::fallback::WordListScorer;
use crate::lexicon::Lexicon;
use crate::scorer::SentimentScorer;

#[derive(Debug, Clone, Default)]
pub struct Config {
    /// JSON file merged over the built-in lexicon
    pub lexicon_path: Option<PathBuf>,
    /// Full AFINN-format word list replacing the embedded fallback table
    pub word_list_path: Option<PathBuf>,
    pub batch: BatchOptions,
    /// Rayon pool size; rayon picks one per core when unset
    pub threads: Option<usize>,
    pub max_comments: Option<usize>,
}

impl Config {
    pub fn from_env() -> Self {
        let lexicon_path = path_var("SENTIMENT_LEXICON_PATH");
        let word_list_path = path_var("SENTIMENT_WORD_LIST_PATH");

        let parallel_threshold =
            parse_var("SENTIMENT_PARALLEL_THRESHOLD").unwrap_or(DEFAULT_PARALLEL_THRESHOLD);
        let threads = parse_var::<usize>("SENTIMENT_THREADS").filter(|&n| n > 0);
        let max_comments = parse_var("SENTIMENT_MAX_COMMENTS");

        Self {
            lexicon_path,
            word_list_path,
            batch: BatchOptions { parallel_threshold },
            threads,
            max_comments,
        }
    }

    /// Build the scorer, applying the override file if one is configured.
    pub fn build_scorer(&self) -> Result<SentimentScorer> {
        let lexicon = match &self.lexicon_path {
            Some(path) => Lexicon::from_file(path)?,
            None => Lexicon::builtin(),
        };
        tracing::info!("📚 Lexicon ready with {} words", lexicon.word_count());
        match &self.word_list_path {
            Some(path) => Ok(SentimentScorer::with_fallback(
                lexicon,
                Box::new(WordListScorer::from_file(path)?),
            )),
            None => Ok(SentimentScorer::new(lexicon)),
        }
    }

    /// Size the global rayon pool. Only the first call in a process takes effect.
    pub fn init_thread_pool(&self) -> Result<()> {
        if let Some(threads) = self.threads {
            rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build_global()
                .map_err(|e| AnalysisError::Batch(e.to_string()))?;
            tracing::info!("🧵 Rayon pool sized to {} threads", threads);
        }
        Ok(())
    }
}

fn path_var(name: &str) -> Option<PathBuf> {
    std::env::var(name)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
}

/// Unset is `None`; an unparseable value is `None` with a warning.
fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    let raw = std::env::var(name).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!("⚠️ Ignoring {}={:?}: not a valid number", name, raw);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Each test uses its own variable names; the process environment is shared.

    #[test]
    fn test_parse_var_valid_and_invalid() {
        std::env::set_var("SENTIMENT_TEST_VALID", " 42 ");
        std::env::set_var("SENTIMENT_TEST_INVALID", "lots");
        assert_eq!(parse_var::<usize>("SENTIMENT_TEST_VALID"), Some(42));
        assert_eq!(parse_var::<usize>("SENTIMENT_TEST_INVALID"), None);
        assert_eq!(parse_var::<usize>("SENTIMENT_TEST_UNSET"), None);
    }

    #[test]
    fn test_default_config_uses_builtin_lexicon() {
        let config = Config::default();
        assert!(config.lexicon_path.is_none());
        let scorer = config.build_scorer().unwrap();
        assert_eq!(scorer.lexicon().word_count(), Lexicon::builtin().word_count());
    }

    #[test]
    fn test_missing_word_list_is_fatal() {
        let config = Config {
            word_list_path: Some(PathBuf::from("/nonexistent/afinn.txt")),
            ..Default::default()
        };
        assert!(matches!(config.build_scorer(), Err(AnalysisError::LexiconLoad(_))));
    }

    #[test]
    fn test_missing_override_file_is_fatal() {
        let config = Config {
            lexicon_path: Some(PathBuf::from("/nonexistent/lexicon.json")),
            ..Default::default()
        };
        assert!(matches!(config.build_scorer(), Err(AnalysisError::LexiconLoad(_))));
    }
}
