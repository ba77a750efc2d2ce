//! General-purpose single-word polarity, used for tokens the curated lexicon
//! does not know.

use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::path::Path;

use crate::error::{AnalysisError, Result};
use crate::lexicon::MAX_WEIGHT;

/// Scores one token in isolation. Implementations must be pure.
pub trait WordPolarity: Send + Sync + std::fmt::Debug {
    fn word_score(&self, word: &str) -> f64;
}

/// AFINN-style word list, integer weights in [-5, 5].
static AFINN: Lazy<HashMap<&'static str, i32>> = Lazy::new(|| {
    vec![
        ("abandon", -2), ("abandoned", -2), ("abuse", -3), ("abused", -3), ("accept", 1),
        ("accepted", 1), ("accident", -2), ("achievement", 2), ("admire", 3), ("admired", 3),
        ("adorable", 3), ("adore", 3), ("afraid", -2), ("aggressive", -2), ("agree", 1),
        ("agreed", 1), ("alarm", -2), ("alone", -2), ("amazed", 2), ("amazing", 4),
        ("amused", 3), ("anger", -3), ("angry", -3), ("annoy", -2), ("annoyed", -2),
        ("annoying", -2), ("anxious", -2), ("apology", -1), ("applause", 2), ("approve", 2),
        ("argue", -2), ("argument", -2), ("arrogant", -2), ("ashamed", -2), ("attack", -1),
        ("attractive", 2), ("awesome", 4), ("awful", -3), ("awkward", -2), ("bad", -3),
        ("badass", 3), ("beautiful", 3), ("best", 3), ("betray", -3), ("betrayed", -3),
        ("better", 2), ("bitch", -5), ("blame", -2), ("bless", 2), ("blessed", 3),
        ("blessing", 3), ("bore", -2), ("bored", -2), ("boring", -3), ("brave", 2),
        ("brilliant", 4), ("broke", -1), ("broken", -1), ("bullshit", -4), ("calm", 2),
        ("care", 2), ("careless", -2), ("celebrate", 3), ("charming", 3), ("cheat", -3),
        ("cheated", -3), ("cheer", 2), ("cheerful", 2), ("clean", 2), ("clear", 1),
        ("clever", 2), ("comfortable", 2), ("confused", -2), ("confusing", -2), ("cool", 1),
        ("crap", -3), ("crazy", -2), ("cried", -2), ("cringe", -2), ("crisis", -3),
        ("cruel", -3), ("cry", -1), ("crying", -2), ("cute", 2), ("damn", -4),
        ("damage", -3), ("danger", -2), ("dead", -3), ("death", -2), ("defeat", -2),
        ("delight", 3), ("delighted", 3), ("depressed", -2), ("depressing", -2), ("deserve", 2),
        ("destroy", -3), ("destroyed", -3), ("dirty", -2), ("disappoint", -2), ("disappointed", -2),
        ("disappointing", -2), ("disaster", -2), ("disgust", -3), ("disgusting", -3), ("dislike", -2),
        ("dumb", -3), ("easy", 1), ("effective", 2), ("embarrassed", -2), ("encourage", 2),
        ("energetic", 2), ("enjoy", 2), ("enjoyed", 2), ("enthusiastic", 3), ("epic", 3),
        ("error", -2), ("evil", -3), ("excellent", 3), ("excited", 3), ("exciting", 3),
        ("fabulous", 4), ("fail", -2), ("failed", -2), ("failure", -2), ("fake", -3),
        ("falling", -1), ("fan", 3), ("fantastic", 4), ("fear", -2), ("fine", 2),
        ("flawless", 2), ("fool", -2), ("fraud", -4), ("free", 1), ("friendly", 2),
        ("frustrated", -2), ("frustrating", -2), ("fun", 4), ("funny", 4), ("gem", 3),
        ("glad", 3), ("god", 1), ("good", 3), ("gorgeous", 3), ("grateful", 3),
        ("great", 3), ("greatest", 3), ("greed", -3), ("grief", -2), ("gross", -2),
        ("haha", 3), ("hahaha", 3), ("happiness", 3), ("happy", 3), ("harm", -2),
        ("hate", -3), ("hated", -3), ("hater", -3), ("haters", -3), ("heartbreaking", -3),
        ("heaven", 2), ("hell", -4), ("help", 2), ("helped", 2), ("helpful", 2),
        ("helping", 2), ("hero", 2), ("hilarious", 2), ("honest", 2), ("hope", 2),
        ("hopeful", 2), ("hopeless", -2), ("horrible", -3), ("hug", 2), ("hurt", -2),
        ("idiot", -3), ("ignorant", -2), ("ignore", -1), ("ill", -2), ("important", 2),
        ("impressed", 3), ("impressive", 3), ("improve", 2), ("improved", 2), ("insane", -2),
        ("inspiration", 2), ("inspiring", 2), ("interested", 2), ("interesting", 2), ("irritating", -3),
        ("joke", 2), ("joy", 3), ("kill", -3), ("killed", -3), ("kind", 2),
        ("kiss", 2), ("lame", -2), ("laugh", 1), ("laughing", 1), ("liar", -3),
        ("like", 2), ("liked", 2), ("lmao", 4), ("lmfao", 4), ("lol", 3),
        ("lonely", -2), ("loser", -3), ("loss", -3), ("lost", -3), ("love", 3),
        ("loved", 3), ("lovely", 3), ("loves", 3), ("loving", 2), ("luck", 3),
        ("lucky", 3), ("mad", -3), ("masterpiece", 4), ("mess", -2), ("messed", -2),
        ("miss", -2), ("missed", -2), ("mistake", -2), ("motivated", 2), ("motivating", 2),
        ("nasty", -3), ("negative", -2), ("nice", 3), ("no", -1), ("nonsense", -2),
        ("offensive", -2), ("outstanding", 5), ("pain", -2), ("painful", -2), ("panic", -3),
        ("pathetic", -2), ("peace", 2), ("perfect", 3), ("perfectly", 3), ("pity", -2),
        ("play", 1), ("pleasant", 3), ("please", 1), ("pleased", 3), ("poor", -2),
        ("popular", 3), ("positive", 2), ("powerful", 2), ("pretty", 1), ("problem", -2),
        ("problems", -2), ("proud", 2), ("racist", -3), ("rage", -2), ("recommend", 2),
        ("regret", -2), ("relaxed", 2), ("relief", 1), ("respect", 2), ("rich", 2),
        ("ridiculous", -3), ("rofl", 4), ("rude", -2), ("sad", -2), ("sadly", -2),
        ("safe", 1), ("satisfied", 2), ("scam", -2), ("scared", -2), ("scary", -2),
        ("selfish", -3), ("shame", -2), ("shit", -4), ("shock", -2), ("shocked", -2),
        ("sick", -2), ("silly", -1), ("smart", 1), ("smile", 2), ("smiling", 2),
        ("solid", 2), ("sorry", -1), ("special", 1), ("strong", 2), ("stupid", -2),
        ("success", 2), ("successful", 3), ("suck", -3), ("sucks", -3), ("suffer", -2),
        ("super", 3), ("support", 2), ("supported", 2), ("surprised", 1), ("sweet", 2),
        ("talented", 2), ("terrible", -3), ("terrific", 4), ("thank", 2), ("thankful", 2),
        ("thanks", 2), ("thx", 2), ("tired", -2), ("top", 2), ("tragic", -2),
        ("true", 2), ("trust", 1), ("ugly", -3), ("unfair", -2), ("unfortunately", -2),
        ("unhappy", -2), ("upset", -2), ("useful", 2), ("useless", -2), ("vague", -2),
        ("victory", 3), ("violence", -3), ("warm", 1), ("weak", -2), ("weird", -2),
        ("welcome", 2), ("win", 4), ("winner", 4), ("winning", 4), ("wisdom", 2),
        ("wise", 2), ("woo", 3), ("wonderful", 4), ("worried", -3), ("worry", -3),
        ("worse", -3), ("worst", -3), ("worth", 2), ("worthless", -2), ("wow", 4),
        ("wrong", -2), ("yay", 2), ("yeah", 1), ("yes", 1), ("yummy", 3),
    ]
    .into_iter()
    .collect()
});

/// Characters dropped from a token before lookup.
const STRIPPED: &[char] = &[
    '.', ',', '/', '#', '!', '$', '%', '^', '&', '*', ';', ':', '{', '}', '=', '_', '`', '"',
    '~', '(', ')',
];

fn bare_word(word: &str) -> String {
    word.chars()
        .filter(|c| !STRIPPED.contains(c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Default fallback: the embedded AFINN-style list.
#[derive(Debug, Default, Clone, Copy)]
pub struct AfinnScorer;

impl WordPolarity for AfinnScorer {
    fn word_score(&self, word: &str) -> f64 {
        AFINN.get(bare_word(word).as_str()).copied().unwrap_or(0) as f64
    }
}

/// Fallback backed by a word list loaded at start-up, in the AFINN
/// distribution format: one `word<TAB>score` entry per line.
#[derive(Debug, Clone, Default)]
pub struct WordListScorer {
    words: HashMap<String, f64>,
}

impl WordListScorer {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            AnalysisError::LexiconLoad(format!("cannot read {}: {}", path.display(), e))
        })?;
        let scorer = Self::from_afinn_str(&content)?;
        tracing::info!(
            "📚 Fallback word list loaded from {} ({} words)",
            path.display(),
            scorer.len()
        );
        Ok(scorer)
    }

    pub fn from_afinn_str(content: &str) -> Result<Self> {
        let mut words = HashMap::new();
        for (index, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let invalid = || {
                AnalysisError::LexiconLoad(format!("word list line {}: {:?}", index + 1, line))
            };
            // Entries may be phrases, so split on the last tab
            let (word, score) = line.rsplit_once('\t').ok_or_else(invalid)?;
            let score: f64 = score.trim().parse().map_err(|_| invalid())?;
            if word.trim().is_empty() || !score.is_finite() || score.abs() > MAX_WEIGHT {
                return Err(invalid());
            }
            words.insert(word.trim().to_lowercase(), score);
        }
        Ok(Self { words })
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl WordPolarity for WordListScorer {
    fn word_score(&self, word: &str) -> f64 {
        self.words.get(bare_word(word).as_str()).copied().unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_words() {
        assert_eq!(AfinnScorer.word_score("wow"), 4.0);
        assert_eq!(AfinnScorer.word_score("unfortunately"), -2.0);
        assert_eq!(AfinnScorer.word_score("keyboard"), 0.0);
    }

    #[test]
    fn test_trailing_punctuation_is_ignored() {
        assert_eq!(AfinnScorer.word_score("amazing!!"), 4.0);
        assert_eq!(AfinnScorer.word_score("lol..."), 3.0);
    }

    #[test]
    fn test_question_mark_is_kept() {
        assert_eq!(AfinnScorer.word_score("good?"), 0.0);
    }

    #[test]
    fn test_word_list_scorer_reads_afinn_format() {
        let list = WordListScorer::from_afinn_str("abandon\t-2\nbreathtaking\t5\n\ncool stuff\t3\n").unwrap();
        assert_eq!(list.len(), 3);
        assert_eq!(list.word_score("Breathtaking!!"), 5.0);
        assert_eq!(list.word_score("abandon"), -2.0);
        assert_eq!(list.word_score("keyboard"), 0.0);
    }

    #[test]
    fn test_word_list_scorer_rejects_bad_lines() {
        assert!(matches!(
            WordListScorer::from_afinn_str("abandon -2"),
            Err(AnalysisError::LexiconLoad(_))
        ));
        assert!(WordListScorer::from_afinn_str("abandon\tlots").is_err());
        assert!(WordListScorer::from_afinn_str("abandon\t40").is_err());
        assert!(WordListScorer::from_file("/definitely/not/afinn.txt").is_err());
    }
}
