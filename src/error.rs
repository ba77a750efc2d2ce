use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalysisError {
    /// Aggregation was asked to summarise zero comments.
    #[error("No comments to analyze")]
    EmptyCorpus,

    // Start-up configuration
    #[error("Lexicon load failed: {0}")]
    LexiconLoad(String),

    // Upstream comment acquisition reported failure
    #[error("Comment acquisition failed: {0}")]
    Acquisition(String),

    #[error("Batch scoring task failed: {0}")]
    Batch(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
