use thiserror::Error;

/// Raised while loading/validating configuration, never mid-pipeline.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("overlap_size ({overlap}) must be smaller than window_size ({window})")]
    OverlapTooLarge { overlap: usize, window: usize },

    #[error("window_size must be greater than zero")]
    ZeroWindow,

    #[error("context_budget_chars must be greater than zero")]
    ZeroBudget,

    #[error("heading_level must be between 1 and 6, got {0}")]
    BadHeadingLevel(usize),

    #[error("top_k must be greater than zero")]
    ZeroTopK,
}
