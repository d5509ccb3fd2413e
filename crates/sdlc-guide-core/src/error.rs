use thiserror::Error;

#[derive(Debug, Error)]
pub enum GuideError {
    #[error("unknown stage: {0}")]
    UnknownStage(String),

    #[error("stage '{0}' has no prompt templates")]
    EmptyPrompts(String),

    #[error("stage '{stage}' has no prompt at index {index} ({count} available)")]
    PromptOutOfRange {
        stage: String,
        index: usize,
        count: usize,
    },

    #[error("stage data file not found: {0}")]
    DataNotFound(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

}

pub type Result<T> = std::result::Result<T, GuideError>;
