use handbook_common::error::CommonError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Common(#[from] CommonError),

    #[error("malformed catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Config(String),

    #[error("approach not found: {0}")]
    NotFound(String),

    #[error("unknown sort key: '{0}'. Expected one of: recent, difficulty-easy, difficulty-hard, alphabetical, popular")]
    UnknownSortKey(String),

    #[error("unknown filter category: '{0}'. Expected one of: difficulty, tech, llm, database")]
    UnknownFilterCategory(String),
}
