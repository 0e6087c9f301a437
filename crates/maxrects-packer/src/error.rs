use thiserror::Error;

#[derive(Debug, Error)]
pub enum PackerError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("snapshot error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PackerError>;
