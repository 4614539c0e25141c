use thiserror::Error;

#[derive(Debug, Error)]
pub enum EdmError {
    #[error("invalid model document: {0}")]
    Decode(#[from] serde_json::Error),
}
