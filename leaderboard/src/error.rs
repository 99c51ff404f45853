use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Leaderboard file I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("Leaderboard file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = core::result::Result<T, StoreError>;
