use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("a dataset needs at least one point, got {0}")]
    InvalidPointCount(usize),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type GameResult<T> = Result<T, GameError>;
