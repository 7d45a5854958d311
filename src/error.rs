use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PuzzleError {
    #[error("expected exactly 9 tiles (3 rows of 3), got {count}")]
    MalformedInput { count: usize },

    #[error("tile `{token}` is not an integer")]
    InvalidToken { token: String },

    #[error("tiles must be the numbers 0 to 8 without repeats, got {tiles:?}")]
    InvalidTiles { tiles: Vec<i64> },

    #[error("start and goal have different inversion parity, no sequence of moves connects them")]
    UnreachableGoal,
}

pub type Result<T> = std::result::Result<T, PuzzleError>;
