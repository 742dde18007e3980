use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Too many mines for the board size")]
    TooManyMines,
    #[error("Board dimensions must be non-zero")]
    EmptyBoard,
}

pub type Result<T> = std::result::Result<T, GameError>;
