//! Error types for puzzle construction and move application.
//!
//! Running out of frontier during a search is not an error; it is reported
//! through [`crate::solver::Termination`].
use crate::engine::Action;
use thiserror::Error;

/// Why a board failed the permutation invariant.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardDefect {
    #[error("board has no cells")]
    Empty,
    #[error("row {row} has {len} cells, expected {expected}")]
    NotSquare {
        row: usize,
        len: usize,
        expected: usize,
    },
    #[error("value {value} is outside 0..={max}")]
    ValueOutOfRange { value: u32, max: u32 },
    #[error("value {value} appears more than once")]
    DuplicateValue { value: u16 },
    #[error("a {size}x{size} board does not fit in 16-bit tiles")]
    TooLarge { size: usize },
}

#[derive(Error, Debug)]
pub enum PuzzleError {
    /// The requested action moves the blank off the board.
    #[error("{action} is not a legal move when the blank is at ({row}, {col})")]
    IllegalMove {
        action: Action,
        row: usize,
        col: usize,
    },
    #[error("malformed board: {0}")]
    MalformedBoard(#[from] BoardDefect),
    #[error("unrecognized token '{token}' in row {row}")]
    Parse { row: usize, token: String },
    #[error("failed to read board file: {0}")]
    Io(#[from] std::io::Error),
}
