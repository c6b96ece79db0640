//! Error types for matrix-mul operations.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("matrix dimension mismatch: A is {0}x{1}, B is {2}x{3}")]
    ShapeMismatch(usize, usize, usize, usize),

    #[error("matrix must have at least one row and one column, got {0}x{1}")]
    EmptyMatrix(usize, usize),

    #[error("data length {0} does not match matrix dimensions {1}x{2}")]
    DataLength(usize, usize, usize),

    #[error("row {row} has {found} elements, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error(
        "block width must be between 1 and {max}, got {0}",
        max = crate::four_russians::MAX_BLOCK_WIDTH
    )]
    InvalidBlockWidth(usize),

    #[error("unknown algorithm: {0}")]
    UnknownAlgorithm(String),

    #[error("parse error: {0}")]
    Parse(#[from] std::num::ParseIntError),
}
