//! Error types for matrix validation.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("matrix cannot be empty")]
    EmptyMatrix,

    #[error("matrix rows cannot be empty")]
    EmptyRow,

    #[error("row {row} has different length ({found}, expected {expected}); matrix must be rectangular")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
}
