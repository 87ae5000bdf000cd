//! Validated rectangular integer matrix.

use serde::{Deserialize, Serialize};

use crate::{Error, Finding, largest_uniform_rectangle};

/// A non-empty, rectangular matrix of `i64` cells.
///
/// Construction rejects matrices without rows, with an empty first row, or
/// with rows of unequal length. Deserialization goes through the same checks,
/// so `Matrix` can be read straight from JSON like `[[1, 2], [3, 4]]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<i64>>", into = "Vec<Vec<i64>>")]
pub struct Matrix {
    rows: Vec<Vec<i64>>,
    width: usize,
}

impl Matrix {
    pub fn new(rows: Vec<Vec<i64>>) -> Result<Self, Error> {
        let width = rows.first().ok_or(Error::EmptyMatrix)?.len();
        if width == 0 {
            return Err(Error::EmptyRow);
        }

        if let Some((row, found)) = rows
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|&(_, len)| len != width)
        {
            return Err(Error::Ragged {
                row,
                expected: width,
                found,
            });
        }

        Ok(Self { rows, width })
    }

    pub fn rows(&self) -> &[Vec<i64>] {
        &self.rows
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn cell_count(&self) -> usize {
        self.height() * self.width
    }

    /// Runs the largest uniform rectangle search on this matrix.
    pub fn find(&self) -> Finding {
        largest_uniform_rectangle(&self.rows)
    }

    pub fn into_rows(self) -> Vec<Vec<i64>> {
        self.rows
    }
}

impl TryFrom<Vec<Vec<i64>>> for Matrix {
    type Error = Error;

    fn try_from(rows: Vec<Vec<i64>>) -> Result<Self, Self::Error> {
        Self::new(rows)
    }
}

impl From<Matrix> for Vec<Vec<i64>> {
    fn from(matrix: Matrix) -> Self {
        matrix.rows
    }
}
