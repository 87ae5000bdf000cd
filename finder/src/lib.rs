//! Largest uniform rectangle search over integer matrices.
//!
//! `rect-finder` answers one question: which cell value forms the largest
//! axis-aligned rectangle whose cells all hold that value, and how large is
//! it? Every value tied for the maximum area is reported.
//!
//! # Algorithm
//!
//! For each distinct value the matrix is scanned top to bottom while a height
//! profile counts, per column, how many consecutive rows ending at the current
//! row hold the value. The largest rectangle under that histogram (found with
//! a monotonic stack) is the largest all-value rectangle whose bottom edge is
//! the current row.
//!
//! # Example
//!
//! ```
//! use rect_finder::Matrix;
//!
//! let matrix = Matrix::new(vec![vec![1, 1, 2], vec![1, 1, 2], vec![3, 3, 3]])?;
//! let finding = matrix.find();
//!
//! assert_eq!(finding.area, 4);
//! assert!(finding.values.contains(&1));
//! # Ok::<(), rect_finder::Error>(())
//! ```

mod error;
mod finder;
mod histogram;
mod matrix;

pub use error::Error;
pub use finder::{Finding, largest_uniform_rectangle};
pub use histogram::largest_rectangle_area;
pub use matrix::Matrix;
