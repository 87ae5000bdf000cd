//! Per-value scan for the largest uniform rectangle.

use std::collections::{BTreeSet, HashSet};

use serde::Serialize;

use crate::histogram::largest_area_with;

/// The values tied for the largest uniform rectangle, and its area.
///
/// `values` is empty exactly when `area` is 0, which only happens for a matrix
/// with no rows. The set has no meaningful order; it iterates ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Finding {
    #[serde(rename = "number")]
    pub values: BTreeSet<i64>,
    pub area: usize,
}

impl Finding {
    fn offer(&mut self, value: i64, area: usize) {
        if area > self.area {
            self.area = area;
            self.values.clear();
            self.values.insert(value);
        } else if area == self.area && area > 0 {
            self.values.insert(value);
        }
    }
}

/// Finds the value(s) whose largest all-equal rectangle has the greatest area.
///
/// Rows must all have the length of the first row; [`Matrix`](crate::Matrix)
/// guarantees that. A matrix without rows yields an empty [`Finding`].
///
/// Cost is `O(D * n * m)` for `D` distinct values in an `n` x `m` matrix.
pub fn largest_uniform_rectangle<R: AsRef<[i64]>>(rows: &[R]) -> Finding {
    let Some(first) = rows.first() else {
        return Finding::default();
    };
    let width = first.as_ref().len();

    let distinct: HashSet<i64> = rows
        .iter()
        .flat_map(|row| row.as_ref().iter().copied())
        .collect();

    let mut best = Finding::default();
    let mut heights = vec![0usize; width];
    let mut stack = Vec::with_capacity(width + 1);

    for value in distinct {
        heights.fill(0);

        for row in rows {
            for (height, &cell) in heights.iter_mut().zip(row.as_ref()) {
                if cell == value {
                    *height += 1;
                } else {
                    *height = 0;
                }
            }

            let area = largest_area_with(&heights, &mut stack);
            best.offer(value, area);
        }
    }

    best
}
