//! Largest rectangle under a histogram.

use std::iter;

/// Returns the area of the largest rectangle that fits under `heights`.
///
/// Each bar has width 1. Runs in time linear in the number of bars.
///
/// ```
/// assert_eq!(rect_finder::largest_rectangle_area(&[2, 1, 5, 6, 2, 3]), 10);
/// ```
pub fn largest_rectangle_area(heights: &[usize]) -> usize {
    let mut stack = Vec::with_capacity(heights.len() + 1);
    largest_area_with(heights, &mut stack)
}

/// Same as [`largest_rectangle_area`], reusing `stack` as scratch space.
///
/// The stack holds bar indices whose heights are non-decreasing from bottom to
/// top. A trailing zero-height sentinel flushes every remaining bar; it is
/// never written into `heights`.
pub(crate) fn largest_area_with(heights: &[usize], stack: &mut Vec<usize>) -> usize {
    stack.clear();
    let mut max_area = 0;

    for (i, h) in heights.iter().copied().chain(iter::once(0)).enumerate() {
        while let Some(&top) = stack.last() {
            if heights[top] <= h {
                break;
            }
            stack.pop();

            let width = match stack.last() {
                Some(&left) => i - left - 1,
                None => i,
            };
            max_area = max_area.max(heights[top] * width);
        }
        stack.push(i);
    }

    max_area
}
