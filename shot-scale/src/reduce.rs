// SPDX-License-Identifier: MIT
//! Reductions over strided views.

use crate::view::StridedView;

/// Floor of the arithmetic mean of every element visible through `view`.
///
/// The sum is accumulated in a `u64`, so any view that fits in memory is
/// safe from overflow. The view must not be empty.
pub fn mean(view: StridedView<'_>) -> u8 {
    let count = view.layout().len();
    debug_assert!(count > 0, "mean of an empty view");

    let mut sum: u64 = 0;
    for i in 0..view.rows() {
        for j in 0..view.cols() {
            sum += u64::from(view.get(i, j));
        }
    }
    // the mean of u8 values is itself within u8 range
    (sum / count as u64) as u8
}
