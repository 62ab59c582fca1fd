// SPDX-License-Identifier: MIT
// Integer box-filter shrink of one 8-bit channel.
// Strided view in → strided view out, direct write into the caller's buffer.

use crate::reduce::mean;
use crate::view::{StridedView, StridedViewMut};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScaleError {
    /// The destination is larger than the source in at least one dimension.
    /// Callers size destinations from the source, so this is a bug upstream.
    DestinationLarger {
        src_rows: usize,
        src_cols: usize,
        dst_rows: usize,
        dst_cols: usize,
    },
}

impl std::fmt::Display for ScaleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScaleError::DestinationLarger {
                src_rows,
                src_cols,
                dst_rows,
                dst_cols,
            } => write!(
                f,
                "Destination {}x{} exceeds source {}x{}",
                dst_cols, dst_rows, src_cols, src_rows
            ),
        }
    }
}

impl std::error::Error for ScaleError {}

/// Which path [`shrink`] took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShrinkMode {
    /// Destination has no elements; nothing was read or written.
    Empty,
    /// Both scale factors were 1: element-wise copy.
    Copy,
    /// Each destination cell is the mean of a `row_scale x col_scale` window.
    BoxAverage { row_scale: usize, col_scale: usize },
}

/// Fill `dst` from the larger `src`.
///
/// Scale factors are `src.rows / dst.rows` and `src.cols / dst.cols`, floored.
/// Cell `(i, j)` of `dst` is the mean of the source window at
/// `(row_scale * i, col_scale * j)`; when both factors are 1 the cell is a
/// plain copy of source `(i, j)`.
///
/// The last `src.rows % dst.rows` rows and `src.cols % dst.cols` columns of
/// the source are never read, which keeps output byte-compatible with
/// x-screenshot 0.0.1.
// TODO: blend the dropped remainder strip into the last row/column once
// 0.0.1-compatible output is no longer required.
pub fn shrink(src: StridedView<'_>, dst: &mut StridedViewMut<'_>) -> Result<ShrinkMode, ScaleError> {
    if dst.rows() > src.rows() || dst.cols() > src.cols() {
        return Err(ScaleError::DestinationLarger {
            src_rows: src.rows(),
            src_cols: src.cols(),
            dst_rows: dst.rows(),
            dst_cols: dst.cols(),
        });
    }
    if dst.layout().is_empty() {
        return Ok(ShrinkMode::Empty);
    }

    let row_scale = src.rows() / dst.rows();
    let col_scale = src.cols() / dst.cols();

    if row_scale == 1 && col_scale == 1 {
        for i in 0..dst.rows() {
            for j in 0..dst.cols() {
                dst.set(i, j, src.get(i, j));
            }
        }
        return Ok(ShrinkMode::Copy);
    }

    for i in 0..dst.rows() {
        for j in 0..dst.cols() {
            let window = src.region(row_scale * i, col_scale * j, row_scale, col_scale);
            dst.set(i, j, mean(window));
        }
    }
    Ok(ShrinkMode::BoxAverage {
        row_scale,
        col_scale,
    })
}
