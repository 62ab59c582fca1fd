// SPDX-License-Identifier: MIT
//! # Strided Views
//!
//! A view is an origin inside a borrowed byte buffer plus a [`Layout`]:
//! element `(i, j)` lives at `origin + i * row_stride + j * col_stride`.
//! Views never own memory and are passed around by value.
//!
//! The caller guarantees that every addressed byte lies inside the borrowed
//! buffer. Constructors and [`StridedView::region`] only `debug_assert!` this;
//! in release builds an out-of-range access still panics on slice indexing
//! instead of reading foreign memory.

/// Extents and byte strides of a 2D region.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Layout {
    pub rows: usize,
    pub cols: usize,
    /// Bytes between element `(i, j)` and `(i + 1, j)`.
    pub row_stride: usize,
    /// Bytes between element `(i, j)` and `(i, j + 1)`.
    pub col_stride: usize,
}

impl Layout {
    pub fn new(rows: usize, cols: usize, row_stride: usize, col_stride: usize) -> Self {
        Self {
            rows,
            cols,
            row_stride,
            col_stride,
        }
    }

    /// Row-major layout with no padding between rows.
    pub fn packed(rows: usize, cols: usize, bytes_per_element: usize) -> Self {
        Self::new(rows, cols, cols * bytes_per_element, bytes_per_element)
    }

    pub fn len(&self) -> usize {
        self.rows * self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    /// Number of bytes past the origin touched by this layout.
    pub fn span(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            (self.rows - 1) * self.row_stride + (self.cols - 1) * self.col_stride + 1
        }
    }

    #[inline]
    fn offset_of(&self, i: usize, j: usize) -> usize {
        i * self.row_stride + j * self.col_stride
    }

    fn sub(&self, n_rows: usize, n_cols: usize) -> Self {
        Self {
            rows: n_rows,
            cols: n_cols,
            ..*self
        }
    }
}

/// Read-only strided view over a borrowed byte buffer.
#[derive(Clone, Copy, Debug)]
pub struct StridedView<'a> {
    data: &'a [u8],
    origin: usize,
    layout: Layout,
}

impl<'a> StridedView<'a> {
    pub fn new(data: &'a [u8], origin: usize, layout: Layout) -> Self {
        debug_assert!(
            origin + layout.span() <= data.len(),
            "view {:?} at {} overruns buffer of {} bytes",
            layout,
            origin,
            data.len()
        );
        Self {
            data,
            origin,
            layout,
        }
    }

    pub fn rows(&self) -> usize {
        self.layout.rows
    }

    pub fn cols(&self) -> usize {
        self.layout.cols
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Byte offset of element `(0, 0)` within the borrowed buffer.
    pub fn origin(&self) -> usize {
        self.origin
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> u8 {
        debug_assert!(i < self.layout.rows && j < self.layout.cols);
        self.data[self.origin + self.layout.offset_of(i, j)]
    }

    /// Sub-view of `n_rows x n_cols` elements starting at element `(i, j)`,
    /// sharing this view's strides.
    ///
    /// Requires `i + n_rows <= rows` and `j + n_cols <= cols`.
    pub fn region(&self, i: usize, j: usize, n_rows: usize, n_cols: usize) -> Self {
        debug_assert!(
            i + n_rows <= self.layout.rows && j + n_cols <= self.layout.cols,
            "region ({i}, {j}) {n_rows}x{n_cols} outside {}x{}",
            self.layout.rows,
            self.layout.cols
        );
        Self {
            data: self.data,
            origin: self.origin + self.layout.offset_of(i, j),
            layout: self.layout.sub(n_rows, n_cols),
        }
    }

    /// The `cols * col_stride` bytes starting at row `i`.
    ///
    /// For a packed pixel view (`col_stride` equal to the pixel size) this is
    /// exactly the row's pixels. Returns `None` if the row runs past the buffer.
    pub fn row_bytes(&self, i: usize) -> Option<&'a [u8]> {
        let start = self.origin + i * self.layout.row_stride;
        self.data
            .get(start..start + self.layout.cols * self.layout.col_stride)
    }
}

/// Mutable strided view. Holds the buffer exclusively for its lifetime.
#[derive(Debug)]
pub struct StridedViewMut<'a> {
    data: &'a mut [u8],
    origin: usize,
    layout: Layout,
}

impl<'a> StridedViewMut<'a> {
    pub fn new(data: &'a mut [u8], origin: usize, layout: Layout) -> Self {
        debug_assert!(
            origin + layout.span() <= data.len(),
            "view {:?} at {} overruns buffer of {} bytes",
            layout,
            origin,
            data.len()
        );
        Self {
            data,
            origin,
            layout,
        }
    }

    pub fn rows(&self) -> usize {
        self.layout.rows
    }

    pub fn cols(&self) -> usize {
        self.layout.cols
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> u8 {
        debug_assert!(i < self.layout.rows && j < self.layout.cols);
        self.data[self.origin + self.layout.offset_of(i, j)]
    }

    #[inline]
    pub fn set(&mut self, i: usize, j: usize, value: u8) {
        debug_assert!(i < self.layout.rows && j < self.layout.cols);
        self.data[self.origin + self.layout.offset_of(i, j)] = value;
    }

    /// Mutable sub-view, see [`StridedView::region`].
    pub fn region(&mut self, i: usize, j: usize, n_rows: usize, n_cols: usize) -> StridedViewMut<'_> {
        debug_assert!(i + n_rows <= self.layout.rows && j + n_cols <= self.layout.cols);
        StridedViewMut {
            origin: self.origin + self.layout.offset_of(i, j),
            layout: self.layout.sub(n_rows, n_cols),
            data: &mut *self.data,
        }
    }

    /// Read-only view of the same region.
    pub fn as_view(&self) -> StridedView<'_> {
        StridedView {
            data: &*self.data,
            origin: self.origin,
            layout: self.layout,
        }
    }
}
