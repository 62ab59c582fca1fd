// SPDX-License-Identifier: MIT
//! # shot-scale: Strided Views and Box-Filter Downsampling
//!
//! This crate holds the pixel arithmetic behind `x-screenshot`. It knows
//! nothing about displays or image codecs: it works on borrowed byte buffers
//! described by strides, and shrinks one 8-bit channel at a time.
//!
//! ## Key Components
//!
//! - [`view`]: [`StridedView`] / [`StridedViewMut`], non-owning descriptors of a
//!   rectangular region with independent row and column byte strides
//! - [`reduce`]: integer mean over a view
//! - [`shrink`]: copy or box-average a large view into a smaller one
//! - [`presets`]: aspect-preserving fit of a source size into max bounds
//!
//! ## Strides
//!
//! The same algorithm runs on packed-interleaved, planar and sub-rectangular
//! data. A single channel of a BGRX frame is a view with `col_stride = 4` and
//! the origin moved to the channel's byte; a packed RGB destination channel is
//! a view with `col_stride = 3`.
//!
//! ## Usage Example
//!
//! ```rust
//! use shot_scale::{shrink, Layout, StridedView, StridedViewMut};
//!
//! // 4x4 single channel, box-averaged to 2x2
//! let src: Vec<u8> = (0..16).collect();
//! let mut dst = vec![0u8; 4];
//!
//! let src_view = StridedView::new(&src, 0, Layout::packed(4, 4, 1));
//! let mut dst_view = StridedViewMut::new(&mut dst, 0, Layout::packed(2, 2, 1));
//! shrink(src_view, &mut dst_view).unwrap();
//!
//! assert_eq!(dst, vec![2, 4, 10, 12]);
//! ```

pub mod presets;
pub mod reduce;
pub mod shrink;
pub mod view;

pub use presets::{fit_within, Bounds, Size};
pub use reduce::mean;
pub use shrink::{shrink, ScaleError, ShrinkMode};
pub use view::{Layout, StridedView, StridedViewMut};
