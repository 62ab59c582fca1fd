// SPDX-License-Identifier: MIT
//! # Output Size Planning
//!
//! Fits a captured frame into optional maximum bounds while preserving its
//! aspect ratio. All arithmetic is integer and truncates toward zero, so the
//! unconstrained dimension may come out one pixel smaller than the exact ratio
//! would give. Frames are never upscaled.

/// Represents a 2D size with width and height in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Size {
    pub w: u32,
    pub h: u32,
}

impl Size {
    pub fn new(w: u32, h: u32) -> Self {
        Self { w, h }
    }

    pub fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }
}

/// Maximum output dimensions. `None` leaves that dimension unbounded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Bounds {
    pub max_w: Option<u32>,
    pub max_h: Option<u32>,
}

impl Bounds {
    pub fn new(max_w: Option<u32>, max_h: Option<u32>) -> Self {
        Self { max_w, max_h }
    }

    pub fn unbounded() -> Self {
        Self::default()
    }
}

/// Largest size with the source's aspect ratio that fits within `bounds`.
///
/// With `W`/`H` the bounds (the source dimension when unbounded), width binds
/// when `W * sh < H * sw`: the width becomes `min(W, sw)` and the height
/// follows as `sh * width / sw`. Otherwise the height becomes `min(H, sh)` and
/// the width follows as `sw * height / sh`.
///
/// The source must be non-empty.
pub fn fit_within(source: Size, bounds: Bounds) -> Size {
    debug_assert!(!source.is_empty(), "fit of an empty source");

    let sw = u64::from(source.w);
    let sh = u64::from(source.h);
    let max_w = u64::from(bounds.max_w.unwrap_or(source.w));
    let max_h = u64::from(bounds.max_h.unwrap_or(source.h));

    // every quotient below is at most the source dimension, so it fits u32
    if max_w * sh < max_h * sw {
        let w = max_w.min(sw);
        Size {
            w: w as u32,
            h: (sh * w / sw) as u32,
        }
    } else {
        let h = max_h.min(sh);
        Size {
            w: (sw * h / sh) as u32,
            h: h as u32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FHD: Size = Size { w: 1920, h: 1080 };

    #[test]
    fn test_width_bound() {
        let out = fit_within(FHD, Bounds::new(Some(800), None));
        assert_eq!(out, Size::new(800, 450));
    }

    #[test]
    fn test_height_bound_truncates_width() {
        // 1920 * 100 / 1080 = 177.7
        let out = fit_within(FHD, Bounds::new(None, Some(100)));
        assert_eq!(out, Size::new(177, 100));
    }

    #[test]
    fn test_no_upscaling() {
        assert_eq!(fit_within(FHD, Bounds::new(Some(4000), Some(3000))), FHD);
        assert_eq!(fit_within(FHD, Bounds::new(Some(10_000), None)), FHD);
        assert_eq!(fit_within(FHD, Bounds::new(None, Some(10_000))), FHD);
    }

    #[test]
    fn test_unbounded_is_identity() {
        assert_eq!(fit_within(FHD, Bounds::unbounded()), FHD);
        let odd = Size::new(1366, 767);
        assert_eq!(fit_within(odd, Bounds::unbounded()), odd);
    }

    #[test]
    fn test_tighter_bound_wins() {
        // 640/1920 = 0.33 beats 480/1080 = 0.44
        assert_eq!(
            fit_within(FHD, Bounds::new(Some(640), Some(480))),
            Size::new(640, 360)
        );
        // 400/1080 = 0.37 beats 1000/1920 = 0.52
        assert_eq!(
            fit_within(FHD, Bounds::new(Some(1000), Some(400))),
            Size::new(711, 400)
        );
    }

    #[test]
    fn test_result_never_exceeds_bounds_or_source() {
        let sources = [FHD, Size::new(3840, 2160), Size::new(1080, 1920), Size::new(7, 3)];
        let limits = [None, Some(1), Some(5), Some(333), Some(1080), Some(5000)];

        for source in sources {
            for max_w in limits {
                for max_h in limits {
                    let out = fit_within(source, Bounds::new(max_w, max_h));
                    assert!(out.w <= source.w && out.h <= source.h, "{source:?} -> {out:?}");
                    if let Some(w) = max_w {
                        assert!(out.w <= w, "{source:?} {max_w:?}x{max_h:?} -> {out:?}");
                    }
                    if let Some(h) = max_h {
                        assert!(out.h <= h, "{source:?} {max_w:?}x{max_h:?} -> {out:?}");
                    }
                }
            }
        }
    }

    #[test]
    fn test_extreme_aspect_can_collapse() {
        // a 1000:1 strip bounded to height 1 has no room for a whole column
        let strip = Size::new(1, 1000);
        assert_eq!(fit_within(strip, Bounds::new(None, Some(1))), Size::new(0, 1));
    }
}
