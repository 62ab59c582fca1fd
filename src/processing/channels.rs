//! # Channel Splitting and Resampling
//!
//! A captured frame stores its color channels interleaved, 4 bytes per pixel.
//! Each channel is read as its own single-channel [`StridedView`]
//! (`col_stride = 4`, origin at the channel's byte) and shrunk independently
//! into a packed RGB destination (`col_stride = 3`, origin at the channel's
//! RGB index).
//!
//! ## Schedules
//!
//! - [`Schedule::Sequential`]: the three channels are shrunk one after the
//!   other straight into the packed destination.
//! - [`Schedule::Parallel`]: the three channels run on separate rayon workers.
//!   Interleaved writes cannot be split into disjoint `&mut` slices, so each
//!   worker owns one plane of a planar scratch buffer, carved up with
//!   `chunks_exact_mut` before spawning. After the join, the planes are
//!   interleaved into the packed destination through the resampler's copy
//!   path. The borrow checker proves the workers never alias; there is no lock.
//!   This costs one extra allocation the size of the destination (three
//!   `width * height` planes) and one more pass over it to interleave, on
//!   top of the single destination buffer the sequential schedule uses.
//!
//! Both schedules produce byte-identical output.

use shot_scale::{fit_within, shrink, Bounds, Layout, ShrinkMode, Size, StridedView, StridedViewMut};

use crate::capture::{Channel, RawFrame};
use crate::error::{ShotError, ShotResult};

const RGB_BYTES: usize = 3;

/// How the three channel shrinks are scheduled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Schedule {
    Sequential,
    #[default]
    Parallel,
}

/// Packed 8-bit RGB image, row-major, no row padding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbBuffer {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl RgbBuffer {
    /// Zero-filled buffer of `size`.
    pub fn new(size: Size) -> Self {
        Self {
            data: vec![0; size.w as usize * size.h as usize * RGB_BYTES],
            width: size.w,
            height: size.h,
        }
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn layout(&self) -> Layout {
        Layout::packed(self.height as usize, self.width as usize, RGB_BYTES)
    }

    /// The whole buffer as a packed pixel view, as the serializer expects.
    pub fn view(&self) -> StridedView<'_> {
        StridedView::new(&self.data, 0, self.layout())
    }

    /// RGB triple at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        let at = (y as usize * self.width as usize + x as usize) * RGB_BYTES;
        [self.data[at], self.data[at + 1], self.data[at + 2]]
    }
}

/// Drives one shrink per channel from a captured frame into an RGB buffer.
pub struct ChannelSplitter<'a> {
    frame: &'a RawFrame,
    target: Size,
}

impl<'a> ChannelSplitter<'a> {
    /// The target must not exceed the frame in either dimension.
    pub fn new(frame: &'a RawFrame, target: Size) -> ShotResult<Self> {
        frame.validate()?;
        if target.w > frame.width || target.h > frame.height {
            return Err(ShotError::internal(
                "target within frame",
                format!(
                    "target {}x{} exceeds frame {}x{}",
                    target.w, target.h, frame.width, frame.height
                ),
            ));
        }
        Ok(Self { frame, target })
    }

    /// Single-channel view of `channel` over the whole frame.
    pub fn source_view(&self, channel: Channel) -> StridedView<'a> {
        let frame = self.frame;
        StridedView::new(
            &frame.data,
            frame.channels.offset(channel),
            Layout::new(
                frame.height as usize,
                frame.width as usize,
                frame.stride,
                frame.bytes_per_pixel,
            ),
        )
    }

    fn target_layout(&self, col_stride: usize) -> Layout {
        let (rows, cols) = (self.target.h as usize, self.target.w as usize);
        Layout::new(rows, cols, cols * col_stride, col_stride)
    }

    fn check_destination(&self, dst: &[u8]) -> ShotResult<()> {
        let expected = self.target.w as usize * self.target.h as usize * RGB_BYTES;
        if dst.len() != expected {
            return Err(ShotError::internal(
                "destination sized to target",
                format!("destination holds {} bytes, expected {}", dst.len(), expected),
            ));
        }
        Ok(())
    }

    /// Shrink each channel in `order` straight into the packed RGB `dst`.
    pub fn run_sequential(&self, order: [Channel; 3], dst: &mut [u8]) -> ShotResult<()> {
        self.check_destination(dst)?;
        let layout = self.target_layout(RGB_BYTES);
        for channel in order {
            let mut out = StridedViewMut::new(&mut *dst, channel.rgb_index(), layout);
            let mode = shrink(self.source_view(channel), &mut out)?;
            tracing::trace!(?channel, ?mode, "channel shrunk");
        }
        Ok(())
    }

    /// Shrink all channels concurrently, then interleave into the packed RGB `dst`.
    pub fn run_parallel(&self, dst: &mut [u8]) -> ShotResult<()> {
        self.check_destination(dst)?;
        let plane_len = self.target.w as usize * self.target.h as usize;
        if plane_len == 0 {
            return Ok(());
        }

        let plane_layout = self.target_layout(1);
        let mut planes = vec![0u8; plane_len * Channel::ALL.len()];
        let mut results: [Option<Result<ShrinkMode, shot_scale::ScaleError>>; 3] = [None, None, None];

        rayon::scope(|scope| {
            for ((channel, plane), result) in Channel::ALL
                .into_iter()
                .zip(planes.chunks_exact_mut(plane_len))
                .zip(results.iter_mut())
            {
                let src = self.source_view(channel);
                scope.spawn(move |_| {
                    let mut out = StridedViewMut::new(plane, 0, plane_layout);
                    *result = Some(shrink(src, &mut out));
                });
            }
        });

        for (channel, result) in Channel::ALL.into_iter().zip(results) {
            let mode = result.ok_or_else(|| {
                ShotError::internal("channel worker joined", format!("{:?} produced no result", channel))
            })??;
            tracing::trace!(?channel, ?mode, "channel shrunk");
        }

        let packed_layout = self.target_layout(RGB_BYTES);
        for (channel, plane) in Channel::ALL.into_iter().zip(planes.chunks_exact(plane_len)) {
            let src = StridedView::new(plane, 0, plane_layout);
            let mut out = StridedViewMut::new(&mut *dst, channel.rgb_index(), packed_layout);
            shrink(src, &mut out)?;
        }
        Ok(())
    }

    /// Run the given schedule into `dst`.
    pub fn run(&self, schedule: Schedule, dst: &mut [u8]) -> ShotResult<()> {
        match schedule {
            Schedule::Sequential => self.run_sequential(Channel::ALL, dst),
            Schedule::Parallel => self.run_parallel(dst),
        }
    }
}

/// Fit `frame` into `bounds` and shrink it into a freshly allocated RGB buffer.
///
/// Fails with a configuration error when the fit leaves no whole pixel in
/// one dimension (an extreme aspect ratio against a tiny bound).
pub fn shrink_frame(frame: &RawFrame, bounds: Bounds, schedule: Schedule) -> ShotResult<RgbBuffer> {
    frame.validate()?;
    let source = Size::new(frame.width, frame.height);
    let target = fit_within(source, bounds);
    if target.is_empty() {
        return Err(ShotError::config(
            "bounds",
            format!("{:?}x{:?}", bounds.max_w, bounds.max_h),
            format!(
                "a {}x{} frame fits as {}x{}, which has no pixels",
                source.w, source.h, target.w, target.h
            ),
        ));
    }

    tracing::debug!(
        src_w = source.w,
        src_h = source.h,
        dst_w = target.w,
        dst_h = target.h,
        ?schedule,
        "shrinking frame"
    );

    let mut out = RgbBuffer::new(target);
    ChannelSplitter::new(frame, target)?.run(schedule, &mut out.data)?;
    Ok(out)
}
