//! Common test utilities for the screenshot pipeline tests
//!
//! Synthetic frames and a mock capture source, so nothing here needs an
//! X server.

#![allow(dead_code)]

use x_screenshot::capture::{ChannelLayout, FrameSource, RawFrame};
use x_screenshot::error::{ShotError, ShotResult};

/// Build a frame of `width x height` pixels where pixel `(x, y)` is `rgb(x, y)`,
/// stored with the given channel layout and 4 bytes per pixel.
pub fn synthetic_frame(
    width: u32,
    height: u32,
    channels: ChannelLayout,
    rgb: impl Fn(u32, u32) -> [u8; 3],
) -> RawFrame {
    let mut data = vec![0u8; (width * height * 4) as usize];
    for y in 0..height {
        for x in 0..width {
            let [r, g, b] = rgb(x, y);
            let at = ((y * width + x) * 4) as usize;
            let pixel = &mut data[at..at + 4];
            pixel.fill(0xaa); // unused byte, must never show up in output
            pixel[channels.red] = r;
            pixel[channels.green] = g;
            pixel[channels.blue] = b;
        }
    }
    RawFrame::packed(data, width, height, channels)
}

/// Deterministic, non-uniform test pattern.
pub fn pattern(x: u32, y: u32) -> [u8; 3] {
    [
        (x * 13 + y * 7) as u8,
        (x * y + 31) as u8,
        (255 - (x + y * 3) % 256) as u8,
    ]
}

/// Capture source that hands out a prepared frame.
pub struct MockCapture {
    frame: Option<RawFrame>,
    pub grabs: usize,
}

impl MockCapture {
    pub fn new(frame: RawFrame) -> Self {
        Self {
            frame: Some(frame),
            grabs: 0,
        }
    }

    /// A source whose display went away.
    pub fn failing() -> Self {
        Self {
            frame: None,
            grabs: 0,
        }
    }
}

impl FrameSource for MockCapture {
    fn grab(&mut self) -> ShotResult<RawFrame> {
        self.grabs += 1;
        self.frame
            .clone()
            .ok_or_else(|| ShotError::capture("mock display closed"))
    }
}
