//! Captured frame description shared by every capture backend.

use crate::error::{ShotError, ShotResult};

/// One color component of a pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    /// Output order of a packed RGB pixel.
    pub const ALL: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

    /// Byte position of this channel inside a packed RGB pixel.
    pub fn rgb_index(self) -> usize {
        match self {
            Channel::Red => 0,
            Channel::Green => 1,
            Channel::Blue => 2,
        }
    }
}

/// Byte order of multi-byte pixels in the captured buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    LsbFirst,
    MsbFirst,
}

/// Byte offset of each color channel inside one captured pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelLayout {
    pub red: usize,
    pub green: usize,
    pub blue: usize,
}

impl ChannelLayout {
    /// Little-endian `0x00RRGGBB`: bytes are B, G, R, X.
    pub const BGRX: ChannelLayout = ChannelLayout {
        red: 2,
        green: 1,
        blue: 0,
    };

    /// Big-endian `0x00RRGGBB` or little-endian `0xBBGGRR00`: bytes are X, R, G, B.
    pub const XRGB: ChannelLayout = ChannelLayout {
        red: 1,
        green: 2,
        blue: 3,
    };

    /// Derive byte offsets from a visual's channel bit masks.
    ///
    /// Every mask must be a contiguous, byte-aligned 8-bit field that lies
    /// inside a `bytes_per_pixel` pixel.
    pub fn from_masks(
        red_mask: u32,
        green_mask: u32,
        blue_mask: u32,
        bytes_per_pixel: usize,
        byte_order: ByteOrder,
    ) -> ShotResult<Self> {
        let offset = |name: &str, mask: u32| -> ShotResult<usize> {
            let shift = mask.trailing_zeros();
            if mask == 0 || shift % 8 != 0 || mask >> shift != 0xff {
                return Err(ShotError::unsupported_format(format!(
                    "{} mask {:#010x} is not a byte-aligned 8-bit field",
                    name, mask
                )));
            }
            let byte = (shift / 8) as usize;
            if byte >= bytes_per_pixel {
                return Err(ShotError::unsupported_format(format!(
                    "{} mask {:#010x} lies outside a {}-byte pixel",
                    name, mask, bytes_per_pixel
                )));
            }
            Ok(match byte_order {
                ByteOrder::LsbFirst => byte,
                ByteOrder::MsbFirst => bytes_per_pixel - 1 - byte,
            })
        };

        Ok(Self {
            red: offset("red", red_mask)?,
            green: offset("green", green_mask)?,
            blue: offset("blue", blue_mask)?,
        })
    }

    /// Byte offset of `channel` within a captured pixel.
    pub fn offset(&self, channel: Channel) -> usize {
        match channel {
            Channel::Red => self.red,
            Channel::Green => self.green,
            Channel::Blue => self.blue,
        }
    }
}

/// A raw captured frame.
///
/// # Memory Layout
/// - `bytes_per_pixel` bytes per pixel, channels at `channels` offsets
/// - `stride` bytes per row, which may exceed `width * bytes_per_pixel`
#[derive(Debug, Clone)]
pub struct RawFrame {
    /// Raw pixel data, `stride` bytes per row; the last row may omit its padding.
    pub data: Vec<u8>,
    /// Frame width in pixels
    pub width: u32,
    /// Frame height in pixels
    pub height: u32,
    /// Bytes per row
    pub stride: usize,
    pub bytes_per_pixel: usize,
    pub channels: ChannelLayout,
}

impl RawFrame {
    /// Wrap a tightly packed 4-byte-per-pixel buffer.
    pub fn packed(data: Vec<u8>, width: u32, height: u32, channels: ChannelLayout) -> Self {
        Self {
            data,
            width,
            height,
            stride: width as usize * 4,
            bytes_per_pixel: 4,
            channels,
        }
    }

    /// Check that the buffer covers every row the header describes.
    pub fn validate(&self) -> ShotResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(ShotError::capture(format!(
                "empty frame {}x{}",
                self.width, self.height
            )));
        }
        if self.bytes_per_pixel != 4 {
            return Err(ShotError::unsupported_format(format!(
                "{} bytes per pixel, expected 4",
                self.bytes_per_pixel
            )));
        }
        for channel in Channel::ALL {
            let offset = self.channels.offset(channel);
            if offset >= self.bytes_per_pixel {
                return Err(ShotError::unsupported_format(format!(
                    "{:?} at byte {} outside a {}-byte pixel",
                    channel, offset, self.bytes_per_pixel
                )));
            }
        }
        let row_bytes = self.width as usize * self.bytes_per_pixel;
        if self.stride < row_bytes {
            return Err(ShotError::capture(format!(
                "row stride {} shorter than {} pixel bytes",
                self.stride, row_bytes
            )));
        }
        let needed = self.stride * (self.height as usize - 1) + row_bytes;
        if self.data.len() < needed {
            return Err(ShotError::capture(format!(
                "buffer of {} bytes too small for {}x{} with stride {}",
                self.data.len(),
                self.width,
                self.height,
                self.stride
            )));
        }
        Ok(())
    }
}

/// Anything that can produce a frame to shrink.
pub trait FrameSource {
    /// Grab one frame.
    fn grab(&mut self) -> ShotResult<RawFrame>;
}
