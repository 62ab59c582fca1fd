// # X11 Capture
//
// Grabs a window (or the root window) through the core X11 protocol with
// `x11rb`. The reply is a ZPixmap: rows padded to the server's scanline pad,
// pixels in the server's image byte order, channels where the window's
// visual masks put them.
//
// Only 32 bits-per-pixel TrueColor/DirectColor layouts with 8-bit channels
// are accepted; that covers depth 24 and 32 on every common server.

use x11rb::connection::Connection;
use x11rb::protocol::xproto::{
    ConnectionExt, ImageFormat, ImageOrder, Setup, Visualid, Visualtype, Window,
};
use x11rb::rust_connection::RustConnection;

use crate::capture::frame::{ByteOrder, ChannelLayout, FrameSource, RawFrame};
use crate::error::{ShotError, ShotResult};

/// Capture source backed by an X11 connection.
pub struct X11Source {
    conn: RustConnection,
    window: Window,
}

impl X11Source {
    /// Connect to `$DISPLAY` and target `window`, or the default screen's
    /// root window when `None`.
    pub fn connect(window: Option<u32>) -> ShotResult<Self> {
        let (conn, screen_num) = x11rb::connect(None)
            .map_err(|e| ShotError::capture_caused_by("cannot open display", e))?;

        let window = match window {
            Some(id) => id,
            None => {
                let screen = conn.setup().roots.get(screen_num).ok_or_else(|| {
                    ShotError::capture(format!("display has no screen {}", screen_num))
                })?;
                screen.root
            }
        };
        tracing::debug!("connected to X display, target window {:#x}", window);

        Ok(Self { conn, window })
    }
}

impl FrameSource for X11Source {
    fn grab(&mut self) -> ShotResult<RawFrame> {
        let geometry = self
            .conn
            .get_geometry(self.window)
            .map_err(|e| ShotError::capture_caused_by("get_geometry request failed", e))?
            .reply()
            .map_err(|e| {
                ShotError::capture_caused_by(format!("no such window {:#x}", self.window), e)
            })?;
        let (width, height) = (geometry.width, geometry.height);

        let image = self
            .conn
            .get_image(ImageFormat::Z_PIXMAP, self.window, 0, 0, width, height, !0)
            .map_err(|e| ShotError::capture_caused_by("get_image request failed", e))?
            .reply()
            .map_err(|e| ShotError::capture_caused_by("window contents unavailable", e))?;

        let setup = self.conn.setup();
        let (bits_per_pixel, scanline_pad) = pixmap_format(setup, image.depth)?;
        if bits_per_pixel != 32 {
            return Err(ShotError::unsupported_format(format!(
                "depth {} uses {} bits per pixel, expected 32",
                image.depth, bits_per_pixel
            )));
        }
        let visual = find_visual(setup, image.visual)?;
        let byte_order = if setup.image_byte_order == ImageOrder::MSB_FIRST {
            ByteOrder::MsbFirst
        } else {
            ByteOrder::LsbFirst
        };
        let bytes_per_pixel = usize::from(bits_per_pixel / 8);
        let channels = ChannelLayout::from_masks(
            visual.red_mask,
            visual.green_mask,
            visual.blue_mask,
            bytes_per_pixel,
            byte_order,
        )?;

        let stride = row_stride(u32::from(width), u32::from(bits_per_pixel), u32::from(scanline_pad));
        tracing::debug!(
            width,
            height,
            depth = image.depth,
            stride,
            ?channels,
            "captured window {:#x}",
            self.window
        );

        let frame = RawFrame {
            data: image.data,
            width: u32::from(width),
            height: u32::from(height),
            stride,
            bytes_per_pixel,
            channels,
        };
        frame.validate()?;
        Ok(frame)
    }
}

fn pixmap_format(setup: &Setup, depth: u8) -> ShotResult<(u8, u8)> {
    setup
        .pixmap_formats
        .iter()
        .find(|format| format.depth == depth)
        .map(|format| (format.bits_per_pixel, format.scanline_pad))
        .ok_or_else(|| ShotError::unsupported_format(format!("no pixmap format for depth {}", depth)))
}

fn find_visual(setup: &Setup, id: Visualid) -> ShotResult<Visualtype> {
    setup
        .roots
        .iter()
        .flat_map(|screen| screen.allowed_depths.iter())
        .flat_map(|depth| depth.visuals.iter())
        .find(|visual| visual.visual_id == id)
        .cloned()
        .ok_or_else(|| ShotError::unsupported_format(format!("unknown visual {:#x}", id)))
}

/// Bytes per ZPixmap row: `width * bits_per_pixel` rounded up to `scanline_pad` bits.
fn row_stride(width: u32, bits_per_pixel: u32, scanline_pad: u32) -> usize {
    let bits = width * bits_per_pixel;
    let pad = scanline_pad.max(8);
    (bits.div_ceil(pad) * pad / 8) as usize
}
