//! # x-screenshot
//!
//! Grabs an X11 window (or the whole screen), shrinks it to fit optional
//! maximum bounds while keeping its aspect ratio, and writes it as a PNG.
//!
//! ## Architecture
//!
//! The library is organized into several key modules:
//! - `capture`: captured frame description and the X11 backend
//! - `processing`: channel splitting and the per-channel box-filter shrink
//! - `serialize`: row-table handoff to the PNG codec
//! - `config`: run configuration and validation
//! - `error`: error type and exit status mapping
//!
//! The pixel arithmetic itself (strided views, mean, shrink, fit) lives in
//! the `shot-scale` crate.
//!
//! ## Example
//!
//! ```rust
//! use x_screenshot::capture::{ChannelLayout, FrameSource, RawFrame};
//! use x_screenshot::config::ShotConfig;
//! use x_screenshot::error::ShotResult;
//!
//! struct Gray;
//!
//! impl FrameSource for Gray {
//!     fn grab(&mut self) -> ShotResult<RawFrame> {
//!         Ok(RawFrame::packed(vec![128; 64 * 48 * 4], 64, 48, ChannelLayout::BGRX))
//!     }
//! }
//!
//! let mut config = ShotConfig::default();
//! config.max_width = Some(16);
//!
//! let mut png: Vec<u8> = Vec::new();
//! x_screenshot::capture_png(&mut Gray, &config, &mut png).unwrap();
//! assert_eq!(&png[1..4], b"PNG");
//! ```

// Standard library imports
use std::io::Write;

// Internal module imports
pub mod capture;
pub mod config;
pub mod error;
pub mod logging;
pub mod processing;
pub mod serialize;

/// Re-export error types for convenience
pub use error::{ShotError, ShotResult};

use capture::FrameSource;
use config::ShotConfig;
use processing::shrink_frame;

/// Grab one frame from `source`, shrink it per `config` and encode it as PNG.
///
/// The destination buffer lives only for this call and is released on every
/// return path; the captured frame is dropped before encoding.
pub fn encode_capture(source: &mut impl FrameSource, config: &ShotConfig) -> ShotResult<Vec<u8>> {
    config.validate()?;

    let frame = source.grab()?;
    tracing::info!(width = frame.width, height = frame.height, "frame captured");

    let image = shrink_frame(&frame, config.bounds(), config.schedule)?;
    drop(frame);
    tracing::info!(width = image.width, height = image.height, "frame shrunk");

    serialize::encode_png(&image)
}

/// Grab, shrink and encode like [`encode_capture`], then write the PNG to
/// `sink`. Nothing reaches `sink` unless the whole PNG was produced.
pub fn capture_png(
    source: &mut impl FrameSource,
    config: &ShotConfig,
    mut sink: impl Write,
) -> ShotResult<()> {
    let png = encode_capture(source, config)?;
    sink.write_all(&png)
        .and_then(|()| sink.flush())
        .map_err(|e| ShotError::io("write png", e))
}

/// Capture into the configured output: the `output` file, or stdout.
///
/// The file is only created once the PNG exists, so a failed capture leaves
/// an existing file untouched.
pub fn capture_to_output(source: &mut impl FrameSource, config: &ShotConfig) -> ShotResult<()> {
    let png = encode_capture(source, config)?;
    match &config.output {
        Some(path) => std::fs::write(path, &png)
            .map_err(|e| ShotError::io(format!("write {}", path.display()), e)),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(&png)
                .and_then(|()| stdout.flush())
                .map_err(|e| ShotError::io("write png to stdout", e))
        }
    }
}

/// Screenshot the configured X11 window into the configured output.
#[cfg(all(feature = "x11", target_os = "linux"))]
pub fn screenshot(config: &ShotConfig) -> ShotResult<()> {
    config.validate()?;
    let mut source = capture::X11Source::connect(config.window)?;
    capture_to_output(&mut source, config)
}

/// Screen capture is not available in this build.
#[cfg(not(all(feature = "x11", target_os = "linux")))]
pub fn screenshot(_config: &ShotConfig) -> ShotResult<()> {
    Err(ShotError::capture(
        "X11 capture not available - build on Linux with the `x11` feature",
    ))
}
