//! # Processing Module
//!
//! Splits captured frames into channels and shrinks them into packed RGB.

pub mod channels;

// Re-export commonly used types for convenience
pub use channels::{shrink_frame, ChannelSplitter, RgbBuffer, Schedule};
