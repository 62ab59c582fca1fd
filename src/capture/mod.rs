// # Capture Module
//
// Frame description shared by all backends, plus the platform backends.

pub mod frame;
#[cfg(all(feature = "x11", target_os = "linux"))]
pub mod x11;

pub use frame::{ByteOrder, Channel, ChannelLayout, FrameSource, RawFrame};
#[cfg(all(feature = "x11", target_os = "linux"))]
pub use x11::X11Source;
