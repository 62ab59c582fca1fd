//! # Screenshot Configuration
//!
//! Holds everything one screenshot run needs and validates it before any
//! display connection is made.
//!
//! | Parameter | Type | Range | Description |
//! |-----------|------|-------|-------------|
//! | `window` | `Option<u32>` | any X window id | Window to grab, root window when `None` |
//! | `max_width` | `Option<u32>` | ≥ 1 | Maximum output width, unbounded when `None` |
//! | `max_height` | `Option<u32>` | ≥ 1 | Maximum output height, unbounded when `None` |
//! | `output` | `Option<PathBuf>` | writable path | PNG destination, stdout when `None` |
//! | `schedule` | [`Schedule`] | | Channel scheduling |
//!
//! ## Examples
//!
//! ```rust
//! use x_screenshot::config::ShotConfig;
//!
//! let mut config = ShotConfig::default();
//! config.max_width = Some(800);
//! assert!(config.validate().is_ok());
//!
//! config.max_height = Some(0);
//! assert!(config.validate().is_err());
//! ```

use std::path::PathBuf;

use shot_scale::Bounds;

use crate::error::{ShotError, ShotResult};
use crate::processing::Schedule;

/// Configuration structure for one screenshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShotConfig {
    /// X window id to capture. `None` captures the root window.
    pub window: Option<u32>,

    /// Maximum width of the result in pixels.
    pub max_width: Option<u32>,

    /// Maximum height of the result in pixels.
    pub max_height: Option<u32>,

    /// Where to write the PNG. `None` writes to stdout.
    pub output: Option<PathBuf>,

    /// How the three color channels are scheduled.
    pub schedule: Schedule,
}

impl ShotConfig {
    /// Creates a new configuration with the specified parameters.
    pub fn new(
        window: Option<u32>,
        max_width: Option<u32>,
        max_height: Option<u32>,
        output: Option<PathBuf>,
        schedule: Schedule,
    ) -> Self {
        Self {
            window,
            max_width,
            max_height,
            output,
            schedule,
        }
    }

    /// Validates the configuration parameters.
    pub fn validate(&self) -> ShotResult<()> {
        if self.max_width == Some(0) {
            return Err(ShotError::config("width", "0", "must be at least 1 pixel"));
        }
        if self.max_height == Some(0) {
            return Err(ShotError::config("height", "0", "must be at least 1 pixel"));
        }
        if let Some(path) = &self.output {
            if path.as_os_str().is_empty() {
                return Err(ShotError::config("output", "", "path must not be empty"));
            }
        }
        Ok(())
    }

    /// Output bounds for the aspect-preserving fit.
    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.max_width, self.max_height)
    }
}
