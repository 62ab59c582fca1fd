//! # Error Handling
//!
//! Errors fall into two classes:
//!
//! - **User-facing**: bad bounds on the command line, no X display, a pixel
//!   format the pipeline cannot read, an unwritable output. Reported and the
//!   process exits with status 1.
//! - **Internal invariant violations**: a resampler destination larger than
//!   its source, a serializer view that is not packed RGB. These are bugs in
//!   the caller, never retried or recovered from. The binary exits with
//!   [`INTERNAL_EXIT_CODE`].
//!
//! Library code only returns these values; turning them into a process exit
//! happens once, in `main`.
//!
//! ## Usage
//!
//! ```rust
//! use x_screenshot::error::ShotError;
//!
//! let error = ShotError::config("width", "0", "must be at least 1")
//!     .with_context("parsing command line");
//! assert_eq!(error.category(), "config");
//! assert_eq!(error.exit_code(), 1);
//! ```

use std::{error::Error as StdError, fmt};

use shot_scale::ScaleError;

/// Exit status for internal invariant violations.
pub const INTERNAL_EXIT_CODE: u8 = 101;

/// Exit status for every other failure.
pub const FAILURE_EXIT_CODE: u8 = 1;

pub type ShotResult<T> = Result<T, ShotError>;

/// Base error type for the screenshot library
#[derive(Debug)]
pub enum ShotError {
    /// Configuration validation errors
    Config {
        field: String,
        value: String,
        reason: String,
        context: Option<String>,
    },
    /// Display connection or image fetch failures
    Capture {
        reason: String,
        source: Option<Box<dyn StdError + Send + Sync>>,
        context: Option<String>,
    },
    /// Captured pixel layout the pipeline cannot split into channels
    UnsupportedFormat {
        reason: String,
        context: Option<String>,
    },
    /// Broken internal invariant
    Internal {
        invariant: String,
        detail: String,
        context: Option<String>,
    },
    /// PNG encoder errors
    Encode {
        source: png::EncodingError,
        context: Option<String>,
    },
    /// I/O errors
    Io {
        operation: String,
        source: std::io::Error,
        context: Option<String>,
    },
}

impl ShotError {
    /// Create a configuration error
    pub fn config(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::Config {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
            context: None,
        }
    }

    /// Create a capture error
    pub fn capture(reason: impl Into<String>) -> Self {
        Self::Capture {
            reason: reason.into(),
            source: None,
            context: None,
        }
    }

    /// Create a capture error caused by a lower-level failure
    pub fn capture_caused_by(
        reason: impl Into<String>,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        Self::Capture {
            reason: reason.into(),
            source: Some(Box::new(source)),
            context: None,
        }
    }

    /// Create an unsupported pixel format error
    pub fn unsupported_format(reason: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            reason: reason.into(),
            context: None,
        }
    }

    /// Create an internal invariant error
    pub fn internal(invariant: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::Internal {
            invariant: invariant.into(),
            detail: detail.into(),
            context: None,
        }
    }

    /// Create an I/O error
    pub fn io(operation: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            operation: operation.into(),
            source,
            context: None,
        }
    }

    /// Add context to the error
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        *self.context_mut() = Some(context.into());
        self
    }

    /// Get the error context
    pub fn context(&self) -> Option<&str> {
        match self {
            Self::Config { context, .. }
            | Self::Capture { context, .. }
            | Self::UnsupportedFormat { context, .. }
            | Self::Internal { context, .. }
            | Self::Encode { context, .. }
            | Self::Io { context, .. } => context.as_deref(),
        }
    }

    fn context_mut(&mut self) -> &mut Option<String> {
        match self {
            Self::Config { context, .. }
            | Self::Capture { context, .. }
            | Self::UnsupportedFormat { context, .. }
            | Self::Internal { context, .. }
            | Self::Encode { context, .. }
            | Self::Io { context, .. } => context,
        }
    }

    /// Get the error category as a string
    pub fn category(&self) -> &'static str {
        match self {
            Self::Config { .. } => "config",
            Self::Capture { .. } => "capture",
            Self::UnsupportedFormat { .. } => "unsupported_format",
            Self::Internal { .. } => "internal",
            Self::Encode { .. } => "encode",
            Self::Io { .. } => "io",
        }
    }

    /// Whether this error marks a programming error rather than bad input
    /// or a failing environment.
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::Internal { .. })
    }

    /// Process exit status for this error.
    pub fn exit_code(&self) -> u8 {
        if self.is_internal() {
            INTERNAL_EXIT_CODE
        } else {
            FAILURE_EXIT_CODE
        }
    }
}

impl fmt::Display for ShotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config {
                field,
                value,
                reason,
                ..
            } => write!(
                f,
                "Configuration error in field '{}' (value: '{}'): {}",
                field, value, reason
            )?,
            Self::Capture { reason, source, .. } => {
                write!(f, "Screen capture failed: {}", reason)?;
                if let Some(source) = source {
                    write!(f, ": {}", source)?;
                }
            }
            Self::UnsupportedFormat { reason, .. } => {
                write!(f, "Unsupported pixel format: {}", reason)?
            }
            Self::Internal {
                invariant, detail, ..
            } => write!(f, "Internal error ({}): {}", invariant, detail)?,
            Self::Encode { source, .. } => write!(f, "PNG encoding failed: {}", source)?,
            Self::Io {
                operation, source, ..
            } => write!(f, "I/O error during '{}': {}", operation, source)?,
        }

        if let Some(context) = self.context() {
            write!(f, " (while {})", context)?;
        }
        Ok(())
    }
}

impl StdError for ShotError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Capture {
                source: Some(source),
                ..
            } => Some(source.as_ref()),
            Self::Encode { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ScaleError> for ShotError {
    fn from(error: ScaleError) -> Self {
        Self::internal("resample", error.to_string())
    }
}

impl From<png::EncodingError> for ShotError {
    fn from(error: png::EncodingError) -> Self {
        Self::Encode {
            source: error,
            context: None,
        }
    }
}

impl From<std::io::Error> for ShotError {
    fn from(error: std::io::Error) -> Self {
        Self::io("unknown", error)
    }
}
