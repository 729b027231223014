//! Error taxonomy for the capture pipeline.
//!
//! Every error is handled where it happens and reduced to a message for the
//! user. Nothing here is allowed to take the process down.

pub type Result<T> = std::result::Result<T, ZoomError>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ZoomError {
    /// Invalid settings at start (e.g. a monitor index that does not exist)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The capture backend failed (permission revoked, monitor removed, ...)
    #[error("Screen capture failed: {0}")]
    CaptureBackend(String),

    /// Crop or output resolved to zero area; the tick is skipped
    #[error("Degenerate geometry: {width}x{height}")]
    DegenerateGeometry { width: u32, height: u32 },

    #[error("Output {width}x{height} exceeds the supported maximum")]
    OutputTooLarge { width: u32, height: u32 },
}

impl ZoomError {
    /// Whether this error ends the capture loop.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, ZoomError::DegenerateGeometry { .. })
    }
}
