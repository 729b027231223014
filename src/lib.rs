//! ScreenZoom - Screen Magnifier Library
//!
//! The capture pipeline (grab, centered crop, bilinear upscale, latest-frame
//! handoff) and the toolkit-independent state behind the windows.

pub mod app;
pub mod capture;
pub mod constants;
pub mod display;
pub mod error;

// Re-export commonly used types
pub use app::{CaptureSettings, SettingsPatch, SettingsStore};
pub use capture::{
    CaptureFrame, CaptureRect, CaptureWorker, FrameSlot, FrameSource, MonitorDescriptor,
    PixelFormat, WorkerEvent, WorkerState,
};
pub use display::{letterbox, Viewport, ZoomView};
pub use error::{Result, ZoomError};
