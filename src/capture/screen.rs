// capture/screen.rs - OS Screen Capture via xcap
//
// Works on Windows, macOS and Linux (X11 / Wayland portal). Monitors are
// looked up on every grab so a detached monitor surfaces as an error instead
// of a stale handle.

use log::debug;
use xcap::Monitor;

use super::{CaptureFrame, FrameSource, MonitorDescriptor, PixelFormat};
use crate::error::{Result, ZoomError};

/// `FrameSource` backed by the `xcap` crate
#[derive(Debug, Default)]
pub struct ScreenSource;

impl ScreenSource {
    pub fn new() -> Self {
        Self
    }

    fn all() -> Result<Vec<Monitor>> {
        Monitor::all().map_err(|e| {
            ZoomError::CaptureBackend(format!("Failed to enumerate monitors: {}", e))
        })
    }
}

impl FrameSource for ScreenSource {
    fn monitors(&mut self) -> Result<Vec<MonitorDescriptor>> {
        let monitors = Self::all()?;
        debug!("Enumerated {} monitors", monitors.len());

        Ok(monitors
            .iter()
            .enumerate()
            .map(|(index, monitor)| MonitorDescriptor {
                index,
                width: monitor.width().unwrap_or(0),
                height: monitor.height().unwrap_or(0),
            })
            .collect())
    }

    fn grab(&mut self, monitor_index: usize) -> Result<CaptureFrame> {
        let monitor = Self::all()?
            .into_iter()
            .nth(monitor_index)
            .ok_or_else(|| ZoomError::CaptureBackend(format!("Monitor {} not available", monitor_index)))?;

        let image = monitor
            .capture_image()
            .map_err(|e| ZoomError::CaptureBackend(e.to_string()))?;

        let (width, height) = (image.width(), image.height());
        Ok(CaptureFrame::new(image.into_raw(), width, height, PixelFormat::Rgba8))
    }
}
