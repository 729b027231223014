// capture/mod.rs - Screen Capture Module
//
// The capture pipeline: a backend grabs whole monitors, the region extractor
// cuts out the centered box, the rescaler magnifies it and the worker hands
// the result to the UI through a single latest-frame slot.

pub mod region;
pub mod scale;
pub mod slot;
pub mod worker;

#[cfg(feature = "desktop")]
pub mod screen;

pub use region::{crop_rect, extract};
pub use scale::rescale;
pub use slot::FrameSlot;
pub use worker::{CaptureWorker, WorkerEvent, WorkerState};

#[cfg(feature = "desktop")]
pub use screen::ScreenSource;

use crate::error::Result;

/// Bytes per pixel for every supported format
pub const BYTES_PER_PIXEL: usize = 4;

/// Channel order of a frame's pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    Bgra8,
    Rgba8,
}

/// Screen region in frame coordinates, `[x, x + width) × [y, y + height)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CaptureRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl CaptureRect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Exclusive right edge
    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    /// Exclusive bottom edge
    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }
}

/// One monitor as enumerated by the capture backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorDescriptor {
    pub index: usize,
    pub width: u32,
    pub height: u32,
}

impl std::fmt::Display for MonitorDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Monitor {} ({}x{})", self.index, self.width, self.height)
    }
}

/// A captured frame containing pixel data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureFrame {
    /// Pixel data, `format` channel order
    pub data: Vec<u8>,
    /// Frame width in pixels
    pub width: u32,
    /// Frame height in pixels
    pub height: u32,
    /// Bytes per row (may include padding)
    pub stride: u32,
    pub format: PixelFormat,
}

impl CaptureFrame {
    /// Wrap tightly packed pixel data.
    pub fn new(data: Vec<u8>, width: u32, height: u32, format: PixelFormat) -> Self {
        Self {
            data,
            width,
            height,
            stride: width * BYTES_PER_PIXEL as u32,
            format,
        }
    }

    /// Bytes of a single row, without padding.
    pub fn row(&self, y: u32) -> &[u8] {
        let start = y as usize * self.stride as usize;
        &self.data[start..start + self.width as usize * BYTES_PER_PIXEL]
    }

    /// Whether rows are stored without padding.
    pub fn is_packed(&self) -> bool {
        self.stride as usize == self.width as usize * BYTES_PER_PIXEL
    }

    /// Drop any row padding so `data.len() == width * height * 4`.
    pub fn packed(self) -> Self {
        if self.is_packed() {
            return self;
        }
        let mut data = Vec::with_capacity(self.width as usize * self.height as usize * BYTES_PER_PIXEL);
        for y in 0..self.height {
            data.extend_from_slice(self.row(y));
        }
        Self::new(data, self.width, self.height, self.format)
    }

    /// Packed RGBA pixels, ready for an image widget.
    pub fn into_rgba(self) -> Self {
        let mut frame = self.packed();
        if frame.format == PixelFormat::Bgra8 {
            for chunk in frame.data.chunks_exact_mut(BYTES_PER_PIXEL) {
                chunk.swap(0, 2); // BGRA -> RGBA
            }
            frame.format = PixelFormat::Rgba8;
        }
        frame
    }
}

/// The operating system screen capture backend.
///
/// `grab` is called from the capture thread only; the trait requires `Send`
/// so the worker can move the source there and hand it back on stop.
pub trait FrameSource: Send {
    /// Currently attached monitors, in index order
    fn monitors(&mut self) -> Result<Vec<MonitorDescriptor>>;

    /// Capture the whole of one monitor
    fn grab(&mut self, monitor_index: usize) -> Result<CaptureFrame>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packed_strips_row_padding() {
        // 2x2 frame, 4 bytes of padding per row
        let mut data = Vec::new();
        data.extend_from_slice(&[1, 1, 1, 1, 2, 2, 2, 2, 0, 0, 0, 0]);
        data.extend_from_slice(&[3, 3, 3, 3, 4, 4, 4, 4, 0, 0, 0, 0]);
        let frame = CaptureFrame {
            data,
            width: 2,
            height: 2,
            stride: 12,
            format: PixelFormat::Rgba8,
        };

        let packed = frame.packed();
        assert_eq!(packed.stride, 8);
        assert_eq!(packed.data, vec![1, 1, 1, 1, 2, 2, 2, 2, 3, 3, 3, 3, 4, 4, 4, 4]);
    }

    #[test]
    fn into_rgba_swaps_blue_and_red() {
        let frame = CaptureFrame::new(vec![10, 20, 30, 255], 1, 1, PixelFormat::Bgra8);
        let rgba = frame.into_rgba();
        assert_eq!(rgba.format, PixelFormat::Rgba8);
        assert_eq!(rgba.data, vec![30, 20, 10, 255]);
    }

    #[test]
    fn monitor_label_matches_selector_text() {
        let monitor = MonitorDescriptor { index: 1, width: 2560, height: 1440 };
        assert_eq!(monitor.to_string(), "Monitor 1 (2560x1440)");
    }
}
