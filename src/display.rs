//! Zoom window bookkeeping, independent of the GUI toolkit.
//!
//! The window shows only the newest frame, scaled to fit while keeping its
//! aspect ratio. It takes the frame's native size when the first frame
//! arrives after it became visible; afterwards the user may resize it freely.

/// Where a frame lands inside the window, in window coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Fit a `frame_width × frame_height` frame into the window, centered, with
/// bars on the sides or top and bottom.
pub fn letterbox(frame_width: u32, frame_height: u32, window_width: f32, window_height: f32) -> Viewport {
    if frame_width == 0 || frame_height == 0 || window_width <= 0.0 || window_height <= 0.0 {
        return Viewport { x: 0.0, y: 0.0, width: 0.0, height: 0.0 };
    }

    let scale = (window_width / frame_width as f32).min(window_height / frame_height as f32);
    let width = frame_width as f32 * scale;
    let height = frame_height as f32 * scale;

    Viewport {
        x: (window_width - width) / 2.0,
        y: (window_height - height) / 2.0,
        width,
        height,
    }
}

/// State of the zoom window
#[derive(Debug, Default)]
pub struct ZoomView {
    frame_size: Option<(u32, u32)>,
    window_size: Option<(f32, f32)>,
    sized_to_frame: bool,
}

impl ZoomView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new frame. Returns the size the window should take, which
    /// only happens for the first frame since the window became visible.
    pub fn present(&mut self, width: u32, height: u32) -> Option<(u32, u32)> {
        self.frame_size = Some((width, height));
        if self.sized_to_frame {
            return None;
        }
        self.sized_to_frame = true;
        self.window_size = Some((width as f32, height as f32));
        Some((width, height))
    }

    /// The user (or the toolkit) resized the window.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.window_size = Some((width, height));
    }

    /// The window was closed; the next frame sizes it again.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn has_frame(&self) -> bool {
        self.frame_size.is_some()
    }

    /// Placement of the current frame in the current window
    pub fn viewport(&self) -> Option<Viewport> {
        let (fw, fh) = self.frame_size?;
        let (ww, wh) = self.window_size?;
        Some(letterbox(fw, fh, ww, wh))
    }
}
