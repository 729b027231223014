//! Centered crop of a captured monitor frame.
//!
//! Pure functions, no infrastructure: pixel data in, pixel data out.

use super::{CaptureFrame, CaptureRect, BYTES_PER_PIXEL};
use crate::error::{Result, ZoomError};

/// Compute the crop box centered on a `frame_width × frame_height` frame.
///
/// Each edge is clamped to the frame on its own, so a box larger than the
/// frame collapses onto the frame bounds instead of staying centered.
/// Odd box sizes lose one pixel because the half-extent is floored.
pub fn crop_rect(frame_width: u32, frame_height: u32, crop_width: u32, crop_height: u32) -> CaptureRect {
    let (cx, cy) = (i64::from(frame_width / 2), i64::from(frame_height / 2));
    let (half_w, half_h) = (i64::from(crop_width / 2), i64::from(crop_height / 2));

    let x1 = (cx - half_w).max(0);
    let y1 = (cy - half_h).max(0);
    let x2 = (cx + half_w).min(i64::from(frame_width));
    let y2 = (cy + half_h).min(i64::from(frame_height));

    CaptureRect::new(
        x1 as u32,
        y1 as u32,
        (x2 - x1).max(0) as u32,
        (y2 - y1).max(0) as u32,
    )
}

/// Cut the centered crop box out of `frame`.
///
/// Returns `DegenerateGeometry` when the box resolves to zero area; callers
/// skip the tick instead of treating it as fatal.
pub fn extract(frame: &CaptureFrame, crop_width: u32, crop_height: u32) -> Result<CaptureFrame> {
    let rect = crop_rect(frame.width, frame.height, crop_width, crop_height);
    if rect.is_empty() {
        return Err(ZoomError::DegenerateGeometry {
            width: rect.width,
            height: rect.height,
        });
    }

    let row_bytes = rect.width as usize * BYTES_PER_PIXEL;
    let x_offset = rect.x as usize * BYTES_PER_PIXEL;
    let mut data = Vec::with_capacity(row_bytes * rect.height as usize);

    // Copy only the cropped region row by row (source rows may have padding)
    for y in rect.y..rect.bottom() {
        let row = frame.row(y);
        data.extend_from_slice(&row[x_offset..x_offset + row_bytes]);
    }

    Ok(CaptureFrame::new(data, rect.width, rect.height, frame.format))
}
