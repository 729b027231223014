//! Magnify a cropped frame to the output size.

use image::imageops::{self, FilterType};
use image::{ImageBuffer, Rgba};

use super::CaptureFrame;
use crate::constants::capture::{MAX_OUTPUT_HEIGHT, MAX_OUTPUT_WIDTH};
use crate::error::{Result, ZoomError};

/// Check an output size against the zero-area and maximum bounds.
pub fn validate_output(width: u32, height: u32) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(ZoomError::DegenerateGeometry { width, height });
    }
    if width > MAX_OUTPUT_WIDTH || height > MAX_OUTPUT_HEIGHT {
        return Err(ZoomError::OutputTooLarge { width, height });
    }
    Ok(())
}

/// Resize `frame` to `out_width × out_height` with linear interpolation.
///
/// Identical input and output sizes return the pixels untouched. The channel
/// order is carried over, interpolation does not care which channel is which.
pub fn rescale(frame: &CaptureFrame, out_width: u32, out_height: u32) -> Result<CaptureFrame> {
    validate_output(out_width, out_height)?;
    if frame.width == 0 || frame.height == 0 {
        return Err(ZoomError::DegenerateGeometry {
            width: frame.width,
            height: frame.height,
        });
    }

    if (frame.width, frame.height) == (out_width, out_height) {
        return Ok(frame.clone().packed());
    }

    // Cropped frames arrive packed; only padded rows need a copy first
    let repacked;
    let data: &[u8] = if frame.is_packed() {
        &frame.data
    } else {
        repacked = frame.clone().packed();
        &repacked.data
    };

    let source = ImageBuffer::<Rgba<u8>, &[u8]>::from_raw(frame.width, frame.height, data).ok_or(
        ZoomError::DegenerateGeometry {
            width: frame.width,
            height: frame.height,
        },
    )?;
    let resized = imageops::resize(&source, out_width, out_height, FilterType::Triangle);

    Ok(CaptureFrame::new(resized.into_raw(), out_width, out_height, frame.format))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::PixelFormat;

    fn solid(width: u32, height: u32, pixel: [u8; 4]) -> CaptureFrame {
        let data = pixel.repeat((width * height) as usize);
        CaptureFrame::new(data, width, height, PixelFormat::Bgra8)
    }

    #[test]
    fn output_has_requested_size() {
        let out = rescale(&solid(200, 150, [1, 2, 3, 255]), 1280, 720).unwrap();
        assert_eq!((out.width, out.height), (1280, 720));
        assert_eq!(out.data.len(), 1280 * 720 * 4);
        assert_eq!(out.format, PixelFormat::Bgra8);
    }

    #[test]
    fn solid_colour_stays_solid() {
        let out = rescale(&solid(3, 2, [40, 80, 120, 255]), 17, 9).unwrap();
        assert!(out.data.chunks_exact(4).all(|p| p == [40, 80, 120, 255]));
    }

    #[test]
    fn same_size_is_exact_passthrough() {
        let data: Vec<u8> = (0..(5 * 4 * 4)).map(|v| (v * 7 % 256) as u8).collect();
        let frame = CaptureFrame::new(data, 5, 4, PixelFormat::Rgba8);
        assert_eq!(rescale(&frame, 5, 4).unwrap(), frame);
    }

    #[test]
    fn upscale_interpolates_between_neighbours() {
        let mut data = vec![0, 0, 0, 255];
        data.extend_from_slice(&[200, 200, 200, 255]);
        let frame = CaptureFrame::new(data, 2, 1, PixelFormat::Rgba8);

        let out = rescale(&frame, 8, 1).unwrap();
        let reds: Vec<u8> = out.data.chunks_exact(4).map(|p| p[0]).collect();
        assert!(reds.windows(2).all(|w| w[0] <= w[1]), "not monotonic: {reds:?}");
        assert!(reds.iter().any(|&r| r > 0 && r < 200), "no blend: {reds:?}");
    }

    #[test]
    fn padded_rows_scale_like_packed_rows() {
        let packed = CaptureFrame::new(
            vec![10, 20, 30, 255, 200, 100, 50, 255, 0, 0, 0, 255, 90, 90, 90, 255],
            2,
            2,
            PixelFormat::Bgra8,
        );
        let mut data = Vec::new();
        for row in packed.data.chunks_exact(8) {
            data.extend_from_slice(row);
            data.extend_from_slice(&[7, 7, 7, 7]);
        }
        let padded = CaptureFrame { data, stride: 12, ..packed.clone() };

        assert_eq!(rescale(&padded, 6, 5).unwrap(), rescale(&packed, 6, 5).unwrap());
        assert_eq!(rescale(&padded, 2, 2).unwrap(), packed);
    }

    #[test]
    fn zero_and_oversized_outputs_are_rejected() {
        let frame = solid(4, 4, [0, 0, 0, 255]);
        assert_eq!(
            rescale(&frame, 0, 10).unwrap_err(),
            ZoomError::DegenerateGeometry { width: 0, height: 10 }
        );
        assert_eq!(
            rescale(&frame, 3841, 100).unwrap_err(),
            ZoomError::OutputTooLarge { width: 3841, height: 100 }
        );
        assert!(validate_output(3840, 2160).is_ok());
    }
}
