//! End-to-end runs of the capture pipeline against a scripted monitor.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use screenzoom::{
    CaptureFrame, CaptureSettings, CaptureWorker, FrameSlot, FrameSource, MonitorDescriptor,
    PixelFormat, Result, WorkerEvent, WorkerState, ZoomError,
};

/// A fixed desktop image where red encodes the column (x / 8) and green the
/// row (y / 5), so every output pixel tells where it was sampled from.
struct GradientDesktop {
    frame: CaptureFrame,
}

impl GradientDesktop {
    fn new(width: u32, height: u32) -> Self {
        let mut data = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                data.extend_from_slice(&[(x / 8) as u8, (y / 5) as u8, 0, 255]);
            }
        }
        Self {
            frame: CaptureFrame::new(data, width, height, PixelFormat::Rgba8),
        }
    }
}

impl FrameSource for GradientDesktop {
    fn monitors(&mut self) -> Result<Vec<MonitorDescriptor>> {
        Ok(vec![MonitorDescriptor {
            index: 0,
            width: self.frame.width,
            height: self.frame.height,
        }])
    }

    fn grab(&mut self, monitor_index: usize) -> Result<CaptureFrame> {
        if monitor_index != 0 {
            return Err(ZoomError::CaptureBackend(format!("no monitor {monitor_index}")));
        }
        Ok(self.frame.clone())
    }
}

fn settings(crop_width: u32, crop_height: u32) -> CaptureSettings {
    CaptureSettings {
        monitor_index: 0,
        crop_width,
        crop_height,
        output_width: 1280,
        output_height: 720,
    }
}

fn next_frame(slot: &FrameSlot) -> CaptureFrame {
    for _ in 0..2000 {
        if let Some(frame) = slot.take() {
            return frame;
        }
        thread::sleep(Duration::from_millis(5));
    }
    panic!("no frame published");
}

/// Smallest and largest value of one channel over the whole frame
fn channel_range(frame: &CaptureFrame, channel: usize) -> (u32, u32) {
    frame
        .data
        .chunks_exact(4)
        .map(|px| u32::from(px[channel]))
        .fold((u32::MAX, u32::MIN), |(lo, hi), v| (lo.min(v), hi.max(v)))
}

#[test]
fn magnifies_the_center_of_the_monitor() {
    let slot = Arc::new(FrameSlot::new());
    let mut worker = CaptureWorker::new(Box::new(GradientDesktop::new(1920, 1080)), slot.clone());

    worker.start(&settings(200, 150)).unwrap();
    let frames: Vec<_> = (0..3).map(|_| next_frame(&slot)).collect();
    worker.stop();

    for frame in &frames {
        assert_eq!((frame.width, frame.height), (1280, 720));
        assert_eq!(frame.format, PixelFormat::Rgba8);

        // Crop box is x in [860, 1060), y in [465, 615)
        let (r_lo, r_hi) = channel_range(frame, 0);
        assert!(r_lo >= 860 / 8 && r_hi <= 1059 / 8, "columns {r_lo}..={r_hi}");
        assert!(r_lo <= 860 / 8 + 1 && r_hi >= 1059 / 8 - 1);

        let (g_lo, g_hi) = channel_range(frame, 1);
        assert!(g_lo >= 465 / 5 && g_hi <= 614 / 5, "rows {g_lo}..={g_hi}");
        assert!(g_lo <= 465 / 5 + 1 && g_hi >= 614 / 5 - 1);
    }
}

#[test]
fn oversized_box_is_clamped_to_the_monitor() {
    let slot = Arc::new(FrameSlot::new());
    let mut worker = CaptureWorker::new(Box::new(GradientDesktop::new(1920, 1080)), slot.clone());

    worker.start(&settings(3000, 150)).unwrap();
    let frame = next_frame(&slot);
    worker.stop();

    assert_eq!((frame.width, frame.height), (1280, 720));
    // Full width of the monitor, rows still centered
    let (r_lo, r_hi) = channel_range(&frame, 0);
    assert!(r_lo <= 1 && r_hi >= 1919 / 8 - 1, "columns {r_lo}..={r_hi}");
    let (g_lo, g_hi) = channel_range(&frame, 1);
    assert!(g_lo >= 465 / 5 && g_hi <= 614 / 5);
}

#[test]
fn missing_monitor_fails_without_publishing() {
    let slot = Arc::new(FrameSlot::new());
    let mut worker = CaptureWorker::new(Box::new(GradientDesktop::new(1920, 1080)), slot.clone());

    let err = worker
        .start(&CaptureSettings { monitor_index: 3, ..settings(200, 150) })
        .unwrap_err();

    assert!(matches!(err, ZoomError::Configuration(_)));
    assert!(matches!(worker.state(), WorkerState::Failed(_)));
    assert!(matches!(worker.poll_events().as_slice(), [WorkerEvent::Failed(_)]));
    thread::sleep(Duration::from_millis(50));
    assert_eq!(slot.published(), 0);
}

#[test]
fn nothing_is_published_after_stop() {
    let slot = Arc::new(FrameSlot::new());
    let mut worker = CaptureWorker::new(Box::new(GradientDesktop::new(640, 480)), slot.clone());

    worker.start(&settings(200, 150)).unwrap();
    next_frame(&slot);
    worker.stop();

    let published = slot.published();
    assert!(!slot.has_frame());
    thread::sleep(Duration::from_millis(50));
    assert_eq!(slot.published(), published);
    assert_eq!(worker.state(), WorkerState::Stopped);
}
