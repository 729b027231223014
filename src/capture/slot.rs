//! Single-slot, latest-value-wins handoff between the capture thread and
//! the UI thread.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

use super::CaptureFrame;

/// Holds at most one frame. Publishing overwrites an unread frame, taking
/// empties the slot, so the consumer never sees a backlog.
#[derive(Debug, Default)]
pub struct FrameSlot {
    frame: Mutex<Option<CaptureFrame>>,
    published: AtomicU64,
}

impl FrameSlot {
    pub fn new() -> Self {
        Self::default()
    }

    // The slot only holds plain data, a panic mid-swap cannot break it
    fn lock(&self) -> MutexGuard<'_, Option<CaptureFrame>> {
        self.frame.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Store `frame`, dropping whatever was still unread.
    /// Returns true if an unread frame was overwritten.
    pub fn publish(&self, frame: CaptureFrame) -> bool {
        let replaced = self.lock().replace(frame).is_some();
        self.published.fetch_add(1, Ordering::Release);
        replaced
    }

    /// Take the newest frame, if one arrived since the last take.
    pub fn take(&self) -> Option<CaptureFrame> {
        self.lock().take()
    }

    /// Check if a new frame is available
    pub fn has_frame(&self) -> bool {
        self.lock().is_some()
    }

    /// Drop any unread frame.
    pub fn clear(&self) {
        self.lock().take();
    }

    /// Total number of frames ever published into this slot
    pub fn published(&self) -> u64 {
        self.published.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::PixelFormat;
    use std::sync::Arc;
    use std::thread;

    fn frame(tag: u8) -> CaptureFrame {
        CaptureFrame::new(vec![tag, 0, 0, 255], 1, 1, PixelFormat::Rgba8)
    }

    #[test]
    fn newest_frame_wins() {
        let slot = FrameSlot::new();
        assert!(!slot.publish(frame(1)));
        assert!(slot.publish(frame(2)));
        assert!(slot.publish(frame(3)));

        assert_eq!(slot.take().map(|f| f.data[0]), Some(3));
        assert!(slot.take().is_none());
        assert_eq!(slot.published(), 3);
    }

    #[test]
    fn clear_discards_unread_frame() {
        let slot = FrameSlot::new();
        slot.publish(frame(7));
        assert!(slot.has_frame());
        slot.clear();
        assert!(!slot.has_frame());
    }

    #[test]
    fn slow_consumer_only_sees_increasing_frames() {
        let slot = Arc::new(FrameSlot::new());
        let producer = {
            let slot = Arc::clone(&slot);
            thread::spawn(move || {
                for tag in 1..=200u8 {
                    slot.publish(frame(tag));
                }
            })
        };

        let mut last = 0;
        while !producer.is_finished() || slot.has_frame() {
            if let Some(f) = slot.take() {
                assert!(f.data[0] > last);
                last = f.data[0];
            }
        }
        producer.join().unwrap();
        assert_eq!(last, 200);
    }
}
