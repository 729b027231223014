// capture/worker.rs - Background Capture Loop
//
// Owns the capture thread: grab -> crop -> rescale -> publish, as fast as the
// backend delivers frames, until stopped or until the backend fails.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};

use log::{debug, error, info, warn};

use super::{extract, rescale, scale, CaptureFrame, FrameSlot, FrameSource};
use crate::app::CaptureSettings;
use crate::constants::capture::LOG_EVERY_FRAMES;
use crate::error::{Result, ZoomError};

/// Lifecycle of the capture loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerState {
    Stopped,
    Running,
    /// The loop ended (or never started) because of this error
    Failed(String),
}

/// Notifications for the presentation layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerEvent {
    Started(CaptureSettings),
    Failed(ZoomError),
}

/// Crop the centered box out of a raw monitor frame and magnify it.
pub fn process_frame(raw: &CaptureFrame, settings: &CaptureSettings) -> Result<CaptureFrame> {
    let cropped = extract(raw, settings.crop_width, settings.crop_height)?;
    rescale(&cropped, settings.output_width, settings.output_height)
}

/// State shared with the capture thread
struct Shared {
    state: Mutex<WorkerState>,
    stop: AtomicBool,
    slot: Arc<FrameSlot>,
    events: Sender<WorkerEvent>,
}

impl Shared {
    fn state(&self) -> MutexGuard<'_, WorkerState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn set_state(&self, state: WorkerState) {
        *self.state() = state;
    }

    fn fail(&self, err: ZoomError) {
        error!("Capture worker failed: {}", err);
        self.set_state(WorkerState::Failed(err.to_string()));
        // The receiver lives as long as the worker; a send error only means
        // nobody is listening anymore
        let _ = self.events.send(WorkerEvent::Failed(err));
    }
}

/// Drives a `FrameSource` on its own thread and publishes magnified frames
/// into a `FrameSlot`.
///
/// Settings are copied in at `start`; changing them afterwards has no effect
/// until the next start.
pub struct CaptureWorker {
    shared: Arc<Shared>,
    events: Receiver<WorkerEvent>,
    /// The backend while idle; it lives on the capture thread while running
    source: Option<Box<dyn FrameSource>>,
    handle: Option<JoinHandle<Box<dyn FrameSource>>>,
}

impl CaptureWorker {
    pub fn new(source: Box<dyn FrameSource>, slot: Arc<FrameSlot>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(WorkerState::Stopped),
                stop: AtomicBool::new(false),
                slot,
                events: tx,
            }),
            events: rx,
            source: Some(source),
            handle: None,
        }
    }

    pub fn state(&self) -> WorkerState {
        self.shared.state().clone()
    }

    pub fn is_running(&self) -> bool {
        *self.shared.state() == WorkerState::Running
    }

    /// The slot this worker publishes into
    pub fn slot(&self) -> &Arc<FrameSlot> {
        &self.shared.slot
    }

    /// Events emitted since the last call
    pub fn poll_events(&self) -> Vec<WorkerEvent> {
        self.events.try_iter().collect()
    }

    /// Start capturing with a private copy of `settings`.
    ///
    /// Does nothing if already running. Invalid settings or an unknown
    /// monitor move the worker to `Failed` without starting the loop.
    pub fn start(&mut self, settings: &CaptureSettings) -> Result<()> {
        if self.is_running() {
            warn!("Capture already running, ignoring start");
            return Ok(());
        }
        self.reap();

        let settings = settings.clone();
        if let Err(err) = Self::validate(&settings) {
            self.shared.fail(err.clone());
            return Err(err);
        }

        let Some(mut source) = self.source.take() else {
            let err = ZoomError::CaptureBackend("capture backend unavailable".into());
            self.shared.fail(err.clone());
            return Err(err);
        };

        let monitors = match source.monitors() {
            Ok(monitors) => monitors,
            Err(err) => {
                self.source = Some(source);
                self.shared.fail(err.clone());
                return Err(err);
            }
        };
        if settings.monitor_index >= monitors.len() {
            self.source = Some(source);
            let err = ZoomError::Configuration(format!(
                "Monitor {} not available",
                settings.monitor_index
            ));
            self.shared.fail(err.clone());
            return Err(err);
        }

        info!(
            "Starting capture on {}: crop {}x{} -> output {}x{}",
            monitors[settings.monitor_index],
            settings.crop_width,
            settings.crop_height,
            settings.output_width,
            settings.output_height
        );

        self.shared.stop.store(false, Ordering::Release);
        self.shared.set_state(WorkerState::Running);
        let _ = self.shared.events.send(WorkerEvent::Started(settings.clone()));

        let shared = Arc::clone(&self.shared);
        let spawned = thread::Builder::new()
            .name("capture-worker".into())
            .spawn(move || run_loop(source, &settings, &shared));

        match spawned {
            Ok(handle) => {
                self.handle = Some(handle);
                Ok(())
            }
            Err(e) => {
                let err = ZoomError::CaptureBackend(format!("failed to spawn capture thread: {e}"));
                self.shared.fail(err.clone());
                Err(err)
            }
        }
    }

    /// Stop the loop and wait for the capture thread to exit.
    ///
    /// Once this returns nothing more is published, and any frame left
    /// unread in the slot has been dropped.
    pub fn stop(&mut self) {
        self.shared.stop.store(true, Ordering::Release);
        let was_running = self.handle.is_some();
        self.reap();
        self.shared.slot.clear();

        let mut state = self.shared.state();
        if *state == WorkerState::Running {
            *state = WorkerState::Stopped;
        }
        if was_running {
            info!("Capture stopped ({:?})", *state);
        }
    }

    /// Join a finished or stopping capture thread and take the backend back.
    fn reap(&mut self) {
        let Some(handle) = self.handle.take() else {
            return;
        };
        match handle.join() {
            Ok(source) => self.source = Some(source),
            Err(_) => {
                error!("Capture thread panicked outside the backend, capture backend lost");
                self.shared.fail(ZoomError::CaptureBackend("capture thread panicked".into()));
            }
        }
    }

    fn validate(settings: &CaptureSettings) -> Result<()> {
        if settings.crop_width == 0 || settings.crop_height == 0 {
            return Err(ZoomError::Configuration(format!(
                "Crop box {}x{} has no area",
                settings.crop_width, settings.crop_height
            )));
        }
        scale::validate_output(settings.output_width, settings.output_height)
            .map_err(|e| ZoomError::Configuration(e.to_string()))
    }
}

impl Drop for CaptureWorker {
    fn drop(&mut self) {
        self.stop();
    }
}

fn run_loop(
    mut source: Box<dyn FrameSource>,
    settings: &CaptureSettings,
    shared: &Shared,
) -> Box<dyn FrameSource> {
    let mut frame_count: u64 = 0;

    while !shared.stop.load(Ordering::Acquire) {
        // A panicking backend ends the loop like any other backend error and
        // still hands the source back, so a later start can reuse it
        let frame = panic::catch_unwind(AssertUnwindSafe(|| {
            source
                .grab(settings.monitor_index)
                .and_then(|raw| process_frame(&raw, settings))
        }))
        .unwrap_or_else(|payload| {
            Err(ZoomError::CaptureBackend(format!(
                "capture backend panicked: {}",
                panic_message(payload.as_ref())
            )))
        });

        match frame {
            Ok(frame) => {
                if shared.stop.load(Ordering::Acquire) {
                    break;
                }
                shared.slot.publish(frame);
                frame_count += 1;
                if frame_count % LOG_EVERY_FRAMES == 0 {
                    debug!("Published frame #{}", frame_count);
                }
            }
            Err(err) if !err.is_fatal() => {
                debug!("Skipping frame: {}", err);
            }
            Err(err) => {
                shared.fail(err);
                break;
            }
        }
    }

    debug!("Capture loop exited after {} frames", frame_count);
    source
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg
    } else {
        "unknown panic"
    }
}
