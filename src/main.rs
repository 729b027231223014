//! ScreenZoom - Floating Screen Magnifier
//!
//! iced daemon with three windows:
//! - Floating button (always on top, toggles the control panel)
//! - Control panel (monitor, box and output size, start/stop)
//! - Zoom window (newest magnified frame, opened on the first frame)
//!
//! A system tray icon brings the button back and exits the app.

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod cli;
mod ui;

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use iced::{daemon, event, keyboard, window, Element, Event, Point, Size, Subscription, Task, Theme};
use log::{debug, error, info, warn};

use screenzoom::capture::ScreenSource;
use screenzoom::constants::{self, button as button_geom, panel as panel_geom, zoom as zoom_geom};
use screenzoom::{CaptureFrame, CaptureWorker, FrameSlot, FrameSource, SettingsStore, WorkerEvent};

use ui::tray::{SystemTray, TrayAction};
use ui::{Field, MonitorChoice, PanelState, ZoomWindow};

/// Tick used while no capture is running; only the tray needs polling then
const IDLE_POLL_MS: u64 = 250;

// ============================================================================
// Messages
// ============================================================================

#[derive(Debug, Clone)]
pub enum Message {
    Tick,
    WindowEvent(window::Id, window::Event),
    QPressed(window::Id),

    ButtonOpened(window::Id),
    PanelOpened(window::Id),
    ZoomOpened(window::Id),

    TogglePanel,
    DragWindow(window::Id),

    // Control panel
    MonitorSelected(MonitorChoice),
    FieldChanged(Field, String),
    ToggleCapture,
    SaveSettings,
    ClosePanel,

    // Tray
    ShowControls,
    Exit,
}

// ============================================================================
// Application State
// ============================================================================

struct ScreenZoomApp {
    store: SettingsStore,
    worker: CaptureWorker,
    zoom: ZoomWindow,

    button_id: Option<window::Id>,
    panel_id: Option<window::Id>,
    zoom_id: Option<window::Id>,
    button_pos: Point,

    panel: Option<PanelState>,
    status: String,
    status_failed: bool,
    dev_mode: bool,

    tray: Option<SystemTray>,
    tray_failed: bool,
}

impl ScreenZoomApp {
    fn new(args: cli::Args) -> (Self, Task<Message>) {
        info!("ScreenZoom starting, dev mode: {}", args.dev);

        let slot = Arc::new(FrameSlot::new());
        let mut app = Self {
            store: SettingsStore::new(args.settings()),
            worker: CaptureWorker::new(Box::new(ScreenSource::new()), slot),
            zoom: ZoomWindow::default(),

            button_id: None,
            panel_id: None,
            zoom_id: None,
            button_pos: Point::new(button_geom::DEFAULT_X, button_geom::DEFAULT_Y),

            panel: None,
            status: "Ready".to_string(),
            status_failed: false,
            dev_mode: args.dev,

            tray: None,
            tray_failed: false,
        };

        let open = app.open_button();
        if args.start {
            app.start_capture();
        }
        (app, open)
    }

    fn title(&self, window_id: window::Id) -> String {
        if self.zoom_id == Some(window_id) {
            "Zoomed View (Q to Close)".to_string()
        } else if self.panel_id == Some(window_id) {
            "ScreenZoom Controls".to_string()
        } else {
            "ScreenZoom".to_string()
        }
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Tick => {
                let mut tasks = vec![self.poll_tray()];
                self.poll_worker();
                if let Some(frame) = self.worker.slot().take() {
                    tasks.push(self.present(frame));
                }
                return Task::batch(tasks);
            }

            Message::WindowEvent(id, event) => return self.window_event(id, event),

            Message::QPressed(id) => {
                if self.zoom_id == Some(id) {
                    info!("Zoom window closed with Q");
                    return window::close(id);
                }
            }

            Message::ButtonOpened(id) => debug!("Floating button opened: {:?}", id),
            Message::PanelOpened(id) => {
                debug!("Control panel opened: {:?}", id);
                return window::gain_focus(id);
            }
            Message::ZoomOpened(id) => debug!("Zoom window opened: {:?}", id),

            Message::TogglePanel => {
                if let Some(id) = self.panel_id {
                    return window::close(id);
                }
                return self.open_panel();
            }

            Message::DragWindow(id) => return window::drag(id),

            Message::MonitorSelected(choice) => {
                if let Some(panel) = self.panel.as_mut() {
                    panel.selected = Some(choice);
                }
            }
            Message::FieldChanged(field, value) => {
                if let Some(panel) = self.panel.as_mut() {
                    panel.edit(field, value);
                }
            }

            Message::ToggleCapture => {
                if self.worker.is_running() {
                    return self.stop_capture();
                }
                self.save_settings();
                self.start_capture();
            }

            Message::SaveSettings => {
                self.save_settings();
                if !self.worker.is_running() {
                    self.set_status("Settings saved", false);
                }
            }

            Message::ClosePanel => {
                if let Some(id) = self.panel_id {
                    return window::close(id);
                }
            }

            Message::ShowControls => {
                if self.button_id.is_none() {
                    return self.open_button();
                }
            }

            Message::Exit => {
                info!("Exit requested");
                self.worker.stop();
                return iced::exit();
            }
        }

        Task::none()
    }

    fn view(&self, window_id: window::Id) -> Element<'_, Message> {
        if self.zoom_id == Some(window_id) {
            return self.zoom.view(window_id);
        }
        if self.panel_id == Some(window_id) {
            if let Some(panel) = &self.panel {
                return panel.view(self.worker.is_running(), &self.status, self.status_failed);
            }
        }
        ui::button::view(window_id)
    }

    fn subscription(&self) -> Subscription<Message> {
        let interval = if self.worker.is_running() {
            constants::POLL_INTERVAL_MS
        } else {
            IDLE_POLL_MS
        };

        Subscription::batch([
            iced::time::every(Duration::from_millis(interval)).map(|_| Message::Tick),
            window::events().map(|(id, event)| Message::WindowEvent(id, event)),
            event::listen_with(|event, _status, id| match event {
                Event::Keyboard(keyboard::Event::KeyPressed {
                    key: keyboard::Key::Character(c),
                    ..
                }) if c.eq_ignore_ascii_case("q") => Some(Message::QPressed(id)),
                _ => None,
            }),
        ])
    }

    fn theme(&self, _window_id: window::Id) -> Theme {
        Theme::Dark
    }

    // ------------------------------------------------------------------------
    // Windows
    // ------------------------------------------------------------------------

    fn level(&self) -> window::Level {
        if self.dev_mode {
            window::Level::Normal
        } else {
            window::Level::AlwaysOnTop
        }
    }

    fn open_button(&mut self) -> Task<Message> {
        let settings = window::Settings {
            size: Size::new(button_geom::SIZE, button_geom::SIZE),
            position: window::Position::Specific(self.button_pos),
            decorations: self.dev_mode,
            transparent: !self.dev_mode,
            resizable: false,
            level: self.level(),
            icon: ui::icon::window_icon(),
            ..Default::default()
        };
        let (id, open) = window::open(settings);
        self.button_id = Some(id);
        open.map(Message::ButtonOpened)
    }

    fn open_panel(&mut self) -> Task<Message> {
        self.panel = Some(PanelState::new(list_monitors(), &self.store.get()));

        let position = Point::new(
            self.button_pos.x + button_geom::SIZE + button_geom::PANEL_GAP,
            self.button_pos.y,
        );
        let settings = window::Settings {
            size: Size::new(panel_geom::WIDTH, panel_geom::HEIGHT),
            position: window::Position::Specific(position),
            resizable: false,
            level: self.level(),
            icon: ui::icon::window_icon(),
            ..Default::default()
        };
        let (id, open) = window::open(settings);
        self.panel_id = Some(id);
        open.map(Message::PanelOpened)
    }

    fn open_zoom(&mut self, size: Size) -> Task<Message> {
        let settings = window::Settings {
            size,
            position: window::Position::Specific(Point::new(zoom_geom::DEFAULT_X, zoom_geom::DEFAULT_Y)),
            min_size: Some(Size::new(zoom_geom::MIN_WIDTH, zoom_geom::MIN_HEIGHT)),
            decorations: self.dev_mode,
            resizable: true,
            level: self.level(),
            icon: ui::icon::window_icon(),
            ..Default::default()
        };
        let (id, open) = window::open(settings);
        self.zoom_id = Some(id);
        open.map(Message::ZoomOpened)
    }

    fn window_event(&mut self, id: window::Id, event: window::Event) -> Task<Message> {
        match event {
            window::Event::Opened { size, .. } | window::Event::Resized(size) => {
                if self.zoom_id == Some(id) {
                    self.zoom.view.resize(size.width, size.height);
                }
            }
            window::Event::Moved(position) => {
                if self.button_id == Some(id) {
                    self.button_pos = position;
                }
            }
            window::Event::Closed => return self.window_closed(id),
            _ => {}
        }
        Task::none()
    }

    fn window_closed(&mut self, id: window::Id) -> Task<Message> {
        if self.zoom_id == Some(id) {
            // Capture keeps running; the next frame reopens the window
            self.zoom_id = None;
            self.zoom.reset();
        } else if self.panel_id == Some(id) {
            self.panel_id = None;
            self.panel = None;
        } else if self.button_id == Some(id) {
            self.button_id = None;
            if !self.has_tray() {
                // Nothing left to bring the controls back
                info!("Floating button closed without a tray icon, exiting");
                self.worker.stop();
                return iced::exit();
            }
        }
        Task::none()
    }

    // ------------------------------------------------------------------------
    // Capture
    // ------------------------------------------------------------------------

    fn save_settings(&mut self) {
        if let Some(panel) = self.panel.as_mut() {
            let patch = panel.patch(&self.store.get());
            let settings = self.store.set(patch);
            panel.sync(&settings);
            info!("Settings saved: {:?}", settings);
        }
    }

    fn start_capture(&mut self) {
        let settings = self.store.get();
        // Failures also arrive as a worker event, which sets the status line
        if let Err(e) = self.worker.start(&settings) {
            warn!("Capture did not start: {}", e);
        }
    }

    fn stop_capture(&mut self) -> Task<Message> {
        self.worker.stop();
        self.set_status("Stopped", false);
        match self.zoom_id {
            Some(id) => window::close(id),
            None => Task::none(),
        }
    }

    fn poll_worker(&mut self) {
        for event in self.worker.poll_events() {
            match event {
                WorkerEvent::Started(settings) => {
                    let status = format!(
                        "Capturing {}x{} -> {}x{}",
                        settings.crop_width, settings.crop_height, settings.output_width, settings.output_height
                    );
                    self.set_status(&status, false);
                }
                WorkerEvent::Failed(err) => {
                    self.set_status(&err.to_string(), true);
                }
            }
        }
    }

    /// Hand the newest frame to the zoom window, opening or sizing it as needed.
    fn present(&mut self, frame: CaptureFrame) -> Task<Message> {
        let first_size = self.zoom.present(frame);
        let size = first_size.map(|(w, h)| Size::new(w as f32, h as f32));

        match (self.zoom_id, size) {
            (None, size) => {
                self.open_zoom(size.unwrap_or(Size::new(zoom_geom::DEFAULT_WIDTH, zoom_geom::DEFAULT_HEIGHT)))
            }
            (Some(id), Some(size)) => window::resize(id, size),
            (Some(_), None) => Task::none(),
        }
    }

    fn set_status(&mut self, status: &str, failed: bool) {
        self.status = status.to_string();
        self.status_failed = failed;
    }

    // ------------------------------------------------------------------------
    // Tray
    // ------------------------------------------------------------------------

    fn poll_tray(&mut self) -> Task<Message> {
        // The tray needs a running event loop, so it is created on the first tick
        if self.tray.is_none() && !self.tray_failed {
            match SystemTray::new() {
                Ok(tray) => self.tray = Some(tray),
                Err(e) => {
                    error!("Failed to create tray icon: {}", e);
                    self.tray_failed = true;
                }
            }
        }

        let Some(tray) = &self.tray else {
            return Task::none();
        };
        let tasks: Vec<_> = tray
            .poll()
            .into_iter()
            .map(|action| {
                Task::done(match action {
                    TrayAction::ShowControls => Message::ShowControls,
                    TrayAction::Exit => Message::Exit,
                })
            })
            .collect();
        Task::batch(tasks)
    }

    fn has_tray(&self) -> bool {
        self.tray.is_some()
    }
}

/// Monitor selector entries; a single error entry if enumeration fails
fn list_monitors() -> Vec<MonitorChoice> {
    match ScreenSource::new().monitors() {
        Ok(monitors) if !monitors.is_empty() => monitors.iter().map(MonitorChoice::from).collect(),
        Ok(_) => {
            warn!("No monitors found");
            vec![MonitorChoice::error_placeholder()]
        }
        Err(e) => {
            error!("Failed to enumerate monitors: {}", e);
            vec![MonitorChoice::error_placeholder()]
        }
    }
}

// ============================================================================
// Main
// ============================================================================

fn main() -> anyhow::Result<()> {
    let args = cli::Args::parse();

    // Initialize logger with wgpu warnings filtered out
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .filter_module("wgpu_hal", log::LevelFilter::Error)
        .filter_module("wgpu_core", log::LevelFilter::Error)
        .filter_module("naga", log::LevelFilter::Error)
        .init();
    info!("ScreenZoom starting...");

    daemon(ScreenZoomApp::title, ScreenZoomApp::update, ScreenZoomApp::view)
        .subscription(ScreenZoomApp::subscription)
        .theme(ScreenZoomApp::theme)
        .run_with(move || ScreenZoomApp::new(args))?;

    Ok(())
}
