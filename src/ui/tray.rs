// ui/tray.rs - System Tray Icon Implementation
//
// Tray icon with "Show Controls" and "Exit". Events are polled from the UI
// tick instead of a callback, so everything stays on the UI thread.
//
// On Linux the icon lives on its own GTK thread: tray-icon drives it through
// a GTK main loop, which iced does not run. Menu events still arrive on the
// global receivers drained by `poll`.

use anyhow::Result;
use log::info;
use tray_icon::{
    menu::{Menu, MenuEvent, MenuId, MenuItem, PredefinedMenuItem},
    Icon, TrayIcon, TrayIconBuilder, TrayIconEvent,
};

use super::icon::{icon_rgba, ICON_SIZE};

const SHOW_CONTROLS_ID: &str = "show_controls";
const EXIT_ID: &str = "exit";

/// What the user asked for through the tray
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrayAction {
    ShowControls,
    Exit,
}

/// System tray icon manager
pub struct SystemTray {
    /// Keeps the icon alive; dropping it removes it from the tray
    #[cfg(not(target_os = "linux"))]
    _tray_icon: TrayIcon,
}

impl SystemTray {
    /// Create the tray icon. Must run on the UI thread once the event loop
    /// is up.
    #[cfg(not(target_os = "linux"))]
    pub fn new() -> Result<Self> {
        info!("Initializing system tray icon");
        let tray_icon = build_tray_icon()?;
        info!("System tray icon initialized successfully");
        Ok(Self { _tray_icon: tray_icon })
    }

    /// Create the tray icon on a dedicated GTK thread and wait until it is up.
    #[cfg(target_os = "linux")]
    pub fn new() -> Result<Self> {
        use std::sync::mpsc;
        use std::thread;

        info!("Initializing system tray icon (GTK thread)");
        let (ready_tx, ready_rx) = mpsc::channel::<Result<()>>();

        thread::Builder::new().name("tray-gtk".into()).spawn(move || {
            if let Err(e) = gtk::init() {
                let _ = ready_tx.send(Err(anyhow::anyhow!("GTK init failed: {e}")));
                return;
            }
            match build_tray_icon() {
                Ok(_tray_icon) => {
                    let _ = ready_tx.send(Ok(()));
                    // Runs for the rest of the process, keeping the icon alive
                    gtk::main();
                }
                Err(e) => {
                    let _ = ready_tx.send(Err(e));
                }
            }
        })?;

        ready_rx.recv()??;
        info!("System tray icon initialized successfully");
        Ok(Self {})
    }

    /// Drain pending tray and menu events
    pub fn poll(&self) -> Vec<TrayAction> {
        let mut actions = Vec::new();

        while let Ok(event) = TrayIconEvent::receiver().try_recv() {
            if let TrayIconEvent::DoubleClick { .. } = event {
                actions.push(TrayAction::ShowControls);
            }
        }

        while let Ok(event) = MenuEvent::receiver().try_recv() {
            if let Some(action) = menu_action(event.id()) {
                actions.push(action);
            }
        }

        actions
    }
}

fn build_tray_icon() -> Result<TrayIcon> {
    let menu = Menu::new();
    menu.append_items(&[
        &MenuItem::with_id(SHOW_CONTROLS_ID, "Show Controls", true, None),
        &PredefinedMenuItem::separator(),
        &MenuItem::with_id(EXIT_ID, "Exit", true, None),
    ])?;

    Ok(TrayIconBuilder::new()
        .with_menu(Box::new(menu))
        .with_tooltip("ScreenZoom - Screen Magnifier")
        .with_icon(Icon::from_rgba(icon_rgba(), ICON_SIZE, ICON_SIZE)?)
        .build()?)
}

fn menu_action(id: &MenuId) -> Option<TrayAction> {
    match id.0.as_str() {
        SHOW_CONTROLS_ID => Some(TrayAction::ShowControls),
        EXIT_ID => Some(TrayAction::Exit),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_ids_map_to_actions() {
        assert_eq!(menu_action(&MenuId::new(SHOW_CONTROLS_ID)), Some(TrayAction::ShowControls));
        assert_eq!(menu_action(&MenuId::new(EXIT_ID)), Some(TrayAction::Exit));
        assert_eq!(menu_action(&MenuId::new("about")), None);
    }
}
