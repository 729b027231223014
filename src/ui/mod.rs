// ui/mod.rs - iced User Interface Components
//
// Views for the three windows (floating button, control panel, zoom window)
// plus the tray icon.

pub mod button;
pub mod icon;
pub mod panel;
pub mod theme;
pub mod tray;
pub mod zoom;

pub use panel::{Field, MonitorChoice, PanelState};
pub use zoom::ZoomWindow;
