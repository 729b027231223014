// ui/theme.rs - ScreenZoom Visual Theme
//
// Dark palette plus the button and container styles shared by all windows.

use iced::widget::{button, container};
use iced::{Background, Border, Color, Theme};

/// Color palette (modern dark theme)
pub mod colors {
    use iced::Color;

    pub const BG_PRIMARY: Color = Color::from_rgb(0.118, 0.118, 0.118); // #1e1e1e
    pub const BG_CONTROL: Color = Color::from_rgb(0.169, 0.169, 0.169); // #2b2b2b
    pub const BG_HOVER: Color = Color::from_rgb(0.235, 0.235, 0.235); // #3c3c3c

    pub const ACCENT: Color = Color::from_rgb(0.0, 0.478, 0.8); // #007ACC
    pub const ACCENT_HOVER: Color = Color::from_rgb(0.0, 0.588, 1.0); // #0096FF

    pub const SUCCESS: Color = Color::from_rgb(0.2, 0.75, 0.45);
    pub const DANGER: Color = Color::from_rgb(0.9, 0.3, 0.35);

    pub const TEXT_PRIMARY: Color = Color::from_rgba(1.0, 1.0, 1.0, 0.95);
    pub const TEXT_MUTED: Color = Color::from_rgba(1.0, 1.0, 1.0, 0.5);
}

/// Round blue floating button
pub fn floating_button(_theme: &Theme, status: button::Status) -> button::Style {
    let bg = match status {
        button::Status::Hovered | button::Status::Pressed => colors::ACCENT_HOVER,
        _ => colors::ACCENT,
    };
    button::Style {
        background: Some(Background::Color(bg)),
        text_color: Color::WHITE,
        border: Border {
            radius: 22.0.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Flat dark panel button
pub fn panel_button(_theme: &Theme, status: button::Status) -> button::Style {
    let bg = match status {
        button::Status::Hovered | button::Status::Pressed => colors::BG_HOVER,
        _ => colors::BG_CONTROL,
    };
    button::Style {
        background: Some(Background::Color(bg)),
        text_color: colors::TEXT_PRIMARY,
        border: Border {
            radius: 5.0.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Round backdrop of the floating button; this is the drag handle
pub fn button_ring(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(colors::ACCENT)),
        border: Border {
            radius: 35.0.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

pub fn panel(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(colors::BG_PRIMARY)),
        text_color: Some(colors::TEXT_PRIMARY),
        ..Default::default()
    }
}

/// Black letterbox bars around the zoomed frame
pub fn zoom_backdrop(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(Color::BLACK)),
        ..Default::default()
    }
}
