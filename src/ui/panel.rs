// ui/panel.rs - Control Panel
//
// Monitor selector, box/output sizes and the start/stop, save and close
// buttons. Field edits stay local until they are committed into the
// settings store (Save, or Start which saves first).

use iced::widget::{button, column, container, pick_list, row, text, text_input};
use iced::{Alignment, Center, Element, Length};

use screenzoom::constants::limits;
use screenzoom::{CaptureSettings, MonitorDescriptor, SettingsPatch};

use super::theme::{self, colors};
use crate::Message;

/// One entry of the monitor selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorChoice {
    pub index: usize,
    label: String,
}

impl MonitorChoice {
    /// Stand-in entry when the backend cannot enumerate monitors
    pub fn error_placeholder() -> Self {
        Self {
            index: 0,
            label: "Monitor 0 (Error)".to_string(),
        }
    }
}

impl From<&MonitorDescriptor> for MonitorChoice {
    fn from(monitor: &MonitorDescriptor) -> Self {
        Self {
            index: monitor.index,
            label: monitor.to_string(),
        }
    }
}

impl std::fmt::Display for MonitorChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.label)
    }
}

/// Which numeric field was edited
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    CropWidth,
    CropHeight,
    OutputWidth,
    OutputHeight,
}

/// Editable copy of the settings shown in the panel
#[derive(Debug, Clone)]
pub struct PanelState {
    pub monitors: Vec<MonitorChoice>,
    pub selected: Option<MonitorChoice>,
    crop_width: String,
    crop_height: String,
    output_width: String,
    output_height: String,
}

impl PanelState {
    pub fn new(monitors: Vec<MonitorChoice>, settings: &CaptureSettings) -> Self {
        let selected = monitors
            .iter()
            .find(|m| m.index == settings.monitor_index)
            .or_else(|| monitors.first())
            .cloned();

        Self {
            monitors,
            selected,
            crop_width: settings.crop_width.to_string(),
            crop_height: settings.crop_height.to_string(),
            output_width: settings.output_width.to_string(),
            output_height: settings.output_height.to_string(),
        }
    }

    pub fn edit(&mut self, field: Field, value: String) {
        // Digits only; the value is range-clamped on commit
        if !value.chars().all(|c| c.is_ascii_digit()) {
            return;
        }
        let slot = match field {
            Field::CropWidth => &mut self.crop_width,
            Field::CropHeight => &mut self.crop_height,
            Field::OutputWidth => &mut self.output_width,
            Field::OutputHeight => &mut self.output_height,
        };
        *slot = value;
    }

    /// Clamped values ready for the settings store. Empty or unparsable
    /// fields fall back to `current`.
    pub fn patch(&self, current: &CaptureSettings) -> SettingsPatch {
        let parse = |value: &str, fallback: u32, range| {
            limits::clamp(value.parse().unwrap_or(fallback), range)
        };

        SettingsPatch {
            monitor_index: self.selected.as_ref().map(|m| m.index),
            crop_width: Some(parse(&self.crop_width, current.crop_width, &limits::CROP)),
            crop_height: Some(parse(&self.crop_height, current.crop_height, &limits::CROP)),
            output_width: Some(parse(&self.output_width, current.output_width, &limits::OUTPUT_WIDTH)),
            output_height: Some(parse(&self.output_height, current.output_height, &limits::OUTPUT_HEIGHT)),
        }
    }

    /// Show the committed (clamped) values again
    pub fn sync(&mut self, settings: &CaptureSettings) {
        let monitors = std::mem::take(&mut self.monitors);
        *self = Self::new(monitors, settings);
    }

    pub fn view<'a>(&'a self, capturing: bool, status: &'a str, failed: bool) -> Element<'a, Message> {
        let size_row = |label_w: &'a str, w: &'a str, fw: Field, label_h: &'a str, h: &'a str, fh: Field| {
            row![
                text(label_w),
                text_input("", w).on_input(move |v| Message::FieldChanged(fw, v)).width(Length::Fill),
                text(label_h),
                text_input("", h).on_input(move |v| Message::FieldChanged(fh, v)).width(Length::Fill),
            ]
            .spacing(6)
            .align_y(Alignment::Center)
        };

        let toggle_label = if capturing { "⏹ Stop Capture" } else { "▶ Start Capture" };
        let action = |label: &'a str, message: Message| {
            button(text(label).align_x(Center).width(Length::Fill))
                .width(Length::Fill)
                .padding(6)
                .style(theme::panel_button)
                .on_press(message)
        };

        let status_color = if failed {
            colors::DANGER
        } else if capturing {
            colors::SUCCESS
        } else {
            colors::TEXT_MUTED
        };

        let content = column![
            text("Select Monitor:"),
            pick_list(self.monitors.as_slice(), self.selected.clone(), Message::MonitorSelected)
                .width(Length::Fill),
            size_row("Box W:", &self.crop_width, Field::CropWidth, "Box H:", &self.crop_height, Field::CropHeight),
            size_row("Out W:", &self.output_width, Field::OutputWidth, "Out H:", &self.output_height, Field::OutputHeight),
            action(toggle_label, Message::ToggleCapture),
            action("⚙ Save Settings", Message::SaveSettings),
            action("✕ Close", Message::ClosePanel),
            text(status).size(12).color(status_color),
        ]
        .spacing(10);

        container(content)
            .padding(12)
            .width(Length::Fill)
            .height(Length::Fill)
            .style(theme::panel)
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn monitors() -> Vec<MonitorChoice> {
        [(0, 1920, 1080), (1, 2560, 1440)]
            .iter()
            .map(|&(index, width, height)| MonitorChoice::from(&MonitorDescriptor { index, width, height }))
            .collect()
    }

    #[test]
    fn selects_the_configured_monitor() {
        let settings = CaptureSettings { monitor_index: 1, ..Default::default() };
        let panel = PanelState::new(monitors(), &settings);
        assert_eq!(panel.selected.map(|m| m.to_string()), Some("Monitor 1 (2560x1440)".into()));
    }

    #[test]
    fn unknown_monitor_falls_back_to_first_entry() {
        let settings = CaptureSettings { monitor_index: 7, ..Default::default() };
        let panel = PanelState::new(monitors(), &settings);
        assert_eq!(panel.selected.map(|m| m.index), Some(0));
    }

    #[test]
    fn patch_clamps_and_falls_back() {
        let current = CaptureSettings::default();
        let mut panel = PanelState::new(monitors(), &current);
        panel.edit(Field::CropWidth, "20".into());
        panel.edit(Field::CropHeight, String::new());
        panel.edit(Field::OutputWidth, "5000".into());
        panel.edit(Field::OutputHeight, "12a".into()); // rejected, keeps "720"

        let patch = panel.patch(&current);
        assert_eq!(patch.crop_width, Some(50));
        assert_eq!(patch.crop_height, Some(150));
        assert_eq!(patch.output_width, Some(3840));
        assert_eq!(patch.output_height, Some(720));
        assert_eq!(patch.monitor_index, Some(0));
    }
}
