// app/state.rs - Capture Settings
//
// The single in-memory settings record. It is owned and mutated by the UI
// thread only; the capture worker gets a copy when it starts.

use crate::constants::{capture, limits};

/// Capture settings that control what is grabbed and how large it is shown
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureSettings {
    /// Backend monitor index (0-based)
    pub monitor_index: usize,
    /// Width of the centered box cut out of the monitor
    pub crop_width: u32,
    /// Height of the centered box cut out of the monitor
    pub crop_height: u32,
    /// Width of the magnified frame
    pub output_width: u32,
    /// Height of the magnified frame
    pub output_height: u32,
}

impl Default for CaptureSettings {
    fn default() -> Self {
        Self {
            monitor_index: capture::DEFAULT_MONITOR,
            crop_width: capture::DEFAULT_CROP_WIDTH,
            crop_height: capture::DEFAULT_CROP_HEIGHT,
            output_width: capture::DEFAULT_OUTPUT_WIDTH,
            output_height: capture::DEFAULT_OUTPUT_HEIGHT,
        }
    }
}

impl CaptureSettings {
    /// The same settings with every size pulled into the control panel ranges
    pub fn clamped(&self) -> Self {
        Self {
            monitor_index: self.monitor_index,
            crop_width: limits::clamp(self.crop_width, &limits::CROP),
            crop_height: limits::clamp(self.crop_height, &limits::CROP),
            output_width: limits::clamp(self.output_width, &limits::OUTPUT_WIDTH),
            output_height: limits::clamp(self.output_height, &limits::OUTPUT_HEIGHT),
        }
    }
}

/// A partial update; `None` fields keep their current value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsPatch {
    pub monitor_index: Option<usize>,
    pub crop_width: Option<u32>,
    pub crop_height: Option<u32>,
    pub output_width: Option<u32>,
    pub output_height: Option<u32>,
}

impl From<&CaptureSettings> for SettingsPatch {
    fn from(settings: &CaptureSettings) -> Self {
        Self {
            monitor_index: Some(settings.monitor_index),
            crop_width: Some(settings.crop_width),
            crop_height: Some(settings.crop_height),
            output_width: Some(settings.output_width),
            output_height: Some(settings.output_height),
        }
    }
}

/// In-memory settings store. No validation happens here, the UI clamps
/// values before they get this far. Nothing is persisted.
#[derive(Debug, Default)]
pub struct SettingsStore {
    settings: CaptureSettings,
}

impl SettingsStore {
    pub fn new(settings: CaptureSettings) -> Self {
        Self { settings }
    }

    /// Snapshot of the current settings
    pub fn get(&self) -> CaptureSettings {
        self.settings.clone()
    }

    /// Apply `patch` and return the resulting settings
    pub fn set(&mut self, patch: SettingsPatch) -> CaptureSettings {
        let s = &mut self.settings;
        if let Some(v) = patch.monitor_index {
            s.monitor_index = v;
        }
        if let Some(v) = patch.crop_width {
            s.crop_width = v;
        }
        if let Some(v) = patch.crop_height {
            s.crop_height = v;
        }
        if let Some(v) = patch.output_width {
            s.output_width = v;
        }
        if let Some(v) = patch.output_height {
            s.output_height = v;
        }
        self.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_stock_magnifier() {
        let s = CaptureSettings::default();
        assert_eq!(
            (s.monitor_index, s.crop_width, s.crop_height, s.output_width, s.output_height),
            (0, 200, 150, 1280, 720)
        );
    }

    #[test]
    fn partial_set_only_touches_given_fields() {
        let mut store = SettingsStore::default();
        let updated = store.set(SettingsPatch {
            crop_width: Some(300),
            output_height: Some(1080),
            ..Default::default()
        });

        assert_eq!(updated.crop_width, 300);
        assert_eq!(updated.output_height, 1080);
        assert_eq!(updated.crop_height, 150);
        assert_eq!(store.get(), updated);
    }

    #[test]
    fn store_does_not_validate() {
        let mut store = SettingsStore::default();
        let updated = store.set(SettingsPatch { crop_width: Some(5), ..Default::default() });
        assert_eq!(updated.crop_width, 5);
    }

    #[test]
    fn snapshots_are_independent_of_later_changes() {
        let mut store = SettingsStore::default();
        let snapshot = store.get();
        store.set(SettingsPatch { monitor_index: Some(2), ..Default::default() });
        assert_eq!(snapshot.monitor_index, 0);
    }

    #[test]
    fn clamped_uses_panel_ranges() {
        let s = CaptureSettings {
            monitor_index: 1,
            crop_width: 10,
            crop_height: 4000,
            output_width: 99,
            output_height: 9999,
        }
        .clamped();
        assert_eq!((s.crop_width, s.crop_height), (50, 1000));
        assert_eq!((s.output_width, s.output_height), (100, 2160));
        assert_eq!(s.monitor_index, 1);
    }
}
