// constants.rs - Application-wide Constants
//
// Centralized defaults, value ranges and window geometry.

/// Default capture settings
pub mod capture {
    /// Monitor captured when nothing else was selected
    pub const DEFAULT_MONITOR: usize = 0;
    /// Default crop box width in pixels
    pub const DEFAULT_CROP_WIDTH: u32 = 200;
    /// Default crop box height in pixels
    pub const DEFAULT_CROP_HEIGHT: u32 = 150;
    /// Default zoomed output width in pixels
    pub const DEFAULT_OUTPUT_WIDTH: u32 = 1280;
    /// Default zoomed output height in pixels
    pub const DEFAULT_OUTPUT_HEIGHT: u32 = 720;

    /// Largest output the rescaler will produce
    pub const MAX_OUTPUT_WIDTH: u32 = 3840;
    pub const MAX_OUTPUT_HEIGHT: u32 = 2160;

    /// Log a frame counter every this many frames
    pub const LOG_EVERY_FRAMES: u64 = 60;
}

/// Ranges enforced by the control panel (not by the settings store)
pub mod limits {
    use std::ops::RangeInclusive;

    pub const CROP: RangeInclusive<u32> = 50..=1000;
    pub const OUTPUT_WIDTH: RangeInclusive<u32> = 100..=3840;
    pub const OUTPUT_HEIGHT: RangeInclusive<u32> = 100..=2160;

    /// Clamp a value into an inclusive range
    pub fn clamp(value: u32, range: &RangeInclusive<u32>) -> u32 {
        value.clamp(*range.start(), *range.end())
    }
}

/// Floating button window
pub mod button {
    pub const SIZE: f32 = 70.0;
    pub const DEFAULT_X: f32 = 40.0;
    pub const DEFAULT_Y: f32 = 40.0;
    /// Gap between the button and the control panel
    pub const PANEL_GAP: f32 = 5.0;
}

/// Control panel window
pub mod panel {
    pub const WIDTH: f32 = 280.0;
    pub const HEIGHT: f32 = 350.0;
}

/// Zoom window
pub mod zoom {
    pub const DEFAULT_X: f32 = 200.0;
    pub const DEFAULT_Y: f32 = 200.0;
    pub const DEFAULT_WIDTH: f32 = 1280.0;
    pub const DEFAULT_HEIGHT: f32 = 720.0;
    pub const MIN_WIDTH: f32 = 200.0;
    pub const MIN_HEIGHT: f32 = 150.0;
}

/// UI polling interval in milliseconds
pub const POLL_INTERVAL_MS: u64 = 16;

#[cfg(test)]
mod tests {
    use super::limits;

    #[test]
    fn clamp_respects_both_ends() {
        assert_eq!(limits::clamp(10, &limits::CROP), 50);
        assert_eq!(limits::clamp(5000, &limits::OUTPUT_WIDTH), 3840);
        assert_eq!(limits::clamp(720, &limits::OUTPUT_HEIGHT), 720);
    }
}
