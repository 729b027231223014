//! Command line overrides for the initial settings.

use clap::Parser;

use screenzoom::constants::capture;
use screenzoom::CaptureSettings;

#[derive(Debug, Parser)]
#[command(name = "screenzoom", version, about = "Floating screen magnifier")]
pub struct Args {
    /// Monitor to capture (0-based)
    #[arg(long, default_value_t = capture::DEFAULT_MONITOR)]
    pub monitor: usize,

    /// Width of the captured box (50-1000)
    #[arg(long, default_value_t = capture::DEFAULT_CROP_WIDTH)]
    pub crop_width: u32,

    /// Height of the captured box (50-1000)
    #[arg(long, default_value_t = capture::DEFAULT_CROP_HEIGHT)]
    pub crop_height: u32,

    /// Width of the zoomed output (100-3840)
    #[arg(long, default_value_t = capture::DEFAULT_OUTPUT_WIDTH)]
    pub output_width: u32,

    /// Height of the zoomed output (100-2160)
    #[arg(long, default_value_t = capture::DEFAULT_OUTPUT_HEIGHT)]
    pub output_height: u32,

    /// Start capturing right away
    #[arg(long)]
    pub start: bool,

    /// Decorated, non-topmost windows for debugging
    #[arg(short, long)]
    pub dev: bool,
}

impl Args {
    /// Initial settings, clamped the same way the control panel clamps them
    pub fn settings(&self) -> CaptureSettings {
        CaptureSettings {
            monitor_index: self.monitor,
            crop_width: self.crop_width,
            crop_height: self.crop_height,
            output_width: self.output_width,
            output_height: self.output_height,
        }
        .clamped()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_round_trip_to_default_settings() {
        let args = Args::parse_from(["screenzoom"]);
        assert_eq!(args.settings(), CaptureSettings::default());
        assert!(!args.start);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let args = Args::parse_from(["screenzoom", "--crop-width", "5", "--output-height", "9000", "--start"]);
        let settings = args.settings();
        assert_eq!(settings.crop_width, 50);
        assert_eq!(settings.output_height, 2160);
        assert!(args.start);
    }
}
