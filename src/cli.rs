// cli.rs - Command-line interface configuration
use clap::Parser;
use std::path::PathBuf;

use crate::config::AppConfig;
use crate::motion::DampingMode;

#[derive(Parser, Debug, Clone)]
#[command(name = "avatar-flight")]
#[command(about = "Scroll-driven flying avatar", long_about = None)]
pub struct Cli {
    /// Hide the HUD overlay
    #[arg(long = "no-ui", default_value = "false")]
    pub no_ui: bool,

    /// JSON config file; missing fields keep their defaults
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Scale damping by frame time instead of applying it once per frame
    #[arg(long = "frame-rate-independent", default_value = "false")]
    pub frame_rate_independent: bool,

    /// Frame rate the damping factor is tuned for
    #[arg(long = "reference-rate", value_name = "HZ", value_parser = parse_rate)]
    pub reference_rate: Option<f32>,

    /// Run this many frames without a window and print one JSON line per frame
    #[arg(long, value_name = "FRAMES")]
    pub headless: Option<u64>,

    /// Frame rate for headless runs
    #[arg(long, value_name = "HZ", default_value = "60")]
    pub fps: f32,

    /// Total scrollable page height in pixels, replacing the section layout
    #[arg(long = "page-height", value_name = "PX")]
    pub page_height: Option<f32>,
}

/// Positive, finite frame rate in Hz
fn parse_rate(arg: &str) -> Result<f32, String> {
    let rate: f32 = arg.parse().map_err(|e| format!("{e}"))?;
    if rate.is_finite() && rate > 0.0 {
        Ok(rate)
    } else {
        Err(format!("rate must be a positive number of Hz, got {arg}"))
    }
}

impl Cli {
    /// Apply flag overrides on top of a loaded config
    pub fn apply(&self, config: &mut AppConfig) {
        if self.frame_rate_independent || self.reference_rate.is_some() {
            let reference_rate = self
                .reference_rate
                .or(match config.flight.damping_mode {
                    DampingMode::FrameRateIndependent { reference_rate } => Some(reference_rate),
                    DampingMode::PerFrame => None,
                })
                .unwrap_or(60.0);
            config.flight.damping_mode = DampingMode::FrameRateIndependent { reference_rate };
        }

        if let Some(height) = self.page_height {
            config.page.total_height = Some(height);
        }
    }
}
