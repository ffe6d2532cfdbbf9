use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::motion::{DampingMode, FlightTuning, TurntableTuning};
use crate::state::PageLayout;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 800,
            title: "Avatar Flight".to_string(),
        }
    }
}

/// Scrollable page geometry
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub layout: PageLayout,
    /// Rescale the layout to this total height
    pub total_height: Option<f32>,
}

impl PageConfig {
    /// Section layout with `total_height` applied
    pub fn resolve(&self) -> PageLayout {
        let natural = self.layout.total_height();
        match self.total_height {
            Some(total) if natural > 0.0 && total.is_finite() && total > 0.0 => {
                let scale = total / natural;
                let heights = self.layout.heights.iter().map(|&(s, h)| (s, h * scale)).collect();
                PageLayout::new(heights)
            }
            _ => self.layout.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub flight: FlightTuning,
    pub turntable: TurntableTuning,
    pub window: WindowConfig,
    pub page: PageConfig,
    /// Seconds the loading screen stays up
    pub loading_seconds: f32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            flight: FlightTuning::default(),
            turntable: TurntableTuning::default(),
            window: WindowConfig::default(),
            page: PageConfig::default(),
            loading_seconds: 2.5,
        }
    }
}

impl AppConfig {
    /// Read a JSON config, or defaults when no path is given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config: {}", path.display()))?;
        let config = Self::from_json(&text)
            .with_context(|| format!("load config: {}", path.display()))?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text).context("parse config JSON")?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if !(self.flight.damping.is_finite() && (0.0..=1.0).contains(&self.flight.damping)) {
            bail!("flight.damping must be in [0, 1], got {}", self.flight.damping);
        }
        if !self.flight.acceleration.is_finite() || self.flight.acceleration < 0.0 {
            bail!("flight.acceleration must be non-negative, got {}", self.flight.acceleration);
        }
        if let DampingMode::FrameRateIndependent { reference_rate } = self.flight.damping_mode {
            if !reference_rate.is_finite() || reference_rate <= 0.0 {
                bail!("flight.damping_mode.reference_rate must be positive, got {reference_rate}");
            }
        }
        if self.window.width == 0 || self.window.height == 0 {
            bail!("window size must be non-zero");
        }
        if !self.loading_seconds.is_finite() || self.loading_seconds < 0.0 {
            bail!("loading_seconds must be non-negative, got {}", self.loading_seconds);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_path_gives_defaults() {
        let config = AppConfig::load(None).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.loading_seconds, 2.5);
    }

    #[test]
    fn partial_json_keeps_other_defaults() {
        let config = AppConfig::from_json(
            r#"{ "flight": { "damping_mode": { "kind": "frame_rate_independent", "reference_rate": 144.0 } } }"#,
        )
        .unwrap();
        assert_eq!(
            config.flight.damping_mode,
            DampingMode::FrameRateIndependent { reference_rate: 144.0 }
        );
        assert_eq!(config.flight.damping, 0.8);
        assert_eq!(config.window, WindowConfig::default());
    }

    #[test]
    fn rejects_non_positive_reference_rate() {
        for rate in ["-60.0", "0.0"] {
            let json = format!(
                r#"{{ "flight": {{ "damping_mode": {{ "kind": "frame_rate_independent", "reference_rate": {rate} }} }} }}"#
            );
            let err = AppConfig::from_json(&json).unwrap_err();
            assert!(err.to_string().contains("reference_rate"));
        }
    }

    #[test]
    fn rejects_bad_damping() {
        let err = AppConfig::from_json(r#"{ "flight": { "damping": 1.5 } }"#).unwrap_err();
        assert!(err.to_string().contains("damping"));
    }

    #[test]
    fn total_height_rescales_sections() {
        let page = PageConfig {
            total_height: Some(2900.0),
            ..Default::default()
        };
        let layout = page.resolve();
        assert!((layout.total_height() - 2900.0).abs() < 1e-2);
        assert_eq!(layout.heights.len(), 6);
    }
}
