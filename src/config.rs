use crate::wave_plotter::{LineStyle, PlotStyle, MAX_PLOT_SIZE, MIN_PLOT_SIZE};
use anyhow::{anyhow, Context, Result};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Startup settings, read from an optional YAML file.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    pub window: WindowConfig,
    pub plot: PlotConfig,

    /// Edits that would produce more samples than this are refused by the form.
    pub max_samples: usize,

    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            window: WindowConfig::default(),
            plot: PlotConfig::default(),
            max_samples: 5_000_000,
            log_level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        WindowConfig {
            width: 1250.0,
            height: 750.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PlotConfig {
    pub width: f32,
    pub height: f32,
    pub line_style: LineStyle,
    /// sRGB.
    pub color: [u8; 3],
}

impl Default for PlotConfig {
    fn default() -> Self {
        let style = PlotStyle::default();

        PlotConfig {
            width: 640.0,
            height: 480.0,
            line_style: style.line_style,
            color: style.color,
        }
    }
}

impl PlotConfig {
    pub fn style(&self) -> PlotStyle {
        PlotStyle {
            line_style: self.line_style,
            color: self.color,
        }
    }

    pub fn size(&self) -> [f32; 2] {
        [self.width, self.height]
    }
}

impl AppConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config = Self::from_yaml(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))?;

        Ok(config)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: AppConfig =
            serde_yaml::from_str(content).context("Failed to parse YAML config")?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_samples == 0 {
            return Err(anyhow!("max_samples must be at least 1"));
        }

        if !(self.window.width > 0.0 && self.window.height > 0.0) {
            return Err(anyhow!("Window size must be positive"));
        }

        let [min_w, min_h] = MIN_PLOT_SIZE;
        let [max_w, max_h] = MAX_PLOT_SIZE;
        if !(min_w..=max_w).contains(&self.plot.width) || !(min_h..=max_h).contains(&self.plot.height) {
            return Err(anyhow!(
                "Plot size must be between {}x{} and {}x{}",
                min_w,
                min_h,
                max_w,
                max_h
            ));
        }

        self.level_filter()?;
        Ok(())
    }

    pub fn level_filter(&self) -> Result<LevelFilter> {
        self.log_level
            .parse::<LevelFilter>()
            .map_err(|_| anyhow!("Unknown log level: {}", self.log_level))
    }
}
