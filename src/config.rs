use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use thiserror::Error;

use crate::aggregate::SurfaceBand;

const CM_PER_INCH: f64 = 2.54;
const POINTS_PER_INCH: f64 = 72.0;

/// Visual style shared by every chart.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub background: [u8; 3],
    pub foreground: [u8; 3],
    pub points: [u8; 3],
    pub trend: [u8; 3],
    pub separators: [u8; 3],
    pub font_family: String,
    /// In points, scaled to pixels with the configured dpi.
    pub font_size: f64,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: [255, 255, 255],
            foreground: [0, 0, 0],
            points: [70, 130, 180],
            trend: [178, 34, 34],
            separators: [190, 190, 190],
            font_family: String::from("sans-serif"),
            font_size: 9.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    pub width_cm: f64,
    pub height_cm: f64,
    pub dpi: u32,
    pub output_dir: PathBuf,
    pub surface: SurfaceBand,
    /// Fraction of the data in each local window of the trend line.
    pub smoothing_span: f64,
    pub theme: Theme,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width_cm: 16.0,
            height_cm: 14.0,
            dpi: 350,
            output_dir: PathBuf::from("figures"),
            surface: SurfaceBand::default(),
            smoothing_span: 0.3,
            theme: Theme::default(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read config file: {0}")]
    Read(#[from] io::Error),
    #[error("Bad config file: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

impl PlotConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Fields missing from `s` keep their default value.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = |value: f64| value.is_finite() && value > 0.0;
        if !positive(self.width_cm) || !positive(self.height_cm) {
            return Err(ConfigError::Invalid(format!(
                "figure size must be positive, got {}x{} cm",
                self.width_cm, self.height_cm
            )));
        }
        if self.dpi == 0 {
            return Err(ConfigError::Invalid(String::from("dpi must be positive")));
        }
        let SurfaceBand {
            min_depth,
            max_depth,
        } = self.surface;
        if min_depth.is_nan() || max_depth.is_nan() || min_depth > max_depth {
            return Err(ConfigError::Invalid(format!(
                "empty surface band {min_depth}..={max_depth}"
            )));
        }
        if !positive(self.smoothing_span) || self.smoothing_span > 1.0 {
            return Err(ConfigError::Invalid(format!(
                "smoothing span must be in (0, 1], got {}",
                self.smoothing_span
            )));
        }
        if !positive(self.theme.font_size) {
            return Err(ConfigError::Invalid(String::from("font size must be positive")));
        }
        Ok(())
    }

    /// Size of the exported image in pixels.
    pub fn pixel_size(&self) -> (u32, u32) {
        let to_pixels = |cm: f64| (cm / CM_PER_INCH * f64::from(self.dpi)).round() as u32;
        (to_pixels(self.width_cm), to_pixels(self.height_cm))
    }

    /// Pixel size of a font `scale` times the theme's base size.
    pub fn font_pixels(&self, scale: f64) -> f64 {
        self.theme.font_size * scale * f64::from(self.dpi) / POINTS_PER_INCH
    }
}
