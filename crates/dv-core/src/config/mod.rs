//! Session-wide plot configuration
//!
//! A [`PlotConfig`] is built once when the session starts and is handed by
//! reference to every component that needs a size, a rate or a constant.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

/// Errors raised while loading or validating a [`PlotConfig`]
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Margins around the plot area, in logical pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Default for Margin {
    fn default() -> Self {
        Self {
            top: 70.0,
            right: 50.0,
            bottom: 10.0,
            left: 70.0,
        }
    }
}

/// Immutable plot configuration shared by layout, rendering, brushing and the table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    /// Plot margins
    pub margin: Margin,

    /// Plot width inside the margins
    pub width: f32,

    /// Plot height inside the margins
    pub height: f32,

    /// Override for the display pixel ratio; `None` keeps the native ratio
    pub device_pixel_ratio: Option<f32>,

    /// Polyline stroke width
    pub line_width: f32,

    /// Records drawn per scheduling tick
    pub render_rate: usize,

    /// Minimum spacing between two render ticks
    pub tick_interval_ms: u64,

    /// Alpha constant used when the whole dataset is drawn
    pub alpha_initial: f32,

    /// Alpha constant used for brushed views
    pub alpha_selected: f32,

    /// Half-width of the pointer band around an axis that starts a brush
    pub brush_half_width: f32,

    /// Half-width of the drawn brush rectangle
    pub brush_handle_half_width: f32,

    /// Number of rows shown in the summary table
    pub table_rows: usize,

    /// Field the summary table is ordered by
    pub sort_key: String,

    /// Categorical field that picks each polyline's colour
    pub color_key: String,

    /// Delimited file loaded when the session starts
    pub data_path: PathBuf,
}

impl Default for PlotConfig {
    fn default() -> Self {
        let margin = Margin::default();
        Self {
            margin,
            width: 1000.0,
            height: 500.0 - margin.top - margin.bottom,
            device_pixel_ratio: None,
            line_width: 1.5,
            render_rate: 30,
            tick_interval_ms: 33,
            alpha_initial: 1.15,
            alpha_selected: 0.85,
            brush_half_width: 10.0,
            brush_handle_half_width: 8.0,
            table_rows: 5,
            sort_key: "event_type".to_string(),
            color_key: "event_type".to_string(),
            data_path: PathBuf::from("part1.csv"),
        }
    }
}

impl PlotConfig {
    /// Load a configuration from a JSON file.
    ///
    /// A missing file is not an error: the defaults are returned instead.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;

        info!("Loaded plot config from {}", path.display());
        Ok(config)
    }

    /// Reject configurations that would break scales, alpha or batching
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width <= 0.0 || self.height <= 2.0 {
            return Err(ConfigError::Invalid(format!(
                "plot size must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if self.alpha_initial <= 0.0 || self.alpha_selected <= 0.0 {
            return Err(ConfigError::Invalid("alpha constants must be positive".into()));
        }
        if self.alpha_selected > self.alpha_initial {
            return Err(ConfigError::Invalid(format!(
                "alpha_selected ({}) must not exceed alpha_initial ({})",
                self.alpha_selected, self.alpha_initial
            )));
        }
        if self.render_rate == 0 {
            return Err(ConfigError::Invalid("render_rate must be at least 1".into()));
        }
        if matches!(self.device_pixel_ratio, Some(r) if r <= 0.0) {
            return Err(ConfigError::Invalid("device_pixel_ratio must be positive".into()));
        }
        Ok(())
    }

    /// Size the plot from the initial window width
    pub fn with_width(mut self, window_width: f32) -> Self {
        let width = window_width - self.margin.left - self.margin.right;
        if width > 0.0 {
            self.width = width;
        }
        self
    }

    /// Vertical pixel extent every scale maps onto
    pub fn inner_height(&self) -> f32 {
        self.height - 2.0
    }

    /// Full widget size, margins included
    pub fn outer_size(&self) -> [f32; 2] {
        [
            self.width + self.margin.left + self.margin.right,
            self.height + self.margin.top + self.margin.bottom,
        ]
    }

    pub fn tick_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.tick_interval_ms)
    }
}
