use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::actions::equalize::EqualizerSettings;
use crate::core::actions::equalize::histogram::MAX_PRECISION_FACTOR;
use crate::core::animation::AnimationSettings;
use crate::core::data::complex::Complex;
use crate::core::data::raster::RasterSize;
use crate::core::fractals::params::{DEFAULT_JULIA_CONSTANT, MIN_POWER};

pub const DEFAULT_WIDTH: u32 = 800;
pub const DEFAULT_HEIGHT: u32 = 500;
pub const DEFAULT_ITERATION_STEP: i32 = 100;
pub const DEFAULT_MARKER_RADIUS: f64 = 8.0;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Startup settings for both binaries. Every field is optional in TOML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorerConfig {
    pub width: u32,
    pub height: u32,
    pub animation: AnimationSettings,
    pub equalizer: EqualizerSettings,
    /// Change to the iteration bias per increase/decrease command.
    pub iteration_step: i32,
    pub julia_constant: Complex,
    pub power: u32,
    /// Distance in pixels within which a press grabs the `c` marker.
    pub marker_radius: f64,
    /// Wheel delta factor while the speed modifier is held. 1 leaves the
    /// wheel unaffected.
    pub scroll_speed_multiplier: f64,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            animation: AnimationSettings::default(),
            equalizer: EqualizerSettings::default(),
            iteration_step: DEFAULT_ITERATION_STEP,
            julia_constant: DEFAULT_JULIA_CONSTANT,
            power: MIN_POWER,
            marker_radius: DEFAULT_MARKER_RADIUS,
            scroll_speed_multiplier: 1.0,
        }
    }
}

impl ExplorerConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;

        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_toml_str(&text)
    }

    #[must_use]
    pub fn raster(&self) -> RasterSize {
        RasterSize::new(self.width, self.height)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let animation = &self.animation;
        if !(animation.speed.is_finite() && animation.speed > 0.0) {
            return Err(invalid("animation.speed must be positive"));
        }
        if !(animation.modifier_multiplier.is_finite() && animation.modifier_multiplier > 0.0) {
            return Err(invalid("animation.modifier_multiplier must be positive"));
        }
        if !(animation.zoom_sensitivity > 0.0 && animation.zoom_sensitivity < 1.0) {
            return Err(invalid("animation.zoom_sensitivity must be in (0, 1)"));
        }
        if !(1..=MAX_PRECISION_FACTOR).contains(&self.equalizer.precision_factor) {
            return Err(invalid("equalizer.precision_factor must be in 1..=1024"));
        }
        if self.power < MIN_POWER {
            return Err(invalid("power must be at least 2"));
        }
        if !self.julia_constant.is_finite() {
            return Err(invalid("julia_constant must be finite"));
        }
        if !(self.marker_radius.is_finite() && self.marker_radius >= 0.0) {
            return Err(invalid("marker_radius must be a non-negative number"));
        }
        if !(self.scroll_speed_multiplier.is_finite() && self.scroll_speed_multiplier > 0.0) {
            return Err(invalid("scroll_speed_multiplier must be positive"));
        }

        Ok(())
    }
}

fn invalid(message: &str) -> ConfigError {
    ConfigError::Invalid(message.to_owned())
}
