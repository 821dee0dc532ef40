//! Sky setup loaded from TOML.
//!
//! Every field is optional; missing ones take the defaults below.
//!
//! ```toml
//! viewport_width_px = 1920
//! wind_speed = 0.4
//! wind_direction = 90
//!
//! [[clouds]]
//! x = 20
//! y = 40
//! size = "lg"
//! thickness = "thicker"
//! ```

use serde::Deserialize;

use crate::error::{Result, SkyError};
use crate::registry::{CloudParams, Viewport};
use crate::scene::default_scene;
use crate::wind::{SpeedPreset, Wind, DEFAULT_DIRECTION, DEFAULT_EDGE_MARGIN, MAX_STEP_PER_TICK};

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SkyConfig {
    pub viewport_width_px: f64,
    pub wind_speed: f64,
    pub wind_direction: f64,
    pub edge_margin: f64,
    pub max_step_per_tick: f64,
    /// Created in order when the sky is built.
    pub clouds: Vec<CloudParams>,
}

impl Default for SkyConfig {
    fn default() -> Self {
        Self {
            viewport_width_px: 1280.0,
            wind_speed: SpeedPreset::default().value(),
            wind_direction: DEFAULT_DIRECTION,
            edge_margin: DEFAULT_EDGE_MARGIN,
            max_step_per_tick: MAX_STEP_PER_TICK,
            clouds: default_scene().to_vec(),
        }
    }
}

impl SkyConfig {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.viewport()?;
        if !self.wind_speed.is_finite() {
            return Err(invalid("wind_speed", "must be finite"));
        }
        if !self.wind_direction.is_finite() {
            return Err(invalid("wind_direction", "must be finite"));
        }
        if !self.edge_margin.is_finite() || self.edge_margin < 0.0 {
            return Err(invalid("edge_margin", "must be finite and non-negative"));
        }
        // A single step must not be able to jump over both wrap thresholds.
        if !self.max_step_per_tick.is_finite()
            || self.max_step_per_tick < 0.0
            || self.max_step_per_tick > self.edge_margin
        {
            return Err(invalid(
                "max_step_per_tick",
                "must be finite, non-negative and no larger than edge_margin",
            ));
        }
        Ok(())
    }

    pub fn viewport(&self) -> Result<Viewport> {
        Viewport::new(self.viewport_width_px)
    }

    #[must_use]
    pub fn wind(&self) -> Wind {
        Wind::new(self.wind_speed, self.wind_direction)
            .with_bounds(self.edge_margin, self.max_step_per_tick)
    }
}

fn invalid(field: &'static str, reason: &str) -> SkyError {
    SkyError::InvalidConfig {
        field,
        reason: reason.to_owned(),
    }
}
