//! Wind state and the per-tick move + edge wrap.
//!
//! Direction is clock-style: 0° is up, 90° right, 180° down, 270° left.
//! One tick is one fixed-size step; there is no time-delta scaling.

use std::fmt;
use std::str::FromStr;

use crate::error::SkyError;
use crate::registry::CloudRegistry;
use crate::render::{display_y, Renderer};

/// Movement per tick at speed 1, in position units.
pub const MAX_STEP_PER_TICK: f64 = 0.5;

/// Spacing kept outside the viewport before a cloud wraps.
pub const DEFAULT_EDGE_MARGIN: f64 = 10.0;

pub const DEFAULT_DIRECTION: f64 = 60.0;

/// Named points on the normalised speed scale.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum SpeedPreset {
    Calm,
    Breeze,
    #[default]
    Light,
    Moderate,
    Strong,
    Fast,
}

impl SpeedPreset {
    #[must_use]
    pub fn value(self) -> f64 {
        match self {
            Self::Calm => 0.05,
            Self::Breeze => 0.1,
            Self::Light => 0.2,
            Self::Moderate => 0.4,
            Self::Strong => 0.6,
            Self::Fast => 1.0,
        }
    }
}

impl FromStr for SpeedPreset {
    type Err = SkyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "calm" => Ok(Self::Calm),
            "breeze" => Ok(Self::Breeze),
            "light" => Ok(Self::Light),
            "moderate" => Ok(Self::Moderate),
            "strong" => Ok(Self::Strong),
            "fast" => Ok(Self::Fast),
            _ => Err(SkyError::UnknownCategory {
                kind: "speed",
                name: s.to_owned(),
            }),
        }
    }
}

impl fmt::Display for SpeedPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Calm => "calm",
            Self::Breeze => "breeze",
            Self::Light => "light",
            Self::Moderate => "moderate",
            Self::Strong => "strong",
            Self::Fast => "fast",
        };
        f.write_str(name)
    }
}

/// Speed is kept in [0, 1]; direction is stored as given, in degrees.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Wind {
    speed: f64,
    direction: f64,
    edge_margin: f64,
    max_step: f64,
}

impl Default for Wind {
    fn default() -> Self {
        Self::new(SpeedPreset::default().value(), DEFAULT_DIRECTION)
    }
}

impl Wind {
    #[must_use]
    pub fn new(speed: f64, direction: f64) -> Self {
        let mut wind = Self {
            speed: 0.0,
            direction: 0.0,
            edge_margin: DEFAULT_EDGE_MARGIN,
            max_step: MAX_STEP_PER_TICK,
        };
        wind.set_speed(speed);
        wind.set_direction(direction);
        wind
    }

    /// Caller guarantees `max_step <= edge_margin`; `SkyConfig::validate` checks it.
    #[must_use]
    pub fn with_bounds(mut self, edge_margin: f64, max_step: f64) -> Self {
        self.edge_margin = edge_margin;
        self.max_step = max_step;
        self
    }

    #[must_use]
    pub fn speed(&self) -> f64 {
        self.speed
    }

    #[must_use]
    pub fn direction(&self) -> f64 {
        self.direction
    }

    #[must_use]
    pub fn edge_margin(&self) -> f64 {
        self.edge_margin
    }

    #[must_use]
    pub fn max_step_per_tick(&self) -> f64 {
        self.max_step
    }

    /// Out-of-range values are clamped, never rejected. NaN counts as calm.
    pub fn set_speed(&mut self, value: f64) {
        self.speed = if value.is_nan() {
            log::warn!("wind speed is NaN, treating as 0");
            0.0
        } else {
            value.clamp(0.0, 1.0)
        };
        log::debug!("wind speed {}", self.speed);
    }

    /// Stored verbatim. Non-finite values would poison every position, so they
    /// are dropped and the previous direction kept.
    pub fn set_direction(&mut self, degrees: f64) {
        if !degrees.is_finite() {
            log::warn!("ignoring non-finite wind direction {degrees}");
            return;
        }
        self.direction = degrees;
        log::debug!("wind direction {degrees}°");
    }

    /// Per-tick (dx, dy) in position units.
    #[must_use]
    pub fn displacement(&self) -> (f64, f64) {
        let radians = self.direction * std::f64::consts::PI / 180.0;
        let step = self.speed * self.max_step;
        (step * radians.sin(), step * radians.cos())
    }

    /// Move every cloud by one step, wrap each axis, then write the new
    /// position through to the renderer.
    pub fn tick<R: Renderer>(&self, clouds: &mut CloudRegistry<R::Handle>, renderer: &mut R) {
        let (dx, dy) = self.displacement();
        for cloud in clouds.iter_mut() {
            let extent = cloud.extent();
            let x = wrap(cloud.position.x + dx, extent.width, self.edge_margin);
            let y = wrap(cloud.position.y + dy, extent.height, self.edge_margin);
            cloud.position.x = x;
            cloud.position.y = y;
            renderer.update_position(cloud.visual(), x, display_y(y));
        }
    }
}

/// Single-axis wrap. A coordinate past the far edge (plus margin) jumps to
/// just beyond the near edge, and vice versa.
#[must_use]
pub fn wrap(coord: f64, extent: f64, margin: f64) -> f64 {
    if coord > 100.0 + margin {
        -extent - margin
    } else if coord < -extent - margin {
        100.0 + margin
    } else {
        coord
    }
}
