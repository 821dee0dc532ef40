//! Wind-driven cloud backdrop.
//!
//! A `Sky` owns a viewport, the wind, an ordered set of clouds and the
//! renderer that draws them. The host calls `tick()` once per frame.

pub mod category;
pub mod config;
pub mod error;
pub mod registry;
pub mod render;
pub mod scene;
pub mod wind;

#[cfg(target_arch = "wasm32")]
pub mod web;

use std::fmt;

use rand::Rng;

pub use category::{Size, Thickness};
pub use config::SkyConfig;
pub use error::{Result, SkyError};
pub use registry::{Cloud, CloudParams, CloudRegistry, Extent, Position, Viewport};
pub use render::{MemoryRenderer, Renderer, VisualSpec};
pub use wind::{SpeedPreset, Wind};

/// One independent sky. Nothing here is global; several can coexist.
pub struct Sky<R: Renderer> {
    viewport: Viewport,
    wind: Wind,
    clouds: CloudRegistry<R::Handle>,
    renderer: R,
    ticks: u64,
}

impl<R: Renderer> fmt::Debug for Sky<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sky")
            .field("viewport", &self.viewport)
            .field("wind", &self.wind)
            .field("clouds", &self.clouds.len())
            .field("ticks", &self.ticks)
            .finish_non_exhaustive()
    }
}

impl<R: Renderer> Sky<R> {
    /// Validate `config` and create its clouds in order.
    pub fn new(config: &SkyConfig, renderer: R) -> Result<Self> {
        config.validate()?;
        let mut sky = Self {
            viewport: config.viewport()?,
            wind: config.wind(),
            clouds: CloudRegistry::new(),
            renderer,
            ticks: 0,
        };
        for params in &config.clouds {
            sky.create(params);
        }
        log::info!(
            "sky ready: {} clouds, {}px viewport",
            sky.clouds.len(),
            sky.viewport.width_px()
        );
        Ok(sky)
    }

    /// An empty sky with the default wind.
    pub fn with_viewport(viewport: Viewport, renderer: R) -> Self {
        Self {
            viewport,
            wind: Wind::default(),
            clouds: CloudRegistry::new(),
            renderer,
            ticks: 0,
        }
    }

    pub fn create(&mut self, params: &CloudParams) -> &Cloud<R::Handle> {
        self.clouds.create(params, self.viewport, &mut self.renderer)
    }

    pub fn add_random_cloud<G: Rng + ?Sized>(&mut self, rng: &mut G) -> &Cloud<R::Handle> {
        let params = scene::random_cloud(rng);
        self.create(&params)
    }

    pub fn set_wind_speed(&mut self, value: f64) {
        self.wind.set_speed(value);
    }

    pub fn set_wind_direction(&mut self, degrees: f64) {
        self.wind.set_direction(degrees);
    }

    /// Advance every cloud by one step.
    pub fn tick(&mut self) {
        self.ticks = self.ticks.wrapping_add(1);
        self.wind.tick(&mut self.clouds, &mut self.renderer);
    }

    #[must_use]
    pub fn wind(&self) -> &Wind {
        &self.wind
    }

    #[must_use]
    pub fn clouds(&self) -> &CloudRegistry<R::Handle> {
        &self.clouds
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    #[must_use]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}
