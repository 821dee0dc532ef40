//! Cloud entities and the ordered registry the wind iterates.

use serde::Deserialize;

use crate::category::{Size, Thickness};
use crate::error::{Result, SkyError};
use crate::render::{display_y, Renderer, VisualSpec};

/// Position in percent-of-viewport units. y = 0 is the bottom edge.
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Cloud footprint in the same units as `Position`.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Extent {
    pub width: f64,
    pub height: f64,
}

/// Host viewport width, used to turn pixel sizes into position units.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Viewport {
    width_px: f64,
}

impl Viewport {
    pub fn new(width_px: f64) -> Result<Self> {
        if width_px.is_finite() && width_px > 0.0 {
            Ok(Self { width_px })
        } else {
            Err(SkyError::InvalidViewport(width_px))
        }
    }

    #[must_use]
    pub fn width_px(self) -> f64 {
        self.width_px
    }

    #[must_use]
    pub fn px_to_units(self, px: f64) -> f64 {
        px / self.width_px * 100.0
    }
}

/// What a caller asks for. Coordinates are not range-checked.
#[derive(Clone, Copy, PartialEq, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CloudParams {
    pub x: f64,
    pub y: f64,
    pub size: Size,
    pub thickness: Thickness,
}

impl Default for CloudParams {
    fn default() -> Self {
        Self::new(50.0, 50.0, Size::Md, Thickness::Thick)
    }
}

impl CloudParams {
    #[must_use]
    pub const fn new(x: f64, y: f64, size: Size, thickness: Thickness) -> Self {
        Self { x, y, size, thickness }
    }

    /// Builds params from free-form category names, falling back on unknowns.
    #[must_use]
    pub fn from_names(x: f64, y: f64, size: &str, thickness: &str) -> Self {
        Self::new(x, y, Size::from_name(size), Thickness::from_name(thickness))
    }
}

#[derive(Debug)]
pub struct Cloud<H> {
    pub position: Position,
    extent: Extent,
    size: Size,
    thickness: Thickness,
    visual: H,
}

impl<H> Cloud<H> {
    /// Fixed at creation; not recomputed if the viewport later resizes.
    #[must_use]
    pub fn extent(&self) -> Extent {
        self.extent
    }

    #[must_use]
    pub fn size(&self) -> Size {
        self.size
    }

    #[must_use]
    pub fn thickness(&self) -> Thickness {
        self.thickness
    }

    #[must_use]
    pub fn visual(&self) -> &H {
        &self.visual
    }
}

/// Insertion order is iteration order and z-order.
#[derive(Debug)]
pub struct CloudRegistry<H> {
    clouds: Vec<Cloud<H>>,
}

impl<H> Default for CloudRegistry<H> {
    fn default() -> Self {
        Self { clouds: Vec::new() }
    }
}

impl<H> CloudRegistry<H> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Map the categories to visual attributes, ask the renderer for a visual
    /// and append the cloud.
    pub fn create<R>(&mut self, params: &CloudParams, viewport: Viewport, renderer: &mut R) -> &Cloud<H>
    where
        R: Renderer<Handle = H>,
    {
        let size = params.size.spec();
        let opacity = params.thickness.opacity();
        let side = viewport.px_to_units(size.extent_px);

        let visual = renderer.create_visual(&VisualSpec {
            width_px: size.extent_px,
            height_px: size.extent_px,
            blur_px: size.blur_px,
            opacity,
            x: params.x,
            y: display_y(params.y),
        });

        log::debug!(
            "cloud #{} {}/{} at ({}, {})",
            self.clouds.len(),
            params.size,
            params.thickness,
            params.x,
            params.y
        );

        self.clouds.push(Cloud {
            position: Position { x: params.x, y: params.y },
            extent: Extent { width: side, height: side },
            size: params.size,
            thickness: params.thickness,
            visual,
        });
        &self.clouds[self.clouds.len() - 1]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.clouds.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clouds.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Cloud<H>> {
        self.clouds.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Cloud<H>> {
        self.clouds.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Cloud<H>> {
        self.clouds.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::MemoryRenderer;
    use proptest::prelude::*;

    fn viewport() -> Viewport {
        Viewport::new(1000.0).unwrap()
    }

    #[test]
    fn viewport_rejects_non_positive_or_non_finite() {
        assert!(Viewport::new(0.0).is_err());
        assert!(Viewport::new(-5.0).is_err());
        assert!(Viewport::new(f64::NAN).is_err());
        assert!(Viewport::new(f64::INFINITY).is_err());
        assert!(matches!(Viewport::new(0.0), Err(SkyError::InvalidViewport(_))));
    }

    #[test]
    fn params_default_to_centre_md_thick() {
        let params = CloudParams::default();
        assert_eq!(params, CloudParams::new(50.0, 50.0, Size::Md, Thickness::Thick));
    }

    #[test]
    fn create_converts_extent_to_viewport_units() {
        let mut registry = CloudRegistry::new();
        let mut renderer = MemoryRenderer::new();
        let params = CloudParams::new(10.0, 20.0, Size::Lg, Thickness::Thin);

        let cloud = registry.create(&params, viewport(), &mut renderer);
        assert!((cloud.extent().width - 28.0).abs() < 1e-9);
        assert!((cloud.extent().height - 28.0).abs() < 1e-9);
        assert_eq!(cloud.position, Position { x: 10.0, y: 20.0 });
        assert_eq!(cloud.size(), Size::Lg);
        assert_eq!(cloud.thickness(), Thickness::Thin);
    }

    #[test]
    fn create_requests_visual_in_host_convention() {
        let mut registry = CloudRegistry::new();
        let mut renderer = MemoryRenderer::new();
        let params = CloudParams::new(-30.0, 30.0, Size::Xl, Thickness::Thickest);

        let handle = *registry.create(&params, viewport(), &mut renderer).visual();
        let spec = renderer.get(handle).unwrap().spec;
        assert!((spec.width_px - 340.0).abs() < 1e-12);
        assert!((spec.height_px - 340.0).abs() < 1e-12);
        assert!((spec.blur_px - 120.0).abs() < 1e-12);
        assert!((spec.opacity - 0.95).abs() < 1e-12);
        assert!((spec.x + 30.0).abs() < 1e-12);
        assert!((spec.y - 70.0).abs() < 1e-12);
    }

    #[test]
    fn create_preserves_insertion_order() {
        let mut registry = CloudRegistry::new();
        let mut renderer = MemoryRenderer::new();
        for i in 0..5 {
            let x = f64::from(i) * 10.0;
            registry.create(&CloudParams { x, ..CloudParams::default() }, viewport(), &mut renderer);
        }
        let xs: Vec<f64> = registry.iter().map(|c| c.position.x).collect();
        assert_eq!(xs, vec![0.0, 10.0, 20.0, 30.0, 40.0]);
        let handles: Vec<usize> = registry.iter().map(|c| *c.visual()).collect();
        assert_eq!(handles, vec![0, 1, 2, 3, 4]);
        assert_eq!(registry.len(), 5);
    }

    #[test]
    fn from_names_falls_back_on_unknown_categories() {
        let params = CloudParams::from_names(1.0, 2.0, "gigantic", "soupy");
        assert_eq!(params.size, Size::Md);
        assert_eq!(params.thickness, Thickness::Thick);
    }

    proptest! {
        #[test]
        fn prop_extent_positive_and_matches_table(
            width_px in 1.0f64..10_000.0,
            size_idx in 0usize..5,
            x in -500.0f64..500.0,
            y in -500.0f64..500.0,
        ) {
            let size = Size::ALL[size_idx];
            let mut registry = CloudRegistry::new();
            let mut renderer = MemoryRenderer::new();
            let vp = Viewport::new(width_px).unwrap();
            let cloud = registry.create(
                &CloudParams::new(x, y, size, Thickness::Thick),
                vp,
                &mut renderer,
            );
            let expected = size.spec().extent_px / width_px * 100.0;
            prop_assert!(cloud.extent().width > 0.0);
            prop_assert!((cloud.extent().width - expected).abs() < 1e-9);
            prop_assert!((cloud.extent().height - cloud.extent().width).abs() < f64::EPSILON);
        }
    }
}
