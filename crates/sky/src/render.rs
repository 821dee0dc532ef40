//! The seam between the simulation and whatever draws the clouds.
//!
//! The core never looks inside a visual. It asks for one at creation time and
//! writes positions through its handle on every tick. Positions crossing this
//! seam are in the host's top-down convention.

/// Attributes for a new cloud visual. `y` is already flipped to top-down.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct VisualSpec {
    pub width_px: f64,
    pub height_px: f64,
    pub blur_px: f64,
    pub opacity: f64,
    pub x: f64,
    pub y: f64,
}

pub trait Renderer {
    /// Opaque reference to a created visual.
    type Handle;

    fn create_visual(&mut self, spec: &VisualSpec) -> Self::Handle;

    fn update_position(&mut self, handle: &Self::Handle, x: f64, y: f64);
}

/// Bottom-up simulation y to the host's top-down y.
#[must_use]
pub fn display_y(y: f64) -> f64 {
    100.0 - y
}

/// A visual held by `MemoryRenderer`, with its latest displayed position.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct MemoryVisual {
    pub spec: VisualSpec,
    pub x: f64,
    pub y: f64,
    pub updates: u64,
}

/// Headless renderer: keeps every visual in a `Vec`, handles are indices.
#[derive(Debug, Default)]
pub struct MemoryRenderer {
    visuals: Vec<MemoryVisual>,
}

impl MemoryRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn visuals(&self) -> &[MemoryVisual] {
        &self.visuals
    }

    #[must_use]
    pub fn get(&self, handle: usize) -> Option<&MemoryVisual> {
        self.visuals.get(handle)
    }
}

impl Renderer for MemoryRenderer {
    type Handle = usize;

    fn create_visual(&mut self, spec: &VisualSpec) -> usize {
        self.visuals.push(MemoryVisual {
            spec: *spec,
            x: spec.x,
            y: spec.y,
            updates: 0,
        });
        self.visuals.len() - 1
    }

    fn update_position(&mut self, handle: &usize, x: f64, y: f64) {
        if let Some(visual) = self.visuals.get_mut(*handle) {
            visual.x = x;
            visual.y = y;
            visual.updates += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec() -> VisualSpec {
        VisualSpec {
            width_px: 220.0,
            height_px: 220.0,
            blur_px: 85.0,
            opacity: 0.68,
            x: 10.0,
            y: 40.0,
        }
    }

    #[test]
    fn display_y_flips_axis() {
        assert!((display_y(0.0) - 100.0).abs() < 1e-12);
        assert!((display_y(100.0)).abs() < 1e-12);
        assert!((display_y(-10.0) - 110.0).abs() < 1e-12);
    }

    #[test]
    fn memory_renderer_hands_out_sequential_handles() {
        let mut renderer = MemoryRenderer::new();
        assert_eq!(renderer.create_visual(&spec()), 0);
        assert_eq!(renderer.create_visual(&spec()), 1);
        assert_eq!(renderer.visuals().len(), 2);
    }

    #[test]
    fn memory_renderer_records_updates() {
        let mut renderer = MemoryRenderer::new();
        let handle = renderer.create_visual(&spec());
        renderer.update_position(&handle, 12.5, 60.0);
        renderer.update_position(&handle, 13.0, 59.5);

        let visual = renderer.get(handle).unwrap();
        assert_eq!(visual.updates, 2);
        assert!((visual.x - 13.0).abs() < 1e-12);
        assert!((visual.y - 59.5).abs() < 1e-12);
        assert_eq!(visual.spec, spec());
    }

    #[test]
    fn memory_renderer_ignores_unknown_handle() {
        let mut renderer = MemoryRenderer::new();
        renderer.update_position(&7, 1.0, 1.0);
        assert!(renderer.visuals().is_empty());
    }
}
