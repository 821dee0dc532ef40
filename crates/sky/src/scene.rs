//! Ready-made cloud layouts: the opening sky and the "add a cloud" button.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::category::{Size, Thickness};
use crate::registry::CloudParams;

const DEFAULT_SCENE: [CloudParams; 9] = [
    CloudParams::new(-30.0, 30.0, Size::Xl, Thickness::Thickest),
    CloudParams::new(-10.0, 55.0, Size::Lg, Thickness::Thick),
    CloudParams::new(0.0, -10.0, Size::Xl, Thickness::Thickest),
    CloudParams::new(10.0, 35.0, Size::Lg, Thickness::Thick),
    CloudParams::new(45.0, 25.0, Size::Md, Thickness::Thicker),
    CloudParams::new(5.0, 17.0, Size::Lg, Thickness::Thicker),
    CloudParams::new(30.0, 7.0, Size::Md, Thickness::Thin),
    CloudParams::new(55.0, 60.0, Size::Lg, Thickness::Thickest),
    CloudParams::new(20.0, 40.0, Size::Sm, Thickness::Thinnest),
];

/// The low bank of clouds the sky opens with, back to front.
#[must_use]
pub fn default_scene() -> &'static [CloudParams] {
    &DEFAULT_SCENE
}

/// Uniform position in [0, 100) on both axes, uniform size and thickness.
pub fn random_cloud<R: Rng + ?Sized>(rng: &mut R) -> CloudParams {
    let x = rng.gen_range(0.0..100.0);
    let y = rng.gen_range(0.0..100.0);
    let size = Size::ALL.choose(rng).copied().unwrap_or_default();
    let thickness = Thickness::ALL.choose(rng).copied().unwrap_or_default();
    CloudParams::new(x, y, size, thickness)
}
