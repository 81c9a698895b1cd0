use image::{GrayImage, Rgb, RgbImage};
use imageproc::map::map_colors2;

use crate::error::PipelineError;

/// Mix a grayscale image (replicated to three channels) into a colorized one.
///
/// Each channel becomes `round(weight * gray + (1 - weight) * colored)`,
/// saturated to 8 bits. `weight == 1` reproduces the gray image and
/// `weight == 0` the colorized one.
pub fn blend_with_original(
    original: &GrayImage,
    colored: &RgbImage,
    weight: f64,
) -> Result<RgbImage, PipelineError> {
    if !(0.0..=1.0).contains(&weight) {
        return Err(PipelineError::InvalidBlend(weight));
    }
    if original.dimensions() != colored.dimensions() {
        return Err(PipelineError::DimensionMismatch {
            left: original.dimensions(),
            right: colored.dimensions(),
        });
    }

    let alpha = weight as f32;
    let beta = 1.0 - alpha;
    let mix = |o: u8, c: u8| -> u8 {
        (o as f32 * alpha + c as f32 * beta)
            .round_ties_even()
            .clamp(0.0, 255.0) as u8
    };
    Ok(map_colors2(original, colored, |g, c| {
        Rgb([mix(g[0], c[0]), mix(g[0], c[1]), mix(g[0], c[2])])
    }))
}
