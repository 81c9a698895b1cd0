//! Shared synthetic images for unit tests.

use image::{GrayImage, Luma};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Constant-intensity image.
pub(crate) fn flat_image(w: u32, h: u32, value: u8) -> GrayImage {
    GrayImage::from_pixel(w, h, Luma([value]))
}

/// Left-to-right linear ramp from `lo` (first column) to `hi` (last column).
pub(crate) fn horizontal_ramp(w: u32, h: u32, lo: u8, hi: u8) -> GrayImage {
    let span = hi as f32 - lo as f32;
    let denom = (w.max(2) - 1) as f32;
    GrayImage::from_fn(w, h, |x, _| {
        let v = lo as f32 + span * x as f32 / denom;
        Luma([v.round() as u8])
    })
}

/// Uniform random noise, reproducible from `seed`.
pub(crate) fn noise_image(w: u32, h: u32, seed: u64) -> GrayImage {
    let mut rng = StdRng::seed_from_u64(seed);
    GrayImage::from_fn(w, h, |_, _| Luma([rng.gen::<u8>()]))
}
