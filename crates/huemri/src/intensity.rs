//! Conversions between 8-bit and normalized floating-point intensity grids.

use image::{GrayImage, ImageBuffer, Luma};

/// Single-channel image with samples normalized to [0, 1].
pub type GrayImageF64 = ImageBuffer<Luma<f64>, Vec<f64>>;

/// Map 8-bit samples to [0, 1] (`v / 255`).
pub fn to_normalized(gray: &GrayImage) -> GrayImageF64 {
    let (w, h) = gray.dimensions();
    let data = gray.as_raw().iter().map(|&v| v as f64 / 255.0).collect();
    GrayImageF64::from_raw(w, h, data).unwrap_or_else(|| GrayImageF64::new(w, h))
}

/// Map normalized samples back to 8 bits, rounding half to even and
/// saturating out-of-range values.
pub fn to_u8(img: &GrayImageF64) -> GrayImage {
    let (w, h) = img.dimensions();
    let data = img.as_raw().iter().map(|&v| unit_to_u8(v)).collect();
    GrayImage::from_raw(w, h, data).unwrap_or_else(|| GrayImage::new(w, h))
}

/// Stretch samples linearly so the minimum maps to 0 and the maximum to 1.
///
/// A flat image (max == min) has no range to stretch and maps to 0
/// everywhere.
pub fn min_max_stretch(img: &GrayImageF64) -> GrayImageF64 {
    let (lo, hi) = min_max(img.as_raw());
    let range = hi - lo;
    let mut out = img.clone();
    if range <= 0.0 || !range.is_finite() {
        out.iter_mut().for_each(|v| *v = 0.0);
        return out;
    }
    out.iter_mut().for_each(|v| *v = (*v - lo) / range);
    out
}

pub(crate) fn min_max(data: &[f64]) -> (f64, f64) {
    data.iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        })
}

#[inline]
pub(crate) fn unit_to_u8(v: f64) -> u8 {
    (v * 255.0).round_ties_even().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::horizontal_ramp;
    use approx::assert_relative_eq;

    #[test]
    fn normalize_then_quantize_is_lossless() {
        let gray = horizontal_ramp(256, 2, 0, 255);
        assert_eq!(to_u8(&to_normalized(&gray)), gray);
    }

    #[test]
    fn stretch_maps_extremes_to_unit_range() {
        let img = GrayImageF64::from_raw(3, 1, vec![0.2, 0.5, 0.6]).unwrap();
        let out = min_max_stretch(&img);
        assert_relative_eq!(out.get_pixel(0, 0)[0], 0.0);
        assert_relative_eq!(out.get_pixel(1, 0)[0], 0.75, epsilon = 1e-12);
        assert_relative_eq!(out.get_pixel(2, 0)[0], 1.0);
    }

    #[test]
    fn stretch_of_flat_image_is_zero() {
        let img = GrayImageF64::from_pixel(4, 4, Luma([0.7]));
        assert!(min_max_stretch(&img).iter().all(|&v| v == 0.0));
    }
}
