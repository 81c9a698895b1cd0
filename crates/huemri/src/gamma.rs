//! Power-law intensity remapping (`out = in^gamma`).

use image::GrayImage;
use imageproc::map::map_colors;

use crate::error::PipelineError;
use crate::intensity::GrayImageF64;

pub(crate) fn validate_gamma(gamma: f64) -> Result<(), PipelineError> {
    if gamma.is_finite() && gamma > 0.0 {
        Ok(())
    } else {
        Err(PipelineError::InvalidGamma(gamma))
    }
}

/// Gamma-correct a single normalized value. The input is clamped to [0, 1]
/// first so fractional exponents never see a negative base.
#[inline]
pub fn gamma_value(v: f64, gamma: f64) -> f64 {
    if gamma == 1.0 {
        return v;
    }
    v.clamp(0.0, 1.0).powf(gamma)
}

/// Gamma-correct a normalized grid. `gamma == 1` returns the input unchanged.
pub fn adjust_gamma_f64(img: &GrayImageF64, gamma: f64) -> Result<GrayImageF64, PipelineError> {
    validate_gamma(gamma)?;
    let mut out = img.clone();
    if gamma != 1.0 {
        out.iter_mut().for_each(|v| *v = gamma_value(*v, gamma));
    }
    Ok(out)
}

/// 256-entry table `min(rint(255 * (i / 255)^gamma), 255)`.
pub fn gamma_lut(gamma: f64) -> Result<[u8; 256], PipelineError> {
    validate_gamma(gamma)?;
    let mut lut = [0u8; 256];
    for (i, slot) in lut.iter_mut().enumerate() {
        let v = 255.0 * (i as f64 / 255.0).powf(gamma);
        *slot = v.round_ties_even().min(255.0) as u8;
    }
    Ok(lut)
}

/// Gamma-correct an 8-bit image through [`gamma_lut`].
pub fn adjust_gamma_u8(gray: &GrayImage, gamma: f64) -> Result<GrayImage, PipelineError> {
    if gamma == 1.0 {
        return Ok(gray.clone());
    }
    let lut = gamma_lut(gamma)?;
    Ok(map_colors(gray, |p| image::Luma([lut[p[0] as usize]])))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{horizontal_ramp, noise_image};
    use approx::assert_relative_eq;
    use image::Luma;

    #[test]
    fn unit_gamma_is_identity() {
        let img = GrayImageF64::from_fn(16, 4, |x, y| Luma([(x * y) as f64 / 60.0]));
        assert_eq!(adjust_gamma_f64(&img, 1.0).unwrap(), img);

        let gray = noise_image(33, 17, 3);
        assert_eq!(adjust_gamma_u8(&gray, 1.0).unwrap(), gray);
    }

    #[test]
    fn squares_half_to_quarter() {
        assert_relative_eq!(gamma_value(0.5, 2.0), 0.25);
        let img = GrayImageF64::from_pixel(2, 2, Luma([0.5]));
        let out = adjust_gamma_f64(&img, 2.0).unwrap();
        assert!(out.iter().all(|&v| (v - 0.25).abs() < 1e-12));
    }

    #[test]
    fn clamps_before_exponentiation() {
        assert_eq!(gamma_value(-0.3, 0.5), 0.0);
        assert_eq!(gamma_value(1.7, 2.0), 1.0);
    }

    #[test]
    fn lut_keeps_endpoints_and_is_monotonic() {
        for &g in &[0.3, 0.8, 1.2, 2.7] {
            let lut = gamma_lut(g).unwrap();
            assert_eq!(lut[0], 0);
            assert_eq!(lut[255], 255);
            assert!(lut.windows(2).all(|w| w[0] <= w[1]));
        }
    }

    #[test]
    fn brightening_gamma_lifts_midtones() {
        let gray = horizontal_ramp(64, 1, 0, 255);
        let out = adjust_gamma_u8(&gray, 0.5).unwrap();
        for (a, b) in gray.pixels().zip(out.pixels()) {
            assert!(b[0] >= a[0]);
        }
        assert_eq!(gamma_lut(0.5).unwrap()[64], 128);
    }

    #[test]
    fn rejects_non_positive_gamma() {
        assert!(matches!(gamma_lut(0.0), Err(PipelineError::InvalidGamma(_))));
        assert!(adjust_gamma_u8(&noise_image(2, 2, 1), f64::NAN).is_err());
    }
}
