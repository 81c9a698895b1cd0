//! Pre-processing applied before the "crystal" palette lookup.
//!
//! The input is re-equalized with its own clip limit, brightened with a fixed
//! gamma and stretched back to the full [0, 1] range. Two images that share a
//! normalized value therefore only share a crystal color when this chain
//! produces the same byte for them.

use image::GrayImage;

use crate::enhance::enhance_contrast;
use crate::error::PipelineError;
use crate::gamma::adjust_gamma_f64;
use crate::intensity::{min_max_stretch, to_normalized, GrayImageF64};

pub(crate) const CRYSTAL_CLIP_LIMIT: f64 = 0.05;
pub(crate) const CRYSTAL_GAMMA: f64 = 0.8;

/// CLAHE (clip 0.05, 8x8) → normalize → gamma 0.8 → min-max stretch.
/// Float stages run in `f64`.
pub fn crystal_preprocess(gray: &GrayImage) -> Result<GrayImageF64, PipelineError> {
    let enhanced = enhance_contrast(gray, CRYSTAL_CLIP_LIMIT)?;
    let brightened = adjust_gamma_f64(&to_normalized(&enhanced), CRYSTAL_GAMMA)?;
    let stretched = min_max_stretch(&brightened);
    tracing::debug!(
        "crystal pre-processing on {}x{} image",
        gray.width(),
        gray.height()
    );
    Ok(stretched)
}
