use image::GrayImage;

use crate::blend::blend_with_original;
use crate::colormap::apply_colormap;
use crate::enhance::enhance_contrast;
use crate::error::PipelineError;
use crate::gamma::adjust_gamma_u8;
use crate::params::ProcessingParams;

use super::result::{ProcessReport, Processed};

/// Run the full pipeline on one 8-bit image.
///
/// `params` is validated first (ranges clamped, foreign sub-types rejected).
/// Enhancement is skipped when the enhance flag is off and the sub-type does
/// not force it; gamma is skipped when the requested gamma is exactly 1; the
/// blend is skipped at weight 0.
pub fn process(gray: &GrayImage, params: &ProcessingParams) -> Result<Processed, PipelineError> {
    let (w, h) = gray.dimensions();
    if w == 0 || h == 0 {
        return Err(PipelineError::empty(w, h));
    }
    let params = params.validated()?;
    let profile = params.profile()?;

    tracing::info!(
        "processing {}x{} image: {} {} / {}",
        w,
        h,
        params.modality,
        params.sub_type,
        params.colormap
    );

    let clip_limit = profile.clip_limit_for(params.enhance);
    let enhanced = match clip_limit {
        Some(clip) => {
            tracing::debug!("enhance: CLAHE clip limit {clip}");
            enhance_contrast(gray, clip)?
        }
        None => {
            tracing::debug!("enhance: skipped");
            gray.clone()
        }
    };

    let effective_gamma = profile.effective_gamma(params.gamma);
    let corrected = match effective_gamma {
        Some(g) => {
            tracing::debug!("gamma: {} x {} = {g}", params.gamma, profile.gamma_scale);
            adjust_gamma_u8(&enhanced, g)?
        }
        None => enhanced,
    };

    let colored = apply_colormap(&corrected, params.colormap)?;

    let (image, blend) = if params.blend > 0.0 {
        tracing::debug!("blend: weight {}", params.blend);
        (
            blend_with_original(&corrected, &colored, params.blend)?,
            Some(params.blend),
        )
    } else {
        (colored, None)
    };

    Ok(Processed {
        image,
        report: ProcessReport {
            image_size: [w, h],
            modality: params.modality,
            sub_type: params.sub_type,
            colormap: params.colormap,
            clip_limit,
            effective_gamma,
            blend,
        },
    })
}
