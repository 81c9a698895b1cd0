use image::RgbImage;

use crate::colormap::Colormap;
use crate::modality::{Modality, SubType};

/// Summary of one pipeline run.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ProcessReport {
    /// Image dimensions [width, height].
    pub image_size: [u32; 2],
    pub modality: Modality,
    pub sub_type: SubType,
    pub colormap: Colormap,
    /// CLAHE clip limit, if the enhancement step ran.
    pub clip_limit: Option<f64>,
    /// Gamma exponent after the modality multiplier, if gamma ran.
    pub effective_gamma: Option<f64>,
    /// Blend weight, if the gray image was mixed back in.
    pub blend: Option<f64>,
}

/// Output image plus the report describing how it was made.
#[derive(Debug, Clone)]
pub struct Processed {
    pub image: RgbImage,
    pub report: ProcessReport,
}
