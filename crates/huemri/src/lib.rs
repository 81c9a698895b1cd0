//! huemri: pseudo-color enhancement for grayscale medical images.
//!
//! Takes an 8-bit MRI / X-ray / CT slice and produces an RGB image for visual
//! inspection. The pipeline stages are:
//!
//! 1. **Load** – decode a raster file into an 8-bit luma grid.
//! 2. **Enhance** – contrast-limited adaptive histogram equalization (CLAHE)
//!    with a clip limit picked from the modality table.
//! 3. **Gamma** – power-law remap with a modality-scaled exponent.
//! 4. **Colormap** – 256-entry palette lookup ("crystal" re-enhances first).
//! 5. **Blend** – weighted mix of the enhanced gray image and the colorized one.
//!
//! # Public API
//! - [`Colorizer`] and [`Session`] as primary entry points
//! - [`ProcessingParams`] for the per-run configuration
//! - [`Modality`] / [`SubType`] and the [`ModalityProfile`] dispatch table
//! - stage functions ([`clahe`], [`adjust_gamma_u8`], [`apply_colormap`],
//!   [`blend_with_original`]) for callers that want to compose their own flow

mod api;
mod blend;
mod colormap;
mod enhance;
mod error;
mod gamma;
mod intensity;
mod loader;
mod modality;
mod params;
mod pipeline;
mod preview;

#[cfg(test)]
pub(crate) mod test_utils;

pub use api::{Colorizer, Session};
pub use blend::blend_with_original;
pub use colormap::{apply_colormap, crystal_preprocess, Colormap, ColormapLut};
pub use enhance::{clahe, enhance_contrast, ClaheConfig};
pub use error::{LoadError, PipelineError};
pub use gamma::{adjust_gamma_f64, adjust_gamma_u8, gamma_lut, gamma_value};
pub use intensity::{min_max_stretch, to_normalized, to_u8, GrayImageF64};
pub use loader::{has_supported_extension, load_grayscale, SUPPORTED_EXTENSIONS};
pub use modality::{Modality, ModalityProfile, SubType, PROFILES};
pub use params::{ProcessingParams, GAMMA_MAX, GAMMA_MIN};
pub use pipeline::{process, ProcessReport, Processed};
pub use preview::{fit_to_preview, preview_size, DEFAULT_PREVIEW_SIZE};
