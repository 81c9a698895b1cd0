use std::path::Path;

use crate::colormap::Colormap;
use crate::error::PipelineError;
use crate::modality::{Modality, ModalityProfile, SubType};

/// Lower end of the accepted gamma range.
pub const GAMMA_MIN: f64 = 0.1;
/// Upper end of the accepted gamma range.
pub const GAMMA_MAX: f64 = 3.0;

/// Per-run configuration of the colorization pipeline.
///
/// Missing JSON fields fall back to [`ProcessingParams::default`].
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ProcessingParams {
    pub modality: Modality,
    pub sub_type: SubType,
    pub colormap: Colormap,
    /// Fraction of the enhanced gray image mixed into the output.
    pub blend: f64,
    /// Requested gamma, before the modality multiplier.
    pub gamma: f64,
    /// Enhance flag. Ignored by sub-types that always enhance.
    pub enhance: bool,
}

impl Default for ProcessingParams {
    fn default() -> Self {
        Self {
            modality: Modality::Mri,
            sub_type: SubType::Field1_5T,
            colormap: Colormap::Crystal,
            blend: 0.3,
            gamma: 1.0,
            enhance: true,
        }
    }
}

impl ProcessingParams {
    /// Default parameters for `modality`, with its default sub-type.
    pub fn for_modality(modality: Modality) -> Self {
        Self {
            modality,
            sub_type: modality.default_sub_type(),
            ..Self::default()
        }
    }

    /// Load parameters from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let data = std::fs::read_to_string(path)?;
        let params: Self = serde_json::from_str(&data)?;
        Ok(params.validated()?)
    }

    /// Copy with `blend` clamped to [0, 1] and `gamma` to
    /// [`GAMMA_MIN`], [`GAMMA_MAX`].
    ///
    /// Non-finite values and sub-types foreign to the modality are rejected.
    pub fn validated(&self) -> Result<Self, PipelineError> {
        if !self.blend.is_finite() {
            return Err(PipelineError::InvalidParams(format!(
                "blend must be finite, got {}",
                self.blend
            )));
        }
        if !self.gamma.is_finite() {
            return Err(PipelineError::InvalidParams(format!(
                "gamma must be finite, got {}",
                self.gamma
            )));
        }
        ModalityProfile::lookup(self.modality, self.sub_type)?;
        Ok(Self {
            blend: self.blend.clamp(0.0, 1.0),
            gamma: self.gamma.clamp(GAMMA_MIN, GAMMA_MAX),
            ..*self
        })
    }

    /// Dispatch-table row for the configured modality and sub-type.
    pub fn profile(&self) -> Result<ModalityProfile, PipelineError> {
        ModalityProfile::lookup(self.modality, self.sub_type)
    }
}
