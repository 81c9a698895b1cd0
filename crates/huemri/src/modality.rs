//! Imaging modalities and the per-(modality, sub-type) processing table.

use std::fmt;

use crate::colormap::Colormap;
use crate::error::PipelineError;

/// Imaging modality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modality {
    #[default]
    Mri,
    #[serde(alias = "x-ray")]
    Xray,
    Ct,
}

/// Acquisition sub-type within a modality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum SubType {
    /// 1.5 tesla MRI.
    #[serde(rename = "1.5T")]
    Field1_5T,
    /// 3 tesla MRI.
    #[serde(rename = "3T")]
    Field3T,
    #[serde(rename = "standard")]
    Standard,
    #[serde(rename = "highres")]
    HighRes,
    /// Low-dose CT.
    #[serde(rename = "lowdose")]
    LowDose,
}

/// Enhancement constants for one (modality, sub-type) pair.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct ModalityProfile {
    pub modality: Modality,
    pub sub_type: SubType,
    /// CLAHE clip limit.
    pub clip_limit: f64,
    /// Multiplier applied to the requested gamma.
    pub gamma_scale: f64,
    /// Whether enhancement runs regardless of the user's enhance flag.
    pub always_enhance: bool,
}

const fn row(
    modality: Modality,
    sub_type: SubType,
    clip_limit: f64,
    gamma_scale: f64,
    always_enhance: bool,
) -> ModalityProfile {
    ModalityProfile {
        modality,
        sub_type,
        clip_limit,
        gamma_scale,
        always_enhance,
    }
}

/// The dispatch table. "Standard" rows honour the enhance flag; the
/// advanced acquisitions are always enhanced.
pub const PROFILES: [ModalityProfile; 7] = [
    row(Modality::Mri, SubType::Field3T, 0.05, 0.9, true),
    row(Modality::Mri, SubType::Field1_5T, 0.03, 1.0, false),
    row(Modality::Xray, SubType::HighRes, 0.03, 0.7, true),
    row(Modality::Xray, SubType::Standard, 0.02, 1.0, false),
    row(Modality::Ct, SubType::HighRes, 0.04, 0.8, true),
    row(Modality::Ct, SubType::LowDose, 0.06, 1.2, true),
    row(Modality::Ct, SubType::Standard, 0.03, 1.0, false),
];

impl ModalityProfile {
    /// Look up the row for `(modality, sub_type)`.
    pub fn lookup(modality: Modality, sub_type: SubType) -> Result<Self, PipelineError> {
        PROFILES
            .iter()
            .find(|p| p.modality == modality && p.sub_type == sub_type)
            .copied()
            .ok_or(PipelineError::SubTypeMismatch { modality, sub_type })
    }

    /// Clip limit to enhance with, or `None` when the step is skipped.
    pub fn clip_limit_for(&self, enhance: bool) -> Option<f64> {
        (self.always_enhance || enhance).then_some(self.clip_limit)
    }

    /// Exponent to gamma-correct with, or `None` when the requested gamma
    /// is exactly 1 and the step is skipped.
    pub fn effective_gamma(&self, gamma: f64) -> Option<f64> {
        (gamma != 1.0).then(|| gamma * self.gamma_scale)
    }
}

impl Modality {
    pub const ALL: [Modality; 3] = [Modality::Mri, Modality::Xray, Modality::Ct];

    /// Sub-types offered for this modality, default first.
    pub fn sub_types(self) -> &'static [SubType] {
        match self {
            Modality::Mri => &[SubType::Field1_5T, SubType::Field3T],
            Modality::Xray => &[SubType::Standard, SubType::HighRes],
            Modality::Ct => &[SubType::Standard, SubType::HighRes, SubType::LowDose],
        }
    }

    pub fn default_sub_type(self) -> SubType {
        self.sub_types()[0]
    }

    /// Palettes offered for this modality, crystal first.
    pub fn colormaps(self) -> &'static [Colormap] {
        match self {
            Modality::Mri => &[
                Colormap::Crystal,
                Colormap::Medical,
                Colormap::Bone,
                Colormap::Cool,
                Colormap::Viridis,
                Colormap::Plasma,
            ],
            Modality::Xray | Modality::Ct => &[
                Colormap::Crystal,
                Colormap::Bone,
                Colormap::Gray,
                Colormap::Hot,
                Colormap::Copper,
            ],
        }
    }

    /// What the crystal palette is tuned to bring out for this modality.
    pub fn crystal_description(self) -> &'static str {
        match self {
            Modality::Mri => "Crystal: Enhanced detail visibility for nerves and soft tissues",
            Modality::Xray => "Crystal: Enhanced detail visibility for bones and structures",
            Modality::Ct => "Crystal: Enhanced detail visibility for soft tissues and bones",
        }
    }
}

impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Modality::Mri => "MRI",
            Modality::Xray => "X-ray",
            Modality::Ct => "CT",
        })
    }
}

impl fmt::Display for SubType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SubType::Field1_5T => "1.5T",
            SubType::Field3T => "3T",
            SubType::Standard => "standard",
            SubType::HighRes => "highres",
            SubType::LowDose => "lowdose",
        })
    }
}
