use std::path::PathBuf;

use crate::modality::{Modality, SubType};

/// Rejections raised by the processing stages.
///
/// Every variant describes a malformed input (shape, range, unknown name);
/// well-formed inputs never fail.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("image is empty ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },

    #[error("image dimensions differ: {left:?} vs {right:?}")]
    DimensionMismatch { left: (u32, u32), right: (u32, u32) },

    #[error("gamma must be finite and > 0, got {0}")]
    InvalidGamma(f64),

    #[error("blend weight must be within [0, 1], got {0}")]
    InvalidBlend(f64),

    #[error("tile grid must be at least 1x1, got {0}x{1}")]
    InvalidTileGrid(u32, u32),

    #[error("unknown colormap '{0}'")]
    UnknownColormap(String),

    #[error("sub-type '{sub_type}' is not available for {modality}")]
    SubTypeMismatch { modality: Modality, sub_type: SubType },

    #[error("invalid parameter: {0}")]
    InvalidParams(String),
}

/// Failure to obtain an intensity grid from disk.
///
/// Callers treat this as recoverable: the previously loaded image stays in
/// place and no processing happens.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

impl PipelineError {
    pub(crate) fn empty(width: u32, height: u32) -> Self {
        Self::EmptyImage { width, height }
    }
}
