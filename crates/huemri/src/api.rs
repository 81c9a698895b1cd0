//! High-level colorization API.
//!
//! [`Colorizer`] is the stateless entry point: configure once, colorize many
//! images. [`Session`] adds the "current image" of an interactive tool, so
//! parameter changes can be re-applied without reloading.

use image::GrayImage;
use std::path::Path;

use crate::error::{LoadError, PipelineError};
use crate::loader::load_grayscale;
use crate::params::ProcessingParams;
use crate::pipeline::{self, Processed};

/// Primary processing interface.
///
/// # Examples
///
/// ```no_run
/// use huemri::{Colorizer, Colormap, Modality, ProcessingParams};
/// use std::path::Path;
///
/// let mut colorizer = Colorizer::with_params(ProcessingParams::for_modality(Modality::Ct));
/// colorizer.params_mut().colormap = Colormap::Bone;
/// let out = colorizer.process_file(Path::new("slice.png")).unwrap();
/// out.image.save("slice_bone.png").unwrap();
/// ```
#[derive(Debug, Clone, Default)]
pub struct Colorizer {
    params: ProcessingParams,
}

impl Colorizer {
    /// Create a colorizer with default parameters.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_params(params: ProcessingParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &ProcessingParams {
        &self.params
    }

    /// Mutable access for post-construction tuning.
    pub fn params_mut(&mut self) -> &mut ProcessingParams {
        &mut self.params
    }

    /// Colorize an in-memory 8-bit image.
    pub fn process(&self, image: &GrayImage) -> Result<Processed, PipelineError> {
        pipeline::process(image, &self.params)
    }

    /// Load `path` as grayscale and colorize it.
    pub fn process_file(&self, path: &Path) -> Result<Processed, Box<dyn std::error::Error>> {
        let image = load_grayscale(path)?;
        Ok(self.process(&image)?)
    }
}

/// Interactive state: parameters plus the most recently loaded image.
#[derive(Debug, Default)]
pub struct Session {
    colorizer: Colorizer,
    current: Option<GrayImage>,
}

impl Session {
    pub fn new(params: ProcessingParams) -> Self {
        Self {
            colorizer: Colorizer::with_params(params),
            current: None,
        }
    }

    pub fn params(&self) -> &ProcessingParams {
        self.colorizer.params()
    }

    pub fn params_mut(&mut self) -> &mut ProcessingParams {
        self.colorizer.params_mut()
    }

    /// The loaded image, if any.
    pub fn current(&self) -> Option<&GrayImage> {
        self.current.as_ref()
    }

    /// Replace the current image with `path`.
    ///
    /// On failure the previous image is kept.
    pub fn load(&mut self, path: &Path) -> Result<(), LoadError> {
        match load_grayscale(path) {
            Ok(image) => {
                self.current = Some(image);
                Ok(())
            }
            Err(err) => {
                tracing::warn!("{err}; keeping previous image");
                Err(err)
            }
        }
    }

    /// Install an already decoded image as the current one.
    pub fn set_image(&mut self, image: GrayImage) {
        self.current = Some(image);
    }

    /// Run the pipeline on the current image. `Ok(None)` when nothing is loaded.
    pub fn process(&self) -> Result<Option<Processed>, PipelineError> {
        self.current
            .as_ref()
            .map(|img| self.colorizer.process(img))
            .transpose()
    }
}
