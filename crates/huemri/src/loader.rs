//! Reading grayscale images from disk.

use std::path::Path;

use image::{GrayImage, ImageReader};

use crate::error::LoadError;

/// File extensions offered when browsing for an input image.
///
/// Decoding is delegated to the `image` crate and driven by content sniffing,
/// so the list is advisory: other decodable files load too.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "tif", "tiff"];

/// Whether `path` carries one of [`SUPPORTED_EXTENSIONS`] (case-insensitive).
pub fn has_supported_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|s| s.eq_ignore_ascii_case(e))
        })
        .unwrap_or(false)
}

/// Decode `path` and convert it to 8-bit luma.
pub fn load_grayscale(path: &Path) -> Result<GrayImage, LoadError> {
    let reader = ImageReader::open(path)
        .and_then(|r| r.with_guessed_format())
        .map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    let img = reader.decode().map_err(|source| LoadError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    let gray = img.into_luma8();
    tracing::debug!(
        "loaded {} ({}x{})",
        path.display(),
        gray.width(),
        gray.height()
    );
    Ok(gray)
}
