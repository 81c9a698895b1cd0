use image::imageops::{self, FilterType};
use image::RgbImage;

/// Longest side of the on-screen preview.
pub const DEFAULT_PREVIEW_SIZE: u32 = 500;

/// Size that fits `(width, height)` into a `max_side` square, keeping the
/// aspect ratio. Neither side drops below 1.
pub fn preview_size(width: u32, height: u32, max_side: u32) -> (u32, u32) {
    let max_side = max_side.max(1);
    if width >= height {
        let h = (height as u64 * max_side as u64 / width.max(1) as u64) as u32;
        (max_side, h.max(1))
    } else {
        let w = (width as u64 * max_side as u64 / height as u64) as u32;
        (w.max(1), max_side)
    }
}

/// Resize for display with bilinear filtering.
pub fn fit_to_preview(img: &RgbImage, max_side: u32) -> RgbImage {
    let (w, h) = preview_size(img.width(), img.height(), max_side);
    imageops::resize(img, w, h, FilterType::Triangle)
}
