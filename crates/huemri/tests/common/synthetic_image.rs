#![allow(dead_code)]

use image::{GrayImage, Luma};
use std::path::PathBuf;

/// Bright disc on a dark background, a crude stand-in for an axial slice.
pub fn phantom_u8(width: u32, height: u32) -> GrayImage {
    let (cx, cy) = (width as f32 * 0.5, height as f32 * 0.5);
    let r_max = cx.min(cy) * 0.8;
    GrayImage::from_fn(width, height, |x, y| {
        let r = ((x as f32 - cx).powi(2) + (y as f32 - cy).powi(2)).sqrt();
        let v = if r < r_max {
            60.0 + 150.0 * (1.0 - r / r_max)
        } else {
            10.0
        };
        Luma([v as u8])
    })
}

/// Fresh scratch directory unique to this process and `tag`.
pub fn scratch_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("huemri-e2e-{tag}-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}
