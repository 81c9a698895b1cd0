//! Contrast-limited adaptive histogram equalization (CLAHE).
//!
//! Follows the classic tile formulation: per-tile clipped histograms turned
//! into lookup tables, then bilinear interpolation between the four LUTs
//! surrounding each pixel. Images whose size is not a multiple of the tile
//! grid are virtually extended with BORDER_REFLECT_101 for the histogram pass.

use image::GrayImage;

use crate::error::PipelineError;

const HIST_SIZE: usize = 256;

/// CLAHE parameters.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ClaheConfig {
    /// Clip limit relative to a uniform histogram. Per-bin threshold is
    /// `max(floor(clip_limit * tile_area / 256), 1)`; `<= 0` disables clipping.
    pub clip_limit: f64,
    /// Tile grid as `[tiles_x, tiles_y]`.
    pub tile_grid: [u32; 2],
}

impl Default for ClaheConfig {
    fn default() -> Self {
        Self {
            clip_limit: 0.03,
            tile_grid: [8, 8],
        }
    }
}

impl ClaheConfig {
    /// 8x8 tile grid with the given clip limit.
    pub fn with_clip_limit(clip_limit: f64) -> Self {
        Self {
            clip_limit,
            ..Default::default()
        }
    }
}

/// Equalize `gray` with an 8x8 tile grid and the given clip limit.
pub fn enhance_contrast(gray: &GrayImage, clip_limit: f64) -> Result<GrayImage, PipelineError> {
    clahe(gray, &ClaheConfig::with_clip_limit(clip_limit))
}

/// Run CLAHE on an 8-bit image. The output has the same dimensions.
pub fn clahe(gray: &GrayImage, config: &ClaheConfig) -> Result<GrayImage, PipelineError> {
    let (width, height) = gray.dimensions();
    if width == 0 || height == 0 {
        return Err(PipelineError::empty(width, height));
    }
    let [tiles_x, tiles_y] = config.tile_grid;
    if tiles_x == 0 || tiles_y == 0 {
        return Err(PipelineError::InvalidTileGrid(tiles_x, tiles_y));
    }

    tracing::trace!(
        "CLAHE {}x{} tiles, clip limit {}",
        tiles_x,
        tiles_y,
        config.clip_limit
    );
    let src = TileSource::new(gray, tiles_x as usize, tiles_y as usize);
    let luts: Vec<[u8; HIST_SIZE]> = (0..src.tiles_y)
        .flat_map(|ty| (0..src.tiles_x).map(move |tx| (tx, ty)))
        .map(|(tx, ty)| src.tile_lut(tx, ty, config.clip_limit))
        .collect();

    Ok(interpolate(gray, &src, &luts))
}

/// Geometry of the (virtually extended) image split into tiles.
struct TileSource<'a> {
    data: &'a [u8],
    width: usize,
    height: usize,
    tiles_x: usize,
    tiles_y: usize,
    tile_w: usize,
    tile_h: usize,
}

impl<'a> TileSource<'a> {
    fn new(gray: &'a GrayImage, tiles_x: usize, tiles_y: usize) -> Self {
        let width = gray.width() as usize;
        let height = gray.height() as usize;
        Self {
            data: gray.as_raw(),
            width,
            height,
            tiles_x,
            tiles_y,
            tile_w: width.div_ceil(tiles_x),
            tile_h: height.div_ceil(tiles_y),
        }
    }

    fn tile_lut(&self, tx: usize, ty: usize, clip_limit: f64) -> [u8; HIST_SIZE] {
        let mut hist = [0u32; HIST_SIZE];
        let (x0, y0) = (tx * self.tile_w, ty * self.tile_h);
        for y in y0..y0 + self.tile_h {
            let sy = reflect_101(y, self.height);
            let row = &self.data[sy * self.width..(sy + 1) * self.width];
            for x in x0..x0 + self.tile_w {
                hist[row[reflect_101(x, self.width)] as usize] += 1;
            }
        }

        let area = self.tile_w * self.tile_h;
        if clip_limit > 0.0 {
            let limit = ((clip_limit * area as f64 / HIST_SIZE as f64) as u32).max(1);
            clip_histogram(&mut hist, limit);
        }

        let scale = (HIST_SIZE - 1) as f32 / area as f32;
        let mut lut = [0u8; HIST_SIZE];
        let mut sum = 0u32;
        for (slot, &count) in lut.iter_mut().zip(hist.iter()) {
            sum += count;
            *slot = (sum as f32 * scale).round_ties_even().min(255.0) as u8;
        }
        lut
    }
}

/// Clip bins above `limit` and redistribute the excess in a single pass:
/// an even share to every bin, then the remainder one unit at a time at a
/// fixed stride.
fn clip_histogram(hist: &mut [u32; HIST_SIZE], limit: u32) {
    let mut clipped = 0u32;
    for bin in hist.iter_mut() {
        if *bin > limit {
            clipped += *bin - limit;
            *bin = limit;
        }
    }

    let batch = clipped / HIST_SIZE as u32;
    let mut residual = (clipped % HIST_SIZE as u32) as usize;
    for bin in hist.iter_mut() {
        *bin += batch;
    }
    if residual > 0 {
        let step = (HIST_SIZE / residual).max(1);
        let mut i = 0;
        while i < HIST_SIZE && residual > 0 {
            hist[i] += 1;
            residual -= 1;
            i += step;
        }
    }
}

/// Per-axis interpolation weights: neighbouring tile indices and the weight
/// of the second one.
fn axis_weights(len: usize, tile: usize, tiles: usize) -> Vec<(usize, usize, f32)> {
    let inv = 1.0f32 / tile as f32;
    (0..len)
        .map(|i| {
            let f = i as f32 * inv - 0.5;
            let t1 = f.floor() as isize;
            let a = f - t1 as f32;
            let lo = t1.max(0) as usize;
            let hi = ((t1 + 1) as usize).min(tiles - 1);
            (lo, hi, a)
        })
        .collect()
}

fn interpolate(gray: &GrayImage, src: &TileSource<'_>, luts: &[[u8; HIST_SIZE]]) -> GrayImage {
    let xs = axis_weights(src.width, src.tile_w, src.tiles_x);
    let ys = axis_weights(src.height, src.tile_h, src.tiles_y);

    let mut out = GrayImage::new(gray.width(), gray.height());
    for (y, row) in out.rows_mut().enumerate() {
        let (ty1, ty2, ya) = ys[y];
        let lut_row1 = &luts[ty1 * src.tiles_x..(ty1 + 1) * src.tiles_x];
        let lut_row2 = &luts[ty2 * src.tiles_x..(ty2 + 1) * src.tiles_x];
        let src_row = &src.data[y * src.width..(y + 1) * src.width];
        for (x, px) in row.enumerate() {
            let (tx1, tx2, xa) = xs[x];
            let v = src_row[x] as usize;
            let top = lut_row1[tx1][v] as f32 * (1.0 - xa) + lut_row1[tx2][v] as f32 * xa;
            let bottom = lut_row2[tx1][v] as f32 * (1.0 - xa) + lut_row2[tx2][v] as f32 * xa;
            let res = top * (1.0 - ya) + bottom * ya;
            px[0] = res.round_ties_even().clamp(0.0, 255.0) as u8;
        }
    }
    out
}

/// BORDER_REFLECT_101 index (`gfedcb|abcdefgh|gfedcba`).
fn reflect_101(i: usize, len: usize) -> usize {
    if len <= 1 {
        return 0;
    }
    let period = 2 * len - 2;
    let r = i % period;
    if r >= len {
        period - r
    } else {
        r
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{flat_image, horizontal_ramp, noise_image};

    #[test]
    fn reflect_101_mirrors_without_repeating_edge() {
        let idx: Vec<usize> = (0..8).map(|i| reflect_101(i, 4)).collect();
        assert_eq!(idx, vec![0, 1, 2, 3, 2, 1, 0, 1]);
        assert_eq!(reflect_101(5, 1), 0);
    }

    #[test]
    fn clip_histogram_preserves_total_count() {
        let mut hist = [0u32; HIST_SIZE];
        hist[0] = 1000;
        hist[1] = 500;
        hist[200] = 37;
        let before: u32 = hist.iter().sum();
        clip_histogram(&mut hist, 100);
        assert_eq!(hist.iter().sum::<u32>(), before);
        // 1300 clipped: 5 per bin, then 20 singles at stride 12 starting at bin 0.
        assert_eq!(hist[0], 106);
        assert_eq!(hist[1], 105);
    }

    #[test]
    fn flat_image_stays_uniform() {
        let out = enhance_contrast(&flat_image(64, 64, 128), 0.03).unwrap();
        let first = out.get_pixel(0, 0)[0];
        assert!(out.pixels().all(|p| p[0] == first));
    }

    #[test]
    fn output_keeps_shape_for_awkward_sizes() {
        for &(w, h) in &[(1, 1), (3, 17), (13, 9), (100, 7)] {
            let img = noise_image(w, h, 7);
            let out = enhance_contrast(&img, 0.05).unwrap();
            assert_eq!(out.dimensions(), (w, h));
        }
    }

    #[test]
    fn unclipped_equalization_stretches_low_contrast_ramp() {
        let img = horizontal_ramp(128, 64, 100, 131);
        let cfg = ClaheConfig::with_clip_limit(0.0);
        let out = clahe(&img, &cfg).unwrap();
        let (lo, hi) = out
            .pixels()
            .fold((255u8, 0u8), |(lo, hi), p| (lo.min(p[0]), hi.max(p[0])));
        assert_eq!(hi, 255);
        assert!(lo < 64, "darkest output {lo} not pulled down");
    }

    #[test]
    fn decreasing_ramp_with_single_pixel_tiles() {
        // One pixel per tile: each LUT saturates at and above its own value,
        // so every pixel right of the first averages a 0 and a 255 lookup.
        let img = GrayImage::from_fn(8, 8, |x, _| image::Luma([224 - 32 * x as u8]));
        let out = enhance_contrast(&img, 0.05).unwrap();
        for y in 0..8 {
            assert_eq!(out.get_pixel(0, y)[0], 255);
            for x in 1..8 {
                assert_eq!(out.get_pixel(x, y)[0], 128);
            }
        }
    }

    #[test]
    fn bilinear_weights_between_uniform_tiles() {
        // 16x16, 2x2 tiles of 8x8: the top-left tile is 200, the rest 30.
        // Unclipped LUTs are steps: tile A maps v >= 200 to 255, the others
        // map v >= 30 to 255. A pixel of value 30 therefore becomes
        // 255 * (1 - w_a) with w_a the bilinear weight of tile A.
        let img = GrayImage::from_fn(16, 16, |x, y| {
            image::Luma([if x < 8 && y < 8 { 200 } else { 30 }])
        });
        let out = clahe(&img, &ClaheConfig::with_clip_limit(0.0)).unwrap();
        let px = |x, y| out.get_pixel(x, y)[0];

        // x = 9 → tile weights 0.375 / 0.625, y = 2 clamps to tile row 0
        assert_eq!(px(9, 2), 159);
        // y = 9 mirrors it vertically
        assert_eq!(px(2, 9), 159);
        // 0.375 * 0.375 of tile A
        assert_eq!(px(9, 9), 219);
        // 0.25 * 0.25 of tile A
        assert_eq!(px(10, 10), 239);
        // half weight: 127.5 rounds to even
        assert_eq!(px(8, 3), 128);
        // past the last tile center only tile row 1 contributes
        assert_eq!(px(2, 12), 255);
        // tile A itself and the far corner clamp to a single tile
        assert_eq!(px(0, 0), 255);
        assert_eq!(px(15, 15), 255);
        // inside tile A, value 200 saturates both LUTs
        assert_eq!(px(6, 6), 255);
    }

    #[test]
    fn clipped_ramp_row_matches_reference() {
        // clip 0.05 on 8x8 tiles gives a per-bin limit of 1, so every
        // repeated value is flattened and the excess spread at stride 4.
        let img = horizontal_ramp(64, 64, 20, 230);
        let out = enhance_contrast(&img, 0.05).unwrap();
        let expected: [u8; 64] = [
            28, 32, 40, 48, 56, 61, 65, 64, 66, 69, 73, 78, 84, 85, 89, 92, 94, 97, 101, 102,
            108, 113, 117, 119, 122, 121, 125, 130, 135, 140, 144, 143, 145, 148, 152, 157,
            163, 164, 168, 171, 173, 176, 180, 181, 187, 192, 196, 199, 201, 200, 204, 209,
            215, 220, 224, 223, 225, 228, 232, 237, 243, 247, 251, 255,
        ];
        for y in [0, 21, 63] {
            let row: Vec<u8> = (0..64).map(|x| out.get_pixel(x, y)[0]).collect();
            assert_eq!(row, expected, "row {y}");
        }
    }

    #[test]
    fn rejects_empty_image() {
        let err = enhance_contrast(&GrayImage::new(0, 10), 0.03).unwrap_err();
        assert!(matches!(err, PipelineError::EmptyImage { .. }));
    }

    #[test]
    fn rejects_zero_tile_grid() {
        let cfg = ClaheConfig {
            clip_limit: 0.03,
            tile_grid: [0, 8],
        };
        assert!(matches!(
            clahe(&flat_image(8, 8, 1), &cfg),
            Err(PipelineError::InvalidTileGrid(0, 8))
        ));
    }
}
