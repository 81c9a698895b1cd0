//! Intensity-to-color palettes.
//!
//! Every palette is materialized as a 256-entry [`ColormapLut`]. A normalized
//! value `x` selects entry `floor(x * 256)` (with `x == 1` landing on the last
//! entry), which is how matplotlib samples its colormaps.

mod crystal;
mod palettes;

use std::fmt;
use std::str::FromStr;

use image::{GrayImage, Rgb, RgbImage};
use imageproc::map::map_colors;

use crate::error::PipelineError;
use crate::intensity::{to_normalized, GrayImageF64};

pub use crystal::crystal_preprocess;
use palettes::SegmentData;

const LUT_SIZE: usize = 256;

/// Named palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Colormap {
    /// Hand-authored blue→red palette.
    Medical,
    /// Hand-authored black→white palette with local re-enhancement.
    #[default]
    Crystal,
    Gray,
    Bone,
    Hot,
    Cool,
    Copper,
    Viridis,
    Plasma,
    Inferno,
    Magma,
}

impl Colormap {
    pub const ALL: [Colormap; 11] = [
        Colormap::Crystal,
        Colormap::Medical,
        Colormap::Gray,
        Colormap::Bone,
        Colormap::Hot,
        Colormap::Cool,
        Colormap::Copper,
        Colormap::Viridis,
        Colormap::Plasma,
        Colormap::Inferno,
        Colormap::Magma,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Colormap::Medical => "medical",
            Colormap::Crystal => "crystal",
            Colormap::Gray => "gray",
            Colormap::Bone => "bone",
            Colormap::Hot => "hot",
            Colormap::Cool => "cool",
            Colormap::Copper => "copper",
            Colormap::Viridis => "viridis",
            Colormap::Plasma => "plasma",
            Colormap::Inferno => "inferno",
            Colormap::Magma => "magma",
        }
    }

    /// Whether the palette re-enhances its input before lookup.
    pub fn preprocesses(self) -> bool {
        self == Colormap::Crystal
    }

    /// Build the lookup table.
    pub fn lut(self) -> ColormapLut {
        match self {
            Colormap::Medical => ColormapLut::from_control_points(palettes::MEDICAL),
            Colormap::Crystal => ColormapLut::from_control_points(palettes::CRYSTAL),
            Colormap::Gray => ColormapLut::from_segments(&palettes::GRAY),
            Colormap::Bone => ColormapLut::from_segments(&palettes::BONE),
            Colormap::Hot => ColormapLut::from_segments(&palettes::HOT),
            Colormap::Cool => ColormapLut::from_segments(&palettes::COOL),
            Colormap::Copper => ColormapLut::from_segments(&palettes::COPPER),
            Colormap::Viridis => ColormapLut::from_gradient(colorous::VIRIDIS),
            Colormap::Plasma => ColormapLut::from_gradient(colorous::PLASMA),
            Colormap::Inferno => ColormapLut::from_gradient(colorous::INFERNO),
            Colormap::Magma => ColormapLut::from_gradient(colorous::MAGMA),
        }
    }
}

impl fmt::Display for Colormap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Colormap {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        Colormap::ALL
            .into_iter()
            .find(|c| c.name() == key || (key == "grey" && *c == Colormap::Gray))
            .ok_or_else(|| PipelineError::UnknownColormap(s.to_string()))
    }
}

/// 256-entry palette table.
#[derive(Debug, Clone, PartialEq)]
pub struct ColormapLut {
    colors: Vec<[f64; 3]>,
    bytes: Vec<[u8; 3]>,
}

impl ColormapLut {
    fn from_float_entries(colors: Vec<[f64; 3]>) -> Self {
        let bytes = colors
            .iter()
            .map(|c| c.map(|v| (v.clamp(0.0, 1.0) * 255.0) as u8))
            .collect();
        Self { colors, bytes }
    }

    /// Piecewise-linear interpolation across evenly spaced control points.
    pub fn from_control_points(points: &[[f64; 3]]) -> Self {
        let n = points.len();
        if n < 2 {
            let c = points.first().copied().unwrap_or([0.0; 3]);
            return Self::from_float_entries(vec![c; LUT_SIZE]);
        }
        let xs: Vec<f64> = (0..n).map(|i| i as f64 / (n - 1) as f64).collect();
        let channel = |k: usize| -> Vec<(f64, f64, f64)> {
            xs.iter()
                .zip(points)
                .map(|(&x, p)| (x, p[k], p[k]))
                .collect()
        };
        let (r, g, b) = (channel(0), channel(1), channel(2));
        Self::from_channels(&r, &g, &b)
    }

    fn from_segments(data: &SegmentData) -> Self {
        Self::from_channels(data.red, data.green, data.blue)
    }

    fn from_channels(
        red: &[(f64, f64, f64)],
        green: &[(f64, f64, f64)],
        blue: &[(f64, f64, f64)],
    ) -> Self {
        let (r, g, b) = (
            channel_table(red),
            channel_table(green),
            channel_table(blue),
        );
        let colors = (0..LUT_SIZE).map(|i| [r[i], g[i], b[i]]).collect();
        Self::from_float_entries(colors)
    }

    /// Sample a 256-step perceptual gradient at its own nodes.
    fn from_gradient(gradient: colorous::Gradient) -> Self {
        let bytes: Vec<[u8; 3]> = (0..LUT_SIZE)
            .map(|i| {
                let c = gradient.eval_rational(i, LUT_SIZE);
                [c.r, c.g, c.b]
            })
            .collect();
        let colors = bytes
            .iter()
            .map(|c| c.map(|v| v as f64 / 255.0))
            .collect();
        Self { colors, bytes }
    }

    /// Table index for a normalized value. NaN maps to the first entry.
    #[inline]
    pub fn index(x: f64) -> usize {
        if x.is_nan() {
            return 0;
        }
        ((x * LUT_SIZE as f64) as i64).clamp(0, LUT_SIZE as i64 - 1) as usize
    }

    /// Color in [0, 1] for a normalized value.
    pub fn color(&self, x: f64) -> [f64; 3] {
        self.colors[Self::index(x)]
    }

    /// 8-bit color for a normalized value (channels truncated, not rounded).
    pub fn rgb8(&self, x: f64) -> [u8; 3] {
        self.bytes[Self::index(x)]
    }

    /// Colorize a normalized grid.
    pub fn colorize(&self, img: &GrayImageF64) -> RgbImage {
        map_colors(img, |p| Rgb(self.rgb8(p[0])))
    }

    /// Colorize an 8-bit grid (`v / 255` normalization).
    pub fn colorize_u8(&self, gray: &GrayImage) -> RgbImage {
        let table: Vec<[u8; 3]> = (0..=255u8).map(|v| self.rgb8(v as f64 / 255.0)).collect();
        map_colors(gray, |p| Rgb(table[p[0] as usize]))
    }
}

/// matplotlib-style lookup table for one channel: entry `i` sits at
/// `i / 255`; interior entries interpolate between the `y_above` of the
/// segment start and the `y_below` of the segment end.
fn channel_table(segments: &[(f64, f64, f64)]) -> Vec<f64> {
    let last = segments.len() - 1;
    let mut table = vec![0.0; LUT_SIZE];
    table[0] = segments[0].2;
    table[LUT_SIZE - 1] = segments[last].1;
    for (i, slot) in table.iter_mut().enumerate().take(LUT_SIZE - 1).skip(1) {
        let x = i as f64 / (LUT_SIZE - 1) as f64;
        let k = segments
            .iter()
            .position(|s| s.0 >= x)
            .unwrap_or(last)
            .max(1);
        let (x0, _, y0) = segments[k - 1];
        let (x1, y1, _) = segments[k];
        let t = (x - x0) / (x1 - x0);
        *slot = (t * (y1 - y0) + y0).clamp(0.0, 1.0);
    }
    table
}

/// Colorize an 8-bit image with the named palette, running the crystal
/// pre-processing first when that palette is selected.
pub fn apply_colormap(gray: &GrayImage, colormap: Colormap) -> Result<RgbImage, PipelineError> {
    let (w, h) = gray.dimensions();
    if w == 0 || h == 0 {
        return Err(PipelineError::empty(w, h));
    }
    let lut = colormap.lut();
    if colormap.preprocesses() {
        let normalized = crystal_preprocess(gray)?;
        Ok(lut.colorize(&normalized))
    } else {
        Ok(lut.colorize(&to_normalized(gray)))
    }
}
