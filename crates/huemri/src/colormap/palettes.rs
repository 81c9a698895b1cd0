//! Palette definitions.
//!
//! Hand-authored palettes are evenly spaced RGB control points. The classic
//! scientific palettes are per-channel segment lists `(x, y_below, y_above)`
//! in the same layout matplotlib uses, so the generated tables match it.

pub(crate) type Segment = (f64, f64, f64);

pub(crate) struct SegmentData {
    pub red: &'static [Segment],
    pub green: &'static [Segment],
    pub blue: &'static [Segment],
}

/// Dark blue through cyan, green and yellow to red.
pub(crate) const MEDICAL: &[[f64; 3]] = &[
    [0.0, 0.0, 0.3],
    [0.0, 0.5, 0.8],
    [0.0, 0.8, 0.8],
    [0.2, 0.8, 0.2],
    [0.8, 0.8, 0.0],
    [0.8, 0.4, 0.0],
    [0.8, 0.0, 0.0],
];

/// Black background, blues for soft tissue, greens/yellows for bone,
/// orange to white for the brightest structures.
pub(crate) const CRYSTAL: &[[f64; 3]] = &[
    [0.0, 0.0, 0.0],
    [0.1, 0.1, 0.3],
    [0.2, 0.4, 0.8],
    [0.4, 0.8, 0.9],
    [0.6, 0.9, 0.6],
    [0.8, 0.9, 0.4],
    [0.9, 0.7, 0.2],
    [1.0, 0.5, 0.0],
    [1.0, 1.0, 1.0],
];

const RAMP: &[Segment] = &[(0.0, 0.0, 0.0), (1.0, 1.0, 1.0)];

pub(crate) const GRAY: SegmentData = SegmentData {
    red: RAMP,
    green: RAMP,
    blue: RAMP,
};

pub(crate) const BONE: SegmentData = SegmentData {
    red: &[(0.0, 0.0, 0.0), (0.746032, 0.652778, 0.652778), (1.0, 1.0, 1.0)],
    green: &[
        (0.0, 0.0, 0.0),
        (0.365079, 0.319444, 0.319444),
        (0.746032, 0.777778, 0.777778),
        (1.0, 1.0, 1.0),
    ],
    blue: &[(0.0, 0.0, 0.0), (0.365079, 0.444444, 0.444444), (1.0, 1.0, 1.0)],
};

pub(crate) const HOT: SegmentData = SegmentData {
    red: &[(0.0, 0.0416, 0.0416), (0.365079, 1.0, 1.0), (1.0, 1.0, 1.0)],
    green: &[
        (0.0, 0.0, 0.0),
        (0.365079, 0.0, 0.0),
        (0.746032, 1.0, 1.0),
        (1.0, 1.0, 1.0),
    ],
    blue: &[(0.0, 0.0, 0.0), (0.746032, 0.0, 0.0), (1.0, 1.0, 1.0)],
};

pub(crate) const COOL: SegmentData = SegmentData {
    red: RAMP,
    green: &[(0.0, 1.0, 1.0), (1.0, 0.0, 0.0)],
    blue: &[(0.0, 1.0, 1.0), (1.0, 1.0, 1.0)],
};

pub(crate) const COPPER: SegmentData = SegmentData {
    red: &[(0.0, 0.0, 0.0), (0.809524, 1.0, 1.0), (1.0, 1.0, 1.0)],
    green: &[(0.0, 0.0, 0.0), (1.0, 0.7812, 0.7812)],
    blue: &[(0.0, 0.0, 0.0), (1.0, 0.4975, 0.4975)],
};
