use std::fmt;
use std::str::FromStr;

use crate::capture_pipeline::common::error::PipelineError;

type Anchors = &'static [(f64, [u8; 3])];

// Piecewise-linear approximations of the matplotlib tables.
const GREYS: Anchors = &[(0.0, [255, 255, 255]), (1.0, [0, 0, 0])];
const GRAY: Anchors = &[(0.0, [0, 0, 0]), (1.0, [255, 255, 255])];
const VIRIDIS: Anchors = &[
    (0.0, [68, 1, 84]),
    (0.25, [59, 82, 139]),
    (0.5, [33, 145, 140]),
    (0.75, [94, 201, 98]),
    (1.0, [253, 231, 37]),
];
const PLASMA: Anchors = &[
    (0.0, [13, 8, 135]),
    (0.25, [126, 3, 168]),
    (0.5, [204, 71, 120]),
    (0.75, [248, 149, 64]),
    (1.0, [240, 249, 33]),
];
const INFERNO: Anchors = &[
    (0.0, [0, 0, 4]),
    (0.25, [87, 16, 110]),
    (0.5, [188, 55, 84]),
    (0.75, [249, 142, 9]),
    (1.0, [252, 255, 164]),
];
const MAGMA: Anchors = &[
    (0.0, [0, 0, 4]),
    (0.25, [81, 18, 124]),
    (0.5, [183, 55, 121]),
    (0.75, [252, 137, 97]),
    (1.0, [252, 253, 191]),
];
const HOT: Anchors = &[
    (0.0, [10, 0, 0]),
    (0.365, [255, 0, 0]),
    (0.746, [255, 255, 0]),
    (1.0, [255, 255, 255]),
];

/// Base colour tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Palette {
    Greys,
    Gray,
    Viridis,
    Plasma,
    Inferno,
    Magma,
    Hot,
}

impl Palette {
    pub const ALL: [Palette; 7] = [
        Palette::Greys,
        Palette::Gray,
        Palette::Viridis,
        Palette::Plasma,
        Palette::Inferno,
        Palette::Magma,
        Palette::Hot,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Palette::Greys => "Greys",
            Palette::Gray => "gray",
            Palette::Viridis => "viridis",
            Palette::Plasma => "plasma",
            Palette::Inferno => "inferno",
            Palette::Magma => "magma",
            Palette::Hot => "hot",
        }
    }

    fn anchors(&self) -> Anchors {
        match self {
            Palette::Greys => GREYS,
            Palette::Gray => GRAY,
            Palette::Viridis => VIRIDIS,
            Palette::Plasma => PLASMA,
            Palette::Inferno => INFERNO,
            Palette::Magma => MAGMA,
            Palette::Hot => HOT,
        }
    }
}

/// A named colormap: a palette, optionally reversed (`_r` suffix).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Colormap {
    pub palette: Palette,
    pub reversed: bool,
}

impl Colormap {
    pub fn new(palette: Palette, reversed: bool) -> Self {
        Self { palette, reversed }
    }

    /// Resolves names such as `"viridis"`, `"Greys_r"` or `"grey"`.
    pub fn from_name(name: &str) -> Result<Self, PipelineError> {
        let (base, reversed) = match name.strip_suffix("_r") {
            Some(base) => (base, true),
            None => (name, false),
        };
        let palette = match base {
            "Greys" => Palette::Greys,
            "gray" | "grey" => Palette::Gray,
            "viridis" => Palette::Viridis,
            "plasma" => Palette::Plasma,
            "inferno" => Palette::Inferno,
            "magma" => Palette::Magma,
            "hot" => Palette::Hot,
            _ => return Err(PipelineError::UnknownColormap(name.to_string())),
        };
        Ok(Self { palette, reversed })
    }

    /// Colour of a normalized value. `t` is clamped to `[0, 1]`; NaN maps to the low end.
    pub fn apply(&self, t: f64) -> [u8; 3] {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let t = if self.reversed { 1.0 - t } else { t };
        interpolate(self.palette.anchors(), t)
    }
}

impl FromStr for Colormap {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Colormap::from_name(s)
    }
}

impl fmt::Display for Colormap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.palette.name(), if self.reversed { "_r" } else { "" })
    }
}

fn interpolate(anchors: Anchors, t: f64) -> [u8; 3] {
    let upper = anchors
        .iter()
        .position(|(pos, _)| *pos >= t)
        .unwrap_or(anchors.len() - 1);
    if upper == 0 {
        return anchors[0].1;
    }

    let (p0, c0) = anchors[upper - 1];
    let (p1, c1) = anchors[upper];
    let w = (t - p0) / (p1 - p0);
    let mut rgb = [0u8; 3];
    for (channel, out) in rgb.iter_mut().enumerate() {
        let a = c0[channel] as f64;
        let b = c1[channel] as f64;
        *out = (a + (b - a) * w).round() as u8;
    }
    rgb
}
