//! Cross-sections of the region between two curves.
//!
//! For each station `val` in `[start, end)` both formulas are evaluated and a
//! profile polygon is built whose width equals the gap between them. The
//! polygon lies in the plane perpendicular to the independent axis, centred
//! on the midpoint of the two curves, and extends towards negative `z`.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::polygon::{Anchored, Polygon3};
use super::{Point3, Vec3};
use crate::expr::{self, Formula};
use crate::orientation::Orientation;

/// Shape of every cross-section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CrossSectionProfile {
    /// Square with side equal to the gap.
    #[default]
    Square,
    /// Equilateral triangle with base equal to the gap.
    Triangle,
    /// Half disc with diameter equal to the gap.
    Semicircle,
}

impl CrossSectionProfile {
    pub const ALL: [Self; 3] = [Self::Square, Self::Triangle, Self::Semicircle];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Square => "square",
            Self::Triangle => "triangle",
            Self::Semicircle => "semicircle",
        }
    }

    /// Planar outline for half-width `h`, as canonical `(v, w)` offsets.
    #[must_use]
    pub fn outline(self, half_width: f64, options: CrossSectionOptions) -> Vec<(f64, f64)> {
        let h = half_width;
        match self {
            Self::Square => vec![(h, -2.0 * h), (-h, -2.0 * h), (-h, 0.0), (h, 0.0)],
            Self::Triangle => vec![(h, 0.0), (-h, 0.0), (0.0, -(3.0_f64).sqrt() * h)],
            Self::Semicircle => {
                let segments = options.semicircle_segments.max(1);
                (0..=segments)
                    .map(|i| {
                        let theta = PI * i as f64 / segments as f64;
                        (h * theta.cos(), -h * theta.sin())
                    })
                    .collect()
            }
        }
    }
}

impl fmt::Display for CrossSectionProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown cross-section profile `{0}`")]
pub struct ParseProfileError(pub String);

impl FromStr for CrossSectionProfile {
    type Err = ParseProfileError;

    fn from_str(source: &str) -> Result<Self, Self::Err> {
        let normalized = source.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|profile| profile.name() == normalized)
            .ok_or_else(|| ParseProfileError(source.to_owned()))
    }
}

/// Options for [`build_cross_sections`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrossSectionOptions {
    /// Number of arc steps used to polygonize a semicircle.
    pub semicircle_segments: usize,
}

impl Default for CrossSectionOptions {
    fn default() -> Self {
        Self {
            semicircle_segments: 20,
        }
    }
}

/// One cross-section, positioned at a station along the independent axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrossSectionPolygon {
    /// Value of the independent variable at this section.
    pub station: f64,
    /// Half of the gap between the two curves.
    pub half_width: f64,
    pub polygon: Polygon3,
}

impl Anchored for CrossSectionPolygon {
    fn anchor(&self) -> Point3 {
        self.polygon.anchor
    }
}

/// Builds one profile polygon per station `start, start + step, ...` below `end`.
///
/// Returns an empty set when either formula is invalid, or when the interval
/// or step could not terminate (non-finite, `step <= 0`, `start >= end`, or a
/// step too small to advance `start`).
#[must_use]
#[allow(clippy::too_many_arguments)]
pub fn build_cross_sections(
    f1: &str,
    f2: &str,
    orientation: Orientation,
    start: f64,
    end: f64,
    step: f64,
    profile: CrossSectionProfile,
    options: CrossSectionOptions,
) -> Vec<CrossSectionPolygon> {
    let (Some(first), Some(second)) = (
        expr::compile(f1, orientation),
        expr::compile(f2, orientation),
    ) else {
        return Vec::new();
    };
    build_cross_sections_for(&first, &second, start, end, step, profile, options)
}

/// Same as [`build_cross_sections`] for compiled formulas sharing one orientation.
#[must_use]
pub fn build_cross_sections_for(
    f1: &Formula,
    f2: &Formula,
    start: f64,
    end: f64,
    step: f64,
    profile: CrossSectionProfile,
    options: CrossSectionOptions,
) -> Vec<CrossSectionPolygon> {
    debug_assert_eq!(f1.orientation(), f2.orientation());
    if !interval_terminates(start, end, step) {
        log::warn!("cross-section interval [{start}, {end}) with step {step} is not usable");
        return Vec::new();
    }

    let orientation = f1.orientation();
    let mut sections = Vec::new();
    let mut val = start;
    while val < end {
        sections.push(cross_section_at(f1, f2, orientation, val, profile, options));
        val += step;
    }
    sections
}

/// True when `val = start; while val < end { val += step }` finishes.
#[must_use]
pub fn interval_terminates(start: f64, end: f64, step: f64) -> bool {
    start.is_finite()
        && end.is_finite()
        && step.is_finite()
        && step > 0.0
        && start < end
        && start + step > start
        && end - step < end
}

fn cross_section_at(
    f1: &Formula,
    f2: &Formula,
    orientation: Orientation,
    val: f64,
    profile: CrossSectionProfile,
    options: CrossSectionOptions,
) -> CrossSectionPolygon {
    let a = f1.eval(val);
    let b = f2.eval(val);
    let diff = (a - b).abs();
    let half_width = diff / 2.0;
    let pos = (a.min(b) + a.max(b)) / 2.0;

    let anchor = orientation.to_world(val, pos, 0.0);
    let offsets: Vec<Vec3> = profile
        .outline(half_width, options)
        .into_iter()
        .map(|(v, w)| orientation.offset_to_world(0.0, v, w))
        .collect();

    CrossSectionPolygon {
        station: val,
        half_width,
        polygon: Polygon3::new(anchor, offsets),
    }
}
