//! Uniform sampling of a formula into a 2D polyline.

use serde::Serialize;

use super::Point3;
use crate::expr::{self, Formula};
use crate::orientation::Orientation;

/// Options for [`sample_curve`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveSamplerOptions {
    /// Lower bound of the sampled independent range (inclusive).
    pub domain_min: f64,
    /// Upper bound of the sampled independent range (inclusive).
    pub domain_max: f64,
    /// Number of samples, including both ends.
    pub sample_count: usize,
}

impl CurveSamplerOptions {
    /// Symmetric domain `[-width / 2, width / 2]`.
    #[must_use]
    pub fn symmetric(width: f64, sample_count: usize) -> Self {
        Self {
            domain_min: -width / 2.0,
            domain_max: width / 2.0,
            sample_count,
        }
    }
}

impl Default for CurveSamplerOptions {
    fn default() -> Self {
        Self::symmetric(120.0, 2000)
    }
}

/// A straight segment between two world points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Segment3 {
    pub start: Point3,
    pub end: Point3,
}

impl Segment3 {
    #[must_use]
    pub const fn new(start: Point3, end: Point3) -> Self {
        Self { start, end }
    }

    /// True when both endpoints are finite. Renderers typically skip the rest.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.start.is_finite() && self.end.is_finite()
    }
}

/// Ordered world-space `(x, y)` points of one sampled formula.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polyline2 {
    pub orientation: Orientation,
    pub points: Vec<[f64; 2]>,
}

impl Polyline2 {
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Line segments between consecutive points, lifted to `z = 0`.
    ///
    /// Non-finite points are kept.
    #[must_use]
    pub fn segments(&self) -> Vec<Segment3> {
        self.points
            .windows(2)
            .map(|pair| {
                Segment3::new(
                    Point3::new(pair[0][0], pair[0][1], 0.0),
                    Point3::new(pair[1][0], pair[1][1], 0.0),
                )
            })
            .collect()
    }

    /// Points as canonical `(independent, dependent)` samples.
    #[must_use]
    pub fn samples(&self) -> Vec<(f64, f64)> {
        self.points
            .iter()
            .map(|point| self.orientation.to_canonical_2d(*point))
            .collect()
    }
}

/// Samples `formula` over the options' domain.
///
/// Returns an empty polyline when the formula does not validate or parse, or
/// when the domain is not a finite, non-inverted range.
#[must_use]
pub fn sample_curve(
    formula: &str,
    orientation: Orientation,
    options: CurveSamplerOptions,
) -> Polyline2 {
    match expr::compile(formula, orientation) {
        Some(compiled) => sample_formula(&compiled, options),
        None => Polyline2 {
            orientation,
            points: Vec::new(),
        },
    }
}

/// Samples an already compiled formula.
#[must_use]
pub fn sample_formula(formula: &Formula, options: CurveSamplerOptions) -> Polyline2 {
    let orientation = formula.orientation();
    let CurveSamplerOptions {
        domain_min,
        domain_max,
        sample_count,
    } = options;

    if !domain_min.is_finite() || !domain_max.is_finite() || domain_min > domain_max {
        log::warn!("curve domain [{domain_min}, {domain_max}] is not a finite range");
        return Polyline2 {
            orientation,
            points: Vec::new(),
        };
    }

    let span = domain_max - domain_min;
    let divisions = sample_count.saturating_sub(1).max(1) as f64;
    let points = (0..sample_count)
        .map(|i| {
            let value = if i + 1 == sample_count && sample_count > 1 {
                domain_max
            } else {
                domain_min + span * (i as f64 / divisions)
            };
            let p = orientation.to_world(value, formula.eval(value), 0.0);
            [p.x, p.y]
        })
        .collect();

    Polyline2 {
        orientation,
        points,
    }
}
