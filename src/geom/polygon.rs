use serde::Serialize;

use super::{Point3, Tolerance, Vec3};

/// Anything with a world-space anchor that can be depth sorted.
pub trait Anchored {
    fn anchor(&self) -> Point3;
}

/// A planar polygon positioned by an anchor point and ordered offsets.
///
/// World vertices are `anchor + offset`; the closing edge from the last vertex
/// back to the first is implied.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Polygon3 {
    pub anchor: Point3,
    pub offsets: Vec<Vec3>,
}

impl Polygon3 {
    #[must_use]
    pub fn new(anchor: Point3, offsets: Vec<Vec3>) -> Self {
        Self { anchor, offsets }
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.offsets.len()
    }

    /// World-space vertices.
    #[must_use]
    pub fn vertices(&self) -> Vec<Point3> {
        self.offsets.iter().map(|offset| self.anchor + *offset).collect()
    }

    /// Twice the vector area (Newell's method) of the polygon.
    #[must_use]
    pub fn area_vector(&self) -> Vec3 {
        let n = self.offsets.len();
        (0..n).fold(Vec3::ZERO, |acc, i| {
            let a = self.offsets[i];
            let b = self.offsets[(i + 1) % n];
            acc + a.cross(b)
        })
    }

    /// Area of the polygon, assuming it is planar.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.area_vector().length() * 0.5
    }

    /// Zero-area polygons are kept by the builders but flagged in diagnostics.
    #[must_use]
    pub fn is_degenerate(&self, tol: Tolerance) -> bool {
        tol.is_zero_vec3(self.area_vector())
    }

    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.anchor.is_finite() && self.offsets.iter().all(|offset| offset.is_finite())
    }
}

impl Anchored for Polygon3 {
    fn anchor(&self) -> Point3 {
        self.anchor
    }
}
