use std::f64::consts::PI;

use super::diagnostics::GeomMeshDiagnostics;
use super::mesh::GeomMesh;
use super::polygon::Polygon3;
use super::{Point3, Tolerance, Vec3};
use crate::expr::{self, Formula};
use crate::orientation::Orientation;

/// Options for controlling revolution mesh generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevolveOptions {
    /// Spacing between axial rows along the independent axis.
    pub axial_step: f64,
    /// Number of angular slices over the full 360°.
    pub angular_steps: usize,
}

impl Default for RevolveOptions {
    fn default() -> Self {
        Self {
            axial_step: 0.3,
            angular_steps: 30,
        }
    }
}

/// Which of the two boundary formulas a grid belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Boundary {
    First,
    Second,
}

/// A grid corner referenced by index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CornerRef {
    pub boundary: Boundary,
    pub row: usize,
    pub col: usize,
}

impl CornerRef {
    const fn new(boundary: Boundary, row: usize, col: usize) -> Self {
        Self { boundary, row, col }
    }
}

/// A quad face derived from grid indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QuadFace {
    pub corners: [CornerRef; 4],
}

/// Points of one boundary swept around the axis, relative to the axis offset.
///
/// Rows are axial steps, columns angular steps. The last column repeats the
/// first so the seam closes exactly.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshGrid {
    rows: Vec<Vec<Point3>>,
}

impl MeshGrid {
    fn from_rows(rows: Vec<Vec<Point3>>) -> Self {
        let cols = rows.first().map_or(0, Vec::len);
        assert!(
            rows.iter().all(|row| row.len() == cols),
            "revolution grid rows must all have {cols} angular samples"
        );
        Self { rows }
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn col_count(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<Point3>] {
        &self.rows
    }

    #[must_use]
    pub fn point(&self, row: usize, col: usize) -> Point3 {
        self.rows[row][col]
    }
}

/// Solid of revolution between two boundary formulas.
#[derive(Debug, Clone, PartialEq)]
pub struct RevolutionMesh {
    orientation: Orientation,
    /// World translation from axis-relative grid points to world points.
    axis_offset: Vec3,
    /// Independent value of every row.
    stations: Vec<f64>,
    first: MeshGrid,
    second: MeshGrid,
}

impl RevolutionMesh {
    fn new(
        orientation: Orientation,
        axis_offset: Vec3,
        stations: Vec<f64>,
        first: MeshGrid,
        second: MeshGrid,
    ) -> Self {
        assert_eq!(first.row_count(), second.row_count(), "grid row counts differ");
        assert_eq!(first.col_count(), second.col_count(), "grid column counts differ");
        assert_eq!(first.row_count(), stations.len(), "one station per grid row");
        Self {
            orientation,
            axis_offset,
            stations,
            first,
            second,
        }
    }

    #[must_use]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    #[must_use]
    pub fn axis_offset(&self) -> Vec3 {
        self.axis_offset
    }

    #[must_use]
    pub fn stations(&self) -> &[f64] {
        &self.stations
    }

    #[must_use]
    pub fn grid(&self, boundary: Boundary) -> &MeshGrid {
        match boundary {
            Boundary::First => &self.first,
            Boundary::Second => &self.second,
        }
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.first.row_count()
    }

    #[must_use]
    pub fn col_count(&self) -> usize {
        self.first.col_count()
    }

    /// Lateral faces of one boundary, row-major.
    #[must_use]
    pub fn side_faces(&self, boundary: Boundary) -> Vec<QuadFace> {
        let rows = self.row_count();
        let cols = self.col_count();
        let mut faces = Vec::with_capacity(rows.saturating_sub(1) * cols.saturating_sub(1));
        for i in 0..rows.saturating_sub(1) {
            for j in 0..cols.saturating_sub(1) {
                faces.push(QuadFace {
                    corners: [
                        CornerRef::new(boundary, i, j),
                        CornerRef::new(boundary, i, j + 1),
                        CornerRef::new(boundary, i + 1, j + 1),
                        CornerRef::new(boundary, i + 1, j),
                    ],
                });
            }
        }
        faces
    }

    /// Annular faces joining the two grids at the first and last row.
    #[must_use]
    pub fn cap_faces(&self) -> Vec<QuadFace> {
        let rows = self.row_count();
        let cols = self.col_count();
        if rows == 0 {
            return Vec::new();
        }
        let mut faces = Vec::with_capacity(2 * cols.saturating_sub(1));
        for row in [0, rows - 1] {
            for j in 0..cols.saturating_sub(1) {
                faces.push(QuadFace {
                    corners: [
                        CornerRef::new(Boundary::First, row, j),
                        CornerRef::new(Boundary::First, row, j + 1),
                        CornerRef::new(Boundary::Second, row, j + 1),
                        CornerRef::new(Boundary::Second, row, j),
                    ],
                });
            }
        }
        faces
    }

    /// World position of a grid corner (axis offset re-added).
    #[must_use]
    pub fn corner_position(&self, corner: CornerRef) -> Point3 {
        self.grid(corner.boundary).point(corner.row, corner.col) + self.axis_offset
    }

    /// Turns a face into a positioned quad anchored on the rotation axis.
    #[must_use]
    pub fn resolve(&self, face: &QuadFace) -> Polygon3 {
        let station = face
            .corners
            .iter()
            .map(|corner| self.stations[corner.row])
            .sum::<f64>()
            / 4.0;
        let anchor = self.orientation.to_world(station, 0.0, 0.0) + self.axis_offset;
        let offsets = face
            .corners
            .iter()
            .map(|corner| self.corner_position(*corner) - anchor)
            .collect();
        Polygon3::new(anchor, offsets)
    }

    /// Lateral quads of both boundaries.
    #[must_use]
    pub fn side_quads(&self) -> Vec<Polygon3> {
        [Boundary::First, Boundary::Second]
            .into_iter()
            .flat_map(|boundary| self.side_faces(boundary))
            .map(|face| self.resolve(&face))
            .collect()
    }

    #[must_use]
    pub fn cap_quads(&self) -> Vec<Polygon3> {
        self.cap_faces().iter().map(|face| self.resolve(face)).collect()
    }

    /// Triangle-list export: both grids' vertices, side faces then caps.
    #[must_use]
    pub fn to_geom_mesh(&self) -> GeomMesh {
        let rows = self.row_count();
        let cols = self.col_count();
        let grid_size = rows * cols;

        let positions: Vec<[f64; 3]> = [Boundary::First, Boundary::Second]
            .into_iter()
            .flat_map(|boundary| self.grid(boundary).rows.iter().flatten())
            .map(|point| (*point + self.axis_offset).to_array())
            .collect();

        let index = |corner: CornerRef| -> u32 {
            let base = match corner.boundary {
                Boundary::First => 0,
                Boundary::Second => grid_size,
            };
            (base + corner.row * cols + corner.col) as u32
        };

        let faces = self
            .side_faces(Boundary::First)
            .into_iter()
            .chain(self.side_faces(Boundary::Second))
            .chain(self.cap_faces());

        let mut indices = Vec::new();
        for face in faces {
            let [a, b, c, d] = face.corners.map(index);
            indices.extend_from_slice(&[a, b, c, a, c, d]);
        }

        GeomMesh::new(positions, indices)
    }

    #[must_use]
    pub fn diagnostics(&self) -> GeomMeshDiagnostics {
        self.diagnostics_with_tolerance(Tolerance::ZERO_LENGTH)
    }

    #[must_use]
    pub fn diagnostics_with_tolerance(&self, tol: Tolerance) -> GeomMeshDiagnostics {
        let side_quad_count =
            self.side_faces(Boundary::First).len() + self.side_faces(Boundary::Second).len();
        let cap_faces = self.cap_faces();

        let non_finite_vertex_count = [Boundary::First, Boundary::Second]
            .into_iter()
            .flat_map(|boundary| self.grid(boundary).rows.iter().flatten())
            .filter(|point| !point.is_finite())
            .count();

        let degenerate_face_count = self
            .side_quads()
            .into_iter()
            .chain(self.cap_quads())
            .filter(|quad| quad.is_finite() && quad.is_degenerate(tol))
            .count();

        let mut diagnostics = GeomMeshDiagnostics {
            vertex_count: 2 * self.row_count() * self.col_count(),
            triangle_count: 2 * (side_quad_count + cap_faces.len()),
            side_quad_count,
            cap_quad_count: cap_faces.len(),
            non_finite_vertex_count,
            degenerate_face_count,
            warnings: Vec::new(),
        };
        if non_finite_vertex_count > 0 {
            diagnostics.add_warning(format!(
                "{non_finite_vertex_count} vertices are NaN or infinite"
            ));
        }
        diagnostics
    }
}

/// Builds the solid swept by rotating the region between `f1` and `f2`.
///
/// The rotation axis runs parallel to the independent axis at dependent value
/// `rotation_axis`. Returns `None` when a formula is invalid or the inputs
/// cannot produce a grid.
#[must_use]
pub fn build_revolution_mesh(
    f1: &str,
    f2: &str,
    orientation: Orientation,
    start: f64,
    end: f64,
    rotation_axis: f64,
    options: RevolveOptions,
) -> Option<RevolutionMesh> {
    let first = expr::compile(f1, orientation)?;
    let second = expr::compile(f2, orientation)?;
    build_revolution_mesh_for(&first, &second, start, end, rotation_axis, options)
}

/// Same as [`build_revolution_mesh`] for compiled formulas sharing one orientation.
#[must_use]
pub fn build_revolution_mesh_for(
    f1: &Formula,
    f2: &Formula,
    start: f64,
    end: f64,
    rotation_axis: f64,
    options: RevolveOptions,
) -> Option<RevolutionMesh> {
    debug_assert_eq!(f1.orientation(), f2.orientation());
    let RevolveOptions {
        axial_step,
        angular_steps,
    } = options;

    if !start.is_finite()
        || !end.is_finite()
        || !rotation_axis.is_finite()
        || start >= end
        || !(end - start).is_finite()
        || !axial_step.is_finite()
        || axial_step <= 0.0
        || angular_steps < 3
    {
        log::warn!(
            "revolution inputs rejected: [{start}, {end}], axis {rotation_axis}, step {axial_step}, {angular_steps} slices"
        );
        return None;
    }

    let orientation = f1.orientation();
    let stations = axial_stations(start, end, axial_step);
    let angles: Vec<(f64, f64)> = (0..angular_steps)
        .map(|j| {
            let theta = 2.0 * PI * j as f64 / angular_steps as f64;
            (theta.cos(), theta.sin())
        })
        .collect();

    let sweep = |formula: &Formula| -> MeshGrid {
        let rows = stations
            .iter()
            .map(|&val| {
                let radius = formula.eval(val) - rotation_axis;
                let mut row: Vec<Point3> = angles
                    .iter()
                    .map(|&(cos, sin)| orientation.to_world(val, radius * cos, radius * sin))
                    .collect();
                row.push(row[0]);
                row
            })
            .collect();
        MeshGrid::from_rows(rows)
    };

    let first = sweep(f1);
    let second = sweep(f2);
    let axis_offset = orientation.offset_to_world(0.0, rotation_axis, 0.0);

    Some(RevolutionMesh::new(orientation, axis_offset, stations, first, second))
}

/// Row stations `start, start + step, ...`, with the last one clamped to `end`.
fn axial_stations(start: f64, end: f64, step: f64) -> Vec<f64> {
    let raw = (end - start) / step;
    // an interval that is a multiple of `step` up to rounding gets no sliver row
    let count = (raw - Tolerance::DEFAULT.eps * raw.max(1.0)).ceil().max(1.0) as usize;
    let mut stations: Vec<f64> = (0..count)
        .map(|i| (start + i as f64 * step).min(end))
        .collect();
    stations.push(end);
    stations
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stations_end_exactly_on_interval_end() {
        let stations = axial_stations(-2.0, 3.0, 0.3);
        assert_eq!(stations.first().copied(), Some(-2.0));
        assert_eq!(stations.last().copied(), Some(3.0));
        assert_eq!(stations.len(), 18);
        assert!(stations.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn exact_multiple_does_not_duplicate_end() {
        let stations = axial_stations(0.0, 1.0, 0.5);
        assert_eq!(stations, vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn rounding_noise_does_not_add_a_sliver_row() {
        let stations = axial_stations(0.0, 0.9, 0.3);
        assert_eq!(stations.len(), 4);
        assert_eq!(stations.last().copied(), Some(0.9));
    }

    #[test]
    #[should_panic(expected = "angular samples")]
    fn ragged_grid_fails_fast() {
        let _ = MeshGrid::from_rows(vec![vec![Point3::ORIGIN; 4], vec![Point3::ORIGIN; 3]]);
    }
}
