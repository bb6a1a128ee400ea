//! Mesh diagnostics for generated geometry.
//!
//! Diagnostics are collected after a revolution mesh or cross-section set is
//! built and can be used for:
//!
//! - Counting faces without materializing them again
//! - Spotting NaN/Inf vertices produced by formulas outside their domain
//! - Spotting zero-area faces where the two curves meet
//!
//! # Example
//!
//! ```ignore
//! use solids_engine::geom::{build_revolution_mesh, RevolveOptions};
//! use solids_engine::Orientation;
//!
//! let mesh = build_revolution_mesh("x+6", "x^2", Orientation::X, -2.0, 3.0, 0.0, RevolveOptions::default())
//!     .expect("valid formulas");
//! let diagnostics = mesh.diagnostics();
//! if !diagnostics.is_clean() {
//!     for warning in &diagnostics.warnings {
//!         eprintln!("Warning: {}", warning);
//!     }
//! }
//! ```

use std::fmt;

use super::cross_section::CrossSectionPolygon;
use super::Tolerance;

#[derive(Debug, Default, Clone, PartialEq)]
pub struct GeomMeshDiagnostics {
    /// Total number of grid vertices (both boundaries).
    pub vertex_count: usize,

    /// Number of triangles in the exported triangle list.
    pub triangle_count: usize,

    /// Lateral quads of both boundaries.
    pub side_quad_count: usize,

    /// End-cap quads at the first and last rows.
    pub cap_quad_count: usize,

    /// Vertices with a NaN or infinite coordinate.
    pub non_finite_vertex_count: usize,

    /// Finite faces with (near) zero area.
    ///
    /// Expected where the two curves meet or a curve crosses the axis.
    pub degenerate_face_count: usize,

    /// Human-readable warnings.
    pub warnings: Vec<String>,
}

impl GeomMeshDiagnostics {
    /// Summarizes a cross-section set. Polygons count as faces.
    #[must_use]
    pub fn for_cross_sections(sections: &[CrossSectionPolygon], tol: Tolerance) -> Self {
        let mut diagnostics = Self {
            vertex_count: sections.iter().map(|s| s.polygon.vertex_count()).sum(),
            ..Self::default()
        };
        for section in sections {
            if !section.polygon.is_finite() {
                diagnostics.non_finite_vertex_count += section.polygon.vertex_count();
            } else if section.polygon.is_degenerate(tol) {
                diagnostics.degenerate_face_count += 1;
            }
        }
        if diagnostics.non_finite_vertex_count > 0 {
            diagnostics.add_warning(format!(
                "{} cross-section vertices are NaN or infinite",
                diagnostics.non_finite_vertex_count
            ));
        }
        diagnostics
    }

    /// Returns true when no vertex is non-finite and no warning was recorded.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.non_finite_vertex_count == 0 && self.warnings.is_empty()
    }

    pub fn add_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }
}

impl fmt::Display for GeomMeshDiagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} vertices, {} triangles ({} side quads, {} cap quads), {} non-finite, {} degenerate",
            self.vertex_count,
            self.triangle_count,
            self.side_quad_count,
            self.cap_quad_count,
            self.non_finite_vertex_count,
            self.degenerate_face_count
        )
    }
}
