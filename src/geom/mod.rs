mod core;
mod cross_section;
mod curve;
mod depth_sort;
mod diagnostics;
mod mesh;
mod polygon;
mod revolve;

pub use core::{Point3, Tolerance, Vec3};
pub use cross_section::{
    CrossSectionOptions, CrossSectionPolygon, CrossSectionProfile, ParseProfileError,
    build_cross_sections, build_cross_sections_for, interval_terminates,
};
pub use curve::{CurveSamplerOptions, Polyline2, Segment3, sample_curve, sample_formula};
pub use depth_sort::{camera_distance, sort_by_camera_distance};
pub use diagnostics::GeomMeshDiagnostics;
pub use mesh::GeomMesh;
pub use polygon::{Anchored, Polygon3};
pub use revolve::{
    Boundary, CornerRef, MeshGrid, QuadFace, RevolutionMesh, RevolveOptions,
    build_revolution_mesh, build_revolution_mesh_for,
};

#[cfg(test)]
mod tests;
