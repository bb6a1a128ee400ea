use crate::geom::{
    Boundary, Point3, RevolveOptions, Tolerance, Vec3, build_revolution_mesh,
};
use crate::orientation::Orientation;

fn line_and_parabola(orientation: Orientation, axis: f64) -> crate::geom::RevolutionMesh {
    let (f1, f2) = match orientation {
        Orientation::X => ("x+6", "x^2"),
        Orientation::Y => ("y+6", "y^2"),
    };
    build_revolution_mesh(f1, f2, orientation, -2.0, 3.0, axis, RevolveOptions::default())
        .expect("valid formulas")
}

#[test]
fn grids_are_rectangular_and_closed_at_the_seam() {
    let mesh = line_and_parabola(Orientation::X, 0.0);
    assert_eq!(mesh.row_count(), 18);
    assert_eq!(mesh.col_count(), 31);

    for boundary in [Boundary::First, Boundary::Second] {
        let grid = mesh.grid(boundary);
        assert!(grid.rows().iter().all(|row| row.len() == 31));
        for row in grid.rows() {
            assert_eq!(row.first(), row.last());
        }
    }
}

#[test]
fn face_counts_follow_the_grid_shape() {
    let mesh = line_and_parabola(Orientation::X, 0.0);
    let (rows, cols) = (mesh.row_count(), mesh.col_count());

    assert_eq!(mesh.side_faces(Boundary::First).len(), (rows - 1) * (cols - 1));
    assert_eq!(mesh.side_faces(Boundary::Second).len(), (rows - 1) * (cols - 1));
    assert_eq!(mesh.cap_faces().len(), 2 * (cols - 1));
    assert_eq!(mesh.side_quads().len(), 2 * (rows - 1) * (cols - 1));
    assert_eq!(mesh.cap_quads().len(), 2 * (cols - 1));

    let geom = mesh.to_geom_mesh();
    assert!(geom.validate().is_ok());
    assert_eq!(geom.vertex_count(), 2 * rows * cols);
    assert_eq!(geom.triangle_count(), 2 * (2 * (rows - 1) * (cols - 1) + 2 * (cols - 1)));

    let diagnostics = mesh.diagnostics();
    assert_eq!(diagnostics.side_quad_count, 2 * (rows - 1) * (cols - 1));
    assert_eq!(diagnostics.cap_quad_count, 2 * (cols - 1));
    assert_eq!(diagnostics.triangle_count, geom.triangle_count());
    assert!(diagnostics.is_clean());
}

#[test]
fn points_stay_at_their_radius_around_the_axis() {
    let axis = 1.5;
    let mesh = line_and_parabola(Orientation::X, axis);
    let tol = Tolerance::LOOSE;

    for (row, &station) in mesh.stations().iter().enumerate() {
        let expected = station * station - axis;
        for point in &mesh.grid(Boundary::Second).rows()[row] {
            assert_eq!(point.x, station);
            let radius = point.y.hypot(point.z);
            assert!(tol.approx_eq_f64(radius, expected.abs()));
        }
    }
    assert_eq!(mesh.axis_offset(), Vec3::new(0.0, axis, 0.0));
}

#[test]
fn quads_are_anchored_on_the_axis() {
    let axis = -1.0;
    let mesh = line_and_parabola(Orientation::X, axis);
    for quad in mesh.side_quads().iter().chain(&mesh.cap_quads()) {
        assert_eq!(quad.anchor.y, axis);
        assert_eq!(quad.anchor.z, 0.0);
        assert_eq!(quad.vertex_count(), 4);
    }
}

#[test]
fn cap_joins_both_boundaries_at_the_interval_ends() {
    let mesh = line_and_parabola(Orientation::X, 0.0);
    let tol = Tolerance::LOOSE;
    let caps = mesh.cap_quads();
    let first_cap = &caps[0];
    let vertices = first_cap.vertices();

    // x = -2: both curves are 4, the cap collapses
    assert!(vertices.iter().all(|p| tol.approx_eq_f64(p.x, -2.0)));
    assert!(first_cap.is_degenerate(Tolerance::LOOSE));

    let last_cap = &caps[mesh.col_count() - 1];
    let vertices = last_cap.vertices();
    assert!(vertices.iter().all(|p| tol.approx_eq_f64(p.x, 3.0)));
    assert!(tol.approx_eq_point3(vertices[0], Point3::new(3.0, 9.0, 0.0)));
}

#[test]
fn y_orientation_mirrors_x_orientation() {
    let along_x = line_and_parabola(Orientation::X, 2.0);
    let along_y = line_and_parabola(Orientation::Y, 2.0);
    assert_eq!(along_x.row_count(), along_y.row_count());
    assert_eq!(along_x.col_count(), along_y.col_count());

    for (a, b) in along_x.side_quads().iter().zip(&along_y.side_quads()) {
        for (p, q) in a.vertices().iter().zip(b.vertices()) {
            assert_eq!(p.x, q.y);
            assert_eq!(p.y, q.x);
            assert_eq!(p.z, q.z);
        }
    }
}

#[test]
fn rejects_unusable_inputs() {
    let opts = RevolveOptions::default();
    assert!(build_revolution_mesh("x+6", "x^2", Orientation::X, 3.0, -2.0, 0.0, opts).is_none());
    assert!(build_revolution_mesh("x+6", "x^", Orientation::X, -2.0, 3.0, 0.0, opts).is_none());
    assert!(
        build_revolution_mesh(
            "x+6",
            "x^2",
            Orientation::X,
            -2.0,
            3.0,
            0.0,
            RevolveOptions {
                axial_step: 0.0,
                angular_steps: 30,
            },
        )
        .is_none()
    );
    assert!(build_revolution_mesh("x+6", "x^2", Orientation::X, -2.0, 3.0, f64::NAN, opts).is_none());
    // Finite bounds whose span overflows.
    assert!(build_revolution_mesh("1", "0", Orientation::X, -1e308, 1e308, 0.0, opts).is_none());
}
