use crate::geom::{
    CrossSectionOptions, CrossSectionProfile, GeomMeshDiagnostics, Point3, Tolerance,
    build_cross_sections,
};
use crate::orientation::Orientation;

fn squares(f1: &str, f2: &str, orientation: Orientation) -> Vec<crate::geom::CrossSectionPolygon> {
    build_cross_sections(
        f1,
        f2,
        orientation,
        -2.0,
        3.0,
        0.5,
        CrossSectionProfile::Square,
        CrossSectionOptions::default(),
    )
}

#[test]
fn square_sections_between_line_and_parabola() {
    let sections = squares("x+6", "x^2", Orientation::X);
    assert_eq!(sections.len(), 10);
    assert_eq!(sections[0].station, -2.0);
    assert_eq!(sections[9].station, 2.5);

    let at_two = &sections[8];
    assert_eq!(at_two.station, 2.0);
    assert_eq!(at_two.half_width, 2.0);
    assert_eq!(at_two.polygon.anchor, Point3::new(2.0, 6.0, 0.0));

    let tol = Tolerance::DEFAULT;
    let vertices = at_two.polygon.vertices();
    let expected = [
        Point3::new(2.0, 8.0, -4.0),
        Point3::new(2.0, 4.0, -4.0),
        Point3::new(2.0, 4.0, 0.0),
        Point3::new(2.0, 8.0, 0.0),
    ];
    for (got, want) in vertices.iter().zip(expected) {
        assert!(tol.approx_eq_point3(*got, want), "{got:?} != {want:?}");
    }
    assert!((at_two.polygon.area() - 16.0).abs() < 1e-9);
}

#[test]
fn sections_are_perpendicular_to_the_independent_axis() {
    for section in squares("x+6", "x^2", Orientation::X) {
        for vertex in section.polygon.vertices() {
            assert_eq!(vertex.x, section.station);
        }
    }
}

#[test]
fn y_orientation_mirrors_x_orientation() {
    let along_x = squares("x+6", "x^2", Orientation::X);
    let along_y = squares("y+6", "y^2", Orientation::Y);
    assert_eq!(along_x.len(), along_y.len());

    for (a, b) in along_x.iter().zip(&along_y) {
        for (p, q) in a.polygon.vertices().iter().zip(b.polygon.vertices()) {
            assert_eq!(p.x, q.y);
            assert_eq!(p.y, q.x);
            assert_eq!(p.z, q.z);
        }
    }
}

#[test]
fn profile_width_matches_the_gap() {
    let tol = Tolerance::LOOSE;
    for profile in CrossSectionProfile::ALL {
        let sections = build_cross_sections(
            "x+6",
            "x^2",
            Orientation::X,
            -2.0,
            3.0,
            0.5,
            profile,
            CrossSectionOptions::default(),
        );
        for section in &sections {
            let ys: Vec<f64> = section.polygon.vertices().iter().map(|p| p.y).collect();
            let span = ys.iter().copied().fold(f64::MIN, f64::max)
                - ys.iter().copied().fold(f64::MAX, f64::min);
            assert!(tol.approx_eq_f64(span, 2.0 * section.half_width), "{profile}");
        }
    }
}

#[test]
fn triangle_is_equilateral() {
    let sections = build_cross_sections(
        "4",
        "0",
        Orientation::X,
        0.0,
        1.0,
        1.0,
        CrossSectionProfile::Triangle,
        CrossSectionOptions::default(),
    );
    assert_eq!(sections.len(), 1);
    let v = sections[0].polygon.vertices();
    let tol = Tolerance::LOOSE;
    assert!(tol.approx_eq_f64(v[0].distance_to(v[1]), 4.0));
    assert!(tol.approx_eq_f64(v[1].distance_to(v[2]), 4.0));
    assert!(tol.approx_eq_f64(v[2].distance_to(v[0]), 4.0));
}

#[test]
fn unusable_inputs_give_no_sections() {
    let opts = CrossSectionOptions::default();
    let square = CrossSectionProfile::Square;
    assert!(build_cross_sections("x+6", "x^2", Orientation::X, -2.0, 3.0, 0.0, square, opts).is_empty());
    assert!(build_cross_sections("x+6", "x^2", Orientation::X, 3.0, -2.0, 0.5, square, opts).is_empty());
    assert!(build_cross_sections("x+6", "x^2", Orientation::Y, -2.0, 3.0, 0.5, square, opts).is_empty());
    assert!(build_cross_sections("x+", "x^2", Orientation::X, -2.0, 3.0, 0.5, square, opts).is_empty());
}

#[test]
fn touching_curves_give_degenerate_sections() {
    let sections = squares("x", "x", Orientation::X);
    let diagnostics = GeomMeshDiagnostics::for_cross_sections(&sections, Tolerance::ZERO_LENGTH);
    assert_eq!(diagnostics.degenerate_face_count, sections.len());
    assert!(diagnostics.is_clean());
}
