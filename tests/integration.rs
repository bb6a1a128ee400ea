use solids_engine::expr::{self, ExprError};
use solids_engine::geom::{
    Boundary, CrossSectionOptions, CrossSectionProfile, CurveSamplerOptions, Point3,
    RevolveOptions, build_cross_sections, build_revolution_mesh, sample_curve,
    sort_by_camera_distance,
};
use solids_engine::{Engine, Orientation, Scene, SceneError, SceneSettings};

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn engine_initializes() {
    let engine = Engine::new();
    assert!(engine.is_initialized());
}

#[test]
fn reference_formulas_evaluate() {
    let x = Orientation::X;
    assert_close(expr::evaluate("x^2", x, 3.0).expect("x^2"), 9.0);
    assert_close(expr::evaluate("x+6", x, -2.0).expect("x+6"), 4.0);
    assert_close(expr::evaluate("sqrt(x)", x, 4.0).expect("sqrt"), 2.0);
    assert_close(
        expr::evaluate("arcsin(x)", x, 1.0).expect("arcsin"),
        std::f64::consts::FRAC_PI_2,
    );
    assert!(!expr::validate("x^2 + abs(x)", x));
    assert!(matches!(
        expr::evaluate("(x+1", x, 0.0),
        Err(ExprError::UnbalancedParenthesis { .. })
    ));
}

#[test]
fn curve_covers_the_graph_width() {
    let curve = sample_curve("x", Orientation::X, CurveSamplerOptions::symmetric(120.0, 2000));
    assert_eq!(curve.len(), 2000);
    assert_eq!(curve.points[0][0], -60.0);
    assert_eq!(curve.points[1999][0], 60.0);
    assert!(curve.points.windows(2).all(|pair| pair[0][0] < pair[1][0]));
}

#[test]
fn orientation_double_toggle_reproduces_the_curve() {
    let options = CurveSamplerOptions::symmetric(10.0, 11);
    let original = sample_curve("x^2", Orientation::X, options);
    let toggled = Orientation::X.toggled();
    let swapped = sample_curve("y^2", toggled, options);
    let back = sample_curve("x^2", toggled.toggled(), options);

    assert_eq!(original, back);
    for (a, b) in original.points.iter().zip(&swapped.points) {
        assert_eq!([a[1], a[0]], *b);
    }
}

#[test]
fn square_cross_sections_between_line_and_parabola() {
    let sections = build_cross_sections(
        "x+6",
        "x^2",
        Orientation::X,
        -2.0,
        3.0,
        0.5,
        CrossSectionProfile::Square,
        CrossSectionOptions::default(),
    );
    assert_eq!(sections.len(), 10);
    assert!(sections.iter().all(|s| s.polygon.vertex_count() == 4));
    let at_two = sections.iter().find(|s| s.station == 2.0).expect("station 2");
    assert_close(at_two.half_width, 2.0);
}

#[test]
fn revolution_grid_counts() {
    let mesh = build_revolution_mesh(
        "x+6",
        "x^2",
        Orientation::X,
        -2.0,
        3.0,
        0.0,
        RevolveOptions::default(),
    )
    .expect("mesh");
    let (rows, cols) = (mesh.row_count(), mesh.col_count());
    for boundary in [Boundary::First, Boundary::Second] {
        assert!(mesh.grid(boundary).rows().iter().all(|row| row.len() == cols));
        assert_eq!(mesh.side_faces(boundary).len(), (rows - 1) * (cols - 1));
    }
    assert_eq!(mesh.cap_faces().len(), 2 * (cols - 1));
}

#[test]
fn depth_sort_orders_farthest_first() {
    let sections = build_cross_sections(
        "1",
        "0",
        Orientation::X,
        -5.0,
        6.0,
        5.0,
        CrossSectionProfile::Square,
        CrossSectionOptions::default(),
    );
    let shuffled = vec![sections[1].clone(), sections[2].clone(), sections[0].clone()];
    let sorted = sort_by_camera_distance(shuffled, Point3::new(10.0, 0.0, 0.0), Orientation::X);
    let stations: Vec<f64> = sorted.iter().map(|s| s.station).collect();
    assert_eq!(stations, vec![-5.0, 0.0, 5.0]);
}

#[test]
fn scene_pipeline_rebuilds_each_collection() {
    let settings = SceneSettings {
        step: 0.5,
        profile: CrossSectionProfile::Semicircle,
        rotation_axis: -1.0,
        ..SceneSettings::default()
    };
    let mut scene = Scene::new(settings);

    scene.graph().expect("graph");
    scene.graph_cross_sections().expect("cross-sections");
    scene.show_rotation().expect("rotation");
    assert_eq!(scene.curves().len(), 2);
    assert_eq!(scene.cross_sections().len(), 10);
    assert!(scene.cross_sections().iter().all(|s| s.polygon.vertex_count() == 21));
    assert!(scene.revolution().is_some());

    scene.graph_cross_sections().expect("rebuild");
    assert_eq!(scene.cross_sections().len(), 10);

    scene.set_function(1, "x+").expect("index");
    assert!(matches!(
        scene.show_rotation(),
        Err(SceneError::FormulaRejected { index: 1, .. })
    ));
    assert!(scene.revolution().is_none());
}
