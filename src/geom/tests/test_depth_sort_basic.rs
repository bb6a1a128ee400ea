use crate::geom::{
    Anchored, CrossSectionOptions, CrossSectionProfile, Point3, build_cross_sections,
    sort_by_camera_distance,
};
use crate::orientation::Orientation;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Marker {
    id: u32,
    at: Point3,
}

impl Anchored for Marker {
    fn anchor(&self) -> Point3 {
        self.at
    }
}

fn marker(id: u32, x: f64, y: f64) -> Marker {
    Marker {
        id,
        at: Point3::new(x, y, 0.0),
    }
}

fn ids(items: &[Marker]) -> Vec<u32> {
    items.iter().map(|m| m.id).collect()
}

#[test]
fn farthest_first_along_x() {
    let items = vec![marker(0, 0.0, 0.0), marker(1, 5.0, 0.0), marker(2, -5.0, 0.0)];
    let sorted = sort_by_camera_distance(items, Point3::new(10.0, 0.0, 0.0), Orientation::X);
    assert_eq!(ids(&sorted), vec![2, 0, 1]);
}

#[test]
fn only_the_independent_coordinate_counts() {
    // The far-off y of marker 1 would put it first if it were not projected away.
    let items = vec![marker(0, -5.0, 0.0), marker(1, 5.0, 500.0)];
    let sorted = sort_by_camera_distance(items, Point3::new(10.0, 3.0, 20.0), Orientation::X);
    assert_eq!(ids(&sorted), vec![0, 1]);
}

#[test]
fn y_orientation_uses_the_y_coordinate() {
    let items = vec![marker(0, 100.0, 1.0), marker(1, -100.0, -4.0)];
    let sorted = sort_by_camera_distance(items, Point3::new(0.0, 8.0, 0.0), Orientation::Y);
    assert_eq!(ids(&sorted), vec![1, 0]);
}

#[test]
fn equal_distances_keep_input_order() {
    let items = vec![marker(0, 1.0, 0.0), marker(1, 3.0, 0.0), marker(2, 1.0, 7.0)];
    let sorted = sort_by_camera_distance(items, Point3::new(2.0, 0.0, 0.0), Orientation::X);
    assert_eq!(ids(&sorted), vec![0, 1, 2]);
}

#[test]
fn sort_is_a_permutation_of_cross_sections() {
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
    let sorted = sort_by_camera_distance(sections.clone(), Point3::new(-20.0, 4.0, 30.0), Orientation::X);
    assert_eq!(sorted.len(), sections.len());
    let stations: Vec<f64> = sorted.iter().map(|s| s.station).collect();
    // camera sits left of all stations, so the rightmost section is drawn first
    assert_eq!(stations.first().copied(), Some(2.5));
    assert_eq!(stations.last().copied(), Some(-2.0));
    assert!(stations.windows(2).all(|pair| pair[0] >= pair[1]));
}
