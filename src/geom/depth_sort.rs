//! Back-to-front ordering for translucent polygons (painter's algorithm).

use super::Point3;
use super::polygon::Anchored;
use crate::orientation::Orientation;

/// Distance from the camera to the anchor projected onto the independent axis.
#[must_use]
pub fn camera_distance(anchor: Point3, camera: Point3, orientation: Orientation) -> f64 {
    let along = orientation.independent_of(anchor);
    let projected = orientation.to_world(along, 0.0, 0.0);
    projected.distance_to(camera)
}

/// Orders `items` farthest-first from `camera`.
///
/// Only the anchor coordinate along the independent axis takes part in the
/// distance. The sort is stable; NaN distances order via `total_cmp`.
#[must_use]
pub fn sort_by_camera_distance<T: Anchored>(
    mut items: Vec<T>,
    camera: Point3,
    orientation: Orientation,
) -> Vec<T> {
    items.sort_by(|a, b| {
        let da = camera_distance(a.anchor(), camera, orientation);
        let db = camera_distance(b.anchor(), camera, orientation);
        db.total_cmp(&da)
    });
    items
}
