use crate::rendering::projection::ProjectedPoint;

/// Screen-space culling and paint ordering for projected markers.
///
/// There is no z-buffer: overlapping markers stack in the order returned here.
pub struct Culling;

impl Culling {
    /// Returns `true` if normalized device coordinates fall inside the frustum
    /// widened by `margin` on every side.
    pub fn within_overscan(nx: f64, ny: f64, margin: f64) -> bool {
        nx.abs() <= margin && ny.abs() <= margin
    }

    /// Sort by depth descending so nearer markers paint over farther ones.
    /// Hidden points carry no depth and sink to the end.
    pub fn order_far_to_near(points: &mut [ProjectedPoint]) {
        points.sort_by(|a, b| {
            let da = a.depth().unwrap_or(f64::NEG_INFINITY);
            let db = b.depth().unwrap_or(f64::NEG_INFINITY);
            db.total_cmp(&da)
        });
    }
}
