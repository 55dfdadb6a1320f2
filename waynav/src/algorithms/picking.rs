use crate::geometry::math::within_square;
use crate::model::{Vec2, Waypoint};
use crate::WaypointGraph;

// First waypoint (document order) whose square of half-size `tol` contains `p`.
pub fn pick_impl(g: &WaypointGraph, p: Vec2, tol: f64) -> Option<&Waypoint> {
    if !tol.is_finite() || tol < 0.0 || !p.is_finite() {
        return None;
    }
    g.waypoints.iter().find(|w| within_square(p, w.pos, tol))
}
