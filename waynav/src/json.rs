use crate::geometry::limits;
use crate::model::{Edge, Waypoint};
use crate::{StoreError, WaypointGraph};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Serialize)]
struct DocSer<'a> {
    waypoints: &'a [Waypoint],
    lines: &'a [Edge],
    #[serde(flatten)]
    extra: &'a Map<String, Value>,
}

#[derive(Deserialize)]
struct DocDe {
    waypoints: Vec<Waypoint>,
    #[serde(default)]
    lines: Vec<Edge>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

pub fn to_json_impl(g: &WaypointGraph) -> Result<Value, StoreError> {
    let doc = DocSer {
        waypoints: &g.waypoints,
        lines: &g.lines,
        extra: &g.extra,
    };
    Ok(serde_json::to_value(doc)?)
}

// Referential integrity (dangling or repeated lines, colliding ids) is not
// checked here; only sizes and coordinates are.
pub fn from_json_impl(v: Value) -> Result<WaypointGraph, StoreError> {
    let doc: DocDe = serde_json::from_value(v)?;
    if doc.waypoints.len() > limits::MAX_WAYPOINTS {
        return Err(StoreError::CapsExceeded(format!(
            "waypoints>{}",
            limits::MAX_WAYPOINTS
        )));
    }
    if doc.lines.len() > limits::MAX_LINES {
        return Err(StoreError::CapsExceeded(format!("lines>{}", limits::MAX_LINES)));
    }
    for w in &doc.waypoints {
        if !limits::in_coord_bounds(w.pos.x) || !limits::in_coord_bounds(w.pos.z) {
            return Err(StoreError::OutOfBounds(w.id));
        }
    }
    let mut g = WaypointGraph::from_parts(doc.waypoints, doc.lines);
    g.extra = doc.extra;
    Ok(g)
}
