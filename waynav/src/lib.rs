pub mod config;
pub mod error;
pub mod model;
pub mod overlay;
pub mod session;
pub mod store;
pub mod geometry {
    pub mod limits;
    pub mod math;
}
pub mod algorithms {
    pub mod astar;
    pub mod picking;
}
mod json;

pub use algorithms::astar::{find_path, find_route, Route};
pub use config::ViewerConfig;
pub use error::{FeedError, GraphError, GraphResult, StoreError};
pub use model::{Edge, EdgeKind, Vec2, Waypoint, WaypointId};
pub use overlay::{feed_channel, FeedEvent, FeedSender, PlayerMap, PlayerOverlay};
pub use session::ViewerSession;
pub use store::{GraphStore, JsonFileStore, MemoryStore};

use serde_json::{Map, Value};

/// Editable waypoint/line collection.
///
/// Waypoints and lines are kept in document order. Lookups are linear scans
/// returning the first match, so a document with colliding ids resolves to the
/// earliest waypoint carrying that id.
#[derive(Clone, Debug, Default)]
pub struct WaypointGraph {
    pub(crate) waypoints: Vec<Waypoint>,
    pub(crate) lines: Vec<Edge>,
    pub(crate) extra: Map<String, Value>, // unrecognised top-level document keys
    pub(crate) revision: u64,
}

impl WaypointGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a graph without any validation; lines may reference missing
    /// waypoints or repeat unordered pairs.
    pub fn from_parts(waypoints: Vec<Waypoint>, lines: Vec<Edge>) -> Self {
        WaypointGraph {
            waypoints,
            lines,
            extra: Map::new(),
            revision: 1,
        }
    }

    /// Monotonic edit counter; increments on every waypoint/line mutation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn bump(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }
    pub fn lines(&self) -> &[Edge] {
        &self.lines
    }
    pub fn waypoint_count(&self) -> usize {
        self.waypoints.len()
    }
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    // Waypoints
    pub fn find_waypoint(&self, id: WaypointId) -> GraphResult<&Waypoint> {
        self.waypoints
            .iter()
            .find(|w| w.id == id)
            .ok_or(GraphError::NotFound(id))
    }
    pub fn contains_waypoint(&self, id: WaypointId) -> bool {
        self.waypoints.iter().any(|w| w.id == id)
    }
    pub fn add_waypoint(&mut self, w: Waypoint) {
        self.waypoints.push(w);
        self.bump();
    }
    /// Removes the first waypoint with `id`. Incident lines are left in place;
    /// see [`WaypointGraph::dangling_lines`].
    pub fn remove_waypoint(&mut self, id: WaypointId) -> Option<Waypoint> {
        let idx = self.waypoints.iter().position(|w| w.id == id)?;
        let removed = self.waypoints.remove(idx);
        self.bump();
        Some(removed)
    }

    // Lines
    pub fn find_edge(&self, a: WaypointId, b: WaypointId) -> Option<&Edge> {
        self.lines.iter().find(|l| l.connects(a, b))
    }
    /// Appends a line between `a` and `b`. Duplicate pairs are rejected rather
    /// than ignored so the caller can tell the two outcomes apart.
    pub fn add_edge(&mut self, a: WaypointId, b: WaypointId, kind: EdgeKind) -> GraphResult<()> {
        if a == b {
            return Err(GraphError::InvalidEdge(a));
        }
        if self.find_edge(a, b).is_some() {
            return Err(GraphError::DuplicateEdge { a, b });
        }
        self.lines.push(Edge::new(a, b, kind));
        self.bump();
        Ok(())
    }
    /// Removes the line joining `a` and `b`, if any. Returns whether a line
    /// was removed.
    pub fn remove_edge(&mut self, a: WaypointId, b: WaypointId) -> bool {
        match self.lines.iter().position(|l| l.connects(a, b)) {
            Some(idx) => {
                self.lines.remove(idx);
                self.bump();
                true
            }
            None => false,
        }
    }

    /// Lines incident to `id` paired with their other endpoint, in document
    /// order.
    pub fn neighbors(&self, id: WaypointId) -> GraphResult<Vec<(WaypointId, &Edge)>> {
        let mut out = Vec::new();
        for l in self.lines.iter().filter(|l| l.touches(id)) {
            match l.other(id) {
                Some(n) => out.push((n, l)),
                None => {
                    return Err(GraphError::MalformedEdge {
                        id,
                        p1: l.p1,
                        p2: l.p2,
                    })
                }
            }
        }
        Ok(out)
    }

    /// Lines with at least one endpoint that no longer resolves.
    pub fn dangling_lines(&self) -> Vec<&Edge> {
        self.lines
            .iter()
            .filter(|l| !self.contains_waypoint(l.p1) || !self.contains_waypoint(l.p2))
            .collect()
    }

    // Queries
    pub fn pick_waypoint(&self, x: f64, z: f64, tol: f64) -> Option<&Waypoint> {
        algorithms::picking::pick_impl(self, Vec2::new(x, z), tol)
    }
    pub fn find_path(&self, start: WaypointId, end: WaypointId) -> GraphResult<Option<Vec<WaypointId>>> {
        algorithms::astar::find_path(self, start, end)
    }
    /// Sum of straight-line segment lengths along `path`.
    pub fn path_length(&self, path: &[WaypointId]) -> GraphResult<f64> {
        let mut total = 0.0;
        for pair in path.windows(2) {
            let a = self.find_waypoint(pair[0])?.pos;
            let b = self.find_waypoint(pair[1])?.pos;
            total += geometry::math::dist(a, b);
        }
        Ok(total)
    }

    // JSON
    pub fn to_json_value(&self) -> Result<Value, StoreError> {
        json::to_json_impl(self)
    }
    pub fn from_json_value(v: Value) -> Result<WaypointGraph, StoreError> {
        json::from_json_impl(v)
    }

    pub fn clear(&mut self) {
        self.waypoints.clear();
        self.lines.clear();
        self.extra.clear();
        self.bump();
    }
}
