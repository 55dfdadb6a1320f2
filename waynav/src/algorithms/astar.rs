//! A* routing over a [`WaypointGraph`].
//!
//! Step cost and heuristic are both straight-line distance on the map plane;
//! line kinds carry no weight. The open set may hold several entries for one
//! waypoint: an expansion is dropped only when an open entry for the same id
//! already records a g no greater than the new one, otherwise another entry is
//! pushed and the older one is skipped once its id has been closed. Entries
//! are ranked by f, then by insertion order, so equal-cost routes resolve the
//! same way on every run.

use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashMap, HashSet};

use crate::error::{GraphError, GraphResult};
use crate::geometry::math::dist;
use crate::model::{Vec2, WaypointId};
use crate::WaypointGraph;

/// A path found by [`find_route`].
#[derive(Clone, Debug, PartialEq)]
pub struct Route {
    /// Waypoint ids from start to goal inclusive.
    pub path: Vec<WaypointId>,
    /// Summed segment length along `path`.
    pub cost: f64,
    /// Waypoints expanded before the goal was reached.
    pub expanded: usize,
}

#[derive(Clone, Copy, Debug)]
enum Link {
    To(WaypointId),
    Malformed { p1: WaypointId, p2: WaypointId },
}

/// Read-only snapshot of a graph indexed for search.
///
/// Positions resolve to the first waypoint carrying an id; adjacency lists
/// follow line order.
pub struct NavGraph {
    positions: HashMap<WaypointId, Vec2>,
    adjacency: HashMap<WaypointId, Vec<Link>>,
}

impl NavGraph {
    pub fn build(g: &WaypointGraph) -> Self {
        let mut positions = HashMap::with_capacity(g.waypoints.len());
        for w in &g.waypoints {
            positions.entry(w.id).or_insert(w.pos);
        }
        let mut adjacency: HashMap<WaypointId, Vec<Link>> = HashMap::new();
        for l in &g.lines {
            if l.p1 == l.p2 {
                // Reported only if the search reaches this waypoint.
                adjacency
                    .entry(l.p1)
                    .or_default()
                    .push(Link::Malformed { p1: l.p1, p2: l.p2 });
            } else {
                adjacency.entry(l.p1).or_default().push(Link::To(l.p2));
                adjacency.entry(l.p2).or_default().push(Link::To(l.p1));
            }
        }
        NavGraph {
            positions,
            adjacency,
        }
    }

    pub fn position(&self, id: WaypointId) -> GraphResult<Vec2> {
        self.positions
            .get(&id)
            .copied()
            .ok_or(GraphError::NotFound(id))
    }

    pub fn neighbors(&self, id: WaypointId) -> GraphResult<Vec<WaypointId>> {
        let Some(links) = self.adjacency.get(&id) else {
            return Ok(Vec::new());
        };
        links
            .iter()
            .map(|link| match *link {
                Link::To(n) => Ok(n),
                Link::Malformed { p1, p2 } => Err(GraphError::MalformedEdge { id, p1, p2 }),
            })
            .collect()
    }
}

#[derive(Clone, Copy, Debug)]
struct SearchNode {
    id: WaypointId,
    g: f64,
    parent: Option<usize>,
}

/// Open-set ranking key: lowest f first, earliest insertion on ties. `seq` is
/// also the node's slot in the search arena.
#[derive(Clone, Copy, Debug)]
struct Priority {
    f: f64,
    seq: usize,
}

impl Priority {
    /// Ranking key for the open set: f ascending, then insertion order.
    fn key_cmp(&self, other: &Self) -> Ordering {
        self.f.total_cmp(&other.f).then(self.seq.cmp(&other.seq))
    }
}

// The comparison impls below only delegate to `key_cmp`, which is the ranking
// key; `BinaryHeap` needs them to order entries.
impl PartialEq for Priority {
    fn eq(&self, other: &Self) -> bool {
        self.key_cmp(other) == Ordering::Equal
    }
}

impl Eq for Priority {}

impl PartialOrd for Priority {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.key_cmp(other))
    }
}

impl Ord for Priority {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key_cmp(other)
    }
}

/// Shortest route from `start` to `goal`, or `None` when the goal is not
/// reachable.
///
/// # Errors
/// * `GraphError::NotFound` - `start`, `goal` or a line endpoint met during the
///   search does not resolve to a waypoint
/// * `GraphError::MalformedEdge` - an expanded waypoint has a self-loop line
pub fn find_route(g: &WaypointGraph, start: WaypointId, goal: WaypointId) -> GraphResult<Option<Route>> {
    let nav = NavGraph::build(g);
    let goal_pos = nav.position(goal)?;
    let start_pos = nav.position(start)?;

    let mut arena = vec![SearchNode {
        id: start,
        g: 0.0,
        parent: None,
    }];
    let mut open = BinaryHeap::new();
    open.push(Reverse(Priority {
        f: dist(start_pos, goal_pos),
        seq: 0,
    }));
    // Lowest g among open entries per id; only consulted while the id is open.
    let mut open_g: HashMap<WaypointId, f64> = HashMap::from([(start, 0.0)]);
    let mut closed: HashSet<WaypointId> = HashSet::new();
    let mut expanded = 0usize;

    while let Some(Reverse(Priority { seq: idx, .. })) = open.pop() {
        let current = arena[idx];
        if !closed.insert(current.id) {
            continue;
        }
        if current.id == goal {
            log::debug!(
                "route {} -> {}: expanded {} waypoints, {} entries left open",
                start,
                goal,
                expanded,
                open.len()
            );
            return Ok(Some(Route {
                path: backtrack(&arena, idx),
                cost: current.g,
                expanded,
            }));
        }
        expanded += 1;

        let children = nav.neighbors(current.id)?;
        let here = nav.position(current.id)?;
        for child in children {
            if closed.contains(&child) {
                continue;
            }
            let there = nav.position(child)?;
            let g_child = current.g + dist(here, there);
            if open_g.get(&child).is_some_and(|&og| og <= g_child) {
                continue;
            }
            let seq = arena.len();
            arena.push(SearchNode {
                id: child,
                g: g_child,
                parent: Some(idx),
            });
            open.push(Reverse(Priority {
                f: g_child + dist(there, goal_pos),
                seq,
            }));
            open_g.insert(child, g_child);
        }
    }

    log::debug!(
        "route {} -> {}: no path after expanding {} waypoints",
        start,
        goal,
        expanded
    );
    Ok(None)
}

/// Waypoint ids of the shortest route from `start` to `goal`.
pub fn find_path(g: &WaypointGraph, start: WaypointId, goal: WaypointId) -> GraphResult<Option<Vec<WaypointId>>> {
    Ok(find_route(g, start, goal)?.map(|r| r.path))
}

fn backtrack(arena: &[SearchNode], mut idx: usize) -> Vec<WaypointId> {
    let mut path = vec![arena[idx].id];
    while let Some(parent) = arena[idx].parent {
        path.push(arena[parent].id);
        idx = parent;
    }
    path.reverse();
    path
}
