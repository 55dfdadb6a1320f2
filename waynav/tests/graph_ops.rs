use waynav::{EdgeKind, GraphError, Waypoint, WaypointGraph};

fn three_stations() -> WaypointGraph {
    WaypointGraph::from_parts(
        vec![
            Waypoint::new(1, "SQTR", "Spawn", 0.0, 0.0),
            Waypoint::new(2, "SQTR", "Harbour", 3.0, 0.0),
            Waypoint::new(3, "ClyRail", "Airport", 3.0, 4.0),
        ],
        vec![],
    )
}

#[test]
fn find_waypoint_reports_missing_id() {
    let g = three_stations();
    assert_eq!(g.find_waypoint(2).unwrap().name, "Harbour");
    assert_eq!(g.find_waypoint(42).unwrap_err(), GraphError::NotFound(42));
}

#[test]
fn colliding_ids_resolve_to_first() {
    let mut g = three_stations();
    g.add_waypoint(Waypoint::new(2, "AirCS", "Shadow", 99.0, 99.0));
    assert_eq!(g.find_waypoint(2).unwrap().name, "Harbour");
}

#[test]
fn edges_are_undirected() {
    let mut g = three_stations();
    g.add_edge(1, 2, EdgeKind::Vehicle).unwrap();
    let ab = g.find_edge(1, 2).cloned();
    let ba = g.find_edge(2, 1).cloned();
    assert!(ab.is_some());
    assert_eq!(ab, ba);
    assert!(g.find_edge(1, 3).is_none());
}

#[test]
fn self_loop_rejected_without_mutation() {
    let mut g = three_stations();
    let ver = g.revision();
    assert_eq!(g.add_edge(3, 3, EdgeKind::Walkable), Err(GraphError::InvalidEdge(3)));
    assert_eq!(g.line_count(), 0);
    assert_eq!(g.revision(), ver, "state mutated on error");
}

#[test]
fn duplicate_rejected_in_either_direction_and_kind() {
    let mut g = three_stations();
    g.add_edge(1, 2, EdgeKind::Vehicle).unwrap();
    assert_eq!(
        g.add_edge(2, 1, EdgeKind::Walkable),
        Err(GraphError::DuplicateEdge { a: 2, b: 1 })
    );
    assert_eq!(g.line_count(), 1);
    assert_eq!(g.find_edge(1, 2).unwrap().kind, EdgeKind::Vehicle);
}

#[test]
fn remove_edge_is_idempotent() {
    let mut g = three_stations();
    g.add_edge(1, 2, EdgeKind::Vehicle).unwrap();
    g.add_edge(2, 3, EdgeKind::Vehicle).unwrap();
    assert!(g.remove_edge(2, 1));
    let after_once: Vec<_> = g.lines().to_vec();
    assert!(!g.remove_edge(2, 1));
    assert!(!g.remove_edge(1, 2));
    assert_eq!(g.lines(), &after_once[..]);
    assert!(!g.remove_edge(7, 8));
    assert_eq!(g.line_count(), 1);
}

#[test]
fn neighbors_follow_line_order() {
    let mut g = three_stations();
    g.add_edge(3, 1, EdgeKind::Walkable).unwrap();
    g.add_edge(1, 2, EdgeKind::Vehicle).unwrap();
    let n: Vec<_> = g.neighbors(1).unwrap().into_iter().map(|(id, e)| (id, e.kind)).collect();
    assert_eq!(n, vec![(3, EdgeKind::Walkable), (2, EdgeKind::Vehicle)]);
    assert!(g.neighbors(99).unwrap().is_empty());
}

#[test]
fn neighbors_report_self_loop_from_store() {
    let g = WaypointGraph::from_parts(
        vec![Waypoint::new(1, "A", "A", 0.0, 0.0)],
        vec![waynav::Edge::new(1, 1, EdgeKind::Vehicle)],
    );
    assert_eq!(
        g.neighbors(1).unwrap_err(),
        GraphError::MalformedEdge { id: 1, p1: 1, p2: 1 }
    );
}

#[test]
fn removing_waypoint_leaves_dangling_lines() {
    let mut g = three_stations();
    g.add_edge(1, 2, EdgeKind::Vehicle).unwrap();
    g.add_edge(2, 3, EdgeKind::Vehicle).unwrap();
    let removed = g.remove_waypoint(3).unwrap();
    assert_eq!(removed.name, "Airport");
    assert_eq!(g.line_count(), 2);
    let dangling = g.dangling_lines();
    assert_eq!(dangling.len(), 1);
    assert!(dangling[0].connects(2, 3));
    assert!(g.remove_waypoint(3).is_none());
}

#[test]
fn revision_bumps_on_mutation() {
    let mut g = three_stations();
    let v0 = g.revision();
    g.add_edge(1, 2, EdgeKind::Vehicle).unwrap();
    let v1 = g.revision();
    assert!(v1 > v0);
    g.remove_edge(1, 2);
    assert!(g.revision() > v1);
    let v2 = g.revision();
    g.remove_edge(1, 2);
    assert_eq!(g.revision(), v2, "no-op removal must not bump");
}

#[test]
fn path_length_sums_segments() {
    let g = three_stations();
    assert!((g.path_length(&[1, 2, 3]).unwrap() - 7.0).abs() < 1e-9);
    assert_eq!(g.path_length(&[1]).unwrap(), 0.0);
    assert_eq!(g.path_length(&[1, 8]).unwrap_err(), GraphError::NotFound(8));
}
