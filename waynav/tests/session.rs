use serde_json::json;
use waynav::{EdgeKind, GraphError, GraphStore, MemoryStore, Vec2, ViewerSession, Waypoint};

fn session() -> ViewerSession<MemoryStore> {
    let store = MemoryStore::with_document(json!({
        "waypoints": [
            {"id": 1, "type": "SQTR", "name": "A", "pos": [0, 0]},
            {"id": 2, "type": "SQTR", "name": "B", "pos": [3, 0]},
            {"id": 3, "type": "SQTR", "name": "C", "pos": [3, 4]}
        ],
        "lines": [{"p1": 1, "p2": 2, "type": 0}]
    }));
    ViewerSession::open(store).unwrap()
}

#[test]
fn open_on_empty_store_fails() {
    assert!(ViewerSession::open(MemoryStore::new()).is_err());
}

#[test]
fn selecting_twice_clears() {
    let mut s = session();
    assert_eq!(s.toggle_select(2).unwrap(), Some(2));
    assert_eq!(s.selected_waypoint().unwrap().name, "B");
    assert_eq!(s.toggle_select(3).unwrap(), Some(3));
    assert_eq!(s.toggle_select(3).unwrap(), None);
    assert_eq!(s.toggle_select(40).unwrap_err(), GraphError::NotFound(40));
    assert_eq!(s.selected(), None);
}

#[test]
fn connect_from_selection() {
    let mut s = session();
    assert!(!s.connect_selected(3, EdgeKind::Vehicle).unwrap(), "no selection");
    s.toggle_select(2).unwrap();
    assert!(!s.connect_selected(2, EdgeKind::Vehicle).unwrap(), "same waypoint");
    assert!(s.connect_selected(3, EdgeKind::Walkable).unwrap());
    assert_eq!(s.selected(), None);
    assert_eq!(s.graph().find_edge(3, 2).unwrap().kind, EdgeKind::Walkable);

    s.toggle_select(1).unwrap();
    assert_eq!(
        s.connect_selected(2, EdgeKind::Vehicle).unwrap_err(),
        GraphError::DuplicateEdge { a: 1, b: 2 }
    );
    assert_eq!(s.selected(), Some(1), "selection kept on failure");
}

#[test]
fn disconnect_from_selection() {
    let mut s = session();
    assert!(!s.disconnect_selected(2));
    s.toggle_select(2).unwrap();
    assert!(s.disconnect_selected(1));
    assert!(!s.disconnect_selected(1));
    assert_eq!(s.graph().line_count(), 0);
}

#[test]
fn route_and_positions() {
    let mut s = session();
    s.toggle_select(1).unwrap();
    s.connect_selected(3, EdgeKind::Vehicle).unwrap();
    assert_eq!(s.route_from_selected(3).unwrap(), None, "selection was consumed");

    s.toggle_select(2).unwrap();
    assert_eq!(s.route_from_selected(3).unwrap(), Some(&[2, 1, 3][..]));
    assert_eq!(
        s.path_positions().unwrap(),
        vec![Vec2::new(3.0, 0.0), Vec2::new(0.0, 0.0), Vec2::new(3.0, 4.0)]
    );
    assert!((s.path_length().unwrap() - 8.0).abs() < 1e-9);

    s.graph_mut().add_waypoint(Waypoint::new(9, "Island", "I", 50.0, 50.0));
    assert_eq!(s.route(1, 9).unwrap(), &[] as &[i64]);
    assert!(s.last_path().is_empty());
}

#[test]
fn failed_route_keeps_previous_path() {
    let mut s = session();
    s.route(1, 2).unwrap();
    assert!(s.route(1, 77).is_err());
    assert_eq!(s.last_path(), &[1, 2]);
}

#[test]
fn reload_discards_unsaved_edits() {
    let mut s = session();
    s.route(1, 2).unwrap();
    s.graph_mut().add_edge(2, 3, EdgeKind::Vehicle).unwrap();
    s.toggle_select(3).unwrap();
    s.reload().unwrap();
    assert_eq!(s.graph().line_count(), 1);
    assert!(s.last_path().is_empty());
    assert_eq!(s.selected(), Some(3));
}

#[test]
fn reload_drops_selection_that_no_longer_resolves() {
    let mut s = session();
    s.graph_mut().add_waypoint(Waypoint::new(4, "SQTR", "D", 9.0, 9.0));
    s.toggle_select(4).unwrap();
    s.reload().unwrap();
    assert_eq!(s.selected(), None);
}

#[test]
fn save_then_reload_keeps_edits() {
    let mut s = session();
    s.graph_mut().add_edge(2, 3, EdgeKind::Walkable).unwrap();
    s.save().unwrap();
    s.reload().unwrap();
    assert_eq!(s.graph().line_count(), 2);
    assert_eq!(s.store().load().unwrap().line_count(), 2);
}

#[test]
fn removing_selected_waypoint_clears_selection() {
    let mut s = session();
    s.toggle_select(2).unwrap();
    assert!(s.remove_waypoint(2).is_some());
    assert_eq!(s.selected(), None);
    assert_eq!(s.graph().dangling_lines().len(), 1);
}
