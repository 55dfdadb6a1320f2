//! Editing session: the graph being edited, where it came from, and the UI's
//! selection and last route.

use crate::error::{GraphResult, StoreError};
use crate::model::{EdgeKind, Vec2, Waypoint, WaypointId};
use crate::store::GraphStore;
use crate::WaypointGraph;

pub struct ViewerSession<S: GraphStore> {
    store: S,
    graph: WaypointGraph,
    selected: Option<WaypointId>,
    last_path: Vec<WaypointId>,
}

impl<S: GraphStore> ViewerSession<S> {
    /// Loads the graph from `store`.
    pub fn open(store: S) -> Result<Self, StoreError> {
        let graph = store.load()?;
        Ok(Self::with_graph(store, graph))
    }

    pub fn with_graph(store: S, graph: WaypointGraph) -> Self {
        ViewerSession {
            store,
            graph,
            selected: None,
            last_path: Vec::new(),
        }
    }

    pub fn graph(&self) -> &WaypointGraph {
        &self.graph
    }
    pub fn graph_mut(&mut self) -> &mut WaypointGraph {
        &mut self.graph
    }
    pub fn store(&self) -> &S {
        &self.store
    }
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    // Persistence
    /// Replaces the graph with the store's copy. Unsaved edits are discarded
    /// and the last route is cleared since ids may differ between documents.
    pub fn reload(&mut self) -> Result<(), StoreError> {
        self.graph = self.store.load()?;
        self.last_path.clear();
        if let Some(id) = self.selected {
            if !self.graph.contains_waypoint(id) {
                self.selected = None;
            }
        }
        Ok(())
    }
    pub fn save(&mut self) -> Result<(), StoreError> {
        self.store.save(&self.graph)
    }

    // Selection
    pub fn selected(&self) -> Option<WaypointId> {
        self.selected
    }
    /// The selected waypoint, if the selection still resolves.
    pub fn selected_waypoint(&self) -> Option<&Waypoint> {
        self.selected.and_then(|id| self.graph.find_waypoint(id).ok())
    }
    /// Selects `id`, or clears the selection when `id` is already selected.
    pub fn toggle_select(&mut self, id: WaypointId) -> GraphResult<Option<WaypointId>> {
        self.graph.find_waypoint(id)?;
        self.selected = if self.selected == Some(id) { None } else { Some(id) };
        Ok(self.selected)
    }
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    // Editing
    /// Connects the selection to `target`. Returns `Ok(false)` when nothing is
    /// selected or `target` is the selection itself; on success the selection
    /// is cleared.
    pub fn connect_selected(&mut self, target: WaypointId, kind: EdgeKind) -> GraphResult<bool> {
        let Some(sel) = self.selected else {
            return Ok(false);
        };
        if sel == target {
            return Ok(false);
        }
        self.graph.add_edge(sel, target, kind)?;
        self.selected = None;
        Ok(true)
    }
    /// Removes the line between the selection and `target`, if both exist.
    pub fn disconnect_selected(&mut self, target: WaypointId) -> bool {
        match self.selected {
            Some(sel) if sel != target => self.graph.remove_edge(sel, target),
            _ => false,
        }
    }
    /// Removes a waypoint, dropping it from the selection. Incident lines stay.
    pub fn remove_waypoint(&mut self, id: WaypointId) -> Option<Waypoint> {
        if self.selected == Some(id) {
            self.selected = None;
        }
        self.graph.remove_waypoint(id)
    }

    // Routing
    pub fn last_path(&self) -> &[WaypointId] {
        &self.last_path
    }
    pub fn clear_path(&mut self) {
        self.last_path.clear();
    }
    /// Routes `start` to `end` and keeps the result as the last path; an
    /// unreachable goal leaves an empty path. On error the previous path is
    /// kept.
    pub fn route(&mut self, start: WaypointId, end: WaypointId) -> GraphResult<&[WaypointId]> {
        self.last_path = self.graph.find_path(start, end)?.unwrap_or_default();
        Ok(&self.last_path)
    }
    /// Routes from the selection to `target`; `Ok(None)` without a selection.
    pub fn route_from_selected(&mut self, target: WaypointId) -> GraphResult<Option<&[WaypointId]>> {
        match self.selected {
            Some(sel) => self.route(sel, target).map(Some),
            None => Ok(None),
        }
    }
    /// Positions along the last path, for drawing.
    pub fn path_positions(&self) -> GraphResult<Vec<Vec2>> {
        self.last_path
            .iter()
            .map(|&id| self.graph.find_waypoint(id).map(|w| w.pos))
            .collect()
    }
    pub fn path_length(&self) -> GraphResult<f64> {
        self.graph.path_length(&self.last_path)
    }
}

