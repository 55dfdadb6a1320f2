use crate::Viewer;
use serde::Serialize;
use wasm_bindgen::prelude::*;
use waynav::geometry::limits;
use waynav::{EdgeKind, MemoryStore, ViewerConfig, ViewerSession, Waypoint, WaypointId};
type JsValue = wasm_bindgen::JsValue;
use crate::error;
use crate::interop::{arr_f64, arr_i64, arr_str, new_obj, set_kv};

#[wasm_bindgen]
pub fn set_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

fn check_coord(param: &str, v: f64) -> Option<JsValue> {
    if !v.is_finite() {
        return Some(error::non_finite(param));
    }
    if !limits::in_coord_bounds(v) {
        return Some(error::out_of_range(param, limits::COORD_MIN, limits::COORD_MAX, v));
    }
    None
}

fn path_value(path: &[WaypointId]) -> JsValue {
    if path.is_empty() {
        JsValue::NULL
    } else {
        arr_i64(path).into()
    }
}

fn waypoint_value(w: &Waypoint) -> Result<JsValue, serde_wasm_bindgen::Error> {
    let o = new_obj();
    set_kv(&o, "id", &JsValue::from(w.id));
    set_kv(&o, "type", &JsValue::from_str(&w.network));
    set_kv(&o, "name", &JsValue::from_str(&w.name));
    set_kv(&o, "x", &JsValue::from_f64(w.pos.x));
    set_kv(&o, "z", &JsValue::from_f64(w.pos.z));
    let extra = w.extra.serialize(&serde_wasm_bindgen::Serializer::json_compatible())?;
    set_kv(&o, "extra", &extra);
    Ok(o.into())
}

#[wasm_bindgen]
impl Viewer {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Viewer {
        crate::Viewer::rs_new()
    }
    pub fn revision(&self) -> u64 {
        self.rs_revision()
    }

    // Configuration
    pub fn configure_res(&mut self, v: JsValue) -> JsValue {
        match serde_wasm_bindgen::from_value::<ViewerConfig>(v) {
            Ok(cfg) => {
                if !cfg.pick_tolerance.is_finite() {
                    return error::non_finite("pick_tolerance");
                }
                if cfg.pick_tolerance < 0.0 {
                    return error::out_of_range("pick_tolerance", 0.0, f64::MAX, cfg.pick_tolerance);
                }
                self.config = cfg;
                error::ok(JsValue::TRUE)
            }
            Err(e) => error::err("invalid_config", format!("{}", e), None),
        }
    }
    pub fn get_config(&self) -> JsValue {
        self.config
            .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
            .unwrap_or(JsValue::NULL)
    }
    pub fn feed_url(&self) -> String {
        self.config.feed_url.clone()
    }

    // Persistence
    /// Replaces the session with the document in `text`. Selection and last
    /// path are reset; on error the current session is untouched.
    pub fn load_json_res(&mut self, text: &str) -> JsValue {
        let session = MemoryStore::from_json_str(text).and_then(ViewerSession::open);
        match session {
            Ok(s) => {
                self.session = s;
                let o = new_obj();
                set_kv(&o, "waypoints", &JsValue::from_f64(self.session.graph().waypoint_count() as f64));
                set_kv(&o, "lines", &JsValue::from_f64(self.session.graph().line_count() as f64));
                error::ok(o.into())
            }
            Err(e) => error::store_err(&e),
        }
    }
    /// Writes the graph into the session's document and returns it as
    /// four-space-indented JSON text.
    pub fn save_res(&mut self) -> JsValue {
        let text = self.session.save().and_then(|_| self.session.store().to_pretty_string());
        match text {
            Ok(t) => error::ok(JsValue::from_str(&t)),
            Err(e) => error::store_err(&e),
        }
    }
    pub fn reload_res(&mut self) -> JsValue {
        match self.session.reload() {
            Ok(()) => error::ok(JsValue::from_f64(self.session.graph().waypoint_count() as f64)),
            Err(e) => error::store_err(&e),
        }
    }
    /// Compact JSON of the current graph, unsaved edits included.
    pub fn to_json_res(&self) -> JsValue {
        let text = self
            .session
            .graph()
            .to_json_value()
            .and_then(|v| serde_json::to_string(&v).map_err(Into::into));
        match text {
            Ok(t) => error::ok(JsValue::from_str(&t)),
            Err(e) => error::store_err(&e),
        }
    }

    // Waypoints
    pub fn waypoint_count(&self) -> u32 {
        self.session.graph().waypoint_count() as u32
    }
    pub fn add_waypoint_res(&mut self, id: WaypointId, network: &str, name: &str, x: f64, z: f64) -> JsValue {
        if let Some(e) = check_coord("x", x).or_else(|| check_coord("z", z)) {
            return e;
        }
        if self.session.graph().contains_waypoint(id) {
            let d = new_obj();
            set_kv(&d, "id", &JsValue::from(id));
            return error::err("duplicate_waypoint", "waypoint id already in use", Some(d.into()));
        }
        self.session
            .graph_mut()
            .add_waypoint(Waypoint::new(id, network, name, x, z));
        error::ok(JsValue::from(id))
    }
    pub fn remove_waypoint(&mut self, id: WaypointId) -> bool {
        self.session.remove_waypoint(id).is_some()
    }
    pub fn remove_waypoint_res(&mut self, id: WaypointId) -> JsValue {
        if !self.session.graph().contains_waypoint(id) {
            return error::invalid_id("waypoint", id);
        }
        error::ok(JsValue::from_bool(self.session.remove_waypoint(id).is_some()))
    }
    pub fn get_waypoint_res(&self, id: WaypointId) -> JsValue {
        match self.session.graph().find_waypoint(id) {
            Ok(w) => match waypoint_value(w) {
                Ok(v) => error::ok(v),
                Err(e) => error::err("json_parse", format!("{}", e), None),
            },
            Err(_) => error::invalid_id("waypoint", id),
        }
    }
    pub fn dangling_line_count(&self) -> u32 {
        self.session.graph().dangling_lines().len() as u32
    }

    // Lines
    pub fn line_count(&self) -> u32 {
        self.session.graph().line_count() as u32
    }
    pub fn add_line_res(&mut self, a: WaypointId, b: WaypointId, kind: i32) -> JsValue {
        if !self.session.graph().contains_waypoint(a) {
            return error::invalid_id("waypoint", a);
        }
        if !self.session.graph().contains_waypoint(b) {
            return error::invalid_id("waypoint", b);
        }
        match self.session.graph_mut().add_edge(a, b, EdgeKind::from(i64::from(kind))) {
            Ok(()) => error::ok(JsValue::TRUE),
            Err(e) => error::graph_err(&e),
        }
    }
    pub fn remove_line(&mut self, a: WaypointId, b: WaypointId) -> bool {
        self.session.graph_mut().remove_edge(a, b)
    }
    pub fn has_line(&self, a: WaypointId, b: WaypointId) -> bool {
        self.session.graph().find_edge(a, b).is_some()
    }

    // Typed arrays getters
    pub fn get_waypoint_data(&self) -> JsValue {
        let wps = self.session.graph().waypoints();
        let ids: Vec<i64> = wps.iter().map(|w| w.id).collect();
        let pos: Vec<f64> = wps.iter().flat_map(|w| [w.pos.x, w.pos.z]).collect();
        let obj = new_obj();
        set_kv(&obj, "ids", &arr_i64(&ids).into());
        set_kv(&obj, "positions", &arr_f64(&pos).into());
        set_kv(&obj, "types", &arr_str(wps.iter().map(|w| w.network.as_str())).into());
        set_kv(&obj, "names", &arr_str(wps.iter().map(|w| w.name.as_str())).into());
        obj.into()
    }
    pub fn get_line_data(&self) -> JsValue {
        let lines = self.session.graph().lines();
        let endpoints: Vec<i64> = lines.iter().flat_map(|l| [l.p1, l.p2]).collect();
        let kinds: Vec<i64> = lines.iter().map(|l| i64::from(l.kind)).collect();
        let obj = new_obj();
        set_kv(&obj, "endpoints", &arr_i64(&endpoints).into());
        set_kv(&obj, "kinds", &arr_i64(&kinds).into());
        obj.into()
    }

    // Selection
    pub fn selected(&self) -> Option<WaypointId> {
        self.session.selected()
    }
    pub fn toggle_select_res(&mut self, id: WaypointId) -> JsValue {
        match self.session.toggle_select(id) {
            Ok(Some(sel)) => error::ok(JsValue::from(sel)),
            Ok(None) => error::ok(JsValue::NULL),
            Err(e) => error::graph_err(&e),
        }
    }
    pub fn clear_selection(&mut self) {
        self.session.clear_selection()
    }
    pub fn selected_label(&self) -> Option<String> {
        self.session
            .selected_waypoint()
            .map(|w| format!("{} ({})", w.name, w.network))
    }
    pub fn connect_res(&mut self, target: WaypointId, kind: i32) -> JsValue {
        if !self.session.graph().contains_waypoint(target) {
            return error::invalid_id("waypoint", target);
        }
        match self.session.connect_selected(target, EdgeKind::from(i64::from(kind))) {
            Ok(done) => error::ok(JsValue::from_bool(done)),
            Err(e) => error::graph_err(&e),
        }
    }
    pub fn disconnect(&mut self, target: WaypointId) -> bool {
        self.session.disconnect_selected(target)
    }

    // Routing
    /// Last path as a `BigInt64Array`, or `null` when the goal was unreachable.
    pub fn find_path_res(&mut self, start: WaypointId, end: WaypointId) -> JsValue {
        match self.session.route(start, end) {
            Ok(path) => error::ok(path_value(path)),
            Err(e) => error::graph_err(&e),
        }
    }
    pub fn route_from_selected_res(&mut self, target: WaypointId) -> JsValue {
        match self.session.route_from_selected(target) {
            Ok(Some(path)) => error::ok(path_value(path)),
            Ok(None) => error::ok(JsValue::NULL),
            Err(e) => error::graph_err(&e),
        }
    }
    pub fn last_path(&self) -> JsValue {
        path_value(self.session.last_path())
    }
    pub fn clear_path(&mut self) {
        self.session.clear_path()
    }
    pub fn path_positions_res(&self) -> JsValue {
        match self.session.path_positions() {
            Ok(pts) => {
                let flat: Vec<f64> = pts.iter().flat_map(|p| [p.x, p.z]).collect();
                error::ok(arr_f64(&flat).into())
            }
            Err(e) => error::graph_err(&e),
        }
    }
    pub fn path_length_res(&self) -> JsValue {
        match self.session.path_length() {
            Ok(len) => error::ok(JsValue::from_f64(len)),
            Err(e) => error::graph_err(&e),
        }
    }

    // Picking
    pub fn pick(&self, x: f64, z: f64) -> Option<WaypointId> {
        self.session
            .graph()
            .pick_waypoint(x, z, self.config.pick_tolerance)
            .map(|w| w.id)
    }
    pub fn pick_res(&self, x: f64, z: f64, tol: f64) -> JsValue {
        if !x.is_finite() {
            return error::non_finite("x");
        }
        if !z.is_finite() {
            return error::non_finite("z");
        }
        if !tol.is_finite() {
            return error::non_finite("tol");
        }
        if tol < 0.0 {
            return error::out_of_range("tol", 0.0, f64::MAX, tol);
        }
        match self.session.graph().pick_waypoint(x, z, tol) {
            Some(w) => error::ok(JsValue::from(w.id)),
            None => error::ok(JsValue::NULL),
        }
    }

    // Player feed
    /// Decodes one feed message and queues it for the next `tick`. Returns
    /// whether the message carried a player event.
    pub fn push_feed_message(&self, text: &str) -> bool {
        match self.feed.send_message(text) {
            Ok(queued) => queued,
            Err(e) => {
                web_sys::console::warn_1(&JsValue::from_str(&format!("player feed: {}", e)));
                false
            }
        }
    }
    pub fn push_feed_message_res(&self, text: &str) -> JsValue {
        match self.feed.send_message(text) {
            Ok(queued) => error::ok(JsValue::from_bool(queued)),
            Err(e) => error::feed_err(&e),
        }
    }
    /// Applies queued feed events, at most `feed_drain_max` per call.
    pub fn tick(&mut self) -> u32 {
        self.overlay.drain(self.config.feed_drain_max) as u32
    }
    pub fn player_count(&self) -> u32 {
        self.overlay.players().len() as u32
    }
    pub fn get_player_data(&self) -> JsValue {
        let players = self.overlay.players();
        let pos: Vec<f64> = players.iter().flat_map(|(_, p)| [p.x, p.z]).collect();
        let obj = new_obj();
        set_kv(&obj, "ids", &arr_str(players.iter().map(|(id, _)| id)).into());
        set_kv(&obj, "positions", &arr_f64(&pos).into());
        obj.into()
    }
}

impl Default for Viewer {
    fn default() -> Self {
        Self::new()
    }
}
