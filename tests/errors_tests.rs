#![cfg(target_arch = "wasm32")]

use js_sys::Reflect;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;
use waynav_wasm::Viewer;

wasm_bindgen_test_configure!(run_in_browser);

fn is_err(v: &JsValue, code: &str) -> bool {
    if let Ok(ok) =
        Reflect::get(v, &JsValue::from_str("ok")).and_then(|x| x.as_bool().ok_or(JsValue::NULL))
    {
        if ok {
            return false;
        }
        if let Ok(err) = Reflect::get(v, &JsValue::from_str("error")) {
            if let Ok(c) = Reflect::get(&err, &JsValue::from_str("code")) {
                return c.as_string().map_or(false, |s| s == code);
            }
        }
    }
    false
}

fn two_points() -> Viewer {
    let mut v = Viewer::new();
    v.add_waypoint_res(1, "T", "a", 0.0, 0.0);
    v.add_waypoint_res(2, "T", "b", 10.0, 0.0);
    v
}

#[wasm_bindgen_test]
fn invalid_ids_leave_state_alone() {
    let mut v = two_points();
    let rev = v.revision();
    assert!(is_err(&v.remove_waypoint_res(99), "invalid_id"));
    assert!(is_err(&v.add_line_res(1, 99, 0), "invalid_id"));
    assert!(is_err(&v.get_waypoint_res(99), "invalid_id"));
    assert!(is_err(&v.connect_res(99, 0), "invalid_id"));
    assert!(is_err(&v.toggle_select_res(99), "not_found"));
    assert_eq!(v.revision(), rev, "state mutated on error");
}

#[wasm_bindgen_test]
fn line_rules() {
    let mut v = two_points();
    assert!(is_err(&v.add_line_res(1, 1, 0), "invalid_edge"));
    assert!(!is_err(&v.add_line_res(1, 2, 0), "duplicate_edge"));
    assert!(is_err(&v.add_line_res(2, 1, 1), "duplicate_edge"));
    assert!(is_err(&v.add_waypoint_res(2, "T", "again", 1.0, 1.0), "duplicate_waypoint"));
    assert!(v.remove_line(2, 1));
    assert!(!v.remove_line(2, 1));
}

#[wasm_bindgen_test]
fn coordinates_are_checked() {
    let mut v = Viewer::new();
    assert!(is_err(&v.add_waypoint_res(1, "T", "a", f64::NAN, 0.0), "non_finite"));
    assert!(is_err(&v.add_waypoint_res(1, "T", "a", 0.0, 1.0e12), "out_of_range"));
    assert!(is_err(&v.pick_res(0.0, 0.0, -1.0), "out_of_range"));
    assert!(is_err(&v.pick_res(f64::INFINITY, 0.0, 1.0), "non_finite"));
    assert_eq!(v.waypoint_count(), 0);
}

#[wasm_bindgen_test]
fn routing_errors() {
    let mut v = two_points();
    v.add_line_res(1, 2, 0);
    assert!(is_err(&v.find_path_res(1, 42), "not_found"));
    v.remove_waypoint(2);
    assert!(!is_err(&v.find_path_res(1, 1), "not_found"));
    v.add_waypoint_res(3, "T", "c", 5.0, 5.0);
    assert!(is_err(&v.find_path_res(1, 3), "not_found"), "dangling line reached");
}

#[wasm_bindgen_test]
fn bad_documents_keep_the_current_graph() {
    let mut v = two_points();
    assert!(is_err(&v.load_json_res("{"), "json_parse"));
    assert!(is_err(
        &v.load_json_res(r#"{"waypoints":[{"id":1,"type":"T","name":"n","pos":[1e12,0]}]}"#),
        "out_of_bounds"
    ));
    assert_eq!(v.waypoint_count(), 2);
    assert!(is_err(&v.reload_res(), "empty_store"));
    assert!(is_err(&v.push_feed_message_res("not json"), "feed_parse"));
    let cfg = js_sys::JSON::parse(r#"{"pick_tolerance": -2}"#).unwrap();
    assert!(is_err(&v.configure_res(cfg), "out_of_range"));
}
