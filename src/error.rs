use wasm_bindgen::prelude::*;
use waynav::{FeedError, GraphError, StoreError, WaypointId};

use crate::interop::{new_obj, set_kv};

pub fn ok(v: JsValue) -> JsValue {
    let o = new_obj();
    set_kv(&o, "ok", &JsValue::from_bool(true));
    set_kv(&o, "value", &v);
    o.into()
}

pub fn err(code: &'static str, message: impl Into<String>, data: Option<JsValue>) -> JsValue {
    let root = new_obj();
    set_kv(&root, "ok", &JsValue::from_bool(false));
    let e = new_obj();
    set_kv(&e, "code", &JsValue::from_str(code));
    set_kv(&e, "message", &JsValue::from_str(&message.into()));
    if let Some(d) = data { set_kv(&e, "data", &d); }
    set_kv(&root, "error", &e.into());
    root.into()
}

#[inline]
pub fn non_finite(param: &str) -> JsValue {
    let d = new_obj(); set_kv(&d, "param", &JsValue::from_str(param));
    err("non_finite", format!("parameter '{}' must be finite", param), Some(d.into()))
}

#[inline]
pub fn out_of_range(param: &str, min: f64, max: f64, got: f64) -> JsValue {
    let d = new_obj();
    set_kv(&d, "param", &JsValue::from_str(param));
    set_kv(&d, "min", &JsValue::from_f64(min));
    set_kv(&d, "max", &JsValue::from_f64(max));
    set_kv(&d, "got", &JsValue::from_f64(got));
    err("out_of_range", format!("parameter '{}' out of range", param), Some(d.into()))
}

// Ids cross the boundary as BigInt so hashed 64-bit ids survive.
#[inline]
pub fn invalid_id(kind: &str, id: WaypointId) -> JsValue {
    let d = new_obj();
    set_kv(&d, "kind", &JsValue::from_str(kind));
    set_kv(&d, "id", &JsValue::from(id));
    err("invalid_id", format!("invalid {} id", kind), Some(d.into()))
}

pub fn graph_err(e: &GraphError) -> JsValue {
    let d = new_obj();
    match *e {
        GraphError::NotFound(id) | GraphError::InvalidEdge(id) => {
            set_kv(&d, "id", &JsValue::from(id));
        }
        GraphError::DuplicateEdge { a, b } => {
            set_kv(&d, "a", &JsValue::from(a));
            set_kv(&d, "b", &JsValue::from(b));
        }
        GraphError::MalformedEdge { id, p1, p2 } => {
            set_kv(&d, "id", &JsValue::from(id));
            set_kv(&d, "p1", &JsValue::from(p1));
            set_kv(&d, "p2", &JsValue::from(p2));
        }
    }
    err(e.code(), e.to_string(), Some(d.into()))
}

pub fn store_err(e: &StoreError) -> JsValue {
    let data = match *e {
        StoreError::OutOfBounds(id) => {
            let d = new_obj(); set_kv(&d, "id", &JsValue::from(id));
            Some(d.into())
        }
        _ => None,
    };
    err(e.code(), e.to_string(), data)
}

pub fn feed_err(e: &FeedError) -> JsValue {
    err(e.code(), e.to_string(), None)
}
