use serde::de::{self, Deserializer};
use serde::ser::{SerializeTuple, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

pub type WaypointId = i64;

/// Map-plane position. Serialized as `[x, z]`.
///
/// Each axis remembers whether the document wrote it as a float, so `12.0`
/// is saved as `12.0` and `12` as `12`. Equality compares coordinates only.
#[derive(Clone, Copy, Debug, Default)]
pub struct Vec2 {
    pub x: f64,
    pub z: f64,
    float_form: [bool; 2],
}

impl Vec2 {
    pub fn new(x: f64, z: f64) -> Self {
        Vec2 {
            x,
            z,
            float_form: [false; 2],
        }
    }
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.z.is_finite()
    }
}

impl PartialEq for Vec2 {
    fn eq(&self, other: &Self) -> bool {
        self.x == other.x && self.z == other.z
    }
}

const MAX_EXACT_INT: f64 = 9_007_199_254_740_992.0;

// Integral values not read as floats are written as JSON integers.
fn serialize_coord<T: SerializeTuple>(t: &mut T, v: f64, float_form: bool) -> Result<(), T::Error> {
    if !float_form && v.fract() == 0.0 && v.abs() < MAX_EXACT_INT {
        t.serialize_element(&(v as i64))
    } else {
        t.serialize_element(&v)
    }
}

impl Serialize for Vec2 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut t = serializer.serialize_tuple(2)?;
        serialize_coord(&mut t, self.x, self.float_form[0])?;
        serialize_coord(&mut t, self.z, self.float_form[1])?;
        t.end()
    }
}

fn coord<E: de::Error>(n: &Number) -> Result<f64, E> {
    n.as_f64()
        .ok_or_else(|| E::custom(format!("coordinate {} is not representable as f64", n)))
}

impl<'de> Deserialize<'de> for Vec2 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let [x, z] = <[Number; 2]>::deserialize(deserializer)?;
        Ok(Vec2 {
            x: coord(&x)?,
            z: coord(&z)?,
            float_form: [x.is_f64(), z.is_f64()],
        })
    }
}

/// Line category. 0 is a vehicle line, 1 a walkable connection; any other
/// integer tag is carried through untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum EdgeKind {
    Vehicle,
    Walkable,
    Other(i64),
}

impl From<i64> for EdgeKind {
    fn from(v: i64) -> Self {
        match v {
            0 => EdgeKind::Vehicle,
            1 => EdgeKind::Walkable,
            n => EdgeKind::Other(n),
        }
    }
}

impl From<EdgeKind> for i64 {
    fn from(k: EdgeKind) -> i64 {
        match k {
            EdgeKind::Vehicle => 0,
            EdgeKind::Walkable => 1,
            EdgeKind::Other(n) => n,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub id: WaypointId,
    #[serde(rename = "type")]
    pub network: String,
    pub name: String,
    pub pos: Vec2,
    // Attributes written by other tools (e.g. `_aircsId`), kept verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Waypoint {
    pub fn new(id: WaypointId, network: &str, name: &str, x: f64, z: f64) -> Self {
        Waypoint {
            id,
            network: network.to_string(),
            name: name.to_string(),
            pos: Vec2::new(x, z),
            extra: Map::new(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub p1: WaypointId,
    pub p2: WaypointId,
    #[serde(rename = "type")]
    pub kind: EdgeKind,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Edge {
    pub fn new(p1: WaypointId, p2: WaypointId, kind: EdgeKind) -> Self {
        Edge {
            p1,
            p2,
            kind,
            extra: Map::new(),
        }
    }

    /// Unordered-pair identity: `{p1, p2} == {a, b}`.
    pub fn connects(&self, a: WaypointId, b: WaypointId) -> bool {
        (self.p1 == a && self.p2 == b) || (self.p1 == b && self.p2 == a)
    }

    pub fn touches(&self, id: WaypointId) -> bool {
        self.p1 == id || self.p2 == id
    }

    /// The endpoint that is not `id`. None when `id` is not an endpoint or the
    /// edge is a self-loop.
    pub fn other(&self, id: WaypointId) -> Option<WaypointId> {
        if self.p1 == self.p2 {
            None
        } else if self.p1 == id {
            Some(self.p2)
        } else if self.p2 == id {
            Some(self.p1)
        } else {
            None
        }
    }
}
