use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::StoreError;

pub const DEFAULT_STORE_PATH: &str = "waypoints.json";
pub const DEFAULT_FEED_URL: &str = "ws://bnbnav.aircs.racing/ws";
pub const DEFAULT_FEED_DRAIN_MAX: usize = 256;
pub const DEFAULT_PICK_TOLERANCE: f64 = 5.0;

/// Runtime settings for a viewer session. Every field has a default, so an
/// empty JSON object is a valid configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Document read by `load` and written by `save`.
    pub store_path: PathBuf,
    /// Player feed endpoint, handed to whatever transport drives the feed.
    pub feed_url: String,
    /// Upper bound on feed events applied per tick.
    pub feed_drain_max: usize,
    /// Half-size of the hit square used when picking waypoints.
    pub pick_tolerance: f64,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        ViewerConfig {
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            feed_url: DEFAULT_FEED_URL.to_string(),
            feed_drain_max: DEFAULT_FEED_DRAIN_MAX,
            pick_tolerance: DEFAULT_PICK_TOLERANCE,
        }
    }
}

impl ViewerConfig {
    pub fn from_json_str(s: &str) -> Result<Self, StoreError> {
        Ok(serde_json::from_str(s)?)
    }
}
