//! Durable storage for waypoint documents.
//!
//! A document is a JSON object with a `waypoints` array and a `lines` array.
//! Keys the graph does not understand, at any level, are kept and written back.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;

use crate::config::ViewerConfig;
use crate::{StoreError, WaypointGraph};

pub trait GraphStore {
    fn load(&self) -> Result<WaypointGraph, StoreError>;
    fn save(&mut self, graph: &WaypointGraph) -> Result<(), StoreError>;
}

/// Document on disk, written with four-space indentation.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileStore { path: path.into() }
    }

    pub fn from_config(config: &ViewerConfig) -> Self {
        Self::new(config.store_path.clone())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_err(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl GraphStore for JsonFileStore {
    fn load(&self) -> Result<WaypointGraph, StoreError> {
        log::info!(
            "{:<32}{:<32}",
            "loading     waypoints",
            self.path.display()
        );
        let text = fs::read_to_string(&self.path).map_err(|e| self.io_err(e))?;
        let graph = WaypointGraph::from_json_value(serde_json::from_str(&text)?)?;
        log::info!(
            "loaded {} waypoints and {} lines",
            graph.waypoint_count(),
            graph.line_count()
        );
        Ok(graph)
    }

    fn save(&mut self, graph: &WaypointGraph) -> Result<(), StoreError> {
        log::info!(
            "{:<32}{:<32}",
            "saving      waypoints",
            self.path.display()
        );
        let bytes = to_pretty_bytes(&graph.to_json_value()?)?;
        fs::write(&self.path, bytes).map_err(|e| self.io_err(e))
    }
}

fn to_pretty_bytes(v: &Value) -> Result<Vec<u8>, StoreError> {
    let mut out = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(b"    "));
    v.serialize(&mut ser)?;
    Ok(out)
}

/// In-memory document, for hosts without a filesystem and for tests.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    doc: Option<Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(doc: Value) -> Self {
        MemoryStore { doc: Some(doc) }
    }

    pub fn from_json_str(s: &str) -> Result<Self, StoreError> {
        Ok(Self::with_document(serde_json::from_str(s)?))
    }

    /// Replaces the stored document; the next `load` sees it.
    pub fn set_document(&mut self, doc: Value) {
        self.doc = Some(doc);
    }

    pub fn document(&self) -> Option<&Value> {
        self.doc.as_ref()
    }

    pub fn to_pretty_string(&self) -> Result<String, StoreError> {
        let doc = self.doc.as_ref().ok_or(StoreError::Empty)?;
        let bytes = to_pretty_bytes(doc)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

impl GraphStore for MemoryStore {
    fn load(&self) -> Result<WaypointGraph, StoreError> {
        let doc = self.doc.clone().ok_or(StoreError::Empty)?;
        let graph = WaypointGraph::from_json_value(doc)?;
        log::debug!(
            "loaded {} waypoints and {} lines from memory",
            graph.waypoint_count(),
            graph.line_count()
        );
        Ok(graph)
    }

    fn save(&mut self, graph: &WaypointGraph) -> Result<(), StoreError> {
        self.doc = Some(graph.to_json_value()?);
        Ok(())
    }
}
