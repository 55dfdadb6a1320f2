//! Error types for graph mutation, routing, persistence and the player feed.
//!
//! Every variant maps to a short stable `code()` so callers on the far side of
//! an FFI or JS boundary can branch on the kind without parsing messages.

use std::path::PathBuf;

use thiserror::Error;

use crate::model::WaypointId;

/// Result type alias for graph queries and mutations.
pub type GraphResult<T> = Result<T, GraphError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    /// No waypoint carries the requested id.
    #[error("no waypoint with id {0}")]
    NotFound(WaypointId),

    /// Both endpoints of a new edge are the same waypoint.
    #[error("edge endpoints cannot be the same waypoint ({0})")]
    InvalidEdge(WaypointId),

    /// The unordered pair is already connected.
    #[error("waypoints {a} and {b} are already connected")]
    DuplicateEdge { a: WaypointId, b: WaypointId },

    /// An edge incident to `id` does not yield exactly one other endpoint.
    #[error("edge {p1}-{p2} has no distinct neighbour of waypoint {id}")]
    MalformedEdge {
        id: WaypointId,
        p1: WaypointId,
        p2: WaypointId,
    },
}

impl GraphError {
    pub fn code(&self) -> &'static str {
        match self {
            GraphError::NotFound(_) => "not_found",
            GraphError::InvalidEdge(_) => "invalid_edge",
            GraphError::DuplicateEdge { .. } => "duplicate_edge",
            GraphError::MalformedEdge { .. } => "malformed_edge",
        }
    }
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("json parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("caps exceeded: {0}")]
    CapsExceeded(String),

    #[error("position of waypoint {0} is out of bounds")]
    OutOfBounds(WaypointId),

    /// Nothing has been saved to the store yet.
    #[error("store holds no document")]
    Empty,
}

impl StoreError {
    pub fn code(&self) -> &'static str {
        match self {
            StoreError::Io { .. } => "io",
            StoreError::JsonParse(_) => "json_parse",
            StoreError::CapsExceeded(_) => "caps_exceeded",
            StoreError::OutOfBounds(_) => "out_of_bounds",
            StoreError::Empty => "empty_store",
        }
    }
}

#[derive(Error, Debug)]
pub enum FeedError {
    #[error("feed message parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The overlay side of the channel has been dropped.
    #[error("player overlay disconnected")]
    Disconnected,
}

impl FeedError {
    pub fn code(&self) -> &'static str {
        match self {
            FeedError::Parse(_) => "feed_parse",
            FeedError::Disconnected => "feed_disconnected",
        }
    }
}
