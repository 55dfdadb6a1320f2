use wasm_bindgen::prelude::*;
mod api;
mod error;
mod interop;

use waynav::{feed_channel, FeedSender, MemoryStore, PlayerOverlay, ViewerConfig, ViewerSession, WaypointGraph};

#[wasm_bindgen]
pub struct Viewer {
    pub(crate) session: ViewerSession<MemoryStore>,
    pub(crate) feed: FeedSender,
    pub(crate) overlay: PlayerOverlay,
    pub(crate) config: ViewerConfig,
}

impl Viewer {
    pub fn rs_new() -> Viewer {
        let (feed, overlay) = feed_channel();
        Viewer {
            session: ViewerSession::with_graph(MemoryStore::new(), WaypointGraph::new()),
            feed,
            overlay,
            config: ViewerConfig::default(),
        }
    }
    pub fn rs_revision(&self) -> u64 {
        self.session.graph().revision()
    }
}
