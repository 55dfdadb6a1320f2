//! Live player positions.
//!
//! The transport (a websocket in the viewer) runs on its own thread and only
//! holds a [`FeedSender`]. Decoded events travel over a channel to the
//! [`PlayerOverlay`], which the UI loop drains once per tick. The player map is
//! never shared with the waypoint graph.

use std::collections::BTreeMap;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

use serde::Deserialize;

use crate::error::FeedError;
use crate::model::Vec2;

pub type PlayerId = String;

#[derive(Clone, Debug, PartialEq)]
pub enum FeedEvent {
    Upsert { id: PlayerId, pos: Vec2 },
    Remove { id: PlayerId },
}

#[derive(Deserialize)]
#[serde(tag = "type")]
enum FeedMessage {
    #[serde(rename = "playerMove")]
    PlayerMove { id: PlayerId, x: f64, z: f64 },
    #[serde(rename = "playerGone")]
    PlayerGone { id: PlayerId },
    #[serde(other)]
    Other,
}

impl FeedEvent {
    /// Decodes one feed message. Message types other than `playerMove` and
    /// `playerGone` decode to `None`.
    pub fn from_message(text: &str) -> Result<Option<FeedEvent>, FeedError> {
        let msg: FeedMessage = serde_json::from_str(text)?;
        Ok(match msg {
            FeedMessage::PlayerMove { id, x, z } => Some(FeedEvent::Upsert {
                id,
                pos: Vec2::new(x, z),
            }),
            FeedMessage::PlayerGone { id } => Some(FeedEvent::Remove { id }),
            FeedMessage::Other => None,
        })
    }
}

/// Current player positions keyed by player id, iterated in id order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PlayerMap {
    players: BTreeMap<PlayerId, Vec2>,
}

impl PlayerMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether the map changed. Removing an unknown player is a no-op.
    pub fn apply(&mut self, event: FeedEvent) -> bool {
        match event {
            FeedEvent::Upsert { id, pos } => {
                self.players.insert(id, pos);
                true
            }
            FeedEvent::Remove { id } => {
                if self.players.remove(&id).is_none() {
                    log::warn!("feed removed unknown player {}", id);
                    return false;
                }
                true
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<Vec2> {
        self.players.get(id).copied()
    }
    pub fn len(&self) -> usize {
        self.players.len()
    }
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
    pub fn iter(&self) -> impl Iterator<Item = (&str, Vec2)> {
        self.players.iter().map(|(k, v)| (k.as_str(), *v))
    }
    pub fn clear(&mut self) {
        self.players.clear();
    }
}

/// Producer half of the feed channel.
#[derive(Clone, Debug)]
pub struct FeedSender {
    tx: Sender<FeedEvent>,
}

impl FeedSender {
    pub fn send(&self, event: FeedEvent) -> Result<(), FeedError> {
        self.tx.send(event).map_err(|_| FeedError::Disconnected)
    }

    /// Decodes `text` and forwards the event. Returns `false` for message
    /// types the overlay does not track.
    pub fn send_message(&self, text: &str) -> Result<bool, FeedError> {
        let decoded = FeedEvent::from_message(text).map_err(|e| {
            log::warn!("dropping feed message: {}", e);
            e
        })?;
        match decoded {
            Some(event) => {
                self.send(event)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

/// Consumer half of the feed channel; owns the player map.
#[derive(Debug)]
pub struct PlayerOverlay {
    rx: Receiver<FeedEvent>,
    players: PlayerMap,
    closed: bool,
}

impl PlayerOverlay {
    /// Applies up to `max` pending events without blocking. Returns how many
    /// were applied.
    pub fn drain(&mut self, max: usize) -> usize {
        let mut applied = 0;
        while applied < max {
            match self.rx.try_recv() {
                Ok(event) => {
                    self.players.apply(event);
                    applied += 1;
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if !self.closed {
                        log::debug!("player feed closed");
                    }
                    self.closed = true;
                    break;
                }
            }
        }
        if applied > 0 {
            log::debug!("applied {} feed events, {} players", applied, self.players.len());
        }
        applied
    }

    pub fn players(&self) -> &PlayerMap {
        &self.players
    }

    /// True once every sender has been dropped and the queue ran dry.
    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

pub fn feed_channel() -> (FeedSender, PlayerOverlay) {
    let (tx, rx) = mpsc::channel();
    (
        FeedSender { tx },
        PlayerOverlay {
            rx,
            players: PlayerMap::new(),
            closed: false,
        },
    )
}
