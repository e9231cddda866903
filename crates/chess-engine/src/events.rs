//! Events made available to the layer above the engine.

use crate::MoveRejected;
use chess_core::Square;
use serde::{Deserialize, Serialize};

/// A state change (or refused change) the surrounding layer may react to.
///
/// Serializes with a `type` tag and square labels, e.g.
/// `{"type":"illegal","from":"e2","to":"e5","reason":"illegal"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum GameEvent {
    /// A move was applied.
    Move { from: Square, to: Square, fen: String },
    /// A move was refused. A `turn` refusal may be kept as a premove.
    Illegal {
        from: Square,
        to: Square,
        reason: MoveRejected,
    },
    /// The position was replaced without a move.
    Update { fen: String },
}

impl GameEvent {
    /// Returns the resulting record, if this event changed the position.
    pub fn fen(&self) -> Option<&str> {
        match self {
            GameEvent::Move { fen, .. } | GameEvent::Update { fen } => Some(fen.as_str()),
            GameEvent::Illegal { .. } => None,
        }
    }
}
