//! Built-in lightweight rules engine.

use super::RulesAdapter;
use crate::execute::make_move_with_default;
use crate::{movegen, MoveList, MoveResult, Position};
use chess_core::{Color, FenError, MoveRequest, Promotion, Square};
use tracing::{debug, info, warn};

/// Pseudo-legal rules engine.
///
/// Implements piece movement, en passant, promotion and naive castling.
/// It does not detect check, checkmate, stalemate or repetition, and it
/// clears castling rights only when a side castles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackEngine {
    position: Position,
    default_promotion: Promotion,
}

impl Default for FallbackEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl FallbackEngine {
    /// Creates an engine at the standard starting position.
    pub fn new() -> Self {
        Self::from_position(Position::startpos())
    }

    pub fn from_position(position: Position) -> Self {
        FallbackEngine {
            position,
            default_promotion: Promotion::Queen,
        }
    }

    /// Creates an engine from a position record.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        Ok(Self::from_position(Position::from_fen(fen)?))
    }

    /// Sets the piece a pawn becomes when a move names no promotion.
    pub fn with_default_promotion(mut self, promotion: Promotion) -> Self {
        self.default_promotion = promotion;
        self
    }

    /// Returns the current position.
    pub fn position(&self) -> &Position {
        &self.position
    }
}

impl RulesAdapter for FallbackEngine {
    fn set_position(&mut self, fen: &str) -> Result<(), FenError> {
        match Position::from_fen(fen) {
            Ok(position) => {
                info!(fen, "position set");
                self.position = position;
                Ok(())
            }
            Err(e) => {
                warn!(fen, error = %e, "rejected position record");
                Err(e)
            }
        }
    }

    fn to_fen(&self) -> String {
        self.position.to_fen()
    }

    fn side_to_move(&self) -> Color {
        self.position.side_to_move()
    }

    fn moves_from(&self, square: Square) -> MoveList {
        movegen::moves_from(&self.position, square)
    }

    fn make_move(&mut self, request: MoveRequest) -> MoveResult {
        let result = make_move_with_default(&self.position, request, self.default_promotion);
        match &result {
            Ok(outcome) => {
                info!(mv = %outcome.applied.mov, "move applied");
                self.position = outcome.position.clone();
            }
            Err(reason) => {
                debug!(%request, reason = reason.reason(), "move rejected");
            }
        }
        result
    }
}
