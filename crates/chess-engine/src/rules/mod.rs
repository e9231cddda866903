//! The rules-adapter contract.
//!
//! This module provides the [`RulesAdapter`] trait, the only seam the
//! rendering and interaction layers call through. Exactly one engine backs
//! it at a time: the built-in [`FallbackEngine`], or an externally supplied
//! engine with full legality checking, selected when the [`Engine`] is built.

mod fallback;

pub use fallback::FallbackEngine;

use crate::{MoveList, MoveResult};
use chess_core::{Color, FenError, MoveRequest, Square};
use std::fmt;

/// Capabilities every rules engine offers the surrounding layer.
///
/// All calls are synchronous and must not block.
///
/// # Example
///
/// ```
/// use chess_core::{MoveRequest, Square};
/// use chess_engine::rules::{FallbackEngine, RulesAdapter};
///
/// let mut engine = FallbackEngine::new();
/// let e2 = Square::from_algebraic("e2").unwrap();
/// let e4 = Square::from_algebraic("e4").unwrap();
/// assert_eq!(engine.moves_from(e2).len(), 2);
/// engine.make_move(MoveRequest::new(e2, e4)).unwrap();
/// assert_eq!(
///     engine.to_fen(),
///     "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"
/// );
/// ```
pub trait RulesAdapter {
    /// Replaces the current position. On error the current position is kept.
    fn set_position(&mut self, fen: &str) -> Result<(), FenError>;

    /// Returns the current position record.
    fn to_fen(&self) -> String;

    /// Returns the side to move.
    fn side_to_move(&self) -> Color;

    /// Returns the candidate moves of the piece on `square`.
    ///
    /// Callers must treat the result as a set.
    fn moves_from(&self, square: Square) -> MoveList;

    /// Validates and applies a move, advancing the current position on success.
    fn make_move(&mut self, request: MoveRequest) -> MoveResult;
}

/// The active rules engine, chosen at construction time.
pub enum Engine {
    /// The built-in pseudo-legal engine.
    Fallback(FallbackEngine),
    /// An externally supplied engine honouring the same contract.
    External(Box<dyn RulesAdapter>),
}

impl Engine {
    /// Wraps an external engine.
    pub fn external(adapter: impl RulesAdapter + 'static) -> Self {
        Engine::External(Box::new(adapter))
    }

    /// Returns a short name for logging ("fallback" or "external").
    pub fn kind(&self) -> &'static str {
        match self {
            Engine::Fallback(_) => "fallback",
            Engine::External(_) => "external",
        }
    }

    fn adapter(&self) -> &dyn RulesAdapter {
        match self {
            Engine::Fallback(engine) => engine,
            Engine::External(engine) => engine.as_ref(),
        }
    }

    fn adapter_mut(&mut self) -> &mut dyn RulesAdapter {
        match self {
            Engine::Fallback(engine) => engine,
            Engine::External(engine) => engine.as_mut(),
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        Engine::Fallback(FallbackEngine::new())
    }
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("kind", &self.kind())
            .field("fen", &self.to_fen())
            .finish()
    }
}

impl RulesAdapter for Engine {
    fn set_position(&mut self, fen: &str) -> Result<(), FenError> {
        self.adapter_mut().set_position(fen)
    }

    fn to_fen(&self) -> String {
        self.adapter().to_fen()
    }

    fn side_to_move(&self) -> Color {
        self.adapter().side_to_move()
    }

    fn moves_from(&self, square: Square) -> MoveList {
        self.adapter().moves_from(square)
    }

    fn make_move(&mut self, request: MoveRequest) -> MoveResult {
        self.adapter_mut().make_move(request)
    }
}
