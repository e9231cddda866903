//! A board session: one engine, its move log and the running transition.
//!
//! The [`Session`] is what a board component owns. It turns contract calls
//! into [`GameEvent`]s and feeds the [`Animator`]: with the executor's exact
//! motions after a move, or with [`diff_snapshots`] when a position is loaded
//! without move metadata.

use crate::animation::{Animator, Frame};
use crate::config::{ConfigError, EngineConfig};
use crate::diff::diff_snapshots;
use crate::events::GameEvent;
use crate::rules::{Engine, FallbackEngine, RulesAdapter};
use crate::{AppliedMove, MoveList, Position};
use chess_core::{Color, FenError, MoveRequest, Piece, Square};
use tracing::info;

/// One owning component's view of a game.
#[derive(Debug)]
pub struct Session {
    engine: Engine,
    animator: Animator,
    /// Moves applied since the last load.
    moves: Vec<AppliedMove>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Engine::default(), EngineConfig::default().animation_ms)
    }
}

impl Session {
    pub fn new(engine: Engine, animation_ms: u32) -> Self {
        info!(engine = engine.kind(), "session started");
        Session {
            engine,
            animator: Animator::new(animation_ms),
            moves: Vec::new(),
        }
    }

    /// Builds a session on the fallback engine from configuration.
    pub fn from_config(config: &EngineConfig) -> Result<Self, ConfigError> {
        let engine = FallbackEngine::from_position(config.start_position()?)
            .with_default_promotion(config.default_promotion);
        Ok(Self::new(Engine::Fallback(engine), config.animation_ms))
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Returns the current position record.
    pub fn to_fen(&self) -> String {
        self.engine.to_fen()
    }

    pub fn side_to_move(&self) -> Color {
        self.engine.side_to_move()
    }

    /// Returns the piece on `square` in the current position.
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        Position::from_fen(&self.engine.to_fen())
            .ok()
            .and_then(|p| p.piece_at(square))
    }

    pub fn moves_from(&self, square: Square) -> MoveList {
        self.engine.moves_from(square)
    }

    /// Returns the moves applied since the last load.
    pub fn move_history(&self) -> &[AppliedMove] {
        &self.moves
    }

    /// Attempts a move and reports the outcome as an event.
    ///
    /// On success the executor's motions start a new transition at `now_ms`.
    pub fn play(&mut self, request: MoveRequest, now_ms: f64) -> GameEvent {
        match self.engine.make_move(request) {
            Ok(outcome) => {
                self.animator.start(outcome.motions.clone(), now_ms);
                self.moves.push(outcome.applied);
                GameEvent::Move {
                    from: request.from,
                    to: request.to,
                    fen: outcome.position.to_fen(),
                }
            }
            Err(reason) => GameEvent::Illegal {
                from: request.from,
                to: request.to,
                reason,
            },
        }
    }

    /// Replaces the position with `fen` and animates the inferred difference.
    ///
    /// The move log is cleared. On a parse error nothing changes.
    pub fn load(&mut self, fen: &str, now_ms: f64) -> Result<GameEvent, FenError> {
        let before = Position::from_fen(&self.engine.to_fen()).ok();
        self.engine.set_position(fen)?;
        let current = self.engine.to_fen();

        if let (Some(before), Ok(after)) = (before, Position::from_fen(&current)) {
            self.animator.start(diff_snapshots(&before, &after), now_ms);
        } else {
            self.animator.cancel();
        }
        self.moves.clear();
        Ok(GameEvent::Update { fen: current })
    }

    /// Returns the transition frame at `now_ms`, if one is running.
    pub fn frame(&mut self, now_ms: f64) -> Option<Frame> {
        self.animator.frame(now_ms)
    }

    pub fn animator(&self) -> &Animator {
        &self.animator
    }
}
