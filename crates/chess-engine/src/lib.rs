//! Lightweight chess rules engine for board front-ends.
//!
//! This crate provides:
//! - [`Position`] - immutable board state with record (FEN) encoding and decoding
//! - [`moves_from`] - pseudo-legal candidate moves for one square
//! - [`make_move`] - move validation and application producing a new position
//! - [`RulesAdapter`] - the contract a board talks to, backed by the built-in
//!   [`FallbackEngine`] or an external engine through [`Engine`]
//! - [`diff_snapshots`] - piece correspondence between two positions, for animation
//! - [`Session`] - events and transitions for one board component
//!
//! The built-in engine does not detect check, checkmate, stalemate or
//! repetition. Castling rights are only cleared when a side castles, and the
//! rook's presence is never verified.
//!
//! # Example
//!
//! ```
//! use chess_core::{MoveRequest, Square};
//! use chess_engine::{make_move, MoveRejected, Position};
//!
//! let start = Position::startpos();
//! let e2 = Square::from_algebraic("e2").unwrap();
//! let e4 = Square::from_algebraic("e4").unwrap();
//! let e5 = Square::from_algebraic("e5").unwrap();
//!
//! let outcome = make_move(&start, MoveRequest::new(e2, e4)).unwrap();
//! println!("After 1.e4: {}", outcome.position.to_fen());
//!
//! assert_eq!(
//!     make_move(&start, MoveRequest::new(e2, e5)),
//!     Err(MoveRejected::Illegal)
//! );
//! ```

pub mod animation;
pub mod config;
mod diff;
mod events;
mod execute;
pub mod movegen;
mod position;
pub mod rules;
mod session;

pub use animation::{Animator, Frame, Sprite};
pub use config::{ConfigError, EngineConfig};
pub use diff::diff_snapshots;
pub use events::GameEvent;
pub use execute::{
    make_move, make_move_with_default, AppliedMove, Motion, MoveOutcome, MoveRejected, MoveResult,
};
pub use movegen::{generate_moves, moves_from, MoveList};
pub use position::{record_order, CastlingRights, Occupant, Position};
pub use rules::{Engine, FallbackEngine, RulesAdapter};
pub use session::Session;
