//! Core types for chess.
//!
//! This crate provides the fundamental types used across the engine:
//! - [`Piece`], [`PieceKind`] and [`Color`] for piece representation
//! - [`Square`] for board coordinates and their two-character labels
//! - [`Move`] and [`MoveRequest`] for candidates and caller requests
//! - Position record (FEN) field parsing

mod color;
mod fen;
mod mov;
mod piece;
mod square;

pub use color::Color;
pub use fen::{FenError, FenParser};
pub use mov::{CastleSide, Move, MoveFlag, MoveRequest};
pub use piece::{Piece, PieceKind, Promotion};
pub use square::{Square, SquareError};
