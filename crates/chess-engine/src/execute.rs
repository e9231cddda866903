//! Move validation and application.

use crate::movegen::moves_from;
use crate::position::Occupant;
use crate::Position;
use chess_core::{Color, Move, MoveFlag, MoveRequest, Piece, PieceKind, Promotion, Square};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a move request was refused.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveRejected {
    #[error("no piece on the origin square")]
    Empty,
    #[error("the piece on the origin square is not the side to move")]
    Turn,
    #[error("the destination is not a candidate move of that piece")]
    Illegal,
}

impl MoveRejected {
    /// The reason code surfaced to callers.
    pub const fn reason(self) -> &'static str {
        match self {
            MoveRejected::Empty => "empty",
            MoveRejected::Turn => "turn",
            MoveRejected::Illegal => "illegal",
        }
    }
}

/// One piece travelling from one square to another during a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Motion {
    pub piece: Piece,
    pub from: Square,
    pub to: Square,
}

/// A move as it was applied, with what it displaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedMove {
    /// The matched candidate, with its promotion filled in if one happened.
    pub mov: Move,
    /// The piece that moved, as it stood on the origin square.
    pub piece: Piece,
    pub captured: Option<Piece>,
}

/// A successful move: the new position plus everything needed to animate it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    pub position: Position,
    pub applied: AppliedMove,
    /// Occupants of the board before the move, in record order.
    pub before: Vec<Occupant>,
    /// Occupants of the board after the move, in record order.
    pub after: Vec<Occupant>,
    /// The pieces the move relocated: the mover, plus the rook when castling.
    pub motions: Vec<Motion>,
}

impl MoveOutcome {
    pub fn motions(&self) -> &[Motion] {
        &self.motions
    }
}

/// Result of a move request.
pub type MoveResult = Result<MoveOutcome, MoveRejected>;

/// Validates `request` against `position` and applies it, promoting to a queen
/// when the request names no promotion.
pub fn make_move(position: &Position, request: MoveRequest) -> MoveResult {
    make_move_with_default(position, request, Promotion::Queen)
}

/// Like [`make_move`], with the promotion used when the request names none.
pub fn make_move_with_default(
    position: &Position,
    request: MoveRequest,
    default_promotion: Promotion,
) -> MoveResult {
    let piece = position
        .piece_at(request.from)
        .ok_or(MoveRejected::Empty)?;
    if piece.color != position.side_to_move() {
        return Err(MoveRejected::Turn);
    }
    let candidate = moves_from(position, request.from)
        .find_to(request.to)
        .ok_or(MoveRejected::Illegal)?;

    let promotion = request.promotion.unwrap_or(default_promotion);
    Ok(apply(position, candidate, piece, promotion))
}

/// Applies a generated candidate on a copy of `position`.
fn apply(position: &Position, candidate: Move, piece: Piece, promotion: Promotion) -> MoveOutcome {
    let mut next = position.clone();
    let us = piece.color;
    let (from, to) = (candidate.from, candidate.to);
    let mut applied = candidate;
    let mut motions = vec![Motion { piece, from, to }];

    // The en passant victim sits beside the origin, one rank behind the destination
    let mut captured = next.take(to);
    if candidate.is_en_passant() {
        captured = next.take(Square::from_coords(to.file(), from.rank()));
    }

    next.take(from);
    let placed = if piece.kind == PieceKind::Pawn && to.rank() == us.promotion_rank() {
        applied.promotion = Some(promotion);
        Piece::new(us, promotion.kind())
    } else {
        piece
    };
    next.put(to, placed);

    if let Some(side) = candidate.castle_side() {
        let corner = Square::from_coords(side.corner_file(), from.rank());
        let crossed = Square::from_coords(
            (from.file() as i8 + side.king_step().signum()) as u8,
            from.rank(),
        );
        if let Some(rook) = next.take(corner) {
            next.put(crossed, rook);
            motions.push(Motion {
                piece: rook,
                from: corner,
                to: crossed,
            });
        }
        next.castling.remove_color(us);
    }

    next.en_passant = if candidate.flag == MoveFlag::DoublePush {
        Some(Square::from_coords(from.file(), (from.rank() + to.rank()) / 2))
    } else {
        None
    };

    if piece.kind == PieceKind::Pawn || captured.is_some() {
        next.halfmove_clock = 0;
    } else {
        next.halfmove_clock = next.halfmove_clock.saturating_add(1);
    }
    if us == Color::Black {
        next.fullmove_number = next.fullmove_number.saturating_add(1);
    }
    next.side_to_move = us.opposite();

    MoveOutcome {
        before: position.occupants(),
        after: next.occupants(),
        position: next,
        applied: AppliedMove {
            mov: applied,
            piece,
            captured,
        },
        motions,
    }
}
