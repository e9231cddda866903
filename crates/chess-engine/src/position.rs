//! Chess position representation and its record codec.

use chess_core::{CastleSide, Color, FenError, FenParser, Piece, Square};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Castling rights flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights(0);
    pub const WHITE_KINGSIDE: u8 = 0b0001;
    pub const WHITE_QUEENSIDE: u8 = 0b0010;
    pub const BLACK_KINGSIDE: u8 = 0b0100;
    pub const BLACK_QUEENSIDE: u8 = 0b1000;
    pub const ALL: CastlingRights = CastlingRights(0b1111);

    /// Creates new castling rights from flags.
    #[inline]
    pub const fn new(flags: u8) -> Self {
        CastlingRights(flags & 0b1111)
    }

    const fn flag(color: Color, side: CastleSide) -> u8 {
        match (color, side) {
            (Color::White, CastleSide::Kingside) => Self::WHITE_KINGSIDE,
            (Color::White, CastleSide::Queenside) => Self::WHITE_QUEENSIDE,
            (Color::Black, CastleSide::Kingside) => Self::BLACK_KINGSIDE,
            (Color::Black, CastleSide::Queenside) => Self::BLACK_QUEENSIDE,
        }
    }

    /// Returns true if `color` still holds the right to castle towards `side`.
    #[inline]
    pub const fn has(self, color: Color, side: CastleSide) -> bool {
        (self.0 & Self::flag(color, side)) != 0
    }

    /// Removes both castling rights for a color.
    #[inline]
    pub fn remove_color(&mut self, color: Color) {
        self.0 &=
            !(Self::flag(color, CastleSide::Kingside) | Self::flag(color, CastleSide::Queenside));
    }

    /// Returns the raw flags.
    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// Builds rights from a validated record field ("KQkq", "Kq", "-").
    fn from_fen_field(field: &str) -> Self {
        let flags = field.chars().fold(0u8, |acc, c| match c {
            'K' => acc | Self::WHITE_KINGSIDE,
            'Q' => acc | Self::WHITE_QUEENSIDE,
            'k' => acc | Self::BLACK_KINGSIDE,
            'q' => acc | Self::BLACK_QUEENSIDE,
            _ => acc,
        });
        CastlingRights(flags)
    }
}

impl fmt::Display for CastlingRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == 0 {
            return write!(f, "-");
        }
        for (color, side, c) in [
            (Color::White, CastleSide::Kingside, 'K'),
            (Color::White, CastleSide::Queenside, 'Q'),
            (Color::Black, CastleSide::Kingside, 'k'),
            (Color::Black, CastleSide::Queenside, 'q'),
        ] {
            if self.has(color, side) {
                write!(f, "{}", c)?;
            }
        }
        Ok(())
    }
}

/// A piece together with the square it stands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Occupant {
    pub square: Square,
    pub piece: Piece,
}

/// Iterates squares in record order: rank 8 down to rank 1, files a to h.
pub fn record_order() -> impl Iterator<Item = Square> {
    (0..8u8)
        .rev()
        .flat_map(|rank| (0..8u8).map(move |file| Square::from_coords(file, rank)))
}

/// Complete chess position state.
///
/// A `Position` is never mutated once handed out: the executor builds each
/// successor on a private copy.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Position {
    /// Mailbox board, indexed by [`Square::index`].
    pub(crate) board: [Option<Piece>; 64],

    pub(crate) side_to_move: Color,

    pub(crate) castling: CastlingRights,

    /// Set only directly after a two-square pawn advance.
    pub(crate) en_passant: Option<Square>,

    /// Halfmove clock for 50-move rule.
    pub(crate) halfmove_clock: u32,

    /// Fullmove number (starts at 1, increments after Black's move).
    pub(crate) fullmove_number: u32,
}

impl Position {
    /// Creates an empty position.
    pub fn empty() -> Self {
        Position {
            board: [None; 64],
            side_to_move: Color::White,
            castling: CastlingRights::NONE,
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    /// Creates the standard starting position.
    pub fn startpos() -> Self {
        Self::from_fen(FenParser::STARTPOS).expect("STARTPOS is valid")
    }

    /// Decodes a position record.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let parsed = FenParser::parse(fen)?;
        let mut position = Position::empty();

        // Placement starts from rank 8
        for (rank_idx, rank_str) in parsed.piece_placement.split('/').enumerate() {
            let rank = 7 - rank_idx as u8;
            let mut file = 0u8;

            for c in rank_str.chars() {
                if let Some(digit) = c.to_digit(10) {
                    file += digit as u8;
                } else {
                    let piece = Piece::from_fen_char(c).ok_or_else(|| {
                        FenError::InvalidPiecePlacement(format!("invalid character '{}'", c))
                    })?;
                    position.board[Square::from_coords(file, rank).index() as usize] = Some(piece);
                    file += 1;
                }
            }
        }

        position.side_to_move = Color::from_fen_char(parsed.active_color)
            .ok_or_else(|| FenError::InvalidActiveColor(parsed.active_color.to_string()))?;
        position.castling = CastlingRights::from_fen_field(&parsed.castling);
        position.en_passant = Square::from_algebraic(&parsed.en_passant);
        position.halfmove_clock = parsed.halfmove_clock;
        position.fullmove_number = parsed.fullmove_number;

        Ok(position)
    }

    /// Encodes the position as a six-field record.
    pub fn to_fen(&self) -> String {
        let mut fen = String::new();

        for rank in (0..8u8).rev() {
            let mut empty_count = 0;
            for file in 0..8u8 {
                match self.piece_at(Square::from_coords(file, rank)) {
                    Some(piece) => {
                        if empty_count > 0 {
                            fen.push_str(&empty_count.to_string());
                            empty_count = 0;
                        }
                        fen.push(piece.to_fen_char());
                    }
                    None => empty_count += 1,
                }
            }
            if empty_count > 0 {
                fen.push_str(&empty_count.to_string());
            }
            if rank > 0 {
                fen.push('/');
            }
        }

        let en_passant = self
            .en_passant
            .map_or_else(|| "-".to_string(), Square::to_algebraic);

        format!(
            "{} {} {} {} {} {}",
            fen,
            self.side_to_move.to_fen_char(),
            self.castling,
            en_passant,
            self.halfmove_clock,
            self.fullmove_number
        )
    }

    /// Returns the piece on the given square, if any.
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.board[sq.index() as usize]
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    pub fn castling(&self) -> CastlingRights {
        self.castling
    }

    #[inline]
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    #[inline]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    #[inline]
    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    /// Lists every occupied square in record order.
    pub fn occupants(&self) -> Vec<Occupant> {
        record_order()
            .filter_map(|square| self.piece_at(square).map(|piece| Occupant { square, piece }))
            .collect()
    }

    /// Removes and returns whatever stands on `sq`.
    pub(crate) fn take(&mut self, sq: Square) -> Option<Piece> {
        self.board[sq.index() as usize].take()
    }

    pub(crate) fn put(&mut self, sq: Square, piece: Piece) {
        self.board[sq.index() as usize] = Some(piece);
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}
