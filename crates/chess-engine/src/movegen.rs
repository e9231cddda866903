//! Pseudo-legal move generation.
//!
//! Candidates follow each piece's movement pattern and the board's
//! occupancy, but nothing here looks at whether a king is attacked.
//! Castling is gated only by the rights flags and empty squares between
//! king and corner.

use crate::Position;
use chess_core::{CastleSide, Color, Move, MoveFlag, Piece, PieceKind, Square};

/// A list of candidate moves.
///
/// Any decodable placement is accepted, so the count is not bounded by the
/// 218 of legal chess; the list grows as needed.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct MoveList {
    moves: Vec<Move>,
}

impl MoveList {
    /// Creates an empty move list.
    #[inline]
    pub const fn new() -> Self {
        MoveList { moves: Vec::new() }
    }

    /// Adds a move to the list.
    #[inline]
    pub fn push(&mut self, m: Move) {
        self.moves.push(m);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves
    }

    /// Returns the candidate landing on `to`, if any.
    pub fn find_to(&self, to: Square) -> Option<Move> {
        self.as_slice().iter().find(|m| m.to == to).copied()
    }

    /// Iterates the destination squares.
    pub fn destinations(&self) -> impl Iterator<Item = Square> + '_ {
        self.as_slice().iter().map(|m| m.to)
    }
}

impl std::ops::Index<usize> for MoveList {
    type Output = Move;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.as_slice()[index]
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl std::fmt::Debug for MoveList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

const KNIGHT_JUMPS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

const KING_STEPS: [(i8, i8); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

const ORTHOGONAL: [(i8, i8); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];
const DIAGONAL: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, -1), (-1, 1)];

/// Generates the candidate moves of the piece on `from`.
///
/// Empty if the square is empty or holds a piece of the side not to move.
pub fn moves_from(position: &Position, from: Square) -> MoveList {
    let mut moves = MoveList::new();

    let Some(piece) = position.piece_at(from) else {
        return moves;
    };
    if piece.color != position.side_to_move() {
        return moves;
    }

    match piece.kind {
        PieceKind::Pawn => generate_pawn_moves(position, from, piece.color, &mut moves),
        PieceKind::Knight => generate_steps(position, from, piece.color, &KNIGHT_JUMPS, &mut moves),
        PieceKind::Bishop => generate_rays(position, from, piece.color, &DIAGONAL, &mut moves),
        PieceKind::Rook => generate_rays(position, from, piece.color, &ORTHOGONAL, &mut moves),
        PieceKind::Queen => {
            generate_rays(position, from, piece.color, &ORTHOGONAL, &mut moves);
            generate_rays(position, from, piece.color, &DIAGONAL, &mut moves);
        }
        PieceKind::King => {
            generate_steps(position, from, piece.color, &KING_STEPS, &mut moves);
            generate_castling_moves(position, from, piece.color, &mut moves);
        }
    }

    moves
}

/// Generates every candidate move of the side to move.
pub fn generate_moves(position: &Position) -> MoveList {
    let mut moves = MoveList::new();
    for from in Square::all() {
        moves.moves.extend(moves_from(position, from).moves);
    }
    moves
}

/// Returns true if `sq` holds a piece of the other color.
#[inline]
fn is_enemy(position: &Position, sq: Square, us: Color) -> bool {
    matches!(position.piece_at(sq), Some(Piece { color, .. }) if color != us)
}

fn generate_pawn_moves(position: &Position, from: Square, us: Color, moves: &mut MoveList) {
    let dir = us.pawn_direction();

    // Pushes
    if let Some(one) = from.offset(0, dir) {
        if position.piece_at(one).is_none() {
            moves.push(Move::normal(from, one));

            if from.rank() == us.pawn_rank() {
                if let Some(two) = one.offset(0, dir) {
                    if position.piece_at(two).is_none() {
                        moves.push(Move::new(from, two, MoveFlag::DoublePush));
                    }
                }
            }
        }
    }

    // Captures, including en passant
    for file_delta in [-1, 1] {
        let Some(to) = from.offset(file_delta, dir) else {
            continue;
        };
        if is_enemy(position, to, us) {
            moves.push(Move::capture(from, to, MoveFlag::Normal));
        } else if position.en_passant() == Some(to) && position.piece_at(to).is_none() {
            moves.push(Move::capture(from, to, MoveFlag::EnPassant));
        }
    }
}

/// Single-step movers: knight jumps and king steps.
fn generate_steps(
    position: &Position,
    from: Square,
    us: Color,
    offsets: &[(i8, i8)],
    moves: &mut MoveList,
) {
    for &(df, dr) in offsets {
        let Some(to) = from.offset(df, dr) else {
            continue;
        };
        match position.piece_at(to) {
            None => moves.push(Move::normal(from, to)),
            Some(p) if p.color != us => moves.push(Move::capture(from, to, MoveFlag::Normal)),
            Some(_) => {}
        }
    }
}

/// Sliders: each ray runs over empty squares and stops on the first occupied one,
/// which is included only when it holds an enemy piece.
fn generate_rays(
    position: &Position,
    from: Square,
    us: Color,
    directions: &[(i8, i8)],
    moves: &mut MoveList,
) {
    for &(df, dr) in directions {
        let mut current = from;
        while let Some(to) = current.offset(df, dr) {
            match position.piece_at(to) {
                None => moves.push(Move::normal(from, to)),
                Some(p) => {
                    if p.color != us {
                        moves.push(Move::capture(from, to, MoveFlag::Normal));
                    }
                    break;
                }
            }
            current = to;
        }
    }
}

/// Naive castling candidates: the king must stand on its back rank, the right
/// must be held and every square strictly between king and corner must be empty.
/// Neither the rook's presence nor attacked squares are checked.
fn generate_castling_moves(position: &Position, from: Square, us: Color, moves: &mut MoveList) {
    if from.rank() != us.back_rank() {
        return;
    }

    for (side, flag) in [
        (CastleSide::Kingside, MoveFlag::CastleKingside),
        (CastleSide::Queenside, MoveFlag::CastleQueenside),
    ] {
        if !position.castling().has(us, side) {
            continue;
        }
        let Some(to) = from.offset(side.king_step(), 0) else {
            continue;
        };

        let corner = side.corner_file();
        let (lo, hi) = if corner > from.file() {
            (from.file() + 1, corner)
        } else {
            (corner + 1, from.file())
        };
        if !(lo..hi).contains(&to.file()) {
            continue;
        }

        let path_clear = (lo..hi)
            .all(|file| position.piece_at(Square::from_coords(file, from.rank())).is_none());
        if path_clear {
            moves.push(Move::new(from, to, flag));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(label: &str) -> Square {
        Square::from_algebraic(label).unwrap()
    }

    fn dests(position: &Position, from: &str) -> Vec<String> {
        let mut d: Vec<String> = moves_from(position, sq(from))
            .destinations()
            .map(|s| s.to_algebraic())
            .collect();
        d.sort();
        d
    }

    #[test]
    fn movelist_push_and_iterate() {
        let mut list = MoveList::new();
        assert!(list.is_empty());

        let m1 = Move::normal(sq("e2"), sq("e4"));
        let m2 = Move::normal(sq("d2"), sq("d4"));
        list.push(m1);
        list.push(m2);

        assert_eq!(list.len(), 2);
        assert_eq!(list[0], m1);
        assert_eq!(list[1], m2);
        assert_eq!(list.find_to(sq("d4")), Some(m2));
        assert_eq!(list.find_to(sq("d3")), None);
    }

    #[test]
    fn generate_moves_startpos() {
        let position = Position::startpos();
        let moves = generate_moves(&position);
        assert_eq!(moves.len(), 20); // 16 pawn moves + 4 knight moves
    }

    #[test]
    fn empty_square_has_no_moves() {
        let position = Position::startpos();
        assert!(moves_from(&position, sq("e4")).is_empty());
    }

    #[test]
    fn wrong_side_has_no_moves() {
        let position = Position::startpos();
        assert!(moves_from(&position, sq("e7")).is_empty());
        assert!(moves_from(&position, sq("g8")).is_empty());
    }

    #[test]
    fn pawn_pushes_from_start() {
        let position = Position::startpos();
        assert_eq!(dests(&position, "e2"), ["e3", "e4"]);

        let m = moves_from(&position, sq("e2")).find_to(sq("e4")).unwrap();
        assert_eq!(m.flag, MoveFlag::DoublePush);
    }

    #[test]
    fn pawn_after_first_move_pushes_once() {
        let position =
            Position::from_fen("rnbqkbnr/pppppppp/8/8/8/4P3/PPPP1PPP/RNBQKBNR w KQkq - 0 1")
                .unwrap();
        assert_eq!(dests(&position, "e3"), ["e4"]);
    }

    #[test]
    fn pawn_blocked() {
        let position = Position::from_fen("4k3/8/8/8/8/4n3/4P3/4K3 w - - 0 1").unwrap();
        assert!(dests(&position, "e2").is_empty());

        // Blocked on the second square only
        let position = Position::from_fen("4k3/8/8/8/4n3/8/4P3/4K3 w - - 0 1").unwrap();
        assert_eq!(dests(&position, "e2"), ["e3"]);
    }

    #[test]
    fn pawn_captures_only_enemies() {
        let position = Position::from_fen("4k3/8/8/3p1P2/4P3/8/8/4K3 w - - 0 1").unwrap();
        assert_eq!(dests(&position, "e4"), ["d5", "e5"]);
        let capture = moves_from(&position, sq("e4")).find_to(sq("d5")).unwrap();
        assert!(capture.is_capture());
    }

    #[test]
    fn black_pawn_moves_down() {
        let position =
            Position::from_fen("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1")
                .unwrap();
        assert_eq!(dests(&position, "d7"), ["d5", "d6"]);
    }

    #[test]
    fn en_passant() {
        let position =
            Position::from_fen("rnbqkbnr/pppp1ppp/8/4pP2/8/8/PPPPP1PP/RNBQKBNR w KQkq e6 0 1")
                .unwrap();
        let ep = moves_from(&position, sq("f5")).find_to(sq("e6")).unwrap();
        assert!(ep.is_en_passant());
        assert!(ep.is_capture());

        // Target not one diagonal step ahead of this pawn
        let position =
            Position::from_fen("rnbqkbnr/pppp1ppp/8/4p2P/8/8/PPPPPPP1/RNBQKBNR w KQkq e6 0 1")
                .unwrap();
        assert!(moves_from(&position, sq("h5")).find_to(sq("e6")).is_none());
    }

    #[test]
    fn knight_jumps() {
        let position = Position::startpos();
        assert_eq!(dests(&position, "g1"), ["f3", "h3"]);

        let position = Position::from_fen("4k3/8/8/8/3N4/8/8/4K3 w - - 0 1").unwrap();
        assert_eq!(moves_from(&position, sq("d4")).len(), 8);

        let position = Position::from_fen("4k3/8/8/8/8/8/8/N3K3 w - - 0 1").unwrap();
        assert_eq!(dests(&position, "a1"), ["b3", "c2"]);
    }

    #[test]
    fn rook_rays_stop_at_pieces() {
        let position = Position::from_fen("4k3/8/8/3p4/8/8/3R2P1/4K3 w - - 0 1").unwrap();
        assert_eq!(
            dests(&position, "d2"),
            ["a2", "b2", "c2", "d1", "d3", "d4", "d5", "e2", "f2"]
        );
        let capture = moves_from(&position, sq("d2")).find_to(sq("d5")).unwrap();
        assert!(capture.is_capture());
    }

    #[test]
    fn bishop_and_queen_rays() {
        let position = Position::from_fen("4k3/8/8/8/8/8/8/2B1K3 w - - 0 1").unwrap();
        assert_eq!(moves_from(&position, sq("c1")).len(), 7);

        let position = Position::from_fen("4k3/8/8/8/3Q4/8/8/4K3 w - - 0 1").unwrap();
        assert_eq!(moves_from(&position, sq("d4")).len(), 27);

        // Boxed in by its own pieces
        let position = Position::startpos();
        assert!(moves_from(&position, sq("d1")).is_empty());
        assert!(moves_from(&position, sq("c1")).is_empty());
    }

    #[test]
    fn king_steps() {
        let position = Position::from_fen("4k3/8/8/8/8/8/3P4/4K3 w - - 0 1").unwrap();
        assert_eq!(dests(&position, "e1"), ["d1", "e2", "f1", "f2"]);
    }

    #[test]
    fn castling_both_sides() {
        let position =
            Position::from_fen("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1").unwrap();
        let moves = moves_from(&position, Square::E1);
        assert_eq!(
            moves.find_to(Square::G1).map(|m| m.flag),
            Some(MoveFlag::CastleKingside)
        );
        assert_eq!(
            moves.find_to(Square::C1).map(|m| m.flag),
            Some(MoveFlag::CastleQueenside)
        );
    }

    #[test]
    fn castling_needs_rights_and_empty_path() {
        let position =
            Position::from_fen("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w kq - 0 1").unwrap();
        assert!(moves_from(&position, Square::E1).find_to(Square::G1).is_none());

        // b1 occupied blocks queenside even though c1 and d1 are empty
        let position =
            Position::from_fen("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/RN2K2R w KQkq - 0 1").unwrap();
        let moves = moves_from(&position, Square::E1);
        assert!(moves.find_to(Square::C1).is_none());
        assert!(moves.find_to(Square::G1).is_some());
    }

    #[test]
    fn castling_ignores_attacks_and_missing_rook() {
        // f1 is attacked by the rook on f8 and there is no rook on h1
        let position = Position::from_fen("4kr2/8/8/8/8/8/8/4K3 w K - 0 1").unwrap();
        let m = moves_from(&position, Square::E1).find_to(Square::G1);
        assert_eq!(m.map(|m| m.flag), Some(MoveFlag::CastleKingside));
    }

    #[test]
    fn dense_board_exceeds_legal_move_bound() {
        let position = Position::from_fen(
            "QQQQQQQQ/Q6Q/Q6Q/Q6Q/Q6Q/Q6Q/Q6Q/QQQQQQQQ w - - 0 1",
        )
        .unwrap();
        let moves = generate_moves(&position);
        assert_eq!(moves.len(), 288);
        assert!(moves.destinations().all(|to| position.piece_at(to).is_none()));
    }

    #[test]
    fn black_castling() {
        let position =
            Position::from_fen("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R b KQkq - 0 1").unwrap();
        let moves = moves_from(&position, Square::E8);
        assert!(moves.find_to(Square::G8).is_some());
        assert!(moves.find_to(Square::C8).is_some());
    }
}
