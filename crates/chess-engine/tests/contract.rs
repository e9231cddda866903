//! Scenarios run through the rules-adapter contract.

use chess_core::{Color, FenParser, MoveRequest, Square};
use chess_engine::{Engine, GameEvent, MoveRejected, RulesAdapter, Session};

fn request(uci: &str) -> MoveRequest {
    MoveRequest::from_uci(uci).unwrap()
}

fn sq(label: &str) -> Square {
    Square::from_algebraic(label).unwrap()
}

#[test]
fn e2e4_from_start() {
    let mut engine = Engine::default();
    engine.make_move(request("e2e4")).unwrap();
    assert_eq!(
        engine.to_fen(),
        "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"
    );
    assert_eq!(engine.side_to_move(), Color::Black);
}

#[test]
fn black_pawn_on_whites_turn_is_turn() {
    let mut engine = Engine::default();
    assert_eq!(engine.make_move(request("e7e5")), Err(MoveRejected::Turn));
}

#[test]
fn three_square_push_is_illegal() {
    let mut engine = Engine::default();
    assert_eq!(
        engine.make_move(request("e2e5")),
        Err(MoveRejected::Illegal)
    );
    assert_eq!(engine.to_fen(), FenParser::STARTPOS);
}

#[test]
fn white_kingside_castle_keeps_black_rights() {
    let mut engine = Engine::default();
    engine
        .set_position("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1")
        .unwrap();
    let outcome = engine.make_move(request("e1g1")).unwrap();

    let position = &outcome.position;
    assert_eq!(position.piece_at(Square::G1).map(|p| p.to_fen_char()), Some('K'));
    assert_eq!(position.piece_at(Square::F1).map(|p| p.to_fen_char()), Some('R'));
    assert_eq!(position.piece_at(Square::H1), None);
    assert_eq!(position.piece_at(Square::E1), None);
    assert_eq!(position.castling().to_string(), "kq");
    assert_eq!(
        engine.to_fen(),
        "r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R4RK1 b kq - 1 1"
    );
}

#[test]
fn castle_keeps_opponent_partial_rights() {
    let mut engine = Engine::default();
    engine
        .set_position("r3k2r/8/8/8/8/8/8/R3K2R w Kq - 0 1")
        .unwrap();
    engine.make_move(request("e1g1")).unwrap();
    assert!(engine.to_fen().contains(" b q - "));
}

#[test]
fn pawn_pushes_before_and_after_first_move() {
    let mut engine = Engine::default();
    assert_eq!(engine.moves_from(sq("e2")).len(), 2);
    engine.make_move(request("e2e3")).unwrap();
    engine.make_move(request("a7a6")).unwrap();
    assert_eq!(engine.moves_from(sq("e3")).len(), 1);
}

#[test]
fn session_events_for_a_short_game() {
    let mut session = Session::default();
    let mut kinds = Vec::new();
    for (i, uci) in ["e2e4", "e7e5", "e1e3", "g1f3", "e8e7"].iter().enumerate() {
        let event = session.play(request(uci), i as f64 * 16.0);
        kinds.push(match event {
            GameEvent::Move { .. } => "move".to_string(),
            GameEvent::Illegal { reason, .. } => reason.reason().to_string(),
            GameEvent::Update { .. } => "update".to_string(),
        });
    }
    assert_eq!(kinds, ["move", "move", "illegal", "move", "move"]);
    // An ordinary king step leaves the castling rights alone.
    assert_eq!(
        session.to_fen(),
        "rnbq1bnr/ppppkppp/8/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3"
    );
}
