//! WebAssembly bindings for the board rules engine.
//!
//! This crate exposes the rules-adapter contract to JavaScript. Squares cross
//! the boundary as two-character labels, promotions as one of `q`, `r`, `b`,
//! `n`, and events as plain objects tagged by `type`.
//!
//! # Usage
//!
//! ```javascript
//! import init, { Board } from 'chess-wasm';
//!
//! await init();
//!
//! const board = new Board();
//! console.log(board.movesFrom("e2"));          // ["e3", "e4"]
//!
//! const event = board.move("e2", "e4", undefined, performance.now());
//! // { type: "move", from: "e2", to: "e4", fen: "..." }
//!
//! function tick(now) {
//!   const frame = board.frame(now);
//!   if (frame) { draw(frame.sprites); if (!frame.done) requestAnimationFrame(tick); }
//! }
//! requestAnimationFrame(tick);
//! ```

use chess_core::{MoveRequest, Promotion, Square};
use chess_engine::{EngineConfig, GameEvent, Session};
use wasm_bindgen::prelude::*;

/// A board session that can be driven from JavaScript.
#[wasm_bindgen]
pub struct Board {
    session: Session,
}

#[wasm_bindgen]
impl Board {
    /// Creates a board at the standard starting position.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Board {
            session: Session::default(),
        }
    }

    /// Creates a board from a position record.
    ///
    /// Returns an error if the record is malformed.
    #[wasm_bindgen(js_name = fromFen)]
    pub fn from_fen(fen: &str, animation_ms: Option<u32>) -> Result<Board, JsError> {
        let defaults = EngineConfig::default();
        let config = EngineConfig {
            start_fen: fen.to_string(),
            animation_ms: animation_ms.unwrap_or(defaults.animation_ms),
            ..defaults
        };
        let session = Session::from_config(&config).map_err(|e| JsError::new(&e.to_string()))?;
        Ok(Board { session })
    }

    /// Replaces the position and returns an `update` event.
    #[wasm_bindgen(js_name = setPosition)]
    pub fn set_position(&mut self, fen: &str, now_ms: f64) -> Result<JsValue, JsError> {
        let event = self
            .session
            .load(fen, now_ms)
            .map_err(|e| JsError::new(&e.to_string()))?;
        to_js(&event)
    }

    /// Returns the current position record.
    #[wasm_bindgen(js_name = getPosition)]
    pub fn get_position(&self) -> String {
        self.session.to_fen()
    }

    /// Returns the side to move ("white" or "black").
    #[wasm_bindgen(js_name = sideToMove)]
    pub fn side_to_move(&self) -> String {
        self.session.side_to_move().as_str().to_string()
    }

    /// Returns the destination labels of the piece on `square`.
    #[wasm_bindgen(js_name = movesFrom)]
    pub fn moves_from(&self, square: &str) -> Result<Vec<String>, JsError> {
        let sq: Square = square
            .parse()
            .map_err(|e: chess_core::SquareError| JsError::new(&e.to_string()))?;
        Ok(self.destinations(sq))
    }

    /// Attempts a move and returns a `move` or `illegal` event.
    ///
    /// Malformed labels are reported as errors rather than events.
    #[wasm_bindgen(js_name = move)]
    pub fn make_move(
        &mut self,
        from: &str,
        to: &str,
        promotion: Option<String>,
        now_ms: f64,
    ) -> Result<JsValue, JsError> {
        let request =
            parse_request(from, to, promotion.as_deref()).map_err(|e| JsError::new(&e))?;
        to_js(&self.play(request, now_ms))
    }

    /// Returns the piece at the given square as a record letter, or null.
    #[wasm_bindgen(js_name = pieceAt)]
    pub fn piece_at(&self, square: &str) -> Option<String> {
        let sq = Square::from_algebraic(square)?;
        let piece = self.session.piece_at(sq)?;
        Some(piece.to_fen_char().to_string())
    }

    /// Returns the transition frame at `now_ms`, or null when nothing is animating.
    pub fn frame(&mut self, now_ms: f64) -> Result<JsValue, JsError> {
        match self.session.frame(now_ms) {
            Some(frame) => to_js(&frame),
            None => Ok(JsValue::NULL),
        }
    }

    /// Returns true while a transition is running.
    #[wasm_bindgen(js_name = isAnimating)]
    pub fn is_animating(&self) -> bool {
        self.session.animator().is_running()
    }
}

impl Board {
    fn destinations(&self, square: Square) -> Vec<String> {
        self.session
            .moves_from(square)
            .destinations()
            .map(Square::to_algebraic)
            .collect()
    }

    fn play(&mut self, request: MoveRequest, now_ms: f64) -> GameEvent {
        self.session.play(request, now_ms)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds a request from boundary labels. An absent promotion means queen.
fn parse_request(from: &str, to: &str, promotion: Option<&str>) -> Result<MoveRequest, String> {
    let from: Square = from.parse().map_err(|e: chess_core::SquareError| e.to_string())?;
    let to: Square = to.parse().map_err(|e: chess_core::SquareError| e.to_string())?;
    let request = MoveRequest::new(from, to);
    match promotion {
        None | Some("") => Ok(request),
        Some(letter) => {
            let mut chars = letter.chars();
            match (chars.next().and_then(Promotion::from_char), chars.next()) {
                (Some(p), None) => Ok(request.with_promotion(p)),
                _ => Err(format!("invalid promotion: '{}'", letter)),
            }
        }
    }
}

fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, JsError> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsError::new(&e.to_string()))
}

/// Initialization function called when WASM module loads.
#[wasm_bindgen(start)]
pub fn init() {
    tracing::debug!("chess-wasm loaded");
}
