//! Engine configuration loaded from TOML.

use crate::Position;
use chess_core::{FenError, FenParser, Promotion};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur when loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Read(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid start position: {0}")]
    InvalidStartFen(#[from] FenError),
}

/// Settings for a board session.
///
/// ```toml
/// start_fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"
/// default_promotion = "q"
/// animation_ms = 200
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    /// Position the session starts from.
    #[serde(default = "default_start_fen")]
    pub start_fen: String,
    /// Piece a pawn becomes when a move names no promotion.
    #[serde(default, with = "promotion_letter")]
    pub default_promotion: Promotion,
    /// Duration of a move transition in milliseconds.
    #[serde(default = "default_animation_ms")]
    pub animation_ms: u32,
}

fn default_start_fen() -> String {
    FenParser::STARTPOS.to_string()
}

fn default_animation_ms() -> u32 {
    200
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            start_fen: default_start_fen(),
            default_promotion: Promotion::Queen,
            animation_ms: default_animation_ms(),
        }
    }
}

impl EngineConfig {
    /// Loads the configuration at `path`, or the defaults if the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] if the file exists but cannot be read,
    /// [`ConfigError::Parse`] if it is not valid TOML for this struct, or
    /// [`ConfigError::InvalidStartFen`] if `start_fen` does not decode.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parses and validates configuration text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that `start_fen` decodes.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.start_position().map(|_| ())
    }

    /// Decodes `start_fen`.
    pub fn start_position(&self) -> Result<Position, ConfigError> {
        Ok(Position::from_fen(&self.start_fen)?)
    }
}

/// Promotion written as its boundary letter (`q`, `r`, `b`, `n`).
mod promotion_letter {
    use chess_core::Promotion;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        promotion: &Promotion,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let mut buf = [0u8; 4];
        serializer.serialize_str(promotion.to_char().encode_utf8(&mut buf))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Promotion, D::Error> {
        let letter = String::deserialize(deserializer)?;
        let mut chars = letter.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Promotion::from_char(c)
                .ok_or_else(|| de::Error::custom(format!("unknown promotion '{}'", letter))),
            _ => Err(de::Error::custom(format!("unknown promotion '{}'", letter))),
        }
    }
}
