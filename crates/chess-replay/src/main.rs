//! Chess Replay - Plays move requests against the rules engine.
//!
//! Each request is applied to a board session and the resulting event is
//! printed to stdout as one JSON object per line. Logs go to stderr.

use anyhow::{bail, Context};
use chess_core::MoveRequest;
use chess_engine::{EngineConfig, GameEvent, Session};
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;

/// Frame spacing used when stamping replayed moves.
const MOVE_INTERVAL_MS: f64 = 1000.0;

/// Chess Replay - Prints the board events produced by a list of moves.
#[derive(Parser)]
#[command(name = "chess-replay")]
#[command(about = "Prints the board events produced by a list of moves")]
struct Args {
    /// Path to an engine configuration file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Position record to start from, overriding the configured one
    #[arg(long)]
    fen: Option<String>,

    /// Stop at the first rejected move
    #[arg(long)]
    strict: bool,

    /// Moves in coordinate notation, e.g. e2e4 e7e8n
    moves: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => EngineConfig::default(),
    };
    tracing::info!("Starting position: {}", config.start_fen);

    let mut session = Session::from_config(&config)?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    if let Some(fen) = &args.fen {
        let event = session.load(fen, 0.0).context("invalid --fen record")?;
        writeln!(out, "{}", serde_json::to_string(&event)?)?;
    }

    let requests = parse_moves(&args.moves)?;
    for event in replay(&mut session, &requests, args.strict) {
        writeln!(out, "{}", serde_json::to_string(&event)?)?;
    }

    tracing::info!(
        "Replayed {} of {} moves, final position: {}",
        session.move_history().len(),
        requests.len(),
        session.to_fen()
    );
    Ok(())
}

fn parse_moves(moves: &[String]) -> anyhow::Result<Vec<MoveRequest>> {
    moves
        .iter()
        .map(|text| match MoveRequest::from_uci(text) {
            Some(request) => Ok(request),
            None => bail!("unparseable move: '{}'", text),
        })
        .collect()
}

/// Plays each request in order. With `strict`, stops after the first rejection.
fn replay(session: &mut Session, requests: &[MoveRequest], strict: bool) -> Vec<GameEvent> {
    let mut events = Vec::with_capacity(requests.len());
    for (i, &request) in requests.iter().enumerate() {
        let event = session.play(request, (i + 1) as f64 * MOVE_INTERVAL_MS);
        let rejected = matches!(event, GameEvent::Illegal { .. });
        if rejected {
            tracing::warn!("Move {} ({}) rejected", i + 1, request);
        }
        events.push(event);
        if rejected && strict {
            break;
        }
    }
    events
}
