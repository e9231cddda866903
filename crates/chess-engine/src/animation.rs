//! Interpolated piece transitions driven by display frames.
//!
//! The caller owns the frame loop and passes a monotonic timestamp in
//! milliseconds to every call. Starting a transition cancels the previous
//! one outright; a frame callback that still holds an old generation id
//! should stop rescheduling itself.

use crate::Motion;
use chess_core::{Piece, Square};
use serde::Serialize;
use tracing::debug;

/// One piece drawn between its origin and destination.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sprite {
    pub piece: Piece,
    pub from: Square,
    pub to: Square,
    /// Board x in file units (0.0 = a-file).
    pub x: f64,
    /// Board y in rank units (0.0 = first rank).
    pub y: f64,
}

/// Interpolated state of the running transition at one instant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub generation: u64,
    /// Eased progress in [0, 1].
    pub progress: f64,
    /// True on the last frame of the transition.
    pub done: bool,
    pub sprites: Vec<Sprite>,
}

#[derive(Debug, Clone)]
struct Transition {
    motions: Vec<Motion>,
    started_at: f64,
}

/// Runs at most one transition at a time.
#[derive(Debug, Clone)]
pub struct Animator {
    duration_ms: f64,
    generation: u64,
    active: Option<Transition>,
}

impl Animator {
    pub fn new(duration_ms: u32) -> Self {
        Animator {
            duration_ms: f64::from(duration_ms),
            generation: 0,
            active: None,
        }
    }

    /// Starts a transition, cancelling any running one, and returns its generation id.
    ///
    /// A transition with no motions finishes immediately.
    pub fn start(&mut self, motions: Vec<Motion>, now_ms: f64) -> u64 {
        if self.active.is_some() {
            debug!(generation = self.generation, "transition cancelled");
        }
        self.generation += 1;
        self.active = if motions.is_empty() {
            None
        } else {
            Some(Transition {
                motions,
                started_at: now_ms,
            })
        };
        self.generation
    }

    /// Drops the running transition, if any.
    pub fn cancel(&mut self) {
        if self.active.take().is_some() {
            debug!(generation = self.generation, "transition cancelled");
        }
    }

    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    /// Id of the most recently started transition.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Computes the frame at `now_ms`. Returns `None` when nothing is running.
    ///
    /// The frame that reaches the destination is returned once with
    /// `done` set, after which the transition is finished.
    pub fn frame(&mut self, now_ms: f64) -> Option<Frame> {
        let transition = self.active.as_ref()?;

        let linear = if self.duration_ms <= 0.0 {
            1.0
        } else {
            ((now_ms - transition.started_at) / self.duration_ms).clamp(0.0, 1.0)
        };
        let progress = ease_out_cubic(linear);
        let done = linear >= 1.0;

        let sprites = transition
            .motions
            .iter()
            .map(|m| Sprite {
                piece: m.piece,
                from: m.from,
                to: m.to,
                x: lerp(f64::from(m.from.file()), f64::from(m.to.file()), progress),
                y: lerp(f64::from(m.from.rank()), f64::from(m.to.rank()), progress),
            })
            .collect();

        let frame = Frame {
            generation: self.generation,
            progress,
            done,
            sprites,
        };
        if done {
            self.active = None;
        }
        Some(frame)
    }
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

fn ease_out_cubic(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::{Color, PieceKind};

    fn knight_hop() -> Vec<Motion> {
        vec![Motion {
            piece: Piece::new(Color::White, PieceKind::Knight),
            from: Square::from_algebraic("g1").unwrap(),
            to: Square::from_algebraic("f3").unwrap(),
        }]
    }

    #[test]
    fn idle_animator_has_no_frames() {
        let mut animator = Animator::new(200);
        assert!(!animator.is_running());
        assert_eq!(animator.frame(0.0), None);
    }

    #[test]
    fn frames_interpolate_to_destination() {
        let mut animator = Animator::new(200);
        let generation = animator.start(knight_hop(), 1000.0);

        let first = animator.frame(1000.0).unwrap();
        assert_eq!(first.generation, generation);
        assert_eq!(first.progress, 0.0);
        assert_eq!((first.sprites[0].x, first.sprites[0].y), (6.0, 0.0));
        assert!(!first.done);

        let middle = animator.frame(1100.0).unwrap();
        assert!(middle.progress > 0.5 && middle.progress < 1.0);
        assert!(middle.sprites[0].x < 6.0 && middle.sprites[0].x > 5.0);

        let last = animator.frame(1250.0).unwrap();
        assert!(last.done);
        assert_eq!((last.sprites[0].x, last.sprites[0].y), (5.0, 2.0));

        assert!(!animator.is_running());
        assert_eq!(animator.frame(1300.0), None);
    }

    #[test]
    fn new_transition_cancels_previous() {
        let mut animator = Animator::new(200);
        let first = animator.start(knight_hop(), 0.0);
        let _ = animator.frame(50.0);

        let second = animator.start(knight_hop(), 60.0);
        assert_ne!(first, second);

        let frame = animator.frame(60.0).unwrap();
        assert_eq!(frame.generation, second);
        assert_eq!(frame.progress, 0.0);
    }

    #[test]
    fn cancel_stops_frames() {
        let mut animator = Animator::new(200);
        animator.start(knight_hop(), 0.0);
        animator.cancel();
        assert_eq!(animator.frame(10.0), None);
    }

    #[test]
    fn empty_or_instant_transitions() {
        let mut animator = Animator::new(200);
        animator.start(Vec::new(), 0.0);
        assert!(!animator.is_running());

        let mut instant = Animator::new(0);
        instant.start(knight_hop(), 0.0);
        let frame = instant.frame(0.0).unwrap();
        assert!(frame.done);
        assert_eq!(frame.progress, 1.0);
    }

    #[test]
    fn clock_before_start_clamps() {
        let mut animator = Animator::new(100);
        animator.start(knight_hop(), 500.0);
        let frame = animator.frame(400.0).unwrap();
        assert_eq!(frame.progress, 0.0);
    }
}
