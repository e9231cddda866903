//! Inferring piece movement from two board snapshots.
//!
//! Used only when a position arrives without move metadata (for example a
//! record loaded directly). When a move produced the transition, prefer
//! [`MoveOutcome::motions`](crate::MoveOutcome::motions), which is exact.
//!
//! The match is by piece symbol alone. When several identical pieces move in
//! the same transition the pairing of origins with destinations may be wrong,
//! and two origins may claim the same destination. Unmatched pieces simply
//! appear or disappear.

use crate::position::record_order;
use crate::{Motion, Position};
use tracing::debug;

/// Returns the inferred motions from `before` to `after`, in record order of origin.
///
/// For each square whose piece in `before` is gone from that square in `after`,
/// the destination is the first square in record order that holds the same
/// piece in `after` but did not hold it in `before`.
pub fn diff_snapshots(before: &Position, after: &Position) -> Vec<Motion> {
    let mut motions = Vec::new();

    for from in record_order() {
        let Some(piece) = before.piece_at(from) else {
            continue;
        };
        if after.piece_at(from) == Some(piece) {
            continue;
        }
        let destination = record_order().find(|&sq| {
            after.piece_at(sq) == Some(piece) && before.piece_at(sq) != Some(piece)
        });
        if let Some(to) = destination {
            motions.push(Motion { piece, from, to });
        }
    }

    debug!(count = motions.len(), "snapshot diff");
    motions
}
