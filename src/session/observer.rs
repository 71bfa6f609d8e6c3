//! Session change notifications.

use super::Snapshot;
use crate::games::{Outcome, Rules};
use tracing::{debug, info};

/// Receives a [`Snapshot`] after every transition and the outcome when a game ends.
///
/// Any `FnMut(&Snapshot<R>)` closure is an observer that ignores outcomes.
pub trait SessionObserver<R: Rules> {
    /// Called after every phase transition.
    fn on_snapshot(&mut self, snapshot: &Snapshot<R>);

    /// Called once when a game reaches a decided outcome.
    fn on_terminal(&mut self, _outcome: Outcome) {}
}

impl<R, F> SessionObserver<R> for F
where
    R: Rules,
    F: FnMut(&Snapshot<R>),
{
    fn on_snapshot(&mut self, snapshot: &Snapshot<R>) {
        self(snapshot)
    }
}

/// Observer that writes transitions to the tracing log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl<R: Rules> SessionObserver<R> for TracingObserver {
    fn on_snapshot(&mut self, snapshot: &Snapshot<R>) {
        debug!(
            phase = %snapshot.phase,
            to_move = %snapshot.to_move,
            moves = snapshot.move_count,
            "Session transition"
        );
    }

    fn on_terminal(&mut self, outcome: Outcome) {
        info!(%outcome, "Game finished");
    }
}
