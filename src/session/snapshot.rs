//! Read-only views of a session for front-ends.

use super::{Phase, Scoreboard};
use crate::games::{Outcome, Rules, Side};
use crate::search::SearchResult;
use serde::Serialize;

/// Immutable copy of everything a front-end needs to draw a session.
///
/// Serializes with serde; [`AnySnapshot::to_json`](super::AnySnapshot::to_json) exports it as JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(bound = "")]
pub struct Snapshot<R: Rules> {
    /// Board cells.
    pub board: R::Board,
    /// Side entitled to the next move.
    pub to_move: Side,
    /// Side the human plays; in hot-seat games the side that moved first.
    pub human_side: Side,
    /// Current outcome.
    pub outcome: Outcome,
    /// Session phase.
    pub phase: Phase,
    /// Cells changed by the most recent move.
    pub touched: Vec<usize>,
    /// Cells of the completed line, empty unless a line decided the game.
    pub winning_line: Vec<usize>,
    /// Most recent move, if any.
    pub last_move: Option<R::Move>,
    /// Moves played in this game.
    pub move_count: usize,
    /// Tally across games.
    pub scoreboard: Scoreboard,
}

/// Result of one human submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(bound = "")]
pub struct MoveReport<R: Rules> {
    /// Session after the human move and any reply.
    pub snapshot: Snapshot<R>,
    /// Final outcome if the game ended during this submission.
    pub outcome: Option<Outcome>,
    /// Computer reply, if one was played.
    pub opponent: Option<SearchResult<R::Move>>,
}
