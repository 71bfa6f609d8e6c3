//! Plain minimax search.
//!
//! Depth counts plies from the root: the candidate move itself is depth 1.
//! A win for the maximizing side scores `WIN_SCORE - depth`, a loss scores
//! `depth - WIN_SCORE` and a draw scores zero, so quicker wins and slower
//! losses are preferred. Positions cut off by `max_depth` also score zero.
//! Decided games never score zero or cross sign: past depth 9 a win scores 1
//! and a loss -1.

use super::SearchResult;
use crate::error::EngineError;
use crate::games::{GameState, Outcome, Rules, Side, legal_moves};
use tracing::instrument;

/// Base score of a decided game.
pub const WIN_SCORE: i32 = 10;

/// Runs minimax from `state` for the side to move.
///
/// Candidates are tried in [`legal_moves`] order and only a strictly better
/// score replaces the current best, so ties resolve to the earliest move.
///
/// # Errors
///
/// Returns [`EngineError::NoLegalMoves`] when there is nothing to play.
#[instrument(skip(rules, state), fields(variant = %rules.kind()))]
pub fn search<R: Rules>(
    rules: &R,
    state: &GameState<R>,
    maximizing: Side,
    max_depth: Option<u32>,
) -> Result<SearchResult<R::Move>, EngineError> {
    let mover = state.to_move();
    let maximize = mover == maximizing;
    let mut best: Option<SearchResult<R::Move>> = None;

    for mv in legal_moves(rules, state) {
        let mut board = state.board().clone();
        rules.commit(&mut board, mover, mv);
        let score = value(rules, &board, mover.opponent(), maximizing, 1, max_depth);

        let better = best.is_none_or(|b| if maximize { score > b.score } else { score < b.score });
        if better {
            best = Some(SearchResult::new(mv, score));
        }
    }

    best.ok_or(EngineError::NoLegalMoves)
}

/// Minimax value of `board` with `to_move` about to play.
pub fn value<R: Rules>(
    rules: &R,
    board: &R::Board,
    to_move: Side,
    maximizing: Side,
    depth: u32,
    max_depth: Option<u32>,
) -> i32 {
    let depth_score = depth as i32;
    match rules.outcome(board, to_move) {
        Outcome::Win(side) if side == maximizing => return (WIN_SCORE - depth_score).max(1),
        Outcome::Win(_) => return (depth_score - WIN_SCORE).min(-1),
        Outcome::Draw => return 0,
        Outcome::Undecided => {}
    }
    if max_depth.is_some_and(|limit| depth >= limit) {
        return 0;
    }

    let scores = rules.moves(board, to_move).into_iter().map(|mv| {
        let mut next = board.clone();
        rules.commit(&mut next, to_move, mv);
        value(rules, &next, to_move.opponent(), maximizing, depth + 1, max_depth)
    });

    let best = if to_move == maximizing {
        scores.max()
    } else {
        scores.min()
    };
    best.unwrap_or(0)
}
