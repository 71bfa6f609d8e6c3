//! One-ply greedy opponent.
//!
//! Looks at its own move and the opponent's immediate reply, nothing deeper:
//! take a win if there is one, never hand the opponent a win when a safe move
//! exists, prefer the most valuable capture, otherwise pick at random.

use super::SearchResult;
use super::minimax::WIN_SCORE;
use crate::error::EngineError;
use crate::games::{GameState, Outcome, Rules, Side, legal_moves};
use crate::rng::GameRng;
use tracing::{debug, instrument};

/// Picks a greedy move for the side to move.
///
/// # Errors
///
/// Returns [`EngineError::NoLegalMoves`] when there is nothing to play.
#[instrument(skip(rules, state, rng), fields(variant = %rules.kind()))]
pub fn search<R: Rules>(
    rules: &R,
    state: &GameState<R>,
    maximizing: Side,
    rng: &mut GameRng,
) -> Result<SearchResult<R::Move>, EngineError> {
    let mover = state.to_move();
    let sign = if mover == maximizing { 1 } else { -1 };
    let candidates = legal_moves(rules, state);
    if candidates.is_empty() {
        return Err(EngineError::NoLegalMoves);
    }

    if let Some(&mv) = candidates
        .iter()
        .find(|&&mv| wins_immediately(rules, state.board(), mover, mv))
    {
        debug!(%mv, "Taking immediate win");
        return Ok(SearchResult::new(mv, sign * WIN_SCORE));
    }

    let safe: Vec<R::Move> = candidates
        .iter()
        .copied()
        .filter(|&mv| !hands_over_win(rules, state.board(), mover, mv))
        .collect();
    let pool = if safe.is_empty() {
        debug!("Every move loses next turn");
        candidates
    } else {
        safe
    };

    let best_gain = pool
        .iter()
        .map(|&mv| rules.material_gain(state.board(), mv))
        .max()
        .unwrap_or(0);
    let pool: Vec<R::Move> = if best_gain > 0 {
        pool.into_iter()
            .filter(|&mv| rules.material_gain(state.board(), mv) == best_gain)
            .collect()
    } else {
        pool
    };

    let mv = *rng.choose(&pool).ok_or(EngineError::NoLegalMoves)?;
    Ok(SearchResult::new(mv, sign * best_gain))
}

fn wins_immediately<R: Rules>(rules: &R, board: &R::Board, mover: Side, mv: R::Move) -> bool {
    let mut next = board.clone();
    rules.commit(&mut next, mover, mv);
    rules.outcome(&next, mover.opponent()) == Outcome::Win(mover)
}

/// True if, after `mv`, the opponent has a reply that wins on the spot.
fn hands_over_win<R: Rules>(rules: &R, board: &R::Board, mover: Side, mv: R::Move) -> bool {
    let mut next = board.clone();
    rules.commit(&mut next, mover, mv);
    let opponent = mover.opponent();
    if rules.outcome(&next, opponent).is_terminal() {
        return false;
    }
    rules
        .moves(&next, opponent)
        .into_iter()
        .any(|reply| wins_immediately(rules, &next, opponent, reply))
}
