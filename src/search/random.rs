//! Uniform random opponent.

use super::SearchResult;
use crate::error::EngineError;
use crate::games::{GameState, Rules, legal_moves};
use crate::rng::GameRng;
use tracing::instrument;

/// Picks any legal move with equal probability. The score is always zero.
///
/// # Errors
///
/// Returns [`EngineError::NoLegalMoves`] when there is nothing to play.
#[instrument(skip(rules, state, rng), fields(variant = %rules.kind()))]
pub fn search<R: Rules>(
    rules: &R,
    state: &GameState<R>,
    rng: &mut GameRng,
) -> Result<SearchResult<R::Move>, EngineError> {
    let candidates = legal_moves(rules, state);
    let mv = *rng.choose(&candidates).ok_or(EngineError::NoLegalMoves)?;
    Ok(SearchResult::new(mv, 0))
}
