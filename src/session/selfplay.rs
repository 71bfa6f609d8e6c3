//! Computer vs computer games.

use crate::error::EngineError;
use crate::games::{GameState, Outcome, Rules, Side, apply_move};
use crate::rng::GameRng;
use crate::search::{Strategy, best_move};
use serde::Serialize;
use tracing::{debug, info, instrument};

/// Record of a finished (or abandoned) self-play game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(bound = "")]
pub struct PlayedGame<R: Rules> {
    /// Moves in order, side A first.
    pub moves: Vec<R::Move>,
    /// Outcome; `Undecided` if the ply limit stopped the game.
    pub outcome: Outcome,
    /// Final board.
    pub board: R::Board,
}

/// Plays `strategy_a` against `strategy_b` from the initial board.
///
/// Side A moves first. Each side searches as the maximizer for itself. The
/// game stops after `max_plies` moves even when undecided.
///
/// # Errors
///
/// Propagates search failures, which cannot occur for an undecided state of
/// the built-in variants.
#[instrument(skip(rules), fields(variant = %rules.kind()))]
pub fn play_out<R: Rules>(
    rules: &R,
    strategy_a: Strategy,
    strategy_b: Strategy,
    seed: u64,
    max_plies: usize,
) -> Result<PlayedGame<R>, EngineError> {
    let mut rng = GameRng::new(seed);
    let mut state = GameState::new(rules, Side::A);

    while !state.is_terminal() && state.history().len() < max_plies {
        let strategy = match state.to_move() {
            Side::A => strategy_a,
            Side::B => strategy_b,
        };
        let choice = best_move(rules, &state, state.to_move(), strategy, &mut rng)?;
        state = apply_move(rules, &state, choice.mv)?;
    }

    if state.is_terminal() {
        info!(outcome = %state.outcome(), plies = state.history().len(), "Self-play finished");
    } else {
        debug!(plies = max_plies, "Self-play hit ply limit");
    }

    Ok(PlayedGame {
        moves: state.history().to_vec(),
        outcome: state.outcome(),
        board: state.board().clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::connect_four::ConnectFour;

    #[test]
    fn test_ply_limit() {
        let game = play_out(
            &ConnectFour,
            Strategy::RandomUniform,
            Strategy::RandomUniform,
            4,
            3,
        )
        .expect("plays");
        assert_eq!(game.moves.len(), 3);
        assert_eq!(game.outcome, Outcome::Undecided);
    }

    #[test]
    fn test_seed_reproduces_game() {
        let first = play_out(&ConnectFour, Strategy::GreedyOnePly, Strategy::RandomUniform, 8, 42)
            .expect("plays");
        let second = play_out(&ConnectFour, Strategy::GreedyOnePly, Strategy::RandomUniform, 8, 42)
            .expect("plays");
        assert_eq!(first, second);
    }
}
