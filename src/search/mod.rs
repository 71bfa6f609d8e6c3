//! Opponent move selection.
//!
//! Each strategy is a plain function over a [`Rules`] implementation and a
//! [`GameState`]; [`Strategy`] is the tagged value a session or configuration
//! file uses to pick one.
//!
//! | Strategy | Lookahead | Randomness |
//! |----------|-----------|------------|
//! | `Minimax` | to terminal, or `max_depth` plies | none |
//! | `GreedyOnePly` | own move + opponent reply | ties only |
//! | `RandomUniform` | none | always |

pub mod greedy;
pub mod minimax;
pub mod random;

use crate::error::EngineError;
use crate::games::{GameState, Rules, Side, VariantKind};
use crate::rng::GameRng;
use derive_new::new;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// A chosen move and its evaluation.
///
/// Positive scores favor the maximizing side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, new)]
pub struct SearchResult<M> {
    /// Move to play.
    pub mv: M,
    /// Evaluation from the maximizing side's point of view.
    pub score: i32,
}

/// How the computer picks its move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Strategy {
    /// Minimax search, exhaustive when `max_depth` is `None`.
    Minimax {
        /// Plies to look ahead before scoring a position as neutral.
        #[serde(default)]
        max_depth: Option<u32>,
    },
    /// Win now, avoid losing next, prefer the biggest capture, else random.
    GreedyOnePly,
    /// Any legal move, uniformly.
    RandomUniform,
}

impl Strategy {
    /// Exhaustive minimax.
    pub const EXHAUSTIVE: Strategy = Strategy::Minimax { max_depth: None };

    /// Default opponent for a variant: full minimax only where the tree is small.
    pub fn default_for(variant: VariantKind) -> Self {
        match variant {
            VariantKind::TicTacToe => Self::EXHAUSTIVE,
            VariantKind::ConnectFour | VariantKind::Chess => Self::GreedyOnePly,
        }
    }

    /// Picks a move for the side to move, maximizing for that same side.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NoLegalMoves`] if the state has no legal move.
    pub fn choose<R: Rules>(
        &self,
        rules: &R,
        state: &GameState<R>,
        rng: &mut GameRng,
    ) -> Result<SearchResult<R::Move>, EngineError> {
        best_move(rules, state, state.to_move(), *self, rng)
    }
}

/// Best move for the side to move, scored from `maximizing`'s point of view.
///
/// # Errors
///
/// Returns [`EngineError::NoLegalMoves`] if the state is terminal or blocked.
#[instrument(skip(rules, state, rng), fields(variant = %rules.kind(), to_move = %state.to_move()))]
pub fn best_move<R: Rules>(
    rules: &R,
    state: &GameState<R>,
    maximizing: Side,
    strategy: Strategy,
    rng: &mut GameRng,
) -> Result<SearchResult<R::Move>, EngineError> {
    let result = match strategy {
        Strategy::Minimax { max_depth } => minimax::search(rules, state, maximizing, max_depth),
        Strategy::GreedyOnePly => greedy::search(rules, state, maximizing, rng),
        Strategy::RandomUniform => random::search(rules, state, rng),
    }?;

    debug!(mv = %result.mv, score = result.score, "Search finished");
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_toml_shape() {
        #[derive(Deserialize)]
        struct Wrapper {
            strategy: Strategy,
        }

        let w: Wrapper = toml::from_str("strategy = { kind = \"minimax\", max_depth = 4 }")
            .expect("minimax parses");
        assert_eq!(w.strategy, Strategy::Minimax { max_depth: Some(4) });

        let w: Wrapper = toml::from_str("strategy = { kind = \"minimax\" }").expect("parses");
        assert_eq!(w.strategy, Strategy::EXHAUSTIVE);

        let w: Wrapper =
            toml::from_str("strategy = { kind = \"greedy-one-ply\" }").expect("greedy parses");
        assert_eq!(w.strategy, Strategy::GreedyOnePly);
    }

    #[test]
    fn test_defaults_per_variant() {
        assert_eq!(Strategy::default_for(VariantKind::TicTacToe), Strategy::EXHAUSTIVE);
        assert_eq!(Strategy::default_for(VariantKind::Chess), Strategy::GreedyOnePly);
    }
}
