//! Board/Rules contract shared by every variant.
//!
//! Rules are separated from state storage: a variant value (`TicTacToe`,
//! `ConnectFour`, `Chess`) knows how to enumerate, commit and judge moves on
//! its board type, while [`GameState`] carries one board plus the turn
//! bookkeeping. All functions here are pure; applying a move returns a new
//! state and never touches the input.

use super::VariantKind;
use super::types::{Outcome, Side};
use crate::error::EngineError;
use crate::session::Phase;
use serde::Serialize;
use std::fmt;
use std::hash::Hash;
use tracing::{debug, instrument};

/// Movement, placement and terminal rules of one game variant.
pub trait Rules: Clone + fmt::Debug + PartialEq + Eq {
    /// Board representation.
    type Board: Clone + fmt::Debug + PartialEq + Eq + Hash + Serialize;
    /// Move descriptor.
    type Move: Copy + fmt::Debug + fmt::Display + PartialEq + Eq + Hash + Serialize;

    /// Which variant these rules implement.
    fn kind(&self) -> VariantKind;

    /// Board a fresh game starts from.
    fn initial_board(&self) -> Self::Board;

    /// Every move `side` may make on `board`, in a stable order.
    ///
    /// Does not look at whether the game is already decided; see
    /// [`legal_moves`] for the state-aware version.
    fn moves(&self, board: &Self::Board, side: Side) -> Vec<Self::Move>;

    /// Commits a move already known to be legal and returns the cells it touched.
    fn commit(&self, board: &mut Self::Board, side: Side, mv: Self::Move) -> Vec<usize>;

    /// Judges `board` with `to_move` about to play.
    fn outcome(&self, board: &Self::Board, to_move: Side) -> Outcome;

    /// Cells forming the winning line, empty when there is none.
    fn winning_line(&self, _board: &Self::Board) -> Vec<usize> {
        Vec::new()
    }

    /// Material captured by `mv`; zero for placement games.
    fn material_gain(&self, _board: &Self::Board, _mv: Self::Move) -> i32 {
        0
    }
}

/// Complete state of one game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState<R: Rules> {
    board: R::Board,
    to_move: Side,
    starting_side: Side,
    outcome: Outcome,
    touched: Vec<usize>,
    history: Vec<R::Move>,
}

impl<R: Rules> GameState<R> {
    /// Creates a fresh game on the variant's initial board.
    #[instrument(skip(rules), fields(variant = %rules.kind()))]
    pub fn new(rules: &R, starting_side: Side) -> Self {
        Self {
            board: rules.initial_board(),
            to_move: starting_side,
            starting_side,
            outcome: Outcome::Undecided,
            touched: Vec::new(),
            history: Vec::new(),
        }
    }

    /// Creates a state from an arbitrary board, judging it immediately.
    ///
    /// Useful for puzzles and tests that start mid-game.
    #[instrument(skip(rules, board), fields(variant = %rules.kind()))]
    pub fn from_board(rules: &R, board: R::Board, to_move: Side) -> Self {
        let outcome = rules.outcome(&board, to_move);
        Self {
            board,
            to_move,
            starting_side: to_move,
            outcome,
            touched: Vec::new(),
            history: Vec::new(),
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &R::Board {
        &self.board
    }

    /// Returns the side to move.
    pub fn to_move(&self) -> Side {
        self.to_move
    }

    /// Returns the side that moved first.
    pub fn starting_side(&self) -> Side {
        self.starting_side
    }

    /// Returns the recorded outcome.
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Returns true once the game is decided.
    pub fn is_terminal(&self) -> bool {
        self.outcome.is_terminal()
    }

    /// Cells the last move touched.
    pub fn touched(&self) -> &[usize] {
        &self.touched
    }

    /// Moves played so far.
    pub fn history(&self) -> &[R::Move] {
        &self.history
    }
}

/// Legal moves for the side to move; empty once the game is decided.
pub fn legal_moves<R: Rules>(rules: &R, state: &GameState<R>) -> Vec<R::Move> {
    if state.is_terminal() {
        return Vec::new();
    }
    rules.moves(&state.board, state.to_move)
}

/// Applies a move and returns the resulting state.
///
/// # Errors
///
/// - [`EngineError::InvalidState`] if the game is already decided.
/// - [`EngineError::IllegalMove`] if `mv` is not among [`legal_moves`].
#[instrument(skip(rules, state), fields(variant = %rules.kind(), mv = %mv, side = %state.to_move))]
pub fn apply_move<R: Rules>(
    rules: &R,
    state: &GameState<R>,
    mv: R::Move,
) -> Result<GameState<R>, EngineError> {
    if state.is_terminal() {
        return Err(EngineError::InvalidState {
            action: "apply a move",
            phase: Phase::Terminal,
        });
    }

    if !rules.moves(&state.board, state.to_move).contains(&mv) {
        debug!("Move rejected by rules");
        return Err(EngineError::illegal(mv));
    }

    let mut next = state.clone();
    next.touched = rules.commit(&mut next.board, state.to_move, mv);
    next.history.push(mv);
    next.to_move = state.to_move.opponent();
    next.outcome = rules.outcome(&next.board, next.to_move);

    debug!(outcome = %next.outcome, "Move applied");
    Ok(next)
}

/// Judges the state afresh. Calling it repeatedly always gives the same answer.
pub fn evaluate_terminal<R: Rules>(rules: &R, state: &GameState<R>) -> Outcome {
    rules.outcome(&state.board, state.to_move)
}
