//! Property tests for the rules contract over reachable states.

use arcade_engine::chess::Chess;
use arcade_engine::connect_four::{COLUMNS, ConnectFour, ROWS};
use arcade_engine::tictactoe::TicTacToe;
use arcade_engine::{
    Cell, EngineError, GameState, Outcome, Rules, Side, apply_move, evaluate_terminal, legal_moves,
};
use proptest::prelude::*;

/// Plays the moves picked by `choices` and checks the contract at every step.
fn walk<R: Rules>(rules: &R, choices: &[usize]) -> GameState<R> {
    let mut state = GameState::new(rules, Side::A);
    for &choice in choices {
        assert_eq!(evaluate_terminal(rules, &state), state.outcome());
        assert_eq!(evaluate_terminal(rules, &state), evaluate_terminal(rules, &state));

        let legal = legal_moves(rules, &state);
        if legal.is_empty() {
            assert!(state.is_terminal(), "no moves but undecided");
            break;
        }
        assert!(!state.is_terminal());

        let before = state.clone();
        let mv = legal[choice % legal.len()];
        let next = apply_move(rules, &state, mv).expect("legal move applies");
        assert_eq!(state, before, "apply_move changed its input");
        assert_eq!(next.to_move(), state.to_move().opponent());
        assert_eq!(next.history().len(), state.history().len() + 1);
        state = next;
    }
    state
}

proptest! {
    #[test]
    fn prop_tictactoe_walks(choices in prop::collection::vec(any::<usize>(), 0..12)) {
        let state = walk(&TicTacToe, &choices);
        let legal = legal_moves(&TicTacToe, &state);
        for cell in 0..12 {
            let result = apply_move(&TicTacToe, &state, cell);
            if legal.contains(&cell) {
                prop_assert!(result.is_ok());
            } else if state.is_terminal() {
                prop_assert!(
                    matches!(result, Err(EngineError::InvalidState { .. })),
                    "expected invalid state error for terminal game"
                );
            } else {
                prop_assert_eq!(result, Err(EngineError::IllegalMove(cell.to_string())));
            }
        }
    }

    #[test]
    fn prop_connect_four_gravity(choices in prop::collection::vec(any::<usize>(), 0..50)) {
        let state = walk(&ConnectFour, &choices);
        let board = state.board();
        // No disc floats above an empty cell.
        for row in 0..ROWS - 1 {
            for col in 0..COLUMNS {
                let here = board.at(row, col).expect("on board");
                let below = board.at(row + 1, col).expect("on board");
                prop_assert!(here.is_empty() || !below.is_empty());
            }
        }
        // The touched cell is where the last disc landed.
        if let Some(&cell) = state.touched().first() {
            prop_assert!(board.get(cell).is_some_and(|c| !c.is_empty()));
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn prop_chess_walks(choices in prop::collection::vec(any::<usize>(), 0..40)) {
        let chess = Chess::default();
        let state = walk(&chess, &choices);
        if !state.is_terminal() {
            prop_assert!(Chess::king_square(state.board(), Side::A).is_some());
            prop_assert!(Chess::king_square(state.board(), Side::B).is_some());
        }
    }
}

#[test]
fn test_full_column_is_illegal() {
    let mut state = GameState::new(&ConnectFour, Side::A);
    for _ in 0..ROWS {
        state = apply_move(&ConnectFour, &state, 2).expect("column has room");
    }
    assert!(!legal_moves(&ConnectFour, &state).contains(&2));
    assert_eq!(
        apply_move(&ConnectFour, &state, 2),
        Err(EngineError::IllegalMove("2".to_string()))
    );
}

#[test]
fn test_discs_stack_from_bottom() {
    let state = GameState::new(&ConnectFour, Side::A);
    let state = apply_move(&ConnectFour, &state, 4).expect("legal");
    let state = apply_move(&ConnectFour, &state, 4).expect("legal");
    assert_eq!(state.board().at(ROWS - 1, 4), Some(Cell::Occupied(Side::A)));
    assert_eq!(state.board().at(ROWS - 2, 4), Some(Cell::Occupied(Side::B)));
    assert_eq!(state.board().at(ROWS - 3, 4), Some(Cell::Empty));
}

#[test]
fn test_connect_four_horizontal_win() {
    let mut state = GameState::new(&ConnectFour, Side::A);
    for column in [0, 0, 1, 1, 2, 2, 3] {
        state = apply_move(&ConnectFour, &state, column).expect("legal");
    }
    assert_eq!(state.outcome(), Outcome::Win(Side::A));
    assert!(legal_moves(&ConnectFour, &state).is_empty());
}
