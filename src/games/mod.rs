//! Board games: shared types, the rules contract and the three variants.

pub mod chess;
pub mod connect_four;
mod grid;
mod rules;
pub mod tictactoe;
mod types;

pub use grid::Grid;
pub use rules::{GameState, Rules, apply_move, evaluate_terminal, legal_moves};
pub use types::{Cell, Outcome, Side};

use serde::{Deserialize, Serialize};

/// Which board game a session plays.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum VariantKind {
    /// 3x3 tic-tac-toe.
    TicTacToe,
    /// 7x6 connect-four.
    ConnectFour,
    /// Simplified chess.
    Chess,
}

impl VariantKind {
    /// Display names for the two sides in this variant.
    pub fn side_label(self, side: Side) -> &'static str {
        match (self, side) {
            (VariantKind::TicTacToe, Side::A) => "X",
            (VariantKind::TicTacToe, Side::B) => "O",
            (VariantKind::ConnectFour, Side::A) => "Red",
            (VariantKind::ConnectFour, Side::B) => "Yellow",
            (VariantKind::Chess, Side::A) => "White",
            (VariantKind::Chess, Side::B) => "Black",
        }
    }
}
