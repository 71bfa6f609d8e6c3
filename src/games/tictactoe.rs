//! Tic-tac-toe on a 3x3 grid.

use super::grid::Grid;
use super::rules::Rules;
use super::types::{Cell, Outcome, Side};
use super::VariantKind;

/// Board type for tic-tac-toe.
pub type Board = Grid<Cell>;

/// Winning combinations.
pub const LINES: [[usize; 3]; 8] = [
    [0, 1, 2], [3, 4, 5], [6, 7, 8], // Rows
    [0, 3, 6], [1, 4, 7], [2, 5, 8], // Columns
    [0, 4, 8], [2, 4, 6],            // Diagonals
];

/// Human-readable names of the nine cells.
const LABELS: [&str; 9] = [
    "Top-left",
    "Top-center",
    "Top-right",
    "Middle-left",
    "Center",
    "Middle-right",
    "Bottom-left",
    "Bottom-center",
    "Bottom-right",
];

/// Tic-tac-toe rules. Side A plays X, side B plays O.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TicTacToe;

impl TicTacToe {
    /// Returns the label for a cell index, if it is on the board.
    pub fn label(index: usize) -> Option<&'static str> {
        LABELS.get(index).copied()
    }

    /// Builds a board from nine optional marks in row-major order.
    pub fn board_from(marks: [Option<Side>; 9]) -> Board {
        let cells = marks
            .iter()
            .map(|m| m.map_or(Cell::Empty, Cell::Occupied))
            .collect();
        Grid::from_cells(3, 3, cells).unwrap_or_else(|| Grid::new(3, 3))
    }

    /// Finds the first completed line and its owner.
    pub fn winner(board: &Board) -> Option<(Side, [usize; 3])> {
        LINES.iter().find_map(|&[a, b, c]| {
            let side = board.get(a)?.side()?;
            (board.get(b)? == Cell::Occupied(side) && board.get(c)? == Cell::Occupied(side))
                .then_some((side, [a, b, c]))
        })
    }

    /// Renders the board with empty cells numbered 1-9.
    pub fn render(board: &Board) -> String {
        let mut result = String::new();
        for row in 0..3 {
            for col in 0..3 {
                let pos = row * 3 + col;
                let symbol = match board.get(pos) {
                    Some(Cell::Occupied(Side::A)) => "X".to_string(),
                    Some(Cell::Occupied(Side::B)) => "O".to_string(),
                    _ => (pos + 1).to_string(),
                };
                result.push_str(&symbol);
                if col < 2 {
                    result.push('|');
                }
            }
            if row < 2 {
                result.push_str("\n-+-+-\n");
            }
        }
        result
    }
}

impl Rules for TicTacToe {
    type Board = Board;
    type Move = usize;

    fn kind(&self) -> VariantKind {
        VariantKind::TicTacToe
    }

    fn initial_board(&self) -> Board {
        Grid::new(3, 3)
    }

    fn moves(&self, board: &Board, _side: Side) -> Vec<usize> {
        board
            .cells()
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_empty())
            .map(|(i, _)| i)
            .collect()
    }

    fn commit(&self, board: &mut Board, side: Side, mv: usize) -> Vec<usize> {
        board.set(mv, Cell::Occupied(side));
        vec![mv]
    }

    fn outcome(&self, board: &Board, _to_move: Side) -> Outcome {
        if let Some((side, _)) = Self::winner(board) {
            Outcome::Win(side)
        } else if board.is_full() {
            Outcome::Draw
        } else {
            Outcome::Undecided
        }
    }

    fn winning_line(&self, board: &Board) -> Vec<usize> {
        Self::winner(board).map(|(_, line)| line.to_vec()).unwrap_or_default()
    }
}
