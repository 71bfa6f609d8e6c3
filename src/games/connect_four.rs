//! Connect-four: 7 columns by 6 rows with gravity.
//!
//! Row 0 is the top of the board. A disc dropped into a column always settles
//! into the lowest empty row of that column.

use super::grid::Grid;
use super::rules::Rules;
use super::types::{Cell, Outcome, Side};
use super::VariantKind;

/// Board type for connect-four.
pub type Board = Grid<Cell>;

/// Number of columns.
pub const COLUMNS: usize = 7;
/// Number of rows.
pub const ROWS: usize = 6;
/// Discs in a row needed to win.
pub const RUN: usize = 4;

/// Connect-four rules. Side A plays Red, side B plays Yellow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConnectFour;

impl ConnectFour {
    /// Row a disc dropped into `column` would land in, or `None` if full.
    pub fn landing_row(board: &Board, column: usize) -> Option<usize> {
        if column >= board.width() {
            return None;
        }
        (0..board.height())
            .rev()
            .find(|&row| board.at(row, column).is_some_and(Cell::is_empty))
    }

    /// Renders the board, one text row per board row, `.` for empty.
    pub fn render(board: &Board) -> String {
        let mut lines: Vec<String> = (0..board.height())
            .map(|row| {
                (0..board.width())
                    .map(|col| match board.at(row, col) {
                        Some(Cell::Occupied(Side::A)) => 'R',
                        Some(Cell::Occupied(Side::B)) => 'Y',
                        _ => '.',
                    })
                    .collect()
            })
            .collect();
        lines.push((0..board.width()).map(|c| c.to_string()).collect());
        lines.join("\n")
    }
}

impl Rules for ConnectFour {
    type Board = Board;
    type Move = usize;

    fn kind(&self) -> VariantKind {
        VariantKind::ConnectFour
    }

    fn initial_board(&self) -> Board {
        Grid::new(COLUMNS, ROWS)
    }

    fn moves(&self, board: &Board, _side: Side) -> Vec<usize> {
        (0..board.width())
            .filter(|&col| board.at(0, col).is_some_and(Cell::is_empty))
            .collect()
    }

    fn commit(&self, board: &mut Board, side: Side, column: usize) -> Vec<usize> {
        match Self::landing_row(board, column) {
            Some(row) => {
                let index = board.index(row, column);
                board.set(index, Cell::Occupied(side));
                vec![index]
            }
            None => Vec::new(),
        }
    }

    fn outcome(&self, board: &Board, _to_move: Side) -> Outcome {
        if let Some((side, _)) = board.find_run(RUN) {
            Outcome::Win(side)
        } else if board.is_full() {
            Outcome::Draw
        } else {
            Outcome::Undecided
        }
    }

    fn winning_line(&self, board: &Board) -> Vec<usize> {
        board.find_run(RUN).map(|(_, run)| run).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disc_settles_at_bottom() {
        let mut board = ConnectFour.initial_board();
        let touched = ConnectFour.commit(&mut board, Side::A, 3);
        assert_eq!(touched, vec![5 * COLUMNS + 3]);
        let touched = ConnectFour.commit(&mut board, Side::B, 3);
        assert_eq!(touched, vec![4 * COLUMNS + 3]);
    }

    #[test]
    fn test_full_column_not_offered() {
        let mut board = ConnectFour.initial_board();
        for i in 0..ROWS {
            let side = if i % 2 == 0 { Side::A } else { Side::B };
            ConnectFour.commit(&mut board, side, 0);
        }
        assert_eq!(ConnectFour::landing_row(&board, 0), None);
        assert_eq!(ConnectFour.moves(&board, Side::A), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_vertical_win() {
        let mut board = ConnectFour.initial_board();
        for _ in 0..4 {
            ConnectFour.commit(&mut board, Side::B, 6);
        }
        assert_eq!(ConnectFour.outcome(&board, Side::A), Outcome::Win(Side::B));
        assert_eq!(ConnectFour.winning_line(&board).len(), 4);
    }

    #[test]
    fn test_render_marks_discs() {
        let mut board = ConnectFour.initial_board();
        ConnectFour.commit(&mut board, Side::A, 0);
        ConnectFour.commit(&mut board, Side::B, 1);
        let text = ConnectFour::render(&board);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[5], "RY.....");
        assert_eq!(lines[6], "0123456");
    }
}
