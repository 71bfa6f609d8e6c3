//! Classic 9x9 sudoku with a fixed puzzle.

use super::ArcadeError;
use tracing::{debug, info, instrument};

/// Clues, row-major, `0` for blank.
pub const PUZZLE: &str =
    "530070000600195000098000060800060003400803001700020006060000280000419005000080079";
/// The unique solution of [`PUZZLE`].
pub const SOLVED: &str =
    "534678912672195348198342567859761423426853791713924856961537284287419635345286179";

const SIZE: usize = 9;
const CELLS: usize = SIZE * SIZE;

fn digits(text: &str) -> [u8; CELLS] {
    let mut out = [0; CELLS];
    for (slot, b) in out.iter_mut().zip(text.bytes()) {
        *slot = b.saturating_sub(b'0');
    }
    out
}

/// Sudoku board with the clues locked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sudoku {
    grid: [u8; CELLS],
    given: [bool; CELLS],
    solution: [u8; CELLS],
}

impl Default for Sudoku {
    fn default() -> Self {
        Self::new()
    }
}

impl Sudoku {
    /// The built-in puzzle.
    pub fn new() -> Self {
        let grid = digits(PUZZLE);
        Self {
            grid,
            given: grid.map(|d| d != 0),
            solution: digits(SOLVED),
        }
    }

    /// Digit at a cell, `0` when blank.
    pub fn get(&self, cell: usize) -> Option<u8> {
        self.grid.get(cell).copied()
    }

    /// True if the cell is a clue.
    pub fn is_given(&self, cell: usize) -> bool {
        self.given.get(cell).copied().unwrap_or(false)
    }

    /// Writes a digit into a blank cell; `0` clears it.
    ///
    /// # Errors
    ///
    /// Fails for cells off the board, clue cells, and digits above 9.
    #[instrument(skip(self))]
    pub fn input(&mut self, cell: usize, digit: u8) -> Result<bool, ArcadeError> {
        if cell >= CELLS {
            return Err(ArcadeError::OutOfRange(cell));
        }
        if self.given[cell] {
            return Err(ArcadeError::GivenCell(cell));
        }
        if digit > 9 {
            return Err(ArcadeError::InvalidDigit(digit));
        }
        self.grid[cell] = digit;
        debug!(conflicts = self.conflicts(cell).len(), "Digit entered");

        let solved = self.is_solved();
        if solved {
            info!("Sudoku solved");
        }
        Ok(solved)
    }

    /// Other cells in the same row, column or box holding the same digit.
    pub fn conflicts(&self, cell: usize) -> Vec<usize> {
        let Some(digit) = self.get(cell).filter(|&d| d != 0) else {
            return Vec::new();
        };
        let (row, col) = (cell / SIZE, cell % SIZE);
        let (box_row, box_col) = (row / 3 * 3, col / 3 * 3);
        (0..CELLS)
            .filter(|&other| other != cell && self.grid[other] == digit)
            .filter(|&other| {
                let (r, c) = (other / SIZE, other % SIZE);
                r == row || c == col || (r / 3 * 3 == box_row && c / 3 * 3 == box_col)
            })
            .collect()
    }

    /// True when the grid equals the solution.
    pub fn is_solved(&self) -> bool {
        self.grid == self.solution
    }

    /// Renders nine lines of digits, `.` for blank.
    pub fn render(&self) -> String {
        self.grid
            .chunks(SIZE)
            .map(|row| {
                row.iter()
                    .map(|&d| if d == 0 { '.' } else { char::from(b'0' + d) })
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clues_locked() {
        let mut sudoku = Sudoku::new();
        assert!(sudoku.is_given(0));
        assert_eq!(sudoku.input(0, 1), Err(ArcadeError::GivenCell(0)));
        assert_eq!(sudoku.input(2, 10), Err(ArcadeError::InvalidDigit(10)));
        assert_eq!(sudoku.input(81, 1), Err(ArcadeError::OutOfRange(81)));
    }

    #[test]
    fn test_conflicts() {
        let mut sudoku = Sudoku::new();
        // Row 0 already has a 5 at cell 0 and a 7 at cell 4.
        sudoku.input(2, 5).expect("blank cell");
        assert_eq!(sudoku.conflicts(2), vec![0]);
        sudoku.input(2, 4).expect("blank cell");
        assert!(sudoku.conflicts(2).is_empty());
        sudoku.input(2, 0).expect("clear");
        assert_eq!(sudoku.get(2), Some(0));
    }

    #[test]
    fn test_solving() {
        let mut sudoku = Sudoku::new();
        let solution = digits(SOLVED);
        let blanks: Vec<usize> = (0..CELLS).filter(|&c| !sudoku.is_given(c)).collect();
        let (last, rest) = blanks.split_last().expect("puzzle has blanks");
        for &cell in rest {
            assert_eq!(sudoku.input(cell, solution[cell]), Ok(false));
        }
        assert_eq!(sudoku.input(*last, solution[*last]), Ok(true));
        assert!(sudoku.is_solved());
    }
}
