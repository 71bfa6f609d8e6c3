//! Single-player arcade games: snake, memory matrix and sudoku.
//!
//! None of these read a clock. Snake and memory expose a `tick` that a
//! [`Scheduler`](crate::scheduler::Scheduler) drives through their runners.

pub mod memory;
pub mod snake;
pub mod sudoku;

pub use memory::{MemoryGame, MemoryRunner};
pub use snake::{Direction, SnakeEvent, SnakeGame, SnakeRunner};
pub use sudoku::Sudoku;

use derive_more::Display;

/// Rejected input to an arcade game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ArcadeError {
    /// Index outside the board.
    #[display("Cell {} is off the board", _0)]
    OutOfRange(usize),

    /// Sudoku clue cells cannot be edited.
    #[display("Cell {} is a given clue", _0)]
    GivenCell(usize),

    /// Sudoku digits are 1-9, or 0 to clear.
    #[display("{} is not a sudoku digit", _0)]
    InvalidDigit(u8),

    /// The memory card is already face up.
    #[display("Card {} is already open", _0)]
    CardOpen(usize),

    /// Two mismatched memory cards must be turned back first.
    #[display("Waiting for mismatched cards to close")]
    MismatchPending,

    /// The game has ended.
    #[display("The game is over")]
    GameOver,
}

impl std::error::Error for ArcadeError {}
