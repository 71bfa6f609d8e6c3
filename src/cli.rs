//! Command-line interface for arcade_engine.

use arcade_engine::{Side, VariantKind};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Arcade Engine - board games against the computer, plus a few solo puzzles
#[derive(Parser, Debug)]
#[command(name = "arcade_engine")]
#[command(about = "Play tic-tac-toe, connect-four and chess in the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file (falls back to $ARCADE_CONFIG)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Base seed for every random choice
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Which side the human takes.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SideArg {
    /// Moves first: X, Red or White
    A,
    /// Moves second: O, Yellow or Black
    B,
}

impl From<SideArg> for Side {
    fn from(side: SideArg) -> Self {
        match side {
            SideArg::A => Side::A,
            SideArg::B => Side::B,
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a board game against the computer or a friend
    Play {
        /// Variant: tic-tac-toe, connect-four or chess
        #[arg(short, long, default_value = "tic-tac-toe")]
        game: VariantKind,

        /// Side the human plays (defaults to the config's human_side)
        #[arg(short, long, value_enum)]
        side: Option<SideArg>,

        /// Two humans take turns at the same keyboard
        #[arg(long)]
        hot_seat: bool,
    },

    /// Let the computer play itself and report the tally
    Selfplay {
        /// Variant: tic-tac-toe, connect-four or chess
        #[arg(short, long, default_value = "tic-tac-toe")]
        game: VariantKind,

        /// Number of games to play
        #[arg(long, default_value_t = 10)]
        games: u32,

        /// Stop a game after this many moves
        #[arg(long, default_value_t = 200)]
        max_plies: usize,
    },

    /// Memory matrix: find the pairs
    Memory,

    /// The classic sudoku puzzle
    Sudoku,
}
