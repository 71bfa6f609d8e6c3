//! Arcade Engine library - two-player board games with a computer opponent
//!
//! One rules contract drives three board games (tic-tac-toe, connect-four
//! and a simplified chess), a search module picks the computer's moves, and
//! a session controller runs the human/computer turn cycle.
//!
//! # Architecture
//!
//! - **Games**: the [`Rules`] trait, [`GameState`] and the three variants
//! - **Search**: [`Strategy`] (minimax, greedy one-ply, random) and [`best_move`]
//! - **Session**: [`Session`] phases, observers, [`SessionManager`] and self-play
//! - **Arcade**: snake, memory matrix and sudoku, timed by a [`Scheduler`]
//!
//! # Example
//!
//! ```
//! use arcade_engine::{Opponent, Outcome, Phase, Session, Side, Strategy, tictactoe::TicTacToe};
//!
//! let mut session = Session::new(TicTacToe, Side::A, Opponent::Computer(Strategy::EXHAUSTIVE), 0);
//! let report = session.submit_human_move(4).expect("center is free");
//! assert!(report.opponent.is_some());
//! assert_eq!(session.phase(), Phase::AwaitingHumanMove);
//! assert_eq!(report.snapshot.outcome, Outcome::Undecided);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod error;
mod games;
mod rng;
mod scheduler;
mod search;
mod session;

pub mod arcade;

// Crate-level exports - Configuration
pub use config::{CONFIG_ENV, ConfigError, EngineConfig, VariantConfig};

// Crate-level exports - Errors
pub use error::EngineError;

// Crate-level exports - Board games
pub use games::{
    Cell, GameState, Grid, Outcome, Rules, Side, VariantKind, apply_move, chess, connect_four,
    evaluate_terminal, legal_moves, tictactoe,
};

// Crate-level exports - Randomness
pub use rng::GameRng;

// Crate-level exports - Timers
pub use scheduler::{ManualScheduler, Scheduler, TickCallback, TickHandle, TokioScheduler};

// Crate-level exports - Search
pub use search::{SearchResult, Strategy, best_move, minimax::WIN_SCORE};

// Crate-level exports - Sessions
pub use session::{
    AnyMove, AnyMoveReport, AnySession, AnySnapshot, MoveReport, Opponent, Phase, PlayedGame,
    Scoreboard, Session, SessionId, SessionManager, SessionObserver, Snapshot, TracingObserver,
    play_out,
};
