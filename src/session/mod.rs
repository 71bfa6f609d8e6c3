//! Game sessions: the turn state machine, variant wrappers and the registry.

mod controller;
mod manager;
mod observer;
mod scoreboard;
mod selfplay;
mod snapshot;
mod wrapper;

pub use controller::{Opponent, Phase, Session};
pub use manager::{SessionId, SessionManager};
pub use observer::{SessionObserver, TracingObserver};
pub use scoreboard::Scoreboard;
pub use selfplay::{PlayedGame, play_out};
pub use snapshot::{MoveReport, Snapshot};
pub use wrapper::{AnyMove, AnyMoveReport, AnySession, AnySnapshot};
