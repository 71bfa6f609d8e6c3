//! Running tally of finished games.

use crate::games::{Outcome, Side};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Wins per side and draws across every game a session has finished.
///
/// Kept across [`Session::reset`](super::Session::reset).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct Scoreboard {
    /// Games won by side A.
    a_wins: u32,
    /// Games won by side B.
    b_wins: u32,
    /// Drawn games.
    draws: u32,
}

impl Scoreboard {
    /// Records a finished game. Undecided outcomes are ignored.
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Win(Side::A) => self.a_wins += 1,
            Outcome::Win(Side::B) => self.b_wins += 1,
            Outcome::Draw => self.draws += 1,
            Outcome::Undecided => return,
        }
        debug!(a = self.a_wins, b = self.b_wins, draws = self.draws, "Scoreboard updated");
    }

    /// Wins for one side.
    pub fn wins(&self, side: Side) -> u32 {
        match side {
            Side::A => self.a_wins,
            Side::B => self.b_wins,
        }
    }

    /// Total finished games.
    pub fn games(&self) -> u32 {
        self.a_wins + self.b_wins + self.draws
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record() {
        let mut board = Scoreboard::default();
        board.record(Outcome::Win(Side::B));
        board.record(Outcome::Draw);
        board.record(Outcome::Undecided);
        assert_eq!(board.wins(Side::B), 1);
        assert_eq!(*board.draws(), 1);
        assert_eq!(board.games(), 2);
    }
}
