//! Variant-erased sessions, moves and snapshots.
//!
//! [`Session`] is generic over its rules, so these enums let one collection
//! and one front-end handle every variant.

use super::{MoveReport, Opponent, Phase, Scoreboard, Session, Snapshot};
use crate::error::EngineError;
use crate::games::chess::{Chess, ChessMove};
use crate::games::connect_four::ConnectFour;
use crate::games::tictactoe::TicTacToe;
use crate::games::{Outcome, Side, VariantKind};
use crate::search::SearchResult;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A move for any variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(tag = "variant", content = "mv", rename_all = "kebab-case")]
pub enum AnyMove {
    /// Cell index 0-8.
    #[display("{}", _0)]
    TicTacToe(usize),
    /// Column index 0-6.
    #[display("{}", _0)]
    ConnectFour(usize),
    /// Square to square.
    #[display("{}", _0)]
    Chess(ChessMove),
}

impl AnyMove {
    /// Parses player input for a variant.
    ///
    /// Tic-tac-toe takes the numbers 1-9 shown on the rendered board,
    /// connect-four a column 0-6, chess coordinates such as `e2e4`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::IllegalMove`] if the text is not a move shape
    /// for that variant.
    pub fn parse(variant: VariantKind, input: &str) -> Result<Self, EngineError> {
        let input = input.trim();
        match variant {
            VariantKind::TicTacToe => input
                .parse::<usize>()
                .ok()
                .filter(|n| (1..=9).contains(n))
                .map(|n| AnyMove::TicTacToe(n - 1))
                .ok_or_else(|| EngineError::illegal(input)),
            VariantKind::ConnectFour => input
                .parse::<usize>()
                .map(AnyMove::ConnectFour)
                .map_err(|_| EngineError::illegal(input)),
            VariantKind::Chess => input
                .parse::<ChessMove>()
                .map(AnyMove::Chess)
                .map_err(|_| EngineError::illegal(input)),
        }
    }

    /// Variant this move belongs to.
    pub fn variant(&self) -> VariantKind {
        match self {
            AnyMove::TicTacToe(_) => VariantKind::TicTacToe,
            AnyMove::ConnectFour(_) => VariantKind::ConnectFour,
            AnyMove::Chess(_) => VariantKind::Chess,
        }
    }
}

/// Snapshot of a session of any variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "variant", rename_all = "kebab-case")]
pub enum AnySnapshot {
    /// Tic-tac-toe snapshot.
    TicTacToe(Snapshot<TicTacToe>),
    /// Connect-four snapshot.
    ConnectFour(Snapshot<ConnectFour>),
    /// Chess snapshot.
    Chess(Snapshot<Chess>),
}

macro_rules! with_snapshot {
    ($value:expr, $s:ident => $body:expr) => {
        match $value {
            AnySnapshot::TicTacToe($s) => $body,
            AnySnapshot::ConnectFour($s) => $body,
            AnySnapshot::Chess($s) => $body,
        }
    };
}

impl AnySnapshot {
    /// Variant of the snapshotted session.
    pub fn variant(&self) -> VariantKind {
        match self {
            AnySnapshot::TicTacToe(_) => VariantKind::TicTacToe,
            AnySnapshot::ConnectFour(_) => VariantKind::ConnectFour,
            AnySnapshot::Chess(_) => VariantKind::Chess,
        }
    }

    /// Current outcome.
    pub fn outcome(&self) -> Outcome {
        with_snapshot!(self, s => s.outcome)
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        with_snapshot!(self, s => s.phase)
    }

    /// Side to move.
    pub fn to_move(&self) -> Side {
        with_snapshot!(self, s => s.to_move)
    }

    /// Moves played in the current game.
    pub fn move_count(&self) -> usize {
        with_snapshot!(self, s => s.move_count)
    }

    /// Tally across games.
    pub fn scoreboard(&self) -> Scoreboard {
        with_snapshot!(self, s => s.scoreboard)
    }

    /// Cells of the winning line, if any.
    pub fn winning_line(&self) -> &[usize] {
        with_snapshot!(self, s => &s.winning_line)
    }

    /// Pretty-printed JSON export, tagged with the variant name.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Text rendering of the board.
    pub fn render(&self) -> String {
        match self {
            AnySnapshot::TicTacToe(s) => TicTacToe::render(&s.board),
            AnySnapshot::ConnectFour(s) => ConnectFour::render(&s.board),
            AnySnapshot::Chess(s) => Chess::render(&s.board),
        }
    }
}

/// Outcome of submitting an [`AnyMove`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnyMoveReport {
    /// Session after the submission.
    pub snapshot: AnySnapshot,
    /// Final outcome if the game ended.
    pub outcome: Option<Outcome>,
    /// Computer reply, if one was played.
    pub opponent: Option<SearchResult<AnyMove>>,
}

impl AnyMoveReport {
    fn from_report<R: crate::games::Rules>(
        report: MoveReport<R>,
        wrap_snapshot: fn(Snapshot<R>) -> AnySnapshot,
        wrap_move: fn(R::Move) -> AnyMove,
    ) -> Self {
        Self {
            snapshot: wrap_snapshot(report.snapshot),
            outcome: report.outcome,
            opponent: report
                .opponent
                .map(|r| SearchResult::new(wrap_move(r.mv), r.score)),
        }
    }
}

/// A session of any variant.
#[derive(Debug)]
pub enum AnySession {
    /// Tic-tac-toe session.
    TicTacToe(Session<TicTacToe>),
    /// Connect-four session.
    ConnectFour(Session<ConnectFour>),
    /// Chess session.
    Chess(Session<Chess>),
}

macro_rules! with_session {
    ($value:expr, $s:ident => $body:expr) => {
        match $value {
            AnySession::TicTacToe($s) => $body,
            AnySession::ConnectFour($s) => $body,
            AnySession::Chess($s) => $body,
        }
    };
}

impl AnySession {
    /// Starts a session for `variant`.
    ///
    /// `sliding_occlusion` only affects chess.
    #[instrument]
    pub fn new(
        variant: VariantKind,
        human_side: Side,
        opponent: Opponent,
        seed: u64,
        sliding_occlusion: bool,
    ) -> Self {
        match variant {
            VariantKind::TicTacToe => {
                AnySession::TicTacToe(Session::new(TicTacToe, human_side, opponent, seed))
            }
            VariantKind::ConnectFour => {
                AnySession::ConnectFour(Session::new(ConnectFour, human_side, opponent, seed))
            }
            VariantKind::Chess => AnySession::Chess(Session::new(
                Chess::new(sliding_occlusion),
                human_side,
                opponent,
                seed,
            )),
        }
    }

    /// Variant being played.
    pub fn variant(&self) -> VariantKind {
        match self {
            AnySession::TicTacToe(_) => VariantKind::TicTacToe,
            AnySession::ConnectFour(_) => VariantKind::ConnectFour,
            AnySession::Chess(_) => VariantKind::Chess,
        }
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        with_session!(self, s => s.phase())
    }

    /// Tally of finished games.
    pub fn scoreboard(&self) -> Scoreboard {
        with_session!(self, s => s.scoreboard())
    }

    /// Read-only view of the session.
    pub fn snapshot(&self) -> AnySnapshot {
        match self {
            AnySession::TicTacToe(s) => AnySnapshot::TicTacToe(s.snapshot()),
            AnySession::ConnectFour(s) => AnySnapshot::ConnectFour(s.snapshot()),
            AnySession::Chess(s) => AnySnapshot::Chess(s.snapshot()),
        }
    }

    /// Submits a move, which must belong to this session's variant.
    ///
    /// # Errors
    ///
    /// [`EngineError::MoveMismatch`] for a move of another variant, otherwise
    /// whatever [`Session::submit_human_move`] returns.
    pub fn submit_human_move(&mut self, mv: AnyMove) -> Result<AnyMoveReport, EngineError> {
        match (self, mv) {
            (AnySession::TicTacToe(s), AnyMove::TicTacToe(cell)) => Ok(AnyMoveReport::from_report(
                s.submit_human_move(cell)?,
                AnySnapshot::TicTacToe,
                AnyMove::TicTacToe,
            )),
            (AnySession::ConnectFour(s), AnyMove::ConnectFour(col)) => {
                Ok(AnyMoveReport::from_report(
                    s.submit_human_move(col)?,
                    AnySnapshot::ConnectFour,
                    AnyMove::ConnectFour,
                ))
            }
            (AnySession::Chess(s), AnyMove::Chess(m)) => Ok(AnyMoveReport::from_report(
                s.submit_human_move(m)?,
                AnySnapshot::Chess,
                AnyMove::Chess,
            )),
            (session, mv) => Err(EngineError::MoveMismatch {
                mv: mv.to_string(),
                variant: session.variant(),
            }),
        }
    }

    /// Starts a new game, keeping the scoreboard.
    pub fn reset(&mut self) -> AnySnapshot {
        match self {
            AnySession::TicTacToe(s) => AnySnapshot::TicTacToe(s.reset()),
            AnySession::ConnectFour(s) => AnySnapshot::ConnectFour(s.reset()),
            AnySession::Chess(s) => AnySnapshot::Chess(s.reset()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::Strategy;

    #[test]
    fn test_parse_moves() {
        assert_eq!(
            AnyMove::parse(VariantKind::TicTacToe, "5"),
            Ok(AnyMove::TicTacToe(4))
        );
        assert!(AnyMove::parse(VariantKind::TicTacToe, "0").is_err());
        assert_eq!(
            AnyMove::parse(VariantKind::ConnectFour, " 3 "),
            Ok(AnyMove::ConnectFour(3))
        );
        assert_eq!(
            AnyMove::parse(VariantKind::Chess, "e2e4"),
            Ok(AnyMove::Chess(ChessMove::new(52, 36)))
        );
        assert!(AnyMove::parse(VariantKind::Chess, "e2").is_err());
    }

    #[test]
    fn test_mismatched_move_rejected() {
        let mut session = AnySession::new(
            VariantKind::ConnectFour,
            Side::A,
            Opponent::Computer(Strategy::GreedyOnePly),
            3,
            false,
        );
        let err = session.submit_human_move(AnyMove::TicTacToe(0));
        assert_eq!(
            err,
            Err(EngineError::MoveMismatch {
                mv: "0".to_string(),
                variant: VariantKind::ConnectFour,
            })
        );
        assert_eq!(session.snapshot().move_count(), 0);
    }

    #[test]
    fn test_snapshot_json_is_tagged() {
        let session = AnySession::new(VariantKind::TicTacToe, Side::A, Opponent::Human, 0, false);
        let json = serde_json::to_value(session.snapshot()).expect("serializes");
        assert_eq!(json["variant"], "tic-tac-toe");
        assert_eq!(json["phase"], "awaiting_human_move");
        assert_eq!(json["board"]["cells"].as_array().map(Vec::len), Some(9));
    }

    #[test]
    fn test_snapshot_export_reads_back() {
        let mut session = AnySession::new(VariantKind::ConnectFour, Side::A, Opponent::Human, 0, false);
        session
            .submit_human_move(AnyMove::ConnectFour(3))
            .expect("legal drop");
        let text = session.snapshot().to_json().expect("exports");
        let json: serde_json::Value = serde_json::from_str(&text).expect("valid json");
        assert_eq!(json["variant"], "connect-four");
        assert_eq!(json["move_count"], 1);
        assert_eq!(json["to_move"], "B");
        assert_eq!(json["last_move"], 3);
    }
}
