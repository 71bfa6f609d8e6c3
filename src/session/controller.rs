//! Human vs computer (or hot-seat) session state machine.

use super::{MoveReport, Scoreboard, SessionObserver, Snapshot};
use crate::error::EngineError;
use crate::games::{GameState, Outcome, Rules, Side, apply_move};
use crate::rng::GameRng;
use crate::search::{SearchResult, Strategy};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info, instrument, warn};

/// Where a session is in its turn cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Waiting for the human to submit a move.
    #[display("awaiting the human move")]
    AwaitingHumanMove,
    /// The computer is choosing its reply.
    #[display("computing the opponent move")]
    ComputingOpponentMove,
    /// The game is decided.
    #[display("the game is over")]
    Terminal,
}

/// Who sits across from the human.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Opponent {
    /// The engine, choosing moves with a strategy.
    Computer(Strategy),
    /// A second human at the same keyboard; every submission plays the side to move.
    Human,
}

/// One game between a human and an opponent, replayable with [`Session::reset`].
pub struct Session<R: Rules> {
    rules: R,
    human_side: Side,
    opponent: Opponent,
    state: GameState<R>,
    phase: Phase,
    seed: u64,
    rng: GameRng,
    scoreboard: Scoreboard,
    observers: Vec<Box<dyn SessionObserver<R>>>,
}

impl<R: Rules> fmt::Debug for Session<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("rules", &self.rules)
            .field("human_side", &self.human_side)
            .field("opponent", &self.opponent)
            .field("state", &self.state)
            .field("phase", &self.phase)
            .field("seed", &self.seed)
            .field("scoreboard", &self.scoreboard)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl<R: Rules> Session<R> {
    /// Starts a session. The human side moves first.
    #[instrument(skip(rules), fields(variant = %rules.kind()))]
    pub fn new(rules: R, human_side: Side, opponent: Opponent, seed: u64) -> Self {
        info!("Creating session");
        let state = GameState::new(&rules, human_side);
        Self {
            rules,
            human_side,
            opponent,
            state,
            phase: Phase::AwaitingHumanMove,
            seed,
            rng: GameRng::new(seed),
            scoreboard: Scoreboard::default(),
            observers: Vec::new(),
        }
    }

    /// Rules this session plays by.
    pub fn rules(&self) -> &R {
        &self.rules
    }

    /// Current game state.
    pub fn state(&self) -> &GameState<R> {
        &self.state
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Side the human plays.
    pub fn human_side(&self) -> Side {
        self.human_side
    }

    /// Who the human plays against.
    pub fn opponent(&self) -> Opponent {
        self.opponent
    }

    /// Tally of finished games.
    pub fn scoreboard(&self) -> Scoreboard {
        self.scoreboard
    }

    /// Registers an observer for all later transitions.
    pub fn observe(&mut self, observer: impl SessionObserver<R> + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Read-only view of the session.
    pub fn snapshot(&self) -> Snapshot<R> {
        Snapshot {
            board: self.state.board().clone(),
            to_move: self.state.to_move(),
            human_side: self.human_side,
            outcome: self.state.outcome(),
            phase: self.phase,
            touched: self.state.touched().to_vec(),
            winning_line: self.rules.winning_line(self.state.board()),
            last_move: self.state.history().last().copied(),
            move_count: self.state.history().len(),
            scoreboard: self.scoreboard,
        }
    }

    /// Plays the human's move and, against the computer, the reply.
    ///
    /// # Errors
    ///
    /// - [`EngineError::InvalidState`] unless the phase is [`Phase::AwaitingHumanMove`].
    /// - [`EngineError::IllegalMove`] if the move is not legal; nothing changes.
    /// - Any error from the computer's search. The human move is taken back and
    ///   the session awaits a human move again.
    #[instrument(skip(self), fields(variant = %self.rules.kind(), phase = %self.phase))]
    pub fn submit_human_move(&mut self, mv: R::Move) -> Result<MoveReport<R>, EngineError> {
        if self.phase != Phase::AwaitingHumanMove {
            warn!("Move submitted out of turn");
            return Err(EngineError::InvalidState {
                action: "submit a move",
                phase: self.phase,
            });
        }

        let before = apply_move(&self.rules, &self.state, mv)?;
        let before = std::mem::replace(&mut self.state, before);
        debug!(%mv, "Human move applied");

        let opponent = match self.opponent {
            Opponent::Computer(strategy) if !self.state.is_terminal() => {
                self.transition(Phase::ComputingOpponentMove);
                match self.play_reply(strategy) {
                    Ok(reply) => Some(reply),
                    Err(e) => {
                        warn!(error = %e, "Opponent could not reply, taking back the human move");
                        self.state = before;
                        self.transition(Phase::AwaitingHumanMove);
                        return Err(e);
                    }
                }
            }
            _ => None,
        };

        let next = if self.state.is_terminal() {
            Phase::Terminal
        } else {
            Phase::AwaitingHumanMove
        };
        self.transition(next);

        let outcome = self.state.is_terminal().then(|| self.state.outcome());
        Ok(MoveReport {
            snapshot: self.snapshot(),
            outcome,
            opponent,
        })
    }

    /// Starts a new game with the same starting side, keeping the scoreboard.
    ///
    /// Allowed from any phase.
    #[instrument(skip(self), fields(variant = %self.rules.kind(), phase = %self.phase))]
    pub fn reset(&mut self) -> Snapshot<R> {
        info!("Resetting session");
        self.state = GameState::new(&self.rules, self.human_side);
        self.transition(Phase::AwaitingHumanMove);
        self.snapshot()
    }

    fn play_reply(&mut self, strategy: Strategy) -> Result<SearchResult<R::Move>, EngineError> {
        let reply = strategy.choose(&self.rules, &self.state, &mut self.rng)?;
        self.state = apply_move(&self.rules, &self.state, reply.mv)?;
        debug!(mv = %reply.mv, score = reply.score, "Opponent move applied");
        Ok(reply)
    }

    fn transition(&mut self, phase: Phase) {
        self.phase = phase;
        let outcome = self.state.outcome();
        if phase == Phase::Terminal {
            self.scoreboard.record(outcome);
        }

        let snapshot = self.snapshot();
        for observer in &mut self.observers {
            observer.on_snapshot(&snapshot);
            if phase == Phase::Terminal {
                observer.on_terminal(outcome);
            }
        }
    }
}
