//! Registry of live sessions keyed by id.

use super::{AnyMove, AnyMoveReport, AnySession, AnySnapshot, Opponent};
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::games::{Side, VariantKind};
use crate::rng::GameRng;
use std::collections::HashMap;
use tracing::{debug, info, instrument, warn};

/// Unique identifier for a game session.
pub type SessionId = String;

/// Owns every session and routes calls to them by id.
#[derive(Debug)]
pub struct SessionManager {
    sessions: HashMap<SessionId, AnySession>,
    config: EngineConfig,
    rng: GameRng,
    next_id: u64,
}

impl SessionManager {
    /// Creates a manager whose sessions follow `config`.
    #[instrument(skip(config), fields(seed = config.seed()))]
    pub fn new(config: EngineConfig) -> Self {
        info!("Creating session manager");
        let rng = GameRng::new(*config.seed());
        Self {
            sessions: HashMap::new(),
            config,
            rng,
            next_id: 0,
        }
    }

    /// Configuration new sessions are created with.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Creates a session and returns its id.
    #[instrument(skip(self))]
    pub fn create_session(&mut self, variant: VariantKind, human_side: Side) -> SessionId {
        self.next_id += 1;
        let id = format!("{}-{}", variant, self.next_id);

        let opponent = if *self.config.hot_seat() {
            Opponent::Human
        } else {
            Opponent::Computer(self.config.strategy_for(variant))
        };
        let seed = self.rng.fork().seed();
        let session = AnySession::new(
            variant,
            human_side,
            opponent,
            seed,
            self.config.sliding_occlusion(),
        );
        self.sessions.insert(id.clone(), session);

        info!(session_id = %id, ?opponent, "Created new session");
        id
    }

    /// Submits a human move to a session.
    ///
    /// # Errors
    ///
    /// [`EngineError::UnknownSession`] for an unknown id, otherwise whatever
    /// [`AnySession::submit_human_move`] returns.
    #[instrument(skip(self))]
    pub fn submit_human_move(&mut self, id: &str, mv: AnyMove) -> Result<AnyMoveReport, EngineError> {
        let report = self.session_mut(id)?.submit_human_move(mv).inspect_err(|e| {
            warn!(session_id = id, error = %e, "Move rejected");
        })?;
        debug!(session_id = id, outcome = ?report.outcome, "Move accepted");
        Ok(report)
    }

    /// Starts a new game in a session.
    ///
    /// # Errors
    ///
    /// [`EngineError::UnknownSession`] for an unknown id.
    #[instrument(skip(self))]
    pub fn reset(&mut self, id: &str) -> Result<AnySnapshot, EngineError> {
        Ok(self.session_mut(id)?.reset())
    }

    /// Current view of a session.
    ///
    /// # Errors
    ///
    /// [`EngineError::UnknownSession`] for an unknown id.
    pub fn snapshot(&self, id: &str) -> Result<AnySnapshot, EngineError> {
        self.session(id).map(AnySession::snapshot)
    }

    /// Borrows a session.
    ///
    /// # Errors
    ///
    /// [`EngineError::UnknownSession`] for an unknown id.
    pub fn session(&self, id: &str) -> Result<&AnySession, EngineError> {
        self.sessions.get(id).ok_or_else(|| {
            debug!(session_id = id, "Session not found");
            EngineError::UnknownSession(id.to_string())
        })
    }

    /// Mutably borrows a session.
    ///
    /// # Errors
    ///
    /// [`EngineError::UnknownSession`] for an unknown id.
    pub fn session_mut(&mut self, id: &str) -> Result<&mut AnySession, EngineError> {
        self.sessions.get_mut(id).ok_or_else(|| {
            debug!(session_id = id, "Session not found");
            EngineError::UnknownSession(id.to_string())
        })
    }

    /// Drops a session. Returns false if there was none.
    #[instrument(skip(self))]
    pub fn close(&mut self, id: &str) -> bool {
        self.sessions.remove(id).is_some()
    }

    /// All session ids, sorted.
    pub fn list_sessions(&self) -> Vec<SessionId> {
        let mut ids: Vec<_> = self.sessions.keys().cloned().collect();
        ids.sort();
        ids
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
