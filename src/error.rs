//! Engine error types.

use crate::session::Phase;
use derive_more::Display;

/// Error that can occur when validating or applying a move.
///
/// None of these are fatal: the state that produced the error is left
/// untouched and the caller may simply try again.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum EngineError {
    /// The move is not in the legal move list for the current state.
    #[display("Illegal move: {}", _0)]
    IllegalMove(String),

    /// The operation is not allowed in the current phase.
    #[display("Cannot {} while {}", action, phase)]
    InvalidState {
        /// What the caller attempted.
        action: &'static str,
        /// Phase the session or game was in.
        phase: Phase,
    },

    /// Search was asked to move in a position with no legal moves.
    #[display("No legal moves available")]
    NoLegalMoves,

    /// No session is registered under this id.
    #[display("Unknown session: {}", _0)]
    UnknownSession(String),

    /// A move for one variant was submitted to a session of another.
    #[display("Move {} does not belong to a {} session", mv, variant)]
    MoveMismatch {
        /// The submitted move, rendered.
        mv: String,
        /// Variant of the target session.
        variant: crate::games::VariantKind,
    },
}

impl std::error::Error for EngineError {}

impl EngineError {
    /// Shorthand for an illegal-move error from anything displayable.
    pub fn illegal(mv: impl std::fmt::Display) -> Self {
        Self::IllegalMove(mv.to_string())
    }
}
