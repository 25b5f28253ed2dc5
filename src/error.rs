//! Error types for the session coordinator
//!
//! Provides custom error types for session logic including move validation,
//! engine request failures, history replay, and state-consistency checks.

use thiserror::Error;

/// Errors that can occur while coordinating a session
///
/// Recovery policy per variant:
/// - [`SessionError::IllegalMove`] is recovered locally: the submission is a
///   no-op and no session state changes.
/// - [`SessionError::EngineRequest`] is absorbed by the engine client's
///   fallback path and is never surfaced as fatal.
/// - [`SessionError::IndexOutOfRange`] is surfaced to the caller.
/// - [`SessionError::InconsistentState`] indicates a programming error: the
///   session's turn tracking disagrees with the live board. It should never
///   occur while the invariants hold.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Move rejected: not legal in the current position, or submitted out of turn
    #[error("Illegal move: {message}")]
    IllegalMove { message: String },

    /// Recommendation service failure (transport, parse, or validation)
    #[error("Engine request failed: {message}")]
    EngineRequest { message: String },

    /// History replay index outside the recorded move list
    #[error("History index {index} out of range (history length {len})")]
    IndexOutOfRange { index: usize, len: usize },

    /// Session turn state disagrees with the live board state
    #[error("Inconsistent session state: {message}")]
    InconsistentState { message: String },
}

/// Result type alias for session operations
pub type SessionResult<T> = Result<T, SessionError>;
