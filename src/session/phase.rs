//! Session phase state machine
//!
//! Tracks who the session is waiting on. This single enum is the turn
//! gate: both the human-move and opponent-move entry points consult its
//! predicates, so there is exactly one authority for "is this actor allowed
//! to move right now".

use tracing::error;

use crate::types::{Color, DrawKind};

/// Why a session reached its terminal state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalReason {
    Checkmate { winner: Color },
    Draw(DrawKind),
}

impl TerminalReason {
    /// Message for the presentation boundary
    pub fn message(&self) -> String {
        match self {
            TerminalReason::Checkmate { winner } => format!("Checkmate! {winner} wins"),
            TerminalReason::Draw(kind) => format!("Draw by {kind}"),
        }
    }
}

/// Coarse session flow state
///
/// `Terminal` is absorbing: no transition leaves it except an explicit
/// session reset, which reinitializes the phase from scratch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Waiting for the human to submit a move
    AwaitingHumanMove,

    /// Waiting for the engine client to resolve the opponent's move
    ///
    /// Human submissions are rejected for the whole duration, including
    /// while the recommendation request is suspended on the network.
    AwaitingOpponentMove,

    /// Game over; only reset leaves this state
    Terminal(TerminalReason),
}

impl SessionPhase {
    /// Turn gate for human move submission
    pub fn accepts_human_move(self) -> bool {
        matches!(self, SessionPhase::AwaitingHumanMove)
    }

    /// Turn gate for opponent move resolution
    pub fn accepts_opponent_move(self) -> bool {
        matches!(self, SessionPhase::AwaitingOpponentMove)
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, SessionPhase::Terminal(_))
    }

    /// Transition to the next phase, validating against the state machine
    ///
    /// Invalid transitions indicate a logic error; they panic in debug
    /// builds and are logged (but allowed) in release builds to avoid
    /// taking down a running session.
    pub fn transition_to(&mut self, next: SessionPhase) {
        let valid = match (*self, next) {
            (SessionPhase::AwaitingHumanMove, SessionPhase::AwaitingOpponentMove) => true,
            (SessionPhase::AwaitingHumanMove, SessionPhase::Terminal(_)) => true,
            (SessionPhase::AwaitingOpponentMove, SessionPhase::AwaitingHumanMove) => true,
            (SessionPhase::AwaitingOpponentMove, SessionPhase::Terminal(_)) => true,
            // Terminal is absorbing; neither waiting state re-enters itself
            _ => false,
        };

        if !valid {
            error!(
                "[SESSION] invalid phase transition: {:?} -> {:?}",
                *self, next
            );
            debug_assert!(false, "invalid phase transition: {self:?} -> {next:?}");
        }

        *self = next;
    }
}
