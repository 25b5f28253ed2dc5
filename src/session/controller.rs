//! Session controller: turn ownership, move gating, and status transitions
//!
//! The single source of truth for whose turn it is and whether the game is
//! over. It is the only component that applies moves to the live board
//! outside of exploratory enumeration, and every mutation is immediately
//! followed by a state refresh so the session can never drift from the
//! rules engine.

use tracing::{info, warn};

use crate::ai::{EngineClient, Recommendation, RecommendationTransport};
use crate::error::{SessionError, SessionResult};
use crate::lookahead::PositionEnumerator;
use crate::replay::HistoryReplayer;
use crate::rules::BoardEngine;
use crate::session::phase::{SessionPhase, TerminalReason};
use crate::types::{Color, GameStatus, Move, Position};

/// Owner of one game session's state
///
/// Holds the live [`BoardEngine`], the append-only move history, the phase
/// state machine, and a session epoch. The epoch increments on every reset
/// so a recommendation resolved against an abandoned session is discarded
/// instead of applied.
pub struct SessionController {
    board: BoardEngine,
    player_color: Color,
    turn: Color,
    history: Vec<Move>,
    status: GameStatus,
    phase: SessionPhase,
    epoch: u64,
}

impl SessionController {
    /// Fresh session at the standard initial position
    ///
    /// The initial phase follows from who owns the side to move: with the
    /// human on White this is `AwaitingHumanMove`, with the human on Black
    /// the opponent moves first.
    pub fn new(player_color: Color) -> Self {
        let board = BoardEngine::new();
        let turn = board.side_to_move();
        let phase = if turn == player_color {
            SessionPhase::AwaitingHumanMove
        } else {
            SessionPhase::AwaitingOpponentMove
        };

        info!("[SESSION] new session, human plays {player_color}");
        SessionController {
            board,
            player_color,
            turn,
            history: Vec::new(),
            status: GameStatus::InProgress,
            phase,
            epoch: 0,
        }
    }

    /// Discard the game and start over, possibly with a new color
    ///
    /// Bumps the session epoch so any still-unresolved recommendation from
    /// the abandoned game is discarded when it eventually resolves.
    pub fn reset(&mut self, player_color: Color) {
        let epoch = self.epoch + 1;
        *self = SessionController::new(player_color);
        self.epoch = epoch;
        info!("[SESSION] reset, epoch {epoch}");
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn turn(&self) -> Color {
        self.turn
    }

    pub fn player_color(&self) -> Color {
        self.player_color
    }

    pub fn history(&self) -> &[Move] {
        &self.history
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn current_position(&self) -> Position {
        self.board.current_position()
    }

    /// Legal moves in the live position
    pub fn legal_moves(&self) -> Vec<Move> {
        self.board.legal_moves()
    }

    /// Reconstruct the position after the first `index` moves of this
    /// session's history, without touching the live board
    pub fn replay(&self, index: usize) -> SessionResult<Position> {
        HistoryReplayer::replay(&self.history, index)
    }

    /// Submit a move on the human's behalf
    ///
    /// Gated by the session phase: anything submitted outside
    /// `AwaitingHumanMove` is rejected as illegal regardless of whether the
    /// move itself would be legal on the board. On rejection nothing
    /// changes; the caller snaps the piece back and carries on.
    pub fn submit_move(&mut self, mv: Move) -> SessionResult<GameStatus> {
        if !self.phase.accepts_human_move() {
            warn!("[SESSION] rejected {mv}: not awaiting a human move");
            return Err(SessionError::IllegalMove {
                message: format!("not awaiting a human move (phase {:?})", self.phase),
            });
        }
        self.apply_and_advance(mv, "human")
    }

    /// Apply a resolved opponent move
    ///
    /// `epoch` is the session epoch captured when the recommendation
    /// request was issued; a stale epoch means the session was reset while
    /// the request was outstanding, and the resolution is discarded.
    pub fn opponent_move_resolved(&mut self, mv: Move, epoch: u64) -> SessionResult<GameStatus> {
        if epoch != self.epoch {
            info!(
                "[SESSION] discarding stale opponent move {mv} (epoch {epoch}, now {})",
                self.epoch
            );
            return Ok(self.status);
        }
        if !self.phase.accepts_opponent_move() {
            warn!("[SESSION] rejected opponent move {mv}: not awaiting the opponent");
            return Err(SessionError::IllegalMove {
                message: format!("not awaiting an opponent move (phase {:?})", self.phase),
            });
        }
        self.apply_and_advance(mv, "opponent")
    }

    /// Drive one full opponent ply through the lookahead pipeline
    ///
    /// Enumerates first-ply candidates, hands them to the engine client,
    /// and applies the resolved move. Returns `Ok(None)` without side
    /// effects when the session is not waiting on the opponent or a
    /// request is already in flight.
    pub async fn play_opponent_ply<T: RecommendationTransport>(
        &mut self,
        client: &EngineClient<T>,
    ) -> SessionResult<Option<Recommendation>> {
        if !self.phase.accepts_opponent_move() {
            return Ok(None);
        }

        let epoch = self.epoch;
        let legal = self.board.legal_moves();
        let candidates = PositionEnumerator::enumerate(&mut self.board, 1)?;

        let Some(recommendation) = client.request_move(&candidates, &legal).await else {
            return Ok(None);
        };

        self.opponent_move_resolved(recommendation.mv, epoch)?;
        Ok(Some(recommendation))
    }

    /// Shared application path for both actors
    ///
    /// Order matters: consistency check, board application (atomic on
    /// failure), history append, then turn/status/phase refresh from the
    /// board so the session state is always derived from the live position.
    fn apply_and_advance(&mut self, mv: Move, actor: &str) -> SessionResult<GameStatus> {
        self.check_sync()?;

        self.board.apply_move(&mv)?;
        self.history.push(mv);
        self.turn = self.board.side_to_move();
        self.status = self.board.status();

        info!(
            "[SESSION] {actor} played {mv} (ply {}), status {:?}",
            self.history.len(),
            self.status
        );

        let next_phase = match self.status {
            GameStatus::Checkmate => SessionPhase::Terminal(TerminalReason::Checkmate {
                // The side to move is the side that got mated
                winner: self.turn.opposite(),
            }),
            GameStatus::Draw(kind) => SessionPhase::Terminal(TerminalReason::Draw(kind)),
            GameStatus::InProgress | GameStatus::Check => {
                if self.turn == self.player_color {
                    SessionPhase::AwaitingHumanMove
                } else {
                    SessionPhase::AwaitingOpponentMove
                }
            }
        };
        self.phase.transition_to(next_phase);

        Ok(self.status)
    }

    /// Defensive invariant: session turn tracking equals board side to move
    fn check_sync(&self) -> SessionResult<()> {
        let board_turn = self.board.side_to_move();
        if board_turn != self.turn {
            return Err(SessionError::InconsistentState {
                message: format!(
                    "session thinks it is {}'s turn but the board says {board_turn}",
                    self.turn
                ),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_human_on_white_moves_first() {
        let session = SessionController::new(Color::White);
        assert_eq!(session.phase(), SessionPhase::AwaitingHumanMove);
        assert_eq!(session.turn(), Color::White);
    }

    #[test]
    fn test_human_on_black_waits_for_opponent() {
        let session = SessionController::new(Color::Black);
        assert_eq!(session.phase(), SessionPhase::AwaitingOpponentMove);
    }

    #[test]
    fn test_submit_move_advances_turn_and_history() {
        let mut session = SessionController::new(Color::White);
        let status = session.submit_move("e2e4".parse().unwrap()).unwrap();

        assert_eq!(status, GameStatus::InProgress);
        assert_eq!(session.turn(), Color::Black);
        assert_eq!(session.phase(), SessionPhase::AwaitingOpponentMove);
        assert_eq!(session.history(), &["e2e4".parse().unwrap()]);
    }

    #[test]
    fn test_submission_rejected_while_awaiting_opponent() {
        let mut session = SessionController::new(Color::White);
        session.submit_move("e2e4".parse().unwrap()).unwrap();

        // e7e5 is perfectly legal on the board, but it is not our turn
        let before = session.current_position();
        let err = session.submit_move("e7e5".parse().unwrap());
        assert!(matches!(err, Err(SessionError::IllegalMove { .. })));
        assert_eq!(session.current_position(), before);
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn test_illegal_board_move_is_a_no_op() {
        let mut session = SessionController::new(Color::White);
        let before = session.current_position();

        let err = session.submit_move("e2e5".parse().unwrap());
        assert!(matches!(err, Err(SessionError::IllegalMove { .. })));
        assert_eq!(session.current_position(), before);
        assert!(session.history().is_empty());
        assert_eq!(session.phase(), SessionPhase::AwaitingHumanMove);
    }

    #[test]
    fn test_opponent_resolution_gated_by_phase() {
        let mut session = SessionController::new(Color::White);
        let epoch = session.epoch();

        let err = session.opponent_move_resolved("e7e5".parse().unwrap(), epoch);
        assert!(matches!(err, Err(SessionError::IllegalMove { .. })));
    }

    #[test]
    fn test_stale_epoch_resolution_is_discarded() {
        let mut session = SessionController::new(Color::Black);
        let stale = session.epoch();
        session.reset(Color::Black);

        let before = session.current_position();
        let status = session
            .opponent_move_resolved("e2e4".parse().unwrap(), stale)
            .unwrap();
        assert_eq!(status, GameStatus::InProgress);
        assert_eq!(session.current_position(), before, "stale move not applied");
        assert!(session.history().is_empty());
    }

    #[test]
    fn test_fools_mate_reaches_terminal_and_rejects_further_moves() {
        let mut session = SessionController::new(Color::White);
        let epoch = session.epoch();

        session.submit_move("f2f3".parse().unwrap()).unwrap();
        session
            .opponent_move_resolved("e7e5".parse().unwrap(), epoch)
            .unwrap();
        session.submit_move("g2g4".parse().unwrap()).unwrap();
        let status = session
            .opponent_move_resolved("d8h4".parse().unwrap(), epoch)
            .unwrap();

        assert_eq!(status, GameStatus::Checkmate);
        assert_eq!(
            session.phase(),
            SessionPhase::Terminal(TerminalReason::Checkmate {
                winner: Color::Black
            })
        );

        let err = session.submit_move("a2a3".parse().unwrap());
        assert!(matches!(err, Err(SessionError::IllegalMove { .. })));
    }

    #[test]
    fn test_reset_clears_history_and_bumps_epoch() {
        let mut session = SessionController::new(Color::White);
        session.submit_move("e2e4".parse().unwrap()).unwrap();
        let old_epoch = session.epoch();

        session.reset(Color::Black);
        assert!(session.history().is_empty());
        assert_eq!(session.epoch(), old_epoch + 1);
        assert_eq!(session.phase(), SessionPhase::AwaitingOpponentMove);
        assert_eq!(session.player_color(), Color::Black);
    }

    #[test]
    fn test_check_does_not_gate_play() {
        let mut session = SessionController::new(Color::White);
        let epoch = session.epoch();

        session.submit_move("e2e3".parse().unwrap()).unwrap();
        session
            .opponent_move_resolved("f7f5".parse().unwrap(), epoch)
            .unwrap();
        let status = session.submit_move("d1h5".parse().unwrap()).unwrap();

        assert_eq!(status, GameStatus::Check);
        assert_eq!(session.phase(), SessionPhase::AwaitingOpponentMove);
        session
            .opponent_move_resolved("g7g6".parse().unwrap(), epoch)
            .unwrap();
        assert_eq!(session.status(), GameStatus::InProgress);
    }
}
