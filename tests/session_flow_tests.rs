//! Session Flow Integration Tests
//!
//! Tests for full session flows including:
//! - Turn gating and alternation
//! - Status transitions through terminal states
//! - Lookahead enumeration invariants against the live session
//! - History replay against sequential application

use chess_session::types::{Color, GameStatus};
use chess_session::{
    BoardEngine, HistoryReplayer, PositionEnumerator, SessionController, SessionError,
    SessionPhase,
};

// ============================================================================
// Turn Gating
// ============================================================================

#[test]
fn test_opening_move_hands_turn_to_black() {
    let mut session = SessionController::new(Color::White);

    let status = session.submit_move("e2e4".parse().unwrap()).unwrap();
    assert_eq!(status, GameStatus::InProgress);
    assert_eq!(session.view(None).status_line, "Black to move");
    assert_eq!(session.history().len(), 1);
    assert_eq!(session.history()[0].uci(), "e2e4");
}

#[test]
fn test_moves_rejected_while_opponent_to_move() {
    let mut session = SessionController::new(Color::White);
    session.submit_move("e2e4".parse().unwrap()).unwrap();
    assert_eq!(session.phase(), SessionPhase::AwaitingOpponentMove);

    // Legal on the board, but the gate must reject it regardless
    for mv in ["e7e5", "b8c6", "g8f6"] {
        let err = session.submit_move(mv.parse().unwrap());
        assert!(
            matches!(err, Err(SessionError::IllegalMove { .. })),
            "{mv} should be rejected while awaiting the opponent"
        );
    }
    assert_eq!(session.history().len(), 1);
}

#[test]
fn test_terminal_session_rejects_everything_until_reset() {
    let mut session = SessionController::new(Color::White);
    let epoch = session.epoch();

    session.submit_move("f2f3".parse().unwrap()).unwrap();
    session
        .opponent_move_resolved("e7e5".parse().unwrap(), epoch)
        .unwrap();
    session.submit_move("g2g4".parse().unwrap()).unwrap();
    session
        .opponent_move_resolved("d8h4".parse().unwrap(), epoch)
        .unwrap();

    assert!(session.phase().is_terminal());
    assert!(session.submit_move("a2a3".parse().unwrap()).is_err());
    assert!(session
        .opponent_move_resolved("a7a6".parse().unwrap(), epoch)
        .is_err());

    session.reset(Color::White);
    assert_eq!(session.phase(), SessionPhase::AwaitingHumanMove);
    assert!(session.submit_move("e2e4".parse().unwrap()).is_ok());
}

// ============================================================================
// Lookahead Against a Live Session
// ============================================================================

#[test]
fn test_enumeration_never_disturbs_the_session_board() {
    let mut board = BoardEngine::new();
    for mv in ["e2e4", "c7c5", "g1f3"] {
        board.apply_move(&mv.parse().unwrap()).unwrap();
    }
    let before = board.current_position();

    for depth in [0, 1, 2, 3] {
        let candidates = PositionEnumerator::enumerate(&mut board, depth).unwrap();
        assert!(!candidates.is_empty());
        assert_eq!(
            board.current_position(),
            before,
            "depth {depth} enumeration must be net-zero"
        );
    }
}

#[test]
fn test_depth_one_candidates_cover_the_legal_move_set() {
    let mut board = BoardEngine::new();
    let legal = board.legal_moves();

    let candidates = PositionEnumerator::enumerate(&mut board, 1).unwrap();
    assert_eq!(candidates.len(), legal.len());

    let mut seen = std::collections::HashSet::new();
    for candidate in &candidates {
        let mv = candidate.mv.expect("depth-1 candidates carry moves");
        assert!(seen.insert(mv), "duplicate candidate move {mv}");
        assert!(legal.contains(&mv));
        // Resulting position has the other side to move
        assert_eq!(candidate.position.side_to_move(), Color::Black);
    }
}

// ============================================================================
// History Replay
// ============================================================================

#[test]
fn test_replay_reproduces_every_prefix_of_a_game() {
    let mut session = SessionController::new(Color::White);
    let epoch = session.epoch();

    let game = ["e2e4", "e7e5", "g1f3", "b8c6", "f1b5", "a7a6"];
    for (i, mv) in game.iter().enumerate() {
        if i % 2 == 0 {
            session.submit_move(mv.parse().unwrap()).unwrap();
        } else {
            session
                .opponent_move_resolved(mv.parse().unwrap(), epoch)
                .unwrap();
        }
    }

    // Independent sequential application, never touching the session
    let mut independent = BoardEngine::new();
    for index in 0..session.history().len() {
        assert_eq!(
            session.replay(index).unwrap(),
            independent.current_position(),
            "replay({index}) diverged"
        );
        independent.apply_move(&session.history()[index]).unwrap();
    }

    // The live session was not disturbed by replaying
    assert_eq!(session.history().len(), game.len());
    assert_eq!(
        session.current_position(),
        independent.current_position()
    );
}

#[test]
fn test_replay_bounds_are_enforced() {
    let mut session = SessionController::new(Color::White);
    session.submit_move("e2e4".parse().unwrap()).unwrap();

    assert!(session.replay(0).is_ok());
    assert!(matches!(
        session.replay(1),
        Err(SessionError::IndexOutOfRange { index: 1, len: 1 })
    ));
}

// ============================================================================
// Replay Helper Consistency
// ============================================================================

#[test]
fn test_replayer_and_session_agree() {
    let history: Vec<_> = ["d2d4", "d7d5", "c2c4"]
        .iter()
        .map(|s| s.parse().unwrap())
        .collect();

    for index in 0..history.len() {
        let direct = HistoryReplayer::replay(&history, index).unwrap();
        let again = HistoryReplayer::replay(&history, index).unwrap();
        assert_eq!(direct, again, "replay must be deterministic");
    }
}
