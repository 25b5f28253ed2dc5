//! Candidate-position enumeration for the lookahead pipeline
//!
//! Walks the legal-move tree of the live board up to a bounded depth and
//! records every reached position as a [`Candidate`], without leaving any
//! net mutation behind. Every exploratory move is reverted by a drop guard,
//! so the board is restored even when enumeration aborts mid-walk.

use crate::error::SessionResult;
use crate::rules::BoardEngine;
use crate::types::Candidate;

/// Bounded, side-effect-free walk over reachable positions
///
/// Results are pre-order (parent before children) and preserve the rules
/// library's legal-move order at each ply. The result size is the number of
/// positions reachable along all paths up to the depth bound, not just the
/// first-ply move count.
pub struct PositionEnumerator;

impl PositionEnumerator {
    /// Enumerate candidates reachable within `depth` plies of the live position
    ///
    /// `depth == 0` is the base case: exactly one candidate holding the
    /// current position and no move. For `depth >= 1`, one candidate per
    /// reached position. Terminal positions are recorded but not descended
    /// into.
    ///
    /// The board is bit-identical before and after the call, on success and
    /// on error.
    pub fn enumerate(board: &mut BoardEngine, depth: u32) -> SessionResult<Vec<Candidate>> {
        let depth_before = board.ply();

        if depth == 0 {
            return Ok(vec![Candidate {
                mv: None,
                position: board.current_position(),
            }]);
        }

        let mut candidates = Vec::new();
        let walked = Self::walk(board, depth, &mut candidates);

        debug_assert_eq!(
            board.ply(),
            depth_before,
            "enumeration must leave the applied-move stack unchanged"
        );

        walked?;
        Ok(candidates)
    }

    fn walk(
        board: &mut BoardEngine,
        depth: u32,
        candidates: &mut Vec<Candidate>,
    ) -> SessionResult<()> {
        for mv in board.legal_moves() {
            let position = board.apply_move(&mv)?;

            // Undo happens on drop, covering early exits via `?` below
            let mut frame = UndoFrame::new(board);

            candidates.push(Candidate {
                mv: Some(mv),
                position,
            });

            if depth > 1 && !frame.board().status().is_terminal() {
                Self::walk(frame.board(), depth - 1, candidates)?;
            }
        }
        Ok(())
    }
}

/// Scoped apply/undo pair: reverts one applied move when dropped
struct UndoFrame<'a> {
    board: &'a mut BoardEngine,
}

impl<'a> UndoFrame<'a> {
    fn new(board: &'a mut BoardEngine) -> Self {
        UndoFrame { board }
    }

    fn board(&mut self) -> &mut BoardEngine {
        self.board
    }
}

impl Drop for UndoFrame<'_> {
    fn drop(&mut self) {
        self.board.undo_last_move();
    }
}
