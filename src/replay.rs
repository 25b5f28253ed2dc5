//! History replay
//!
//! Reconstructs any earlier position of a session by deterministic replay
//! from the initial position, on an independent scratch board. The live
//! session is never touched.

use crate::error::{SessionError, SessionResult};
use crate::rules::BoardEngine;
use crate::types::{Move, Position};

pub struct HistoryReplayer;

impl HistoryReplayer {
    /// Position after applying the first `index` moves of `history`
    ///
    /// `replay(0)` is the initial position. Valid indices are
    /// `0 <= index < history.len()`; anything else is
    /// [`SessionError::IndexOutOfRange`]. Same prefix, same position,
    /// always.
    pub fn replay(history: &[Move], index: usize) -> SessionResult<Position> {
        if index >= history.len() {
            return Err(SessionError::IndexOutOfRange {
                index,
                len: history.len(),
            });
        }

        let mut scratch = BoardEngine::new();
        for mv in &history[..index] {
            scratch.apply_move(mv)?;
        }
        Ok(scratch.current_position())
    }
}
