//! Live board handle over the external rules library
//!
//! [`BoardEngine`] wraps `shakmaty::Chess` with a position stack. The top of
//! the stack is the live position; applying a move pushes, undoing pops.
//! This gives the lookahead enumerator a reversible board without cloning
//! whole engines per ply, and gives the replayer a cheap way to build an
//! independent scratch instance.

use shakmaty::fen::Fen;
use shakmaty::uci::UciMove;
use shakmaty::{CastlingMode, Chess, EnPassantMode, Position as _};

use crate::error::{SessionError, SessionResult};
use crate::types::{Color, DrawKind, GameStatus, Move, Position};

/// The live rules-engine state for one board
///
/// Invariant: the stack is never empty; index 0 is the position the engine
/// was seeded with. [`BoardEngine::undo_last_move`] never pops the seed.
#[derive(Debug, Clone)]
pub struct BoardEngine {
    stack: Vec<Chess>,
}

impl Default for BoardEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardEngine {
    /// Board seeded at the standard initial position
    pub fn new() -> Self {
        BoardEngine {
            stack: vec![Chess::default()],
        }
    }

    /// Board seeded from a FEN string
    pub fn from_fen(fen: &str) -> SessionResult<Self> {
        let parsed: Fen = fen.parse().map_err(|e| SessionError::InconsistentState {
            message: format!("unparseable FEN {fen:?}: {e}"),
        })?;
        let position: Chess =
            parsed
                .into_position(CastlingMode::Standard)
                .map_err(|e| SessionError::InconsistentState {
                    message: format!("FEN {fen:?} is not a playable position: {e}"),
                })?;
        Ok(BoardEngine {
            stack: vec![position],
        })
    }

    fn live(&self) -> &Chess {
        self.stack.last().expect("position stack is never empty")
    }

    /// Legal moves in the current position, in the order the rules library
    /// reports them (stable for a given position)
    pub fn legal_moves(&self) -> Vec<Move> {
        self.live()
            .legal_moves()
            .iter()
            .map(to_domain_move)
            .collect()
    }

    /// Apply a move to the live position
    ///
    /// Rejects with [`SessionError::IllegalMove`] when the move is not in
    /// the current legal-move set; the live position is untouched on error.
    pub fn apply_move(&mut self, mv: &Move) -> SessionResult<Position> {
        let legal = self
            .live()
            .legal_moves()
            .into_iter()
            .find(|m| to_domain_move(m) == *mv)
            .ok_or_else(|| SessionError::IllegalMove {
                message: format!("{mv} is not legal in the current position"),
            })?;

        let mut next = self.live().clone();
        next.play_unchecked(&legal);
        self.stack.push(next);
        Ok(self.current_position())
    }

    /// Revert the most recent applied move
    ///
    /// No-op at the seed position.
    pub fn undo_last_move(&mut self) {
        if self.stack.len() > 1 {
            self.stack.pop();
        }
    }

    /// Number of applied moves currently on the stack
    pub fn ply(&self) -> usize {
        self.stack.len() - 1
    }

    /// Snapshot of the live position
    pub fn current_position(&self) -> Position {
        Position::from_fen_string(
            Fen::from_position(self.live().clone(), EnPassantMode::Legal).to_string(),
        )
    }

    /// Side to move in the live position
    pub fn side_to_move(&self) -> Color {
        self.live().turn().into()
    }

    pub fn is_check(&self) -> bool {
        self.live().is_check()
    }

    pub fn is_checkmate(&self) -> bool {
        self.live().is_checkmate()
    }

    /// Whether any draw condition holds in the live position
    pub fn is_draw(&self) -> bool {
        self.draw_kind().is_some()
    }

    fn draw_kind(&self) -> Option<DrawKind> {
        let live = self.live();
        if live.is_stalemate() {
            Some(DrawKind::Stalemate)
        } else if live.is_insufficient_material() {
            Some(DrawKind::InsufficientMaterial)
        } else if live.halfmoves() >= 100 {
            Some(DrawKind::FiftyMoveRule)
        } else if self.is_threefold_repetition() {
            Some(DrawKind::ThreefoldRepetition)
        } else {
            None
        }
    }

    /// Threefold repetition over the positions on this stack
    ///
    /// Repetition compares piece placement, side to move, castling rights,
    /// and en passant square (the first four FEN fields), not the clocks.
    fn is_threefold_repetition(&self) -> bool {
        let key = repetition_key(self.live());
        let occurrences = self
            .stack
            .iter()
            .filter(|p| repetition_key(p) == key)
            .count();
        occurrences >= 3
    }

    /// Status of the live position, in precedence order:
    /// checkmate, then draw, then check, then normal play
    pub fn status(&self) -> GameStatus {
        if self.is_checkmate() {
            GameStatus::Checkmate
        } else if let Some(kind) = self.draw_kind() {
            GameStatus::Draw(kind)
        } else if self.is_check() {
            GameStatus::Check
        } else {
            GameStatus::InProgress
        }
    }
}

/// Map a rules-library move to the session's coordinate-notation form
///
/// Castling maps to the king's from/to squares, matching the wire contract.
fn to_domain_move(m: &shakmaty::Move) -> Move {
    match m.to_uci(CastlingMode::Standard) {
        UciMove::Normal {
            from,
            to,
            promotion,
        } => Move {
            from,
            to,
            promotion: promotion.and_then(|role| role.try_into().ok()),
        },
        // Put and Null never occur in standard chess legal-move output
        other => unreachable!("unexpected move form from rules library: {other}"),
    }
}

fn repetition_key(position: &Chess) -> String {
    let fen = Fen::from_position(position.clone(), EnPassantMode::Legal).to_string();
    fen.split_whitespace().take(4).collect::<Vec<_>>().join(" ")
}
