//! Presentation boundary
//!
//! The shapes handed outward to whatever renders the session. Outputs only;
//! nothing here constrains how they are drawn.

use crate::session::controller::SessionController;
use crate::session::phase::SessionPhase;
use crate::types::{GameStatus, Square};

/// Renderable snapshot of the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionView {
    /// One-line status, e.g. "Black to move" or "Check! White to move"
    pub status_line: String,

    /// Set when the session is terminal, with the reason message
    pub game_over: Option<String>,

    /// Legal destination squares for the selected square, if any
    pub highlights: Vec<Square>,

    /// Move history in coordinate notation, oldest first
    pub moves: Vec<String>,

    /// Index of the most recently applied move, if any
    pub current_index: Option<usize>,
}

impl SessionController {
    /// Build the outward-facing view, optionally highlighting the legal
    /// destinations of a selected square
    pub fn view(&self, selected: Option<Square>) -> SessionView {
        let status_line = match self.status() {
            GameStatus::InProgress => format!("{} to move", self.turn()),
            GameStatus::Check => format!("Check! {} to move", self.turn()),
            GameStatus::Checkmate | GameStatus::Draw(_) => "Game over".to_string(),
        };

        let game_over = match self.phase() {
            SessionPhase::Terminal(reason) => Some(reason.message()),
            _ => None,
        };

        let highlights = match selected {
            Some(square) => self
                .legal_moves()
                .into_iter()
                .filter(|m| m.from == square)
                .map(|m| m.to)
                .collect(),
            None => Vec::new(),
        };

        SessionView {
            status_line,
            game_over,
            highlights,
            moves: self.history().iter().map(|m| m.uci()).collect(),
            current_index: self.history().len().checked_sub(1),
        }
    }
}
