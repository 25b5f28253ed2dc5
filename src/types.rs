//! Core domain types shared across the session coordinator
//!
//! Defines the session's view of the game: colors, moves in coordinate
//! notation, opaque position snapshots, enumeration candidates, and the
//! game status taxonomy. Board knowledge itself (legality, check detection,
//! draw rules) lives behind [`crate::rules::BoardEngine`]; these types carry
//! no rules logic of their own.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use shakmaty::{Color as ShakColor, Role};

use crate::error::SessionError;

/// Algebraic board coordinate, one of 64 squares
pub use shakmaty::Square;

/// Side of the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// The other side
    pub fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "White"),
            Color::Black => write!(f, "Black"),
        }
    }
}

impl From<ShakColor> for Color {
    fn from(color: ShakColor) -> Self {
        match color {
            ShakColor::White => Color::White,
            ShakColor::Black => Color::Black,
        }
    }
}

impl From<Color> for ShakColor {
    fn from(color: Color) -> Self {
        match color {
            Color::White => ShakColor::White,
            Color::Black => ShakColor::Black,
        }
    }
}

/// Piece kind a pawn may promote to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Knight,
    Bishop,
    Rook,
    Queen,
}

impl PieceKind {
    /// Coordinate-notation suffix character ("e7e8q" style)
    pub fn notation(self) -> char {
        match self {
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
        }
    }

    fn from_notation(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'n' => Some(PieceKind::Knight),
            'b' => Some(PieceKind::Bishop),
            'r' => Some(PieceKind::Rook),
            'q' => Some(PieceKind::Queen),
            _ => None,
        }
    }
}

impl From<PieceKind> for Role {
    fn from(kind: PieceKind) -> Self {
        match kind {
            PieceKind::Knight => Role::Knight,
            PieceKind::Bishop => Role::Bishop,
            PieceKind::Rook => Role::Rook,
            PieceKind::Queen => Role::Queen,
        }
    }
}

impl TryFrom<Role> for PieceKind {
    type Error = SessionError;

    fn try_from(role: Role) -> Result<Self, Self::Error> {
        match role {
            Role::Knight => Ok(PieceKind::Knight),
            Role::Bishop => Ok(PieceKind::Bishop),
            Role::Rook => Ok(PieceKind::Rook),
            Role::Queen => Ok(PieceKind::Queen),
            other => Err(SessionError::IllegalMove {
                message: format!("{other:?} is not a promotion piece"),
            }),
        }
    }
}

/// A move in coordinate notation, meaningful only relative to a position
///
/// Parsed from and formatted as 4-5 character coordinate strings:
/// `"e2e4"`, `"e7e8q"`. Castling uses the king's from/to squares
/// (`"e1g1"`), matching the wire contract of the recommendation service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceKind>,
}

impl Move {
    pub fn new(from: Square, to: Square) -> Self {
        Move {
            from,
            to,
            promotion: None,
        }
    }

    /// Coordinate-notation string ("e2e4", "e7e8q")
    pub fn uci(&self) -> String {
        match self.promotion {
            Some(kind) => format!("{}{}{}", self.from, self.to, kind.notation()),
            None => format!("{}{}", self.from, self.to),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.uci())
    }
}

impl FromStr for Move {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let illegal = |s: &str| SessionError::IllegalMove {
            message: format!("unparseable move notation: {s:?}"),
        };

        if !s.is_ascii() || (s.len() != 4 && s.len() != 5) {
            return Err(illegal(s));
        }

        let from: Square = s[0..2].parse().map_err(|_| illegal(s))?;
        let to: Square = s[2..4].parse().map_err(|_| illegal(s))?;
        let promotion = match s.len() {
            5 => {
                let c = s.chars().nth(4).ok_or_else(|| illegal(s))?;
                Some(PieceKind::from_notation(c).ok_or_else(|| illegal(s))?)
            }
            _ => None,
        };

        Ok(Move {
            from,
            to,
            promotion,
        })
    }
}

/// Opaque, serialized snapshot of full board state
///
/// Wraps the FEN rendering of a position (piece placement, side to move,
/// castling rights, en passant square, move clocks). Immutable once
/// produced; equality is value equality of the serialized form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Position(String);

impl Position {
    pub(crate) fn from_fen_string(fen: String) -> Self {
        Position(fen)
    }

    /// The FEN string backing this snapshot
    pub fn fen(&self) -> &str {
        &self.0
    }

    /// Side to move, read from the FEN's second field
    pub fn side_to_move(&self) -> Color {
        match self.0.split_whitespace().nth(1) {
            Some("b") => Color::Black,
            _ => Color::White,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A move paired with the position reached by applying it
///
/// Produced only by [`crate::lookahead::PositionEnumerator`]; `mv` is `None`
/// only for the depth-0 base case, where `position` is the position under
/// consideration itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub mv: Option<Move>,
    pub position: Position,
}

/// Draw conditions reported by the rules library
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawKind {
    Stalemate,
    InsufficientMaterial,
    FiftyMoveRule,
    ThreefoldRepetition,
}

impl fmt::Display for DrawKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawKind::Stalemate => write!(f, "stalemate"),
            DrawKind::InsufficientMaterial => write!(f, "insufficient material"),
            DrawKind::FiftyMoveRule => write!(f, "fifty-move rule"),
            DrawKind::ThreefoldRepetition => write!(f, "threefold repetition"),
        }
    }
}

/// Game status after a move, evaluated in precedence order
///
/// Checkmate and draw are terminal; check is informational only and never
/// gates move submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Check,
    Checkmate,
    Draw(DrawKind),
}

impl GameStatus {
    /// Whether the game cannot continue from this status
    pub fn is_terminal(self) -> bool {
        matches!(self, GameStatus::Checkmate | GameStatus::Draw(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_roundtrip_plain() {
        let mv: Move = "e2e4".parse().expect("e2e4 should parse");
        assert_eq!(mv.from, Square::E2);
        assert_eq!(mv.to, Square::E4);
        assert_eq!(mv.promotion, None);
        assert_eq!(mv.uci(), "e2e4");
    }

    #[test]
    fn test_move_roundtrip_promotion() {
        let mv: Move = "e7e8q".parse().expect("e7e8q should parse");
        assert_eq!(mv.promotion, Some(PieceKind::Queen));
        assert_eq!(mv.uci(), "e7e8q");
    }

    #[test]
    fn test_move_rejects_garbage() {
        assert!("".parse::<Move>().is_err());
        assert!("e2".parse::<Move>().is_err());
        assert!("e2e9".parse::<Move>().is_err());
        assert!("e7e8k".parse::<Move>().is_err());
        assert!("e2e4e6".parse::<Move>().is_err());
    }

    #[test]
    fn test_color_opposite() {
        assert_eq!(Color::White.opposite(), Color::Black);
        assert_eq!(Color::Black.opposite(), Color::White);
    }

    #[test]
    fn test_position_side_to_move() {
        let start =
            Position::from_fen_string("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1".into());
        assert_eq!(start.side_to_move(), Color::White);

        let after_e4 = Position::from_fen_string(
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1".into(),
        );
        assert_eq!(after_e4.side_to_move(), Color::Black);
    }

    #[test]
    fn test_status_terminal_flags() {
        assert!(!GameStatus::InProgress.is_terminal());
        assert!(!GameStatus::Check.is_terminal());
        assert!(GameStatus::Checkmate.is_terminal());
        assert!(GameStatus::Draw(DrawKind::Stalemate).is_terminal());
    }
}
